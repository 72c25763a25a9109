use std::collections::BTreeSet;

use log::{info, warn};
use polars::prelude::*;

use crate::error::ExplorerError;
use crate::schema::join;

/// Replicate each row once per comma-separated token in `list_column`.
///
/// The list column is replaced by `_tag`, holding one whitespace-trimmed
/// token per row. Row order is preserved, tokens in the order written.
/// A null tag cell or an empty token (e.g. `"fruit,,veg"` or `""`) is
/// rejected rather than silently producing an empty tag.
pub fn explode_tags(df: &DataFrame, list_column: &str) -> Result<DataFrame, ExplorerError> {
    let lists = df.column(list_column)?.str()?;

    let mut rows: Vec<IdxSize> = Vec::with_capacity(df.height());
    let mut tokens: Vec<String> = Vec::with_capacity(df.height());

    for i in 0..df.height() {
        let raw = lists.get(i).ok_or_else(|| {
            ExplorerError::InvalidData(format!("Row {} has no '{list_column}' value", i + 1))
        })?;
        for token in raw.split(',') {
            let token = token.trim();
            if token.is_empty() {
                return Err(ExplorerError::InvalidData(format!(
                    "Row {} has an empty tag in '{list_column}': {raw:?}",
                    i + 1
                )));
            }
            rows.push(i as IdxSize);
            tokens.push(token.to_string());
        }
    }

    let idx = IdxCa::from_vec("row".into(), rows);
    let mut exploded = df.drop(list_column)?.take(&idx)?;
    exploded.with_column(Column::new(join::TAG.into(), &tokens))?;
    Ok(exploded)
}

/// Distinct tag values of an exploded frame.
pub fn tag_set(df: &DataFrame) -> Result<BTreeSet<String>, ExplorerError> {
    Ok(df
        .column(join::TAG)?
        .str()?
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect())
}

/// Comparison of the tags used by foods and by views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagReport {
    pub food_tags: BTreeSet<String>,
    pub view_tags: BTreeSet<String>,
}

impl TagReport {
    /// Build from the exploded foods and views frames.
    pub fn from_frames(foods: &DataFrame, views: &DataFrame) -> Result<Self, ExplorerError> {
        Ok(Self {
            food_tags: tag_set(foods)?,
            view_tags: tag_set(views)?,
        })
    }

    pub fn all_tags(&self) -> BTreeSet<&str> {
        self.food_tags
            .union(&self.view_tags)
            .map(String::as_str)
            .collect()
    }

    /// Tags that only one side uses. These produce no joined rows.
    pub fn unmatched(&self) -> BTreeSet<&str> {
        self.food_tags
            .symmetric_difference(&self.view_tags)
            .map(String::as_str)
            .collect()
    }

    pub fn log(&self) {
        let all = self.all_tags();
        info!(
            "Found {} tags: {}",
            all.len(),
            all.iter().copied().collect::<Vec<_>>().join(", ")
        );

        let unmatched = self.unmatched();
        if !unmatched.is_empty() {
            warn!(
                "Found {} tags that only appear in one of the input files: {}",
                unmatched.len(),
                unmatched.iter().copied().collect::<Vec<_>>().join(", ")
            );
        }
    }
}

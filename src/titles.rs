use std::collections::HashMap;

use polars::prelude::*;

use crate::error::ExplorerError;
use crate::foods::{Food, FoodCatalog};
use crate::schema::{grapher, title};
use crate::template::Template;

/// Resolve the title placeholders of `text` against one food.
///
/// Only `food_singular`, `food_singular_lower`, `food_plural` and
/// `food_plural_lower` are recognized; anything else is an error.
pub fn resolve_title(text: &str, food: &Food) -> Result<String, ExplorerError> {
    let singular_lower = food.singular.to_lowercase();
    let plural_lower = food.plural.to_lowercase();
    let values = HashMap::from([
        (title::FOOD_SINGULAR, food.singular.as_str()),
        (title::FOOD_SINGULAR_LOWER, singular_lower.as_str()),
        (title::FOOD_PLURAL, food.plural.as_str()),
        (title::FOOD_PLURAL_LOWER, plural_lower.as_str()),
    ]);
    Template::new(text).substitute(&values)
}

/// Rewrite `title` and `subtitle` of every joined row for the row's food.
///
/// The food is looked up by `tableSlug`. A missing `subtitle` column or a
/// null subtitle cell is left alone. No other column is touched.
pub fn substitute_titles(df: &DataFrame, catalog: &FoodCatalog) -> Result<DataFrame, ExplorerError> {
    let slugs = df.column(grapher::TABLE_SLUG)?.str()?;
    let row_foods: Vec<&Food> = (0..df.height())
        .map(|i| {
            let slug = slugs.get(i).ok_or_else(|| {
                ExplorerError::InvalidData(format!("Grapher row {} has no tableSlug", i + 1))
            })?;
            catalog.get(slug).ok_or_else(|| {
                ExplorerError::InvalidData(format!("Unknown food slug '{slug}'"))
            })
        })
        .collect::<Result<_, _>>()?;

    let mut out = df.clone();
    for name in [grapher::TITLE, grapher::SUBTITLE] {
        if !df.schema().contains(name) {
            continue;
        }
        let texts = df.column(name)?.str()?;
        let resolved: Vec<Option<String>> = texts
            .into_iter()
            .zip(&row_foods)
            .map(|(text, food)| text.map(|t| resolve_title(t, food)).transpose())
            .collect::<Result<_, _>>()?;
        out.with_column(Column::new(name.into(), &resolved))?;
    }
    Ok(out)
}

use std::collections::HashMap;

use polars::prelude::*;

use crate::error::ExplorerError;
use crate::schema::template;
use crate::template::Template;

pub const BANNER: &str = "# DO NOT EDIT THIS FILE BY HAND. It is automatically generated using a set of input files. Any changes made directly to it will be overwritten.\n\n";

/// Serialize a frame as tab-separated text with a header row.
/// Nulls become empty fields; fields are quoted only when they must be.
pub fn to_tsv(df: &DataFrame) -> Result<String, ExplorerError> {
    let mut df = df.clone();
    let mut buf: Vec<u8> = Vec::new();
    CsvWriter::new(&mut buf)
        .include_header(true)
        .with_separator(b'\t')
        .finish(&mut df)?;
    String::from_utf8(buf)
        .map_err(|e| ExplorerError::InvalidData(format!("TSV output is not UTF-8: {e}")))
}

/// Prefix every line that holds more than whitespace.
pub fn indent(text: &str, prefix: &str) -> String {
    text.split_inclusive('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect()
}

/// The rendered pieces that go into the explorer template.
#[derive(Debug, Clone, Default)]
pub struct TemplateValues {
    pub graphers_tsv: String,
    pub table_defs: String,
    pub food_slugs: String,
}

/// Substitute the three explorer placeholders into `tpl`.
///
/// The template is trusted: other placeholders are left untouched. The
/// banner, when given, is prepended.
pub fn fill_template(tpl: &Template, values: &TemplateValues, banner: Option<&str>) -> String {
    let map = HashMap::from([
        (template::GRAPHERS_TSV, values.graphers_tsv.as_str()),
        (template::TABLE_DEFS, values.table_defs.as_str()),
        (template::FOOD_SLUGS, values.food_slugs.as_str()),
    ]);
    let body = tpl.safe_substitute(&map);
    match banner {
        Some(banner) => format!("{banner}{body}"),
        None => body,
    }
}

use std::collections::{BTreeSet, HashSet};

use polars::prelude::*;

use crate::error::ExplorerError;
use crate::schema::grapher;

/// Stable ascending sort by `Food Dropdown`; ties keep their join order.
pub fn sort_by_food(df: &DataFrame) -> Result<DataFrame, ExplorerError> {
    let sorted = df.sort(
        [grapher::FOOD_DROPDOWN],
        SortMultipleOptions::default()
            .with_maintain_order(true)
            .with_nulls_last(true),
    )?;
    Ok(sorted)
}

/// Remove rows identical in every column, keeping the first occurrence.
///
/// All columns must be string typed, which holds for frames read by the
/// loader.
pub fn drop_duplicate_rows(df: &DataFrame) -> Result<DataFrame, ExplorerError> {
    let columns: Vec<&StringChunked> = df
        .get_columns()
        .iter()
        .map(|c| c.str())
        .collect::<Result<_, _>>()?;

    let mut seen: HashSet<Vec<Option<&str>>> = HashSet::with_capacity(df.height());
    let mut keep: Vec<IdxSize> = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let row: Vec<Option<&str>> = columns.iter().map(|ca| ca.get(i)).collect();
        if seen.insert(row) {
            keep.push(i as IdxSize);
        }
    }

    if keep.len() == df.height() {
        return Ok(df.clone());
    }
    Ok(df.take(&IdxCa::from_vec("row".into(), keep))?)
}

/// Put `known` columns first, in that order, followed by every other column
/// sorted by name. Known columns missing from `df` are added as nulls.
pub fn reorder_columns(df: &DataFrame, known: &[&str]) -> Result<DataFrame, ExplorerError> {
    let present: BTreeSet<&str> = df.get_column_names_str().into_iter().collect();

    let missing: Vec<Expr> = known
        .iter()
        .filter(|name| !present.contains(*name))
        .map(|&name| lit(NULL).cast(DataType::String).alias(name))
        .collect();

    let order: Vec<Expr> = known
        .iter()
        .copied()
        .chain(present.iter().copied().filter(|c| !known.contains(c)))
        .map(col)
        .collect();

    let df = df
        .clone()
        .lazy()
        .with_columns(missing)
        .select(order)
        .collect()?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn strings(df: &DataFrame, name: &str) -> Vec<Option<String>> {
        df.column(name)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect()
    }

    #[test]
    fn sort_is_stable_within_a_food() {
        let df = df!(
            "title" => ["b1", "a1", "b2", "a2"],
            "Food Dropdown" => ["Bananas", "Apples", "Bananas", "Apples"],
        )
        .unwrap();
        let out = sort_by_food(&df).unwrap();
        assert_eq!(
            strings(&out, "title"),
            ["a1", "a2", "b1", "b2"].map(|s| Some(s.to_string()))
        );
    }

    #[test]
    fn duplicates_collapse_to_first() {
        let df = df!(
            "title" => ["A", "B", "A", "A"],
            "subtitle" => [Some("x"), Some("y"), Some("x"), None],
        )
        .unwrap();
        let out = drop_duplicate_rows(&df).unwrap();
        assert_eq!(out.height(), 3);
        assert_eq!(
            strings(&out, "subtitle"),
            [Some("x".to_string()), Some("y".to_string()), None]
        );
    }

    #[test]
    fn known_columns_lead_and_extras_are_sorted() {
        let df = df!(
            "zeta" => ["z"],
            "tableSlug" => ["apples"],
            "alpha" => ["a"],
            "title" => ["Production"],
        )
        .unwrap();
        let out = reorder_columns(&df, &["title", "Unit Radio", "tableSlug"]).unwrap();
        assert_eq!(
            out.get_column_names_str(),
            ["title", "Unit Radio", "tableSlug", "alpha", "zeta"]
        );
        assert_eq!(strings(&out, "Unit Radio"), [None]);
        assert_eq!(out.height(), 1);
    }

    fn frame(rows: &[(String, String)]) -> DataFrame {
        let titles: Vec<&str> = rows.iter().map(|(t, _)| t.as_str()).collect();
        let foods: Vec<&str> = rows.iter().map(|(_, f)| f.as_str()).collect();
        DataFrame::new(vec![
            Column::new("title".into(), &titles),
            Column::new("Food Dropdown".into(), &foods),
        ])
        .unwrap()
    }

    proptest! {
        #[test]
        fn dedup_is_idempotent(rows in prop::collection::vec(("[ab]", "[xy]"), 0..12)) {
            let once = drop_duplicate_rows(&frame(&rows)).unwrap();
            let twice = drop_duplicate_rows(&once).unwrap();
            prop_assert!(once.equals_missing(&twice));
        }

        #[test]
        fn known_order_is_independent_of_input_order(
            names in Just(vec!["ySlugs", "extra_b", "title", "extra_a", "Food Dropdown"])
                .prop_shuffle()
        ) {
            let columns: Vec<Column> = names
                .iter()
                .map(|&n| Column::new(n.into(), &["v"]))
                .collect();
            let df = DataFrame::new(columns).unwrap();
            let out = reorder_columns(&df, &grapher::COLUMN_ORDER).unwrap();

            let out_names = out.get_column_names_str();
            prop_assert_eq!(&out_names[..10], &grapher::COLUMN_ORDER[..]);
            prop_assert_eq!(&out_names[10..], &["extra_a", "extra_b"][..]);
        }
    }
}

use polars::prelude::*;

use crate::error::ExplorerError;
use crate::schema::join;

/// Inner-join exploded views with exploded foods.
///
/// The key is `_tag` plus every other column both frames carry (natural
/// join), so a view that names its `tableSlug` only matches that food.
/// Rows come out in view order, then food order within a view row. The
/// `_tag` column is kept; see [`drop_join_key`].
pub fn join_on_tags(views: &DataFrame, foods: &DataFrame) -> Result<DataFrame, ExplorerError> {
    let keys = shared_columns(views, foods);
    let on: Vec<Expr> = keys.iter().map(|c| col(c.as_str())).collect();

    let views = views.with_row_index(join::VIEW_ROW.into(), None)?;
    let foods = foods.with_row_index(join::FOOD_ROW.into(), None)?;

    let joined = views
        .lazy()
        .join(
            foods.lazy(),
            on.clone(),
            on,
            JoinArgs::new(JoinType::Inner),
        )
        .sort(
            [join::VIEW_ROW, join::FOOD_ROW],
            SortMultipleOptions::default().with_maintain_order(true),
        )
        .collect()?;

    Ok(joined.drop(join::VIEW_ROW)?.drop(join::FOOD_ROW)?)
}

/// Drop the `_tag` join key once it is no longer needed.
pub fn drop_join_key(df: &DataFrame) -> Result<DataFrame, ExplorerError> {
    Ok(df.drop(join::TAG)?)
}

/// Columns present in both frames, `_tag` first, then in `views` order.
fn shared_columns(views: &DataFrame, foods: &DataFrame) -> Vec<String> {
    let food_schema = foods.schema();
    let mut keys = vec![join::TAG.to_string()];
    keys.extend(
        views
            .get_column_names_str()
            .into_iter()
            .filter(|c| *c != join::TAG && food_schema.contains(c))
            .map(str::to_string),
    );
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::explode_tags;

    fn strings(df: &DataFrame, name: &str) -> Vec<Option<String>> {
        df.column(name)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect()
    }

    fn foods() -> DataFrame {
        let df = df!(
            "Food Dropdown" => ["Apples", "Bananas", "Carrots"],
            "tableSlug" => ["apples", "bananas", "carrots"],
            "_tags" => ["fruit", "fruit,tropical", "vegetable"],
        )
        .unwrap();
        explode_tags(&df, "_tags").unwrap()
    }

    #[test]
    fn joins_rows_sharing_a_tag() {
        let views = df!(
            "title" => ["Production", "Imports"],
            "_tags" => ["fruit", "tropical"],
        )
        .unwrap();
        let views = explode_tags(&views, "_tags").unwrap();

        let out = join_on_tags(&views, &foods()).unwrap();
        assert_eq!(
            strings(&out, "title"),
            [
                Some("Production".to_string()),
                Some("Production".to_string()),
                Some("Imports".to_string()),
            ]
        );
        assert_eq!(
            strings(&out, "tableSlug"),
            [
                Some("apples".to_string()),
                Some("bananas".to_string()),
                Some("bananas".to_string()),
            ]
        );
    }

    #[test]
    fn joined_tag_belongs_to_both_sides() {
        let views = df!(
            "title" => ["Production", "Yield"],
            "_tags" => ["fruit,vegetable", "tropical,grain"],
        )
        .unwrap();
        let views = explode_tags(&views, "_tags").unwrap();
        let foods = foods();

        let out = join_on_tags(&views, &foods).unwrap();
        let food_pairs: Vec<(Option<String>, Option<String>)> = strings(&foods, "tableSlug")
            .into_iter()
            .zip(strings(&foods, "_tag"))
            .collect();
        let view_pairs: Vec<(Option<String>, Option<String>)> = strings(&views, "title")
            .into_iter()
            .zip(strings(&views, "_tag"))
            .collect();

        let slugs = strings(&out, "tableSlug");
        let titles = strings(&out, "title");
        let tags = strings(&out, "_tag");
        assert_eq!(out.height(), 4);
        for i in 0..out.height() {
            assert!(food_pairs.contains(&(slugs[i].clone(), tags[i].clone())));
            assert!(view_pairs.contains(&(titles[i].clone(), tags[i].clone())));
        }
    }

    #[test]
    fn disjoint_tags_join_to_nothing() {
        let views = df!("title" => ["Production"], "_tags" => ["grain"]).unwrap();
        let views = explode_tags(&views, "_tags").unwrap();
        let out = join_on_tags(&views, &foods()).unwrap();
        assert_eq!(out.height(), 0);
    }

    #[test]
    fn view_table_slug_pins_the_food() {
        let views = df!(
            "title" => ["Apples only"],
            "tableSlug" => ["apples"],
            "_tags" => ["fruit"],
        )
        .unwrap();
        let views = explode_tags(&views, "_tags").unwrap();
        let out = join_on_tags(&views, &foods()).unwrap();
        assert_eq!(strings(&out, "Food Dropdown"), [Some("Apples".to_string())]);
    }

    #[test]
    fn drops_the_join_key() {
        let views = df!("title" => ["Production"], "_tags" => ["fruit"]).unwrap();
        let views = explode_tags(&views, "_tags").unwrap();
        let out = drop_join_key(&join_on_tags(&views, &foods()).unwrap()).unwrap();
        assert!(!out.get_column_names_str().contains(&"_tag"));
        assert_eq!(out.height(), 2);
    }
}

use std::collections::HashMap;

use polars::prelude::*;

use crate::error::ExplorerError;
use crate::schema::{foods, grapher};

/// One row of the foods table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Food {
    pub slug: String,
    pub dropdown: String,
    pub singular: String,
    pub plural: String,
    /// Raw comma-separated tag list, exploded later.
    pub tags: String,
}

/// Foods in file order, indexed by slug.
#[derive(Debug, Clone, Default)]
pub struct FoodCatalog {
    foods: Vec<Food>,
    by_slug: HashMap<String, usize>,
}

impl FoodCatalog {
    /// Build typed records from a foods frame.
    ///
    /// Required columns: slug, dropdown, singular, plural, _tags.
    /// Every required cell must be present and slugs must be unique.
    pub fn from_frame(df: &DataFrame) -> Result<Self, ExplorerError> {
        let slug = df.column(foods::SLUG)?.str()?;
        let dropdown = df.column(foods::DROPDOWN)?.str()?;
        let singular = df.column(foods::SINGULAR)?.str()?;
        let plural = df.column(foods::PLURAL)?.str()?;
        let tags = df.column(foods::TAGS)?.str()?;

        let cell = |ca: &StringChunked, column: &str, i: usize| -> Result<String, ExplorerError> {
            ca.get(i).map(str::to_string).ok_or_else(|| {
                ExplorerError::InvalidData(format!(
                    "Foods table has an empty '{column}' at row {}",
                    i + 1
                ))
            })
        };

        let mut catalog = Self::default();
        for i in 0..df.height() {
            catalog.push(Food {
                slug: cell(slug, foods::SLUG, i)?,
                dropdown: cell(dropdown, foods::DROPDOWN, i)?,
                singular: cell(singular, foods::SINGULAR, i)?,
                plural: cell(plural, foods::PLURAL, i)?,
                tags: cell(tags, foods::TAGS, i)?,
            })?;
        }
        Ok(catalog)
    }

    pub fn push(&mut self, food: Food) -> Result<(), ExplorerError> {
        if self.by_slug.contains_key(&food.slug) {
            return Err(ExplorerError::InvalidData(format!(
                "Duplicate food slug '{}'",
                food.slug
            )));
        }
        self.by_slug.insert(food.slug.clone(), self.foods.len());
        self.foods.push(food);
        Ok(())
    }

    pub fn get(&self, slug: &str) -> Option<&Food> {
        self.by_slug.get(slug).map(|&i| &self.foods[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Food> {
        self.foods.iter()
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    /// Frame joined against the views: dropdown label, table slug, tag list.
    pub fn to_join_frame(&self) -> Result<DataFrame, ExplorerError> {
        let dropdowns: Vec<&str> = self.foods.iter().map(|f| f.dropdown.as_str()).collect();
        let slugs: Vec<&str> = self.foods.iter().map(|f| f.slug.as_str()).collect();
        let tags: Vec<&str> = self.foods.iter().map(|f| f.tags.as_str()).collect();

        let df = DataFrame::new(vec![
            Column::new(grapher::FOOD_DROPDOWN.into(), &dropdowns),
            Column::new(grapher::TABLE_SLUG.into(), &slugs),
            Column::new(foods::TAGS.into(), &tags),
        ])?;
        Ok(df)
    }

    /// One `table` definition line per food, newline-joined.
    pub fn table_defs(&self, catalog_url: &str) -> String {
        self.foods
            .iter()
            .map(|f| table_def(&f.slug, catalog_url))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// All food slugs, tab-joined.
    pub fn food_slugs(&self) -> String {
        self.foods
            .iter()
            .map(|f| f.slug.as_str())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

pub fn food_url(slug: &str, catalog_url: &str) -> String {
    format!("{}/{slug}.csv", catalog_url.trim_end_matches('/'))
}

pub fn table_def(slug: &str, catalog_url: &str) -> String {
    format!("table\t{}\t{slug}", food_url(slug, catalog_url))
}

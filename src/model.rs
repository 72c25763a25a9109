use std::fs::{self, File};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use polars::prelude::*;

use crate::config::ExplorerConfig;
use crate::error::ExplorerError;
use crate::foods::FoodCatalog;
use crate::graphers::{drop_duplicate_rows, reorder_columns, sort_by_food};
use crate::join::{drop_join_key, join_on_tags};
use crate::render::{fill_template, indent, to_tsv, TemplateValues, BANNER};
use crate::schema::{foods, grapher, template, views};
use crate::tags::{explode_tags, TagReport};
use crate::template::Template;
use crate::titles::substitute_titles;

/// The generated grapher table and the tag comparison behind it.
#[derive(Debug, Clone)]
pub struct Graphers {
    pub table: DataFrame,
    pub tags: TagReport,
}

/// Loads the explorer inputs, builds the grapher table and writes the
/// explorer file.
pub struct ExplorerModel {
    config: ExplorerConfig,
}

impl ExplorerModel {
    pub fn new(config: ExplorerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    // ── Data loading ────────────────────────────────────────────────────────

    pub fn load_template(&self) -> Result<Template, ExplorerError> {
        let path = self.config.template_path();
        let text = fs::read_to_string(&path)
            .map_err(|source| ExplorerError::Input { path, source })?;
        Ok(Template::new(text))
    }

    /// Load the foods table.
    ///
    /// Required columns: slug, dropdown, singular, plural, _tags.
    /// Other columns are ignored.
    pub fn load_foods(&self) -> Result<FoodCatalog, ExplorerError> {
        let raw = read_tsv_as_strings(&self.config.foods_path())?;
        require_columns(&raw, &foods::REQUIRED)?;
        let catalog = FoodCatalog::from_frame(&raw)?;
        info!("Read {} foods", catalog.len());
        Ok(catalog)
    }

    /// Load the views table.
    ///
    /// Required columns: title, _tags.
    /// All other columns are carried into the output as strings.
    pub fn load_views(&self) -> Result<DataFrame, ExplorerError> {
        let raw = read_tsv_as_strings(&self.config.views_path())?;
        require_columns(&raw, &views::REQUIRED)?;
        info!("Read {} different views", raw.height());
        Ok(raw)
    }

    // ── Grapher table ───────────────────────────────────────────────────────

    /// Join every view with every food it shares a tag with, resolve titles,
    /// sort by food, drop duplicates and normalize the column order.
    pub fn build_graphers(
        catalog: &FoodCatalog,
        views: &DataFrame,
    ) -> Result<Graphers, ExplorerError> {
        let food_rows = explode_tags(&catalog.to_join_frame()?, foods::TAGS)?;
        let view_rows = explode_tags(views, views::TAGS)?;

        let tags = TagReport::from_frames(&food_rows, &view_rows)?;
        tags.log();

        let joined = join_on_tags(&view_rows, &food_rows)?;
        debug!("Joined {} view/food rows", joined.height());

        let table = substitute_titles(&joined, catalog)?;
        let table = drop_join_key(&table)?;
        let table = sort_by_food(&table)?;
        let table = drop_duplicate_rows(&table)?;
        let table = reorder_columns(&table, &grapher::COLUMN_ORDER)?;

        info!("Generated {} views", table.height());
        Ok(Graphers { table, tags })
    }

    // ── Output ──────────────────────────────────────────────────────────────

    /// Render the explorer file text.
    pub fn render(
        &self,
        tpl: &Template,
        catalog: &FoodCatalog,
        graphers: &DataFrame,
    ) -> Result<String, ExplorerError> {
        let names = tpl.placeholders();
        for expected in [
            template::GRAPHERS_TSV,
            template::TABLE_DEFS,
            template::FOOD_SLUGS,
        ] {
            if !names.contains(expected) {
                warn!("Template has no ${{{expected}}} placeholder");
            }
        }

        let values = TemplateValues {
            graphers_tsv: indent(&to_tsv(graphers)?, "\t"),
            table_defs: catalog.table_defs(&self.config.catalog_url),
            food_slugs: catalog.food_slugs(),
        };
        let banner = self.config.banner.then_some(BANNER);
        Ok(fill_template(tpl, &values, banner))
    }

    /// Write the explorer file, creating missing parent directories.
    pub fn write(&self, text: &str) -> Result<PathBuf, ExplorerError> {
        let path = self.config.output_path();
        let to_output_error = |source| ExplorerError::Output {
            path: path.clone(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(to_output_error)?;
        }
        fs::write(&path, text).map_err(to_output_error)?;
        Ok(path)
    }

    /// Run the whole pipeline. Nothing is written unless every stage succeeds.
    pub fn run(&self) -> Result<PathBuf, ExplorerError> {
        let tpl = self.load_template()?;
        let catalog = self.load_foods()?;
        let views = self.load_views()?;

        let graphers = Self::build_graphers(&catalog, &views)?;
        let text = self.render(&tpl, &catalog, &graphers.table)?;

        let path = self.write(&text)?;
        info!("Explorer config written to {}", path.display());
        Ok(path)
    }
}

// ── Private helpers ─────────────────────────────────────────────────────────

/// Read a tab-separated file with all columns as String dtype.
/// Trims whitespace from column names; empty fields become nulls.
fn read_tsv_as_strings(path: &Path) -> Result<DataFrame, ExplorerError> {
    let file = File::open(path).map_err(|source| ExplorerError::Input {
        path: path.to_path_buf(),
        source,
    })?;

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0)) // all columns as String
        .map_parse_options(|opts| opts.with_separator(b'\t'))
        .into_reader_with_file_handle(file)
        .finish()?;

    let trimmed: Vec<String> = df
        .get_column_names_str()
        .iter()
        .map(|c| c.trim().to_string())
        .collect();
    df.set_column_names(trimmed.as_slice())?;

    Ok(df)
}

fn require_columns(df: &DataFrame, required: &[&str]) -> Result<(), ExplorerError> {
    for &col_name in required {
        if df.column(col_name).is_err() {
            return Err(ExplorerError::MissingColumn(col_name.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foods::Food;

    fn catalog(foods: &[(&str, &str, &str)]) -> FoodCatalog {
        let mut catalog = FoodCatalog::default();
        for &(slug, name, tags) in foods {
            catalog
                .push(Food {
                    slug: slug.into(),
                    dropdown: format!("{name}s"),
                    singular: name.into(),
                    plural: format!("{name}s"),
                    tags: tags.into(),
                })
                .unwrap();
        }
        catalog
    }

    fn titles(df: &DataFrame) -> Vec<Option<String>> {
        df.column("title")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect()
    }

    #[test]
    fn single_food_single_view() {
        let views = df!(
            "tableSlug" => ["apples"],
            "title" => ["Number of ${food_plural}"],
            "_tags" => ["fruit"],
        )
        .unwrap();
        let graphers =
            ExplorerModel::build_graphers(&catalog(&[("apples", "Apple", "fruit")]), &views)
                .unwrap();

        assert_eq!(graphers.table.height(), 1);
        assert_eq!(titles(&graphers.table), [Some("Number of Apples".to_string())]);
        assert!(graphers.tags.unmatched().is_empty());
    }

    #[test]
    fn disjoint_tags_yield_no_rows_and_a_mismatch() {
        let views = df!(
            "title" => ["Number of ${food_plural}"],
            "_tags" => ["vegetable"],
        )
        .unwrap();
        let graphers =
            ExplorerModel::build_graphers(&catalog(&[("apples", "Apple", "fruit")]), &views)
                .unwrap();

        assert_eq!(graphers.table.height(), 0);
        assert_eq!(
            graphers.tags.unmatched().into_iter().collect::<Vec<_>>(),
            ["fruit", "vegetable"]
        );
    }

    #[test]
    fn multi_tag_view_yields_one_row_per_food() {
        let views = df!(
            "title" => ["Production of ${food_plural_lower}"],
            "_tags" => ["fruit,tropical"],
        )
        .unwrap();
        let foods = catalog(&[
            ("apples", "Apple", "fruit"),
            ("mangoes", "Mango", "tropical"),
            ("bananas", "Banana", "fruit, tropical"),
        ]);
        let graphers = ExplorerModel::build_graphers(&foods, &views).unwrap();

        assert_eq!(
            titles(&graphers.table),
            [
                Some("Production of apples".to_string()),
                Some("Production of bananas".to_string()),
                Some("Production of mangos".to_string()),
            ]
        );
    }

    #[test]
    fn output_columns_start_with_known_order() {
        let views = df!(
            "zExtra" => ["z"],
            "Unit Radio" => ["Tonnes"],
            "title" => ["${food_singular}"],
            "_tags" => ["fruit"],
        )
        .unwrap();
        let graphers =
            ExplorerModel::build_graphers(&catalog(&[("apples", "Apple", "fruit")]), &views)
                .unwrap();

        let mut expected: Vec<&str> = grapher::COLUMN_ORDER.to_vec();
        expected.push("zExtra");
        assert_eq!(graphers.table.get_column_names_str(), expected);
    }

    #[test]
    fn missing_required_column_is_named() {
        let df = df!("title" => ["x"]).unwrap();
        let err = require_columns(&df, &views::REQUIRED).unwrap_err();
        assert!(matches!(err, ExplorerError::MissingColumn(name) if name == "_tags"));
    }
}

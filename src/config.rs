use std::path::{Path, PathBuf};

pub const DEFAULT_TEMPLATE: &str = "global-food-explorer.template.tsv";
pub const DEFAULT_FOODS: &str = "foods.tsv";
pub const DEFAULT_VIEWS: &str = "views-per-food.tsv";
pub const DEFAULT_OUTPUT: &str = "../../explorers/global-food-prototype.explorer.tsv";
pub const DEFAULT_CATALOG_URL: &str =
    "https://owid-catalog.nyc3.digitaloceanspaces.com/garden/explorers/2021/food_explorer";

/// Where the generator reads its inputs and writes the explorer file.
///
/// Relative paths resolve against `base_path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerConfig {
    pub base_path: PathBuf,
    pub template: PathBuf,
    pub foods: PathBuf,
    pub views: PathBuf,
    pub output: PathBuf,
    /// Base URL of the per-food CSV tables referenced by `table` lines.
    pub catalog_url: String,
    /// Prepend the "do not edit" banner to the output.
    pub banner: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("."),
            template: PathBuf::from(DEFAULT_TEMPLATE),
            foods: PathBuf::from(DEFAULT_FOODS),
            views: PathBuf::from(DEFAULT_VIEWS),
            output: PathBuf::from(DEFAULT_OUTPUT),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            banner: true,
        }
    }
}

impl ExplorerConfig {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            ..Default::default()
        }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.base_path.join(path)
    }

    pub fn template_path(&self) -> PathBuf {
        self.resolve(&self.template)
    }

    pub fn foods_path(&self) -> PathBuf {
        self.resolve(&self.foods)
    }

    pub fn views_path(&self) -> PathBuf {
        self.resolve(&self.views)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output)
    }
}

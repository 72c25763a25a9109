//! Generator for the global food explorer configuration.
//!
//! Joins a foods table with a views table on shared tags, resolves the
//! per-food titles and writes the resulting grapher table into the explorer
//! template.

pub mod config;
pub mod error;
pub mod foods;
pub mod graphers;
pub mod join;
pub mod model;
pub mod render;
pub mod schema;
pub mod tags;
pub mod template;
pub mod titles;

pub use config::ExplorerConfig;
pub use error::ExplorerError;
pub use foods::{Food, FoodCatalog};
pub use model::{ExplorerModel, Graphers};
pub use tags::TagReport;
pub use template::Template;

//! Command-line interface for the food explorer generator.
//!
//! Usage:
//!   food-explorer [--base-path <dir>] [-o <output>]   - Generate the explorer file
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use food_explorer::config::{
    DEFAULT_CATALOG_URL, DEFAULT_FOODS, DEFAULT_OUTPUT, DEFAULT_TEMPLATE, DEFAULT_VIEWS,
};
use food_explorer::{ExplorerConfig, ExplorerModel};
use log::{error, LevelFilter};

#[derive(Parser, Debug)]
#[command(
    name = "food-explorer",
    version,
    about = "Generate the global food explorer config from a template, foods and views"
)]
struct Cli {
    /// Directory that relative input and output paths are resolved against
    #[arg(long, default_value = ".")]
    base_path: PathBuf,

    /// Explorer template with ${graphers_tsv}, ${table_defs} and ${food_slugs}
    #[arg(long, default_value = DEFAULT_TEMPLATE)]
    template: PathBuf,

    /// Foods table (slug, dropdown, singular, plural, _tags)
    #[arg(long, default_value = DEFAULT_FOODS)]
    foods: PathBuf,

    /// Views table (title, subtitle, config columns, _tags)
    #[arg(long, default_value = DEFAULT_VIEWS)]
    views: PathBuf,

    /// Explorer file to write
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Base URL of the per-food CSV tables
    #[arg(long, default_value = DEFAULT_CATALOG_URL)]
    catalog_url: String,

    /// Do not prepend the "do not edit" banner
    #[arg(long)]
    no_banner: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    fn into_config(self) -> ExplorerConfig {
        ExplorerConfig {
            base_path: self.base_path,
            template: self.template,
            foods: self.foods,
            views: self.views,
            output: self.output,
            catalog_url: self.catalog_url,
            banner: !self.no_banner,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.level())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let model = ExplorerModel::new(cli.into_config());
    if let Err(e) = model.run() {
        error!("{e}");
        std::process::exit(1);
    }
}

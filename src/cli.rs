use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::MealCategory;

/// Meal Wizard - order a meal step by step
#[derive(Parser)]
#[command(name = "mealwizard")]
#[command(about = "A guided meal-order wizard with a terminal interface")]
#[command(version)]
pub struct Cli {
    /// Log level used when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive order wizard
    Order {
        /// Wizard configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Catalog file, overrides the configured catalog
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Check an order file by walking it through every wizard step
    Validate {
        /// Order file (JSON, same shape as the wizard form)
        order: PathBuf,

        /// Wizard configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Catalog file, overrides the configured catalog
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Show the options the wizard would offer
    Catalog {
        /// Meal to list restaurants for
        #[arg(short, long)]
        meal: Option<MealCategory>,

        /// Restaurant to list dishes for (requires --meal)
        #[arg(short, long, requires = "meal")]
        restaurant: Option<String>,

        /// Catalog file, defaults to the built-in catalog
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

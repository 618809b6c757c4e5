//! Meal Wizard - Main entry point
//!
//! Runs the interactive wizard, or one of the headless commands.

use anyhow::{Context, Result};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Write, stdout};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use mealwizard::app::App;
use mealwizard::cli::{Cli, Commands};
use mealwizard::{
    Catalog, FormData, JsonSink, MealCategory, MealWizardError, OrderSink, WizardConfig,
    WizardController, WizardError,
};

/// Initialize logging. `RUST_LOG` wins over `--log-level`; output goes to
/// stderr so it never mixes with orders written to stdout.
fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Main application entry point
fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(&cli.log_level);
    info!("Meal Wizard starting up");

    match cli.command {
        Some(Commands::Order { config, catalog }) => {
            run_tui(config.as_deref(), catalog.as_deref())?;
        }
        Some(Commands::Validate {
            order,
            config,
            catalog,
        }) => {
            if !validate_order(&order, config.as_deref(), catalog.as_deref())? {
                std::process::exit(1);
            }
        }
        Some(Commands::Catalog {
            meal,
            restaurant,
            catalog,
        }) => {
            show_catalog(meal, restaurant.as_deref(), catalog)?;
        }
        None => {
            info!("No command specified, launching the wizard");
            run_tui(None, None)?;
        }
    }

    Ok(())
}

/// Load and check the wizard configuration, falling back to defaults
fn load_config(path: Option<&Path>) -> Result<WizardConfig> {
    let config = match path {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            WizardConfig::load_from_file(path)?
        }
        None => WizardConfig::default(),
    };
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn build_wizard(config_path: Option<&Path>, catalog_path: Option<&Path>) -> Result<WizardController> {
    let config = load_config(config_path)?;
    let catalog = config.load_catalog(catalog_path)?;
    debug!("Catalog holds {} dish record(s)", catalog.len());
    Ok(WizardController::from_config(Arc::new(catalog), &config))
}

/// Run the interactive wizard, then print submitted orders as JSON
fn run_tui(config_path: Option<&Path>, catalog_path: Option<&Path>) -> Result<()> {
    let wizard = build_wizard(config_path, catalog_path)?;

    debug!("Initializing terminal for TUI mode");
    enable_raw_mode()
        .map_err(|e| MealWizardError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    crossterm::execute!(stdout(), EnterAlternateScreen).map_err(|e| {
        MealWizardError::terminal(format!("Failed to enter alternate screen: {}", e))
    })?;

    let mut app = App::new(wizard);
    let backend = CrosstermBackend::new(stdout());
    let result = match Terminal::new(backend) {
        Ok(mut terminal) => app.run(&mut terminal),
        Err(e) => Err(MealWizardError::terminal(format!("Failed to create terminal: {}", e)).into()),
    };

    // Cleanup terminal (always attempt cleanup, even if app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), LeaveAlternateScreen);
    result?;

    let orders = app.into_orders();
    info!("Session ended with {} submitted order(s)", orders.len());
    let mut sink = JsonSink::new(stdout().lock());
    for order in &orders {
        sink.accept(order)?;
    }
    Ok(())
}

/// Walk an order file through every step. Returns whether it was accepted.
fn validate_order(
    order_path: &Path,
    config_path: Option<&Path>,
    catalog_path: Option<&Path>,
) -> Result<bool> {
    let mut wizard = build_wizard(config_path, catalog_path)?;
    let form = FormData::load_from_file(order_path)
        .with_context(|| format!("Failed to load order from {:?}", order_path))?;

    match wizard.replay(form) {
        Ok(order) => {
            info!("Order file {:?} is valid", order_path);
            let mut out = stdout().lock();
            for line in order.summary_lines() {
                writeln!(out, "{}", line)?;
            }
            writeln!(out)?;
            JsonSink::new(out).accept(&order)?;
            Ok(true)
        }
        Err(WizardError::ValidationFailed { step, report }) => {
            error!("Order rejected at step {}", step.step_number());
            eprintln!("Order rejected at step {} ({}):", step.step_number(), step);
            for (field, err) in report.iter() {
                eprintln!("  {}: {}", field, err.message);
            }
            Ok(false)
        }
        Err(e) => {
            error!("Order rejected: {}", e);
            eprintln!("Order rejected: {}", e);
            Ok(false)
        }
    }
}

/// Print meals, restaurants or dishes the wizard would offer
fn show_catalog(
    meal: Option<MealCategory>,
    restaurant: Option<&str>,
    catalog_path: Option<PathBuf>,
) -> Result<()> {
    let catalog = WizardConfig {
        catalog: catalog_path,
        ..Default::default()
    }
    .load_catalog(None)?;
    let mut out = stdout().lock();

    match (meal, restaurant) {
        (Some(meal), Some(restaurant)) => {
            for dish in catalog.list_dishes(meal, restaurant) {
                writeln!(out, "{}", dish)?;
            }
        }
        (Some(meal), None) => {
            for name in catalog.list_restaurants(meal) {
                writeln!(out, "{}", name)?;
            }
        }
        _ => print_meal_overview(&catalog, &mut out)?,
    }
    Ok(())
}

fn print_meal_overview(catalog: &Catalog, out: &mut impl Write) -> Result<()> {
    for meal in MealCategory::ALL {
        let restaurants = catalog.list_restaurants(meal);
        writeln!(out, "{} ({} restaurants)", meal, restaurants.len())?;
        for name in restaurants {
            writeln!(out, "  {}", name)?;
        }
    }
    Ok(())
}

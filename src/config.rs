//! Wizard configuration file handling
//!
//! The configuration decides where the catalog comes from, which meals the
//! wizard offers and how stale downstream selections are handled. It is stored
//! as JSON; every field is optional in the file and falls back to its default.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::catalog::Catalog;
use crate::types::{MealCategory, StaleSelectionPolicy};

/// Settings for one wizard session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Catalog JSON file; the built-in catalog is used when unset
    pub catalog: Option<PathBuf>,
    /// Meals offered on the first step, in display order
    pub meals: Vec<MealCategory>,
    /// Policy for selections invalidated by an upstream change
    pub stale_selections: StaleSelectionPolicy,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            meals: MealCategory::ALL.to_vec(),
            stale_selections: StaleSelectionPolicy::Preserve,
        }
    }
}

impl WizardConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.meals.is_empty() {
            anyhow::bail!("At least one meal must be offered");
        }

        let mut seen = HashSet::new();
        if let Some(meal) = self.meals.iter().find(|m| !seen.insert(**m)) {
            anyhow::bail!("Meal '{}' is listed more than once", meal);
        }

        if let Some(path) = &self.catalog {
            if path.as_os_str().is_empty() {
                anyhow::bail!("Catalog path must not be empty");
            }
        }

        Ok(())
    }

    /// Load the configured catalog, or the built-in one.
    ///
    /// `override_path` (from the command line) wins over the configured path.
    pub fn load_catalog(&self, override_path: Option<&Path>) -> Result<Catalog> {
        match override_path.or(self.catalog.as_deref()) {
            Some(path) => Catalog::load_from_file(path),
            None => {
                info!("Using built-in catalog");
                Catalog::builtin()
            }
        }
    }
}

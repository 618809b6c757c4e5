//! Error handling module for the meal wizard
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Module-level errors (`WizardError`, `CatalogError`) convert into
//! `MealWizardError` at the application boundary.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::wizard::WizardError;

/// Main error type for the meal wizard
#[derive(Error, Debug)]
pub enum MealWizardError {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors (loading, parsing, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reference data errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Rejected wizard operations
    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for meal wizard operations
pub type Result<T> = std::result::Result<T, MealWizardError>;

impl MealWizardError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }
}

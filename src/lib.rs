//! Meal Wizard Library
//!
//! A multi-step meal-order wizard: pick a meal and party size, a restaurant
//! serving that meal, then dishes from that restaurant, and review before
//! submitting. Every step is validated before the wizard moves forward.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod components;
pub mod config;
pub mod error;
pub mod form;
pub mod order;
pub mod selector;
pub mod theme;
pub mod types;
pub mod ui;
pub mod validation;
pub mod wizard;

// Re-export main types for convenience
pub use catalog::{Catalog, CatalogError, DishRecord};
pub use config::WizardConfig;
pub use error::{MealWizardError, Result};
pub use form::{FormData, OrderLine};
pub use order::{IncompleteOrder, JsonSink, Order, OrderItem, OrderSink};
pub use selector::{StaleSelections, StepOptions, dish_options, restaurant_options};
pub use types::{MealCategory, StaleSelectionPolicy};
pub use validation::{
    ErrorKind, FieldError, FieldKey, ValidationReport, validate_field, validate_field_offering,
    validate_step, validate_step_offering,
};
pub use wizard::{Advance, WizardController, WizardError, WizardStep};

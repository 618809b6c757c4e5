//! Wizard working state
//!
//! `FormData` accumulates the user's choices as they move through the wizard.
//! Every field starts unset; nothing here enforces validity, that is the
//! validator's job at transition time.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::Result;
use crate::types::MealCategory;

/// One dish row: a dish name and a serving count, either possibly unset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub number_of_dish: Option<u32>,
}

impl OrderLine {
    pub fn new(name: impl Into<String>, number_of_dish: u32) -> Self {
        Self {
            name: Some(name.into()),
            number_of_dish: Some(number_of_dish),
        }
    }

    /// The dish name, if set and not blank
    pub fn dish_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Servings counted toward the total; unset counts as zero
    pub fn servings(&self) -> u64 {
        u64::from(self.number_of_dish.unwrap_or(0))
    }
}

/// In-progress order data collected across the wizard steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    #[serde(default)]
    pub meal: Option<MealCategory>,
    #[serde(default)]
    pub number_of_people: Option<u32>,
    #[serde(default)]
    pub restaurant: Option<String>,
    #[serde(default)]
    pub dishes: Vec<OrderLine>,
}

impl FormData {
    /// Load a (possibly partial) form from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let form: Self = serde_json::from_str(&content)?;
        debug!(
            "Loaded form from {:?} with {} dish row(s)",
            path.as_ref(),
            form.dishes.len()
        );
        Ok(form)
    }

    /// The selected restaurant, if set and not blank
    pub fn restaurant_name(&self) -> Option<&str> {
        self.restaurant.as_deref().filter(|r| !r.is_empty())
    }

    /// Sum of serving counts over all rows
    pub fn total_servings(&self) -> u64 {
        self.dishes.iter().map(OrderLine::servings).sum()
    }

    /// Whether two rows share the same non-empty dish name
    pub fn has_duplicate_dishes(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.dishes
            .iter()
            .filter_map(OrderLine::dish_name)
            .any(|name| !seen.insert(name))
    }
}

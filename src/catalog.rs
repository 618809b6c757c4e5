//! Dish catalog
//!
//! Read-only reference data mapping dishes to the restaurants and meals that
//! offer them. The catalog is built once per session and never mutated.
//!
//! # Lookups
//!
//! Both lookups are total: unknown restaurants or meals nobody serves produce
//! an empty list, never an error. Results are distinct and keep the insertion
//! order of the first matching record.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::types::MealCategory;

/// Bundled sample catalog, used when no catalog file is configured
const BUILTIN_CATALOG: &str = include_str!("../data/dishes.json");

/// One dish offered by one restaurant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishRecord {
    pub id: u32,
    pub name: String,
    pub restaurant: String,
    pub available_meals: BTreeSet<MealCategory>,
}

impl DishRecord {
    /// Whether this dish is served for `meal`
    pub fn serves(&self, meal: MealCategory) -> bool {
        self.available_meals.contains(&meal)
    }
}

/// Reference data that cannot form a usable catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Dish id {id} appears more than once")]
    DuplicateId { id: u32 },

    #[error("Dish {id} has a blank name")]
    BlankName { id: u32 },

    #[error("Dish {id} has a blank restaurant")]
    BlankRestaurant { id: u32 },

    #[error("Dish {id} ({name}) is not offered for any meal")]
    NoMeals { id: u32, name: String },
}

/// Immutable list of dish records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<DishRecord>,
}

impl Catalog {
    /// Build a catalog, rejecting records that would break lookups.
    pub fn new(records: Vec<DishRecord>) -> std::result::Result<Self, CatalogError> {
        let mut seen_ids = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen_ids.insert(record.id) {
                return Err(CatalogError::DuplicateId { id: record.id });
            }
            if record.name.trim().is_empty() {
                return Err(CatalogError::BlankName { id: record.id });
            }
            if record.restaurant.trim().is_empty() {
                return Err(CatalogError::BlankRestaurant { id: record.id });
            }
            if record.available_meals.is_empty() {
                return Err(CatalogError::NoMeals {
                    id: record.id,
                    name: record.name.clone(),
                });
            }
        }

        Ok(Self { records })
    }

    /// The sample catalog compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG).context("Built-in catalog is invalid")
    }

    /// Parse a JSON array of dish records
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<DishRecord> =
            serde_json::from_str(json).context("Failed to parse catalog JSON")?;
        let catalog = Self::new(records)?;
        debug!("Parsed catalog with {} dishes", catalog.len());
        Ok(catalog)
    }

    /// Load a catalog from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog from {:?}", path.as_ref()))?;

        let catalog = Self::from_json(&content)
            .with_context(|| format!("Invalid catalog in {:?}", path.as_ref()))?;
        info!("Loaded {} dishes from {:?}", catalog.len(), path.as_ref());

        Ok(catalog)
    }

    pub fn records(&self) -> &[DishRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct restaurants serving at least one dish for `meal`
    pub fn list_restaurants(&self, meal: MealCategory) -> Vec<String> {
        distinct(
            self.records
                .iter()
                .filter(|d| d.serves(meal))
                .map(|d| d.restaurant.as_str()),
        )
    }

    /// Distinct dish names `restaurant` serves for `meal`
    pub fn list_dishes(&self, meal: MealCategory, restaurant: &str) -> Vec<String> {
        distinct(
            self.records
                .iter()
                .filter(|d| d.serves(meal) && d.restaurant == restaurant)
                .map(|d| d.name.as_str()),
        )
    }

    /// Whether `restaurant` serves anything for `meal`
    pub fn offers(&self, meal: MealCategory, restaurant: &str) -> bool {
        self.records
            .iter()
            .any(|d| d.serves(meal) && d.restaurant == restaurant)
    }

    /// Every restaurant in the catalog, regardless of meal
    pub fn restaurant_names(&self) -> Vec<String> {
        distinct(self.records.iter().map(|d| d.restaurant.as_str()))
    }
}

/// Collect distinct values, keeping first-occurrence order
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

//! Type-safe selection types for the meal wizard
//!
//! Closed sets of choices are modelled as enums so that parsing, display and
//! iteration all come from one definition.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Meal category, the first selection axis of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MealCategory {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealCategory {
    /// All meal categories in declared order
    pub const ALL: [MealCategory; 3] = [Self::Breakfast, Self::Lunch, Self::Dinner];
}

/// What to do with downstream selections when an upstream field changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StaleSelectionPolicy {
    /// Keep stale restaurant/dish selections; validation rejects them later
    #[default]
    Preserve,
    /// Unset selections that are no longer in their option set
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_meal_display() {
        assert_eq!(MealCategory::Breakfast.to_string(), "breakfast");
        assert_eq!(MealCategory::Lunch.to_string(), "lunch");
        assert_eq!(MealCategory::Dinner.to_string(), "dinner");
    }

    #[test]
    fn test_meal_parsing() {
        assert_eq!(MealCategory::from_str("lunch").unwrap(), MealCategory::Lunch);
        assert!(MealCategory::from_str("brunch").is_err());
    }

    #[test]
    fn test_meal_iteration_matches_all() {
        let meals: Vec<MealCategory> = MealCategory::iter().collect();
        assert_eq!(meals, MealCategory::ALL.to_vec());
    }

    #[test]
    fn test_meal_serde_lowercase() {
        let json = serde_json::to_string(&MealCategory::Dinner).unwrap();
        assert_eq!(json, "\"dinner\"");
        let parsed: MealCategory = serde_json::from_str("\"breakfast\"").unwrap();
        assert_eq!(parsed, MealCategory::Breakfast);
    }

    #[test]
    fn test_stale_policy_default_is_preserve() {
        assert_eq!(StaleSelectionPolicy::default(), StaleSelectionPolicy::Preserve);
        assert_eq!(StaleSelectionPolicy::Clear.to_string(), "clear");
    }
}

//! Cascading option sets
//!
//! Pure derivations of what the user may pick at each step, given the catalog
//! and the selections made so far. Unset upstream selections yield empty
//! option lists.

use crate::catalog::Catalog;
use crate::form::FormData;
use crate::types::MealCategory;

/// Restaurants serving `meal`, or nothing when no meal is chosen
pub fn restaurant_options(catalog: &Catalog, meal: Option<MealCategory>) -> Vec<String> {
    match meal {
        Some(meal) => catalog.list_restaurants(meal),
        None => Vec::new(),
    }
}

/// Dishes `restaurant` serves for `meal`, or nothing when either is unset
pub fn dish_options(
    catalog: &Catalog,
    meal: Option<MealCategory>,
    restaurant: Option<&str>,
) -> Vec<String> {
    match (meal, restaurant) {
        (Some(meal), Some(restaurant)) => catalog.list_dishes(meal, restaurant),
        _ => Vec::new(),
    }
}

/// Option lists for every step, as shown to the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOptions {
    /// Meals offered by this session
    pub meals: Vec<MealCategory>,
    /// Restaurants valid for the selected meal
    pub restaurants: Vec<String>,
    /// Dishes valid for the selected meal and restaurant, shared by all rows
    pub dishes: Vec<String>,
}

impl StepOptions {
    /// Derive all option lists from scratch.
    pub fn derive(catalog: &Catalog, meals: &[MealCategory], form: &FormData) -> Self {
        Self {
            meals: meals.to_vec(),
            restaurants: restaurant_options(catalog, form.meal),
            dishes: dish_options(catalog, form.meal, form.restaurant_name()),
        }
    }

    /// Recompute after the meal changed (restaurants and dishes both depend on it)
    pub fn on_meal_changed(&mut self, catalog: &Catalog, form: &FormData) {
        self.restaurants = restaurant_options(catalog, form.meal);
        self.on_restaurant_changed(catalog, form);
    }

    /// Recompute after the restaurant changed
    pub fn on_restaurant_changed(&mut self, catalog: &Catalog, form: &FormData) {
        self.dishes = dish_options(catalog, form.meal, form.restaurant_name());
    }
}

/// Downstream selections that are no longer in their option sets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaleSelections {
    /// The restaurant is set but does not serve the selected meal
    pub restaurant: bool,
    /// Indices of rows whose dish name is not currently available
    pub dish_rows: Vec<usize>,
}

impl StaleSelections {
    pub fn is_empty(&self) -> bool {
        !self.restaurant && self.dish_rows.is_empty()
    }
}

/// Find selections made earlier that the current options no longer allow.
pub fn stale_selections(options: &StepOptions, form: &FormData) -> StaleSelections {
    let restaurant = form
        .restaurant_name()
        .is_some_and(|r| !options.restaurants.iter().any(|o| o == r));

    let dish_rows = form
        .dishes
        .iter()
        .enumerate()
        .filter_map(|(i, line)| {
            let name = line.dish_name()?;
            (!options.dishes.iter().any(|o| o == name)).then_some(i)
        })
        .collect();

    StaleSelections {
        restaurant,
        dish_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DishRecord;
    use crate::form::OrderLine;

    fn catalog() -> Catalog {
        use MealCategory::*;
        let dish = |id, name: &str, restaurant: &str, meals: &[MealCategory]| DishRecord {
            id,
            name: name.to_string(),
            restaurant: restaurant.to_string(),
            available_meals: meals.iter().copied().collect(),
        };
        Catalog::new(vec![
            dish(1, "Pancakes", "Early Bird", &[Breakfast]),
            dish(2, "Soup", "Deli", &[Lunch, Dinner]),
            dish(3, "Salad", "Deli", &[Lunch]),
            dish(4, "Steak", "Grill", &[Dinner]),
        ])
        .unwrap()
    }

    #[test]
    fn test_unset_meal_gives_no_restaurants() {
        assert!(restaurant_options(&catalog(), None).is_empty());
    }

    #[test]
    fn test_dish_options_need_both_selections() {
        let catalog = catalog();
        assert!(dish_options(&catalog, Some(MealCategory::Lunch), None).is_empty());
        assert!(dish_options(&catalog, None, Some("Deli")).is_empty());
        assert_eq!(
            dish_options(&catalog, Some(MealCategory::Lunch), Some("Deli")),
            vec!["Soup", "Salad"]
        );
    }

    #[test]
    fn test_derive_and_recompute() {
        let catalog = catalog();
        let mut form = FormData {
            meal: Some(MealCategory::Lunch),
            restaurant: Some("Deli".to_string()),
            ..Default::default()
        };
        let mut options = StepOptions::derive(&catalog, &MealCategory::ALL, &form);
        assert_eq!(options.restaurants, vec!["Deli"]);
        assert_eq!(options.dishes, vec!["Soup", "Salad"]);

        form.meal = Some(MealCategory::Dinner);
        options.on_meal_changed(&catalog, &form);
        assert_eq!(options.restaurants, vec!["Deli", "Grill"]);
        assert_eq!(options.dishes, vec!["Soup"]);
    }

    #[test]
    fn test_stale_selections_after_meal_change() {
        let catalog = catalog();
        let form = FormData {
            meal: Some(MealCategory::Breakfast),
            restaurant: Some("Deli".to_string()),
            dishes: vec![OrderLine::new("Soup", 1), OrderLine::default()],
            ..Default::default()
        };
        let options = StepOptions::derive(&catalog, &MealCategory::ALL, &form);
        let stale = stale_selections(&options, &form);
        assert!(stale.restaurant);
        assert_eq!(stale.dish_rows, vec![0]);
    }

    #[test]
    fn test_no_stale_selections_when_consistent() {
        let catalog = catalog();
        let form = FormData {
            meal: Some(MealCategory::Dinner),
            restaurant: Some("Grill".to_string()),
            dishes: vec![OrderLine::new("Steak", 2)],
            ..Default::default()
        };
        let options = StepOptions::derive(&catalog, &MealCategory::ALL, &form);
        assert!(stale_selections(&options, &form).is_empty());
    }
}

//! Property-Based Tests for the meal wizard
//!
//! Uses proptest for testing invariants over generated catalogs and forms.
//!
//! These tests verify:
//! - Enum string round-trips (parse -> to_string -> parse)
//! - Catalog lookups return distinct, correctly filtered names
//! - Validation is pure and agrees with the wizard's gating

use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;

use mealwizard::{
    Catalog, DishRecord, FieldKey, FormData, MealCategory, OrderLine, WizardController, WizardStep,
    validate_step,
};

// =============================================================================
// MealCategory Enum Property Tests
// =============================================================================

fn meal_strategy() -> impl Strategy<Value = MealCategory> {
    prop_oneof![
        Just(MealCategory::Breakfast),
        Just(MealCategory::Lunch),
        Just(MealCategory::Dinner),
    ]
}

proptest! {
    /// MealCategory: to_string -> parse round-trip is identity
    #[test]
    fn meal_roundtrip(meal in meal_strategy()) {
        let s = meal.to_string();
        let parsed: MealCategory = s.parse().expect("Should parse");
        prop_assert_eq!(meal, parsed);
        prop_assert_eq!(s.clone(), s.to_lowercase());
    }
}

// =============================================================================
// Catalog Property Tests
// =============================================================================

const RESTAURANTS: &[&str] = &["Alpha", "Bravo", "Charlie", "Delta"];
const DISHES: &[&str] = &["Soup", "Salad", "Pasta", "Rice", "Bread", "Stew"];
/// Row names, including a blank one
const ROW_NAMES: &[&str] = &["", "Soup", "Salad", "Pasta"];

/// Strategy for a small catalog with overlapping names
fn catalog_strategy() -> impl Strategy<Value = Vec<DishRecord>> {
    prop::collection::vec(
        (
            prop::sample::select(DISHES),
            prop::sample::select(RESTAURANTS),
            prop::collection::btree_set(meal_strategy(), 1..=3),
        ),
        0..20,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, restaurant, meals))| DishRecord {
                id: i as u32 + 1,
                name: name.to_string(),
                restaurant: restaurant.to_string(),
                available_meals: meals,
            })
            .collect()
    })
}

proptest! {
    /// list_restaurants returns exactly the restaurants with a dish for the meal, once each
    #[test]
    fn restaurants_are_distinct_and_correct(records in catalog_strategy(), meal in meal_strategy()) {
        let catalog = Catalog::new(records.clone()).unwrap();
        let listed = catalog.list_restaurants(meal);

        let unique: BTreeSet<&String> = listed.iter().collect();
        prop_assert_eq!(unique.len(), listed.len());

        let expected: BTreeSet<String> = records
            .iter()
            .filter(|r| r.available_meals.contains(&meal))
            .map(|r| r.restaurant.clone())
            .collect();
        let got: BTreeSet<String> = listed.into_iter().collect();
        prop_assert_eq!(got, expected);
    }

    /// list_dishes only returns dishes of that restaurant for that meal
    #[test]
    fn dishes_filter_on_meal_and_restaurant(
        records in catalog_strategy(),
        meal in meal_strategy(),
        restaurant in prop::sample::select(RESTAURANTS),
    ) {
        let catalog = Catalog::new(records.clone()).unwrap();
        let listed = catalog.list_dishes(meal, restaurant);

        let unique: BTreeSet<&String> = listed.iter().collect();
        prop_assert_eq!(unique.len(), listed.len());
        for name in &listed {
            prop_assert!(records.iter().any(|r|
                &r.name == name && r.restaurant == restaurant && r.available_meals.contains(&meal)
            ));
        }
        prop_assert_eq!(listed.is_empty(), !catalog.offers(meal, restaurant));
    }
}

// =============================================================================
// Validation Property Tests
// =============================================================================

fn line_strategy() -> impl Strategy<Value = OrderLine> {
    (
        prop::option::of(prop::sample::select(ROW_NAMES)),
        prop::option::of(0u32..5),
    )
        .prop_map(|(name, number_of_dish)| OrderLine {
            name: name.map(str::to_string),
            number_of_dish,
        })
}

proptest! {
    /// Empty names never count as duplicates
    #[test]
    fn blank_rows_are_never_duplicates(count in 0usize..6) {
        let form = FormData {
            dishes: vec![OrderLine { name: Some(String::new()), number_of_dish: Some(1) }; count],
            ..Default::default()
        };
        prop_assert!(!form.has_duplicate_dishes());
    }

    /// The aggregate rule reports exactly when the servings fall short
    #[test]
    fn servings_rule_matches_totals(
        people in 1u32..=10,
        dishes in prop::collection::vec(line_strategy(), 1..5),
    ) {
        let catalog = Catalog::builtin().unwrap();
        let form = FormData {
            meal: Some(MealCategory::Lunch),
            number_of_people: Some(people),
            restaurant: Some("Vege Deli".to_string()),
            dishes,
        };
        let report = validate_step(WizardStep::Dishes, &form, &catalog);
        let short = form.total_servings() < u64::from(people);
        let aggregate = report
            .get(FieldKey::Dishes)
            .is_some_and(|e| e.message.starts_with("Total servings"));
        prop_assert_eq!(aggregate, short);
    }

    /// validate_step is pure: running it twice gives the same report
    #[test]
    fn validation_is_idempotent(dishes in prop::collection::vec(line_strategy(), 0..5)) {
        let catalog = Catalog::builtin().unwrap();
        let form = FormData {
            meal: Some(MealCategory::Dinner),
            number_of_people: Some(2),
            restaurant: Some("Olive Garden".to_string()),
            dishes,
        };
        let first = validate_step(WizardStep::Dishes, &form, &catalog);
        let second = validate_step(WizardStep::Dishes, &form, &catalog);
        prop_assert_eq!(first, second);
    }

    /// The first step passes exactly when a meal is chosen and the party size is in range
    #[test]
    fn first_step_gate(meal in prop::option::of(meal_strategy()), people in prop::option::of(0u32..15)) {
        let mut wizard = WizardController::new(Arc::new(Catalog::builtin().unwrap()));
        wizard.select_meal(meal).unwrap();
        wizard.set_number_of_people(people).unwrap();

        let expected = meal.is_some() && people.is_some_and(|n| (1..=10).contains(&n));
        prop_assert_eq!(wizard.next().is_ok(), expected);
        let moved = wizard.current_step() == WizardStep::Restaurant;
        prop_assert_eq!(moved, expected);
    }
}

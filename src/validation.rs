//! Step validation
//!
//! Validation rules are plain data: every field owns an ordered table of
//! [`Rule`]s, and evaluation stops at the first rule that fails. A step's
//! result is a [`ValidationReport`] holding at most one message per field.
//!
//! # Rule tables
//!
//! | Step | Field | Rules, in order |
//! |------|-------|-----------------|
//! | 0 | `meal` | required, offered this session |
//! | 0 | `numberOfPeople` | required, within 1..=10 |
//! | 1 | `restaurant` | required, serves the selected meal |
//! | 2 | `dishes` | non-empty, enough servings, no duplicates |
//! | 2 | `dishes[i].name` | required, available at the restaurant |
//! | 2 | `dishes[i].numberOfDish` | required, at least 1 |
//! | 3 | `order` | complete order |

use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::Catalog;
use crate::form::{FormData, OrderLine};
use crate::order::Order;
use crate::types::MealCategory;
use crate::wizard::WizardStep;

/// Smallest accepted party size
pub const MIN_PEOPLE: u32 = 1;
/// Largest accepted party size
pub const MAX_PEOPLE: u32 = 10;
/// Smallest accepted serving count for a dish row
pub const MIN_SERVINGS: u32 = 1;

/// Category of a validation failure. All of them are user-correctable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required field is unset
    RequiredFieldMissing,
    /// A value is outside the set allowed by upstream selections
    ValueNotInAllowedSet,
    /// A rule spanning several rows is violated (total servings)
    AggregateConstraintViolated,
    /// The same dish appears in more than one row
    DuplicateValue,
}

/// A validated field of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    Meal,
    NumberOfPeople,
    Restaurant,
    /// The dish list as a whole (aggregate rules)
    Dishes,
    DishName(usize),
    DishServings(usize),
    /// The complete order, checked on the review step
    Order,
}

impl FieldKey {
    /// Row index for per-row fields
    pub fn row(self) -> Option<usize> {
        match self {
            Self::DishName(i) | Self::DishServings(i) => Some(i),
            _ => None,
        }
    }

    /// The wizard step this field belongs to
    pub fn step(self) -> WizardStep {
        match self {
            Self::Meal | Self::NumberOfPeople => WizardStep::MealAndParty,
            Self::Restaurant => WizardStep::Restaurant,
            Self::Dishes | Self::DishName(_) | Self::DishServings(_) => WizardStep::Dishes,
            Self::Order => WizardStep::Review,
        }
    }

    /// Same field kind, different row
    pub(crate) fn with_row(self, row: usize) -> Self {
        match self {
            Self::DishName(_) => Self::DishName(row),
            Self::DishServings(_) => Self::DishServings(row),
            other => other,
        }
    }

    /// Current value of this field rendered for messages
    pub fn value(self, form: &FormData) -> Option<String> {
        match self {
            Self::Meal => form.meal.map(|m| m.to_string()),
            Self::NumberOfPeople => form.number_of_people.map(|n| n.to_string()),
            Self::Restaurant => form.restaurant.clone(),
            Self::Dishes | Self::Order => None,
            Self::DishName(i) => form.dishes.get(i).and_then(|l| l.name.clone()),
            Self::DishServings(i) => form
                .dishes
                .get(i)
                .and_then(|l| l.number_of_dish)
                .map(|n| n.to_string()),
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Meal => write!(f, "meal"),
            Self::NumberOfPeople => write!(f, "numberOfPeople"),
            Self::Restaurant => write!(f, "restaurant"),
            Self::Dishes => write!(f, "dishes"),
            Self::DishName(i) => write!(f, "dishes[{}].name", i),
            Self::DishServings(i) => write!(f, "dishes[{}].numberOfDish", i),
            Self::Order => write!(f, "order"),
        }
    }
}

/// The first violated rule of one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub kind: ErrorKind,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Everything a rule may look at
pub struct RuleContext<'a> {
    pub form: &'a FormData,
    pub catalog: &'a Catalog,
    /// Meals the session offers
    pub meals: &'a [MealCategory],
    pub field: FieldKey,
}

impl RuleContext<'_> {
    /// The dish row this field belongs to, if any
    pub fn line(&self) -> Option<&OrderLine> {
        self.field.row().and_then(|i| self.form.dishes.get(i))
    }
}

/// A predicate with the failure it reports
#[derive(Clone, Copy)]
pub struct Rule {
    pub kind: ErrorKind,
    /// Returns true when the rule is satisfied
    pub check: fn(&RuleContext<'_>) -> bool,
    /// Message template; `{value}` is replaced with the field's value
    pub message: &'static str,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl Rule {
    const fn new(kind: ErrorKind, check: fn(&RuleContext<'_>) -> bool, message: &'static str) -> Self {
        Self {
            kind,
            check,
            message,
        }
    }

    fn render(&self, ctx: &RuleContext<'_>) -> String {
        if self.message.contains("{value}") {
            let value = ctx.field.value(ctx.form).unwrap_or_default();
            self.message.replace("{value}", &value)
        } else {
            self.message.to_string()
        }
    }
}

// ============================================================================
// Rule tables
// ============================================================================

const MEAL_RULES: &[Rule] = &[
    Rule::new(
        ErrorKind::RequiredFieldMissing,
        |ctx| ctx.form.meal.is_some(),
        "Meal is required",
    ),
    Rule::new(
        ErrorKind::ValueNotInAllowedSet,
        |ctx| ctx.form.meal.is_some_and(|meal| ctx.meals.contains(&meal)),
        "Meal is not offered: {value}",
    ),
];

const PEOPLE_RULES: &[Rule] = &[
    Rule::new(
        ErrorKind::RequiredFieldMissing,
        |ctx| ctx.form.number_of_people.is_some(),
        "number of people is required",
    ),
    Rule::new(
        ErrorKind::ValueNotInAllowedSet,
        |ctx| {
            ctx.form
                .number_of_people
                .is_some_and(|n| (MIN_PEOPLE..=MAX_PEOPLE).contains(&n))
        },
        "number of people must be between 1 and 10",
    ),
];

const RESTAURANT_RULES: &[Rule] = &[
    Rule::new(
        ErrorKind::RequiredFieldMissing,
        |ctx| ctx.form.restaurant_name().is_some(),
        "Restaurant is required",
    ),
    Rule::new(
        ErrorKind::ValueNotInAllowedSet,
        restaurant_serves_meal,
        "Restaurant is not available for {value}",
    ),
];

const DISHES_RULES: &[Rule] = &[
    Rule::new(
        ErrorKind::RequiredFieldMissing,
        |ctx| !ctx.form.dishes.is_empty(),
        "Dishes are required",
    ),
    Rule::new(
        ErrorKind::AggregateConstraintViolated,
        |ctx| ctx.form.total_servings() >= u64::from(ctx.form.number_of_people.unwrap_or(0)),
        "Total servings should be greater than or equal to number of people",
    ),
    Rule::new(
        ErrorKind::DuplicateValue,
        |ctx| !ctx.form.has_duplicate_dishes(),
        "Dish should not be duplicate",
    ),
];

const DISH_NAME_RULES: &[Rule] = &[
    Rule::new(
        ErrorKind::RequiredFieldMissing,
        |ctx| ctx.line().and_then(OrderLine::dish_name).is_some(),
        "Dish is required",
    ),
    Rule::new(ErrorKind::ValueNotInAllowedSet, dish_is_available, "Dish is not available"),
];

const DISH_SERVINGS_RULES: &[Rule] = &[
    Rule::new(
        ErrorKind::RequiredFieldMissing,
        |ctx| ctx.line().is_some_and(|l| l.number_of_dish.is_some()),
        "Number of servings is required",
    ),
    Rule::new(
        ErrorKind::ValueNotInAllowedSet,
        |ctx| {
            ctx.line()
                .and_then(|l| l.number_of_dish)
                .is_some_and(|n| n >= MIN_SERVINGS)
        },
        "Number of servings must be at least 1",
    ),
];

const ORDER_RULES: &[Rule] = &[Rule::new(
    ErrorKind::RequiredFieldMissing,
    |ctx| Order::try_from(ctx.form).is_ok(),
    "Order is incomplete",
)];

fn restaurant_serves_meal(ctx: &RuleContext<'_>) -> bool {
    match (ctx.form.meal, ctx.form.restaurant_name()) {
        (Some(meal), Some(restaurant)) => ctx
            .catalog
            .list_restaurants(meal)
            .iter()
            .any(|r| r == restaurant),
        _ => false,
    }
}

fn dish_is_available(ctx: &RuleContext<'_>) -> bool {
    let Some(name) = ctx.line().and_then(OrderLine::dish_name) else {
        return false;
    };
    match (ctx.form.meal, ctx.form.restaurant_name()) {
        (Some(meal), Some(restaurant)) => ctx
            .catalog
            .list_dishes(meal, restaurant)
            .iter()
            .any(|d| d == name),
        _ => false,
    }
}

// ============================================================================
// Evaluation
// ============================================================================

/// Ordered rules for `field`
pub fn rules_for(field: FieldKey) -> &'static [Rule] {
    match field {
        FieldKey::Meal => MEAL_RULES,
        FieldKey::NumberOfPeople => PEOPLE_RULES,
        FieldKey::Restaurant => RESTAURANT_RULES,
        FieldKey::Dishes => DISHES_RULES,
        FieldKey::DishName(_) => DISH_NAME_RULES,
        FieldKey::DishServings(_) => DISH_SERVINGS_RULES,
        FieldKey::Order => ORDER_RULES,
    }
}

/// Fields validated on `step`, in display order
pub fn step_fields(step: WizardStep, form: &FormData) -> Vec<FieldKey> {
    match step {
        WizardStep::MealAndParty => vec![FieldKey::Meal, FieldKey::NumberOfPeople],
        WizardStep::Restaurant => vec![FieldKey::Restaurant],
        WizardStep::Dishes => {
            let mut fields = Vec::with_capacity(1 + 2 * form.dishes.len());
            fields.push(FieldKey::Dishes);
            for i in 0..form.dishes.len() {
                fields.push(FieldKey::DishName(i));
                fields.push(FieldKey::DishServings(i));
            }
            fields
        }
        WizardStep::Review => vec![FieldKey::Order],
    }
}

/// Evaluate one field's rules with every meal offered; the first failure wins.
pub fn validate_field(field: FieldKey, form: &FormData, catalog: &Catalog) -> Option<FieldError> {
    validate_field_offering(field, form, catalog, &MealCategory::ALL)
}

/// Evaluate one field's rules for a session offering `meals`.
pub fn validate_field_offering(
    field: FieldKey,
    form: &FormData,
    catalog: &Catalog,
    meals: &[MealCategory],
) -> Option<FieldError> {
    let ctx = RuleContext {
        form,
        catalog,
        meals,
        field,
    };
    rules_for(field)
        .iter()
        .find(|rule| !(rule.check)(&ctx))
        .map(|rule| FieldError {
            kind: rule.kind,
            message: rule.render(&ctx),
        })
}

/// Run exactly the rules of `step` against `form`, with every meal offered.
pub fn validate_step(step: WizardStep, form: &FormData, catalog: &Catalog) -> ValidationReport {
    validate_step_offering(step, form, catalog, &MealCategory::ALL)
}

/// Run exactly the rules of `step` for a session offering `meals`.
pub fn validate_step_offering(
    step: WizardStep,
    form: &FormData,
    catalog: &Catalog,
    meals: &[MealCategory],
) -> ValidationReport {
    let mut report = ValidationReport::default();
    for field in step_fields(step, form) {
        if let Some(error) = validate_field_offering(field, form, catalog, meals) {
            report.insert(field, error);
        }
    }
    report
}

/// Per-field validation results, at most one message per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: BTreeMap<FieldKey, FieldError>,
}

impl ValidationReport {
    /// True when no rule failed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: FieldKey) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    /// Kind of the failure recorded for `field`
    pub fn kind(&self, field: FieldKey) -> Option<ErrorKind> {
        self.get(field).map(|e| e.kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &FieldError)> {
        self.errors.iter().map(|(k, v)| (*k, v))
    }

    pub(crate) fn insert(&mut self, field: FieldKey, error: FieldError) {
        self.errors.insert(field, error);
    }

    pub(crate) fn remove(&mut self, field: FieldKey) {
        self.errors.remove(&field);
    }

    /// Store the outcome of re-validating `field`
    pub(crate) fn set(&mut self, field: FieldKey, outcome: Option<FieldError>) {
        match outcome {
            Some(error) => self.insert(field, error),
            None => self.remove(field),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.errors.clear();
    }

    /// Drop the errors of a removed row and shift later rows down by one.
    pub(crate) fn remove_row(&mut self, row: usize) {
        let errors = std::mem::take(&mut self.errors);
        self.errors = errors
            .into_iter()
            .filter_map(|(field, error)| match field.row() {
                Some(i) if i == row => None,
                Some(i) if i > row => Some((field.with_row(i - 1), error)),
                _ => Some((field, error)),
            })
            .collect();
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, error)?;
            first = false;
        }
        Ok(())
    }
}

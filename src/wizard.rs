//! Order wizard state machine
//!
//! The [`WizardController`] is the single owner of the wizard's position and
//! working data. Forward transitions are gated by the current step's
//! validation rules; backward transitions are unconditional.
//!
//! # Step Flow
//!
//! ```text
//! MealAndParty -> Restaurant -> Dishes -> Review -> (submitted)
//! ```
//!
//! - `next()` validates only the current step
//! - `previous()` never validates
//! - a field only changes while its own step is current
//! - once submitted, the controller rejects every operation except `reset()`

use std::fmt;
use std::sync::Arc;
use strum::EnumIter;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::config::WizardConfig;
use crate::form::{FormData, OrderLine};
use crate::order::{IncompleteOrder, Order, OrderSink};
use crate::selector::{self, StaleSelections, StepOptions};
use crate::types::{MealCategory, StaleSelectionPolicy};
use crate::validation::{self, FieldKey, ValidationReport};

/// Position in the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, EnumIter)]
#[repr(u8)]
pub enum WizardStep {
    /// Meal category and party size
    #[default]
    MealAndParty = 0,
    /// Restaurant serving the chosen meal
    Restaurant = 1,
    /// Dishes and serving counts
    Dishes = 2,
    /// Order summary, submit from here
    Review = 3,
}

impl WizardStep {
    /// Total number of steps.
    pub const TOTAL_STEPS: usize = 4;

    /// Zero-based index of this step
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Step number for display (1-indexed)
    #[inline]
    pub const fn step_number(self) -> usize {
        self.index() + 1
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::MealAndParty),
            1 => Some(Self::Restaurant),
            2 => Some(Self::Dishes),
            3 => Some(Self::Review),
            _ => None,
        }
    }

    /// Next step, or `None` on the review step
    pub const fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Previous step, or `None` on the first step
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::MealAndParty => None,
            Self::Restaurant => Some(Self::MealAndParty),
            Self::Dishes => Some(Self::Restaurant),
            Self::Review => Some(Self::Dishes),
        }
    }

    pub const fn can_go_back(self) -> bool {
        self.previous().is_some()
    }

    pub const fn is_last(self) -> bool {
        matches!(self, Self::Review)
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::MealAndParty => "Meal and party size",
            Self::Restaurant => "Choose a restaurant",
            Self::Dishes => "Dishes and servings",
            Self::Review => "Review your order",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Outcome of a successful `next()`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved forward to this step
    Moved(WizardStep),
    /// The review step passed and the order is final
    Submitted(Order),
}

/// Rejected wizard operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    /// The current step has failing rules; the step did not change
    #[error("Step {} ({step}) is not valid: {report}", step.step_number())]
    ValidationFailed {
        step: WizardStep,
        report: ValidationReport,
    },

    #[error("Already at the first step")]
    AtFirstStep,

    #[error("Cannot submit from step {} ({step}); submit from the review step", step.step_number())]
    NotOnReviewStep { step: WizardStep },

    #[error("The order has already been submitted")]
    AlreadySubmitted,

    /// The field is edited on another step than the current one
    #[error(
        "{field} is edited on step {}, not on step {}",
        field.step().step_number(),
        step.step_number()
    )]
    FieldNotOnStep { field: FieldKey, step: WizardStep },

    #[error("Dish row {index} does not exist ({len} rows)")]
    NoSuchRow { index: usize, len: usize },

    #[error("Order is incomplete: {0}")]
    Incomplete(#[from] IncompleteOrder),

    #[error("Order was not accepted: {0}")]
    Sink(String),
}

/// Owns the wizard position, the form data and the derived view state.
#[derive(Debug, Clone)]
pub struct WizardController {
    catalog: Arc<Catalog>,
    meals: Vec<MealCategory>,
    policy: StaleSelectionPolicy,
    step: WizardStep,
    form: FormData,
    options: StepOptions,
    errors: ValidationReport,
    submitted: Option<Order>,
}

impl WizardController {
    /// A wizard offering every meal and preserving stale selections.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_settings(catalog, MealCategory::ALL.to_vec(), StaleSelectionPolicy::default())
    }

    /// A wizard using the meals and stale-selection policy from `config`.
    pub fn from_config(catalog: Arc<Catalog>, config: &WizardConfig) -> Self {
        Self::with_settings(catalog, config.meals.clone(), config.stale_selections)
    }

    fn with_settings(
        catalog: Arc<Catalog>,
        meals: Vec<MealCategory>,
        policy: StaleSelectionPolicy,
    ) -> Self {
        let form = FormData::default();
        let options = StepOptions::derive(&catalog, &meals, &form);
        Self {
            catalog,
            meals,
            policy,
            step: WizardStep::default(),
            form,
            options,
            errors: ValidationReport::default(),
            submitted: None,
        }
    }

    // ------------------------------------------------------------------------
    // Read accessors for the presentation layer
    // ------------------------------------------------------------------------

    #[inline]
    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    #[inline]
    pub fn form(&self) -> &FormData {
        &self.form
    }

    /// Errors currently shown next to fields
    #[inline]
    pub fn errors(&self) -> &ValidationReport {
        &self.errors
    }

    #[inline]
    pub fn options(&self) -> &StepOptions {
        &self.options
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[inline]
    pub fn stale_policy(&self) -> StaleSelectionPolicy {
        self.policy
    }

    #[inline]
    pub fn is_submitted(&self) -> bool {
        self.submitted.is_some()
    }

    /// The order produced by a successful submission
    pub fn submitted_order(&self) -> Option<&Order> {
        self.submitted.as_ref()
    }

    /// Selections no longer allowed by the current upstream choices
    pub fn stale_selections(&self) -> StaleSelections {
        selector::stale_selections(&self.options, &self.form)
    }

    /// Run the current step's rules without changing anything.
    pub fn validate_current(&self) -> ValidationReport {
        validation::validate_step_offering(self.step, &self.form, &self.catalog, &self.meals)
    }

    // ------------------------------------------------------------------------
    // Field mutations
    // ------------------------------------------------------------------------

    pub fn select_meal(&mut self, meal: Option<MealCategory>) -> Result<(), WizardError> {
        self.ensure_editable(FieldKey::Meal)?;
        if self.form.meal == meal {
            return Ok(());
        }
        debug!("Meal changed: {:?} -> {:?}", self.form.meal, meal);

        self.form.meal = meal;
        self.options.on_meal_changed(&self.catalog, &self.form);
        self.reconcile_stale(FieldKey::Meal);
        self.revalidate(FieldKey::Meal);
        Ok(())
    }

    pub fn set_number_of_people(&mut self, people: Option<u32>) -> Result<(), WizardError> {
        self.ensure_editable(FieldKey::NumberOfPeople)?;
        self.form.number_of_people = people;
        self.revalidate(FieldKey::NumberOfPeople);
        // The servings total depends on the party size
        self.on_dishes_changed();
        Ok(())
    }

    pub fn select_restaurant(&mut self, restaurant: Option<String>) -> Result<(), WizardError> {
        self.ensure_editable(FieldKey::Restaurant)?;
        if self.form.restaurant == restaurant {
            return Ok(());
        }
        debug!("Restaurant changed: {:?} -> {:?}", self.form.restaurant, restaurant);

        self.form.restaurant = restaurant;
        self.options.on_restaurant_changed(&self.catalog, &self.form);
        self.reconcile_stale(FieldKey::Restaurant);
        self.revalidate(FieldKey::Restaurant);
        Ok(())
    }

    /// Append an empty dish row and return its index.
    pub fn add_dish_row(&mut self) -> Result<usize, WizardError> {
        self.ensure_editable(FieldKey::Dishes)?;
        self.form.dishes.push(OrderLine::default());
        self.on_dishes_changed();
        Ok(self.form.dishes.len() - 1)
    }

    pub fn remove_dish_row(&mut self, index: usize) -> Result<OrderLine, WizardError> {
        self.ensure_editable(FieldKey::Dishes)?;
        self.check_row(index)?;

        let removed = self.form.dishes.remove(index);
        self.errors.remove_row(index);
        self.on_dishes_changed();
        Ok(removed)
    }

    pub fn set_dish_name(&mut self, index: usize, name: Option<String>) -> Result<(), WizardError> {
        self.ensure_editable(FieldKey::Dishes)?;
        self.check_row(index)?;

        self.form.dishes[index].name = name;
        self.revalidate(FieldKey::DishName(index));
        self.on_dishes_changed();
        Ok(())
    }

    pub fn set_servings(&mut self, index: usize, servings: Option<u32>) -> Result<(), WizardError> {
        self.ensure_editable(FieldKey::Dishes)?;
        self.check_row(index)?;

        self.form.dishes[index].number_of_dish = servings;
        self.revalidate(FieldKey::DishServings(index));
        self.on_dishes_changed();
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    /// Validate the current step and move forward, or finalize on review.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if any rule of the current step fails
    /// - `AlreadySubmitted` after a successful submission
    pub fn next(&mut self) -> Result<Advance, WizardError> {
        self.ensure_open()?;
        self.check_current_step()?;

        match self.step.next() {
            Some(next) => {
                info!("Wizard advanced: {} -> {}", self.step, next);
                self.step = next;
                Ok(Advance::Moved(next))
            }
            None => {
                let order = Order::try_from(&self.form)?;
                info!(
                    "Order submitted: {} for {} at {}",
                    order.meal, order.number_of_people, order.restaurant
                );
                self.submitted = Some(order.clone());
                Ok(Advance::Submitted(order))
            }
        }
    }

    /// Go back one step without validating the step being left.
    pub fn previous(&mut self) -> Result<WizardStep, WizardError> {
        self.ensure_open()?;
        let previous = self.step.previous().ok_or(WizardError::AtFirstStep)?;

        info!("Wizard went back: {} -> {}", self.step, previous);
        self.step = previous;
        self.errors.clear();
        Ok(previous)
    }

    /// Submit from the review step, handing the order to `sink`.
    ///
    /// The wizard only becomes submitted once the sink accepts the order.
    pub fn submit<S: OrderSink + ?Sized>(&mut self, sink: &mut S) -> Result<Order, WizardError> {
        self.ensure_open()?;
        if !self.step.is_last() {
            return Err(WizardError::NotOnReviewStep { step: self.step });
        }
        self.check_current_step()?;

        let order = Order::try_from(&self.form)?;
        sink.accept(&order).map_err(|e| {
            warn!("Order sink failed: {:#}", e);
            WizardError::Sink(format!("{:#}", e))
        })?;

        info!("Order submitted to sink: {} dishes", order.dishes.len());
        self.submitted = Some(order.clone());
        Ok(order)
    }

    /// Load a complete form and walk it through every step.
    ///
    /// Stops at the first step whose rules fail.
    pub fn replay(&mut self, form: FormData) -> Result<Order, WizardError> {
        self.ensure_open()?;
        self.step = WizardStep::default();
        self.errors.clear();
        self.options = StepOptions::derive(&self.catalog, &self.meals, &form);
        self.form = form;

        loop {
            if let Advance::Submitted(order) = self.next()? {
                return Ok(order);
            }
        }
    }

    /// Discard everything and start a new order.
    pub fn reset(&mut self) {
        debug!("Wizard reset");
        self.step = WizardStep::default();
        self.form = FormData::default();
        self.options = StepOptions::derive(&self.catalog, &self.meals, &self.form);
        self.errors.clear();
        self.submitted = None;
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn ensure_open(&self) -> Result<(), WizardError> {
        if self.submitted.is_some() {
            return Err(WizardError::AlreadySubmitted);
        }
        Ok(())
    }

    /// Fields can only change while their own step is shown.
    fn ensure_editable(&self, field: FieldKey) -> Result<(), WizardError> {
        self.ensure_open()?;
        if field.step() != self.step {
            return Err(WizardError::FieldNotOnStep {
                field,
                step: self.step,
            });
        }
        Ok(())
    }

    fn check_row(&self, index: usize) -> Result<(), WizardError> {
        if index >= self.form.dishes.len() {
            return Err(WizardError::NoSuchRow {
                index,
                len: self.form.dishes.len(),
            });
        }
        Ok(())
    }

    /// Validate the current step, recording the report for display.
    fn check_current_step(&mut self) -> Result<(), WizardError> {
        let report = self.validate_current();
        if !report.is_valid() {
            warn!("Step {} rejected: {}", self.step.step_number(), report);
            self.errors = report.clone();
            return Err(WizardError::ValidationFailed {
                step: self.step,
                report,
            });
        }
        self.errors.clear();
        Ok(())
    }

    /// Live re-validation of one field; only fields on the current step are shown.
    fn revalidate(&mut self, field: FieldKey) {
        if field.step() != self.step {
            return;
        }
        let outcome =
            validation::validate_field_offering(field, &self.form, &self.catalog, &self.meals);
        self.errors.set(field, outcome);
    }

    /// Re-evaluate the aggregate dish rules after any change to the rows.
    fn on_dishes_changed(&mut self) {
        self.revalidate(FieldKey::Dishes);
    }

    /// Apply the stale-selection policy to the selections below `changed`.
    fn reconcile_stale(&mut self, changed: FieldKey) {
        let stale = self.stale_selections();
        if stale.is_empty() {
            return;
        }

        match self.policy {
            StaleSelectionPolicy::Preserve => {
                debug!(
                    "Keeping stale selections (restaurant: {}, dish rows: {:?})",
                    stale.restaurant, stale.dish_rows
                );
            }
            StaleSelectionPolicy::Clear => {
                if stale.restaurant && changed == FieldKey::Meal {
                    debug!("Clearing restaurant {:?}", self.form.restaurant);
                    self.form.restaurant = None;
                    self.options.on_restaurant_changed(&self.catalog, &self.form);
                }
                // Dish options may have shrunk with the restaurant
                let stale = self.stale_selections();
                for row in stale.dish_rows {
                    debug!("Clearing dish in row {}", row);
                    self.form.dishes[row].name = None;
                }
            }
        }
    }
}

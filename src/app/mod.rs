//! Application module
//!
//! Contains the terminal front end of the wizard: key handling, the event
//! loop, and the bridge between cursor movement and controller operations.
//!
//! # Module Structure
//! - `state` - Presentation state (cursors, focus, status line)
//! - Main module - App struct and event loop

mod state;

pub use state::{AppState, DishColumn, MealFocus, step_cursor};

use crate::components::keybindings::{KeyAction, KeybindingContext};
use crate::order::Order;
use crate::ui;
use crate::validation::{MAX_PEOPLE, MIN_PEOPLE, MIN_SERVINGS};
use crate::wizard::{Advance, WizardController, WizardError, WizardStep};
use anyhow::Result;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use std::time::Duration;
use tracing::{debug, info};

/// Upper bound for the +/- servings control
pub const MAX_SERVINGS_PER_DISH: u32 = 99;

/// Main application struct
pub struct App {
    wizard: WizardController,
    state: AppState,
    /// Keybinding context for input dispatch and navigation hints
    keybinding_context: KeybindingContext,
    /// Orders submitted during this session
    orders: Vec<Order>,
}

impl App {
    pub fn new(wizard: WizardController) -> Self {
        let mut app = Self {
            wizard,
            state: AppState::default(),
            keybinding_context: KeybindingContext::new(),
            orders: Vec::new(),
        };
        app.sync_cursors();
        app
    }

    pub fn wizard(&self) -> &WizardController {
        &self.wizard
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn keybindings(&self) -> &KeybindingContext {
        &self.keybinding_context
    }

    /// Orders submitted so far
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Consume the app, returning every submitted order
    pub fn into_orders(self) -> Vec<Order> {
        self.orders
    }

    /// Run the main application loop until the user quits
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Starting main application loop");

        loop {
            terminal.draw(|f| ui::render(f, self))?;

            if crossterm::event::poll(Duration::from_millis(50))? {
                if let Event::Key(key_event) = crossterm::event::read()? {
                    // Windows reports releases too
                    if key_event.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key_event(key_event) {
                        break;
                    }
                }
            }
        }

        info!("Leaving application loop with {} order(s)", self.orders.len());
        Ok(())
    }

    /// Handle one key press. Returns `true` when the user asked to quit.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> bool {
        let step = self.wizard.current_step();
        let Some(action) = self.keybinding_context.action_for(step, &key_event) else {
            return false;
        };
        self.apply(action)
    }

    /// Perform a key action. Returns `true` when the user asked to quit.
    pub fn apply(&mut self, action: KeyAction) -> bool {
        debug!("Key action {:?} on step {:?}", action, self.wizard.current_step());

        if self.state.help_visible {
            match action {
                KeyAction::Help | KeyAction::Previous => self.state.help_visible = false,
                KeyAction::Quit => return true,
                _ => {}
            }
            return false;
        }

        let outcome = match action {
            KeyAction::Quit => return true,
            KeyAction::Help => {
                self.state.help_visible = true;
                Ok(())
            }
            KeyAction::Next => self.advance(),
            KeyAction::Previous => self.go_back(),
            _ if self.wizard.is_submitted() => {
                self.state.set_status("Order submitted. Press Enter to start a new one");
                Ok(())
            }
            _ => match self.wizard.current_step() {
                WizardStep::MealAndParty => self.on_meal_step(action),
                WizardStep::Restaurant => self.on_restaurant_step(action),
                WizardStep::Dishes => self.on_dishes_step(action),
                WizardStep::Review => Ok(()),
            },
        };

        if let Err(e) = outcome {
            self.report(e);
        }
        false
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    fn advance(&mut self) -> Result<(), WizardError> {
        if self.wizard.is_submitted() {
            self.wizard.reset();
            self.state = AppState::default();
            self.sync_cursors();
            self.state.set_status("Started a new order");
            return Ok(());
        }

        if self.wizard.current_step().is_last() {
            let order = self.wizard.submit(&mut self.orders)?;
            self.state.set_status(format!(
                "Order submitted: {} dish(es) from {}. Press Enter for a new order",
                order.dishes.len(),
                order.restaurant
            ));
            return Ok(());
        }

        if let Advance::Moved(step) = self.wizard.next()? {
            self.sync_cursors();
            self.state.set_status(format!(
                "Step {} of {}: {}",
                step.step_number(),
                WizardStep::TOTAL_STEPS,
                step
            ));
        }
        Ok(())
    }

    fn go_back(&mut self) -> Result<(), WizardError> {
        let step = self.wizard.previous()?;
        self.sync_cursors();
        self.state.set_status(format!(
            "Step {} of {}: {}",
            step.step_number(),
            WizardStep::TOTAL_STEPS,
            step
        ));
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Per-step editing
    // ------------------------------------------------------------------------

    fn on_meal_step(&mut self, action: KeyAction) -> Result<(), WizardError> {
        match (action, self.state.meal_focus) {
            (KeyAction::SwitchField, focus) => {
                self.state.meal_focus = focus.toggle();
                Ok(())
            }
            (KeyAction::NavigateUp | KeyAction::NavigateDown, MealFocus::Meal) => {
                let meals = &self.wizard.options().meals;
                if meals.is_empty() {
                    return Ok(());
                }
                // The first press picks the highlighted meal
                if self.wizard.form().meal.is_some() {
                    self.state.meal_cursor = step_cursor(
                        self.state.meal_cursor,
                        meals.len(),
                        action == KeyAction::NavigateDown,
                    );
                }
                let meal = meals[self.state.meal_cursor.min(meals.len() - 1)];
                self.wizard.select_meal(Some(meal))
            }
            (KeyAction::NavigateUp | KeyAction::Increment, _) => {
                self.state.meal_focus = MealFocus::People;
                self.adjust_people(1)
            }
            (KeyAction::NavigateDown | KeyAction::Decrement, _) => {
                self.state.meal_focus = MealFocus::People;
                self.adjust_people(-1)
            }
            _ => Ok(()),
        }
    }

    fn on_restaurant_step(&mut self, action: KeyAction) -> Result<(), WizardError> {
        if !matches!(action, KeyAction::NavigateUp | KeyAction::NavigateDown) {
            return Ok(());
        }

        let restaurants = &self.wizard.options().restaurants;
        if restaurants.is_empty() {
            self.state.set_error("No restaurant serves this meal");
            return Ok(());
        }
        if self.wizard.form().restaurant_name().is_some() {
            self.state.restaurant_cursor = step_cursor(
                self.state.restaurant_cursor,
                restaurants.len(),
                action == KeyAction::NavigateDown,
            );
        }
        let restaurant = restaurants[self.state.restaurant_cursor.min(restaurants.len() - 1)].clone();
        self.wizard.select_restaurant(Some(restaurant))
    }

    fn on_dishes_step(&mut self, action: KeyAction) -> Result<(), WizardError> {
        let rows = self.wizard.form().dishes.len();
        match action {
            KeyAction::NavigateUp => {
                self.state.dish_row = step_cursor(self.state.dish_row, rows, false);
                Ok(())
            }
            KeyAction::NavigateDown => {
                self.state.dish_row = step_cursor(self.state.dish_row, rows, true);
                Ok(())
            }
            KeyAction::SwitchField => {
                self.state.dish_column = self.state.dish_column.toggle();
                Ok(())
            }
            KeyAction::AddRow => {
                let row = self.wizard.add_dish_row()?;
                self.state.dish_row = row;
                self.state.dish_column = DishColumn::Name;
                self.state.set_status(format!("Added dish row {}", row + 1));
                Ok(())
            }
            KeyAction::RemoveRow if rows > 0 => {
                let row = self.state.dish_row.min(rows - 1);
                self.wizard.remove_dish_row(row)?;
                self.state.clamp_dish_row(rows - 1);
                self.state.set_status(format!("Removed dish row {}", row + 1));
                Ok(())
            }
            KeyAction::CycleLeft | KeyAction::CycleRight if rows > 0 => {
                self.state.dish_column = DishColumn::Name;
                self.cycle_dish(action == KeyAction::CycleRight)
            }
            KeyAction::Increment if rows > 0 => {
                self.state.dish_column = DishColumn::Servings;
                self.adjust_servings(1)
            }
            KeyAction::Decrement if rows > 0 => {
                self.state.dish_column = DishColumn::Servings;
                self.adjust_servings(-1)
            }
            _ => Ok(()),
        }
    }

    fn adjust_people(&mut self, delta: i64) -> Result<(), WizardError> {
        let people = adjust(self.wizard.form().number_of_people, delta, MIN_PEOPLE, MAX_PEOPLE);
        self.wizard.set_number_of_people(Some(people))
    }

    fn adjust_servings(&mut self, delta: i64) -> Result<(), WizardError> {
        let row = self.state.dish_row;
        let current = self
            .wizard
            .form()
            .dishes
            .get(row)
            .and_then(|line| line.number_of_dish);
        let servings = adjust(current, delta, MIN_SERVINGS, MAX_SERVINGS_PER_DISH);
        self.wizard.set_servings(row, Some(servings))
    }

    /// Pick the next or previous dish from the options for the focused row.
    fn cycle_dish(&mut self, forward: bool) -> Result<(), WizardError> {
        let dishes = &self.wizard.options().dishes;
        if dishes.is_empty() {
            self.state.set_error("No dishes available for this restaurant and meal");
            return Ok(());
        }

        let row = self.state.dish_row;
        let current = self
            .wizard
            .form()
            .dishes
            .get(row)
            .and_then(|line| line.dish_name())
            .and_then(|name| dishes.iter().position(|d| d == name));
        let index = match current {
            Some(index) => step_cursor(index, dishes.len(), forward),
            None if forward => 0,
            None => dishes.len() - 1,
        };
        let name = dishes[index].clone();
        self.wizard.set_dish_name(row, Some(name))
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    /// Point the list cursors at the current selections.
    fn sync_cursors(&mut self) {
        let options = self.wizard.options();
        let form = self.wizard.form();

        self.state.meal_cursor = form
            .meal
            .and_then(|meal| options.meals.iter().position(|m| *m == meal))
            .unwrap_or(0);
        self.state.restaurant_cursor = form
            .restaurant_name()
            .and_then(|name| options.restaurants.iter().position(|r| r == name))
            .unwrap_or(0);
        self.state.clamp_dish_row(form.dishes.len());
    }

    fn report(&mut self, error: WizardError) {
        match &error {
            WizardError::ValidationFailed { report, .. } => {
                let count = report.len();
                self.state.set_error(format!(
                    "Please fix {} problem{} before continuing",
                    count,
                    if count == 1 { "" } else { "s" }
                ));
            }
            _ => self.state.set_error(error.to_string()),
        }
    }
}

/// Step an optional counter by `delta`, starting at `min` when unset.
fn adjust(current: Option<u32>, delta: i64, min: u32, max: u32) -> u32 {
    match current {
        None => min,
        Some(value) => (i64::from(value) + delta).clamp(i64::from(min), i64::from(max)) as u32,
    }
}

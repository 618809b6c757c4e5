//! Application state definitions
//!
//! Presentation-only state: cursors and focus for each wizard step. The
//! order data itself lives in the `WizardController`.

/// Field focused on the meal & party-size step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MealFocus {
    #[default]
    Meal,
    People,
}

impl MealFocus {
    pub fn toggle(self) -> Self {
        match self {
            Self::Meal => Self::People,
            Self::People => Self::Meal,
        }
    }
}

/// Column focused in the dish table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DishColumn {
    #[default]
    Name,
    Servings,
}

impl DishColumn {
    pub fn toggle(self) -> Self {
        match self {
            Self::Name => Self::Servings,
            Self::Servings => Self::Name,
        }
    }
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Highlighted entry in the meal list
    pub meal_cursor: usize,
    pub meal_focus: MealFocus,
    /// Highlighted entry in the restaurant list
    pub restaurant_cursor: usize,
    /// Highlighted dish row
    pub dish_row: usize,
    pub dish_column: DishColumn,
    /// Status message for user feedback
    pub status_message: String,
    /// Whether the status message reports a failure
    pub status_is_error: bool,
    /// Whether help overlay is visible
    pub help_visible: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            meal_cursor: 0,
            meal_focus: MealFocus::default(),
            restaurant_cursor: 0,
            dish_row: 0,
            dish_column: DishColumn::default(),
            status_message: "Choose a meal to start your order".to_string(),
            status_is_error: false,
            help_visible: false,
        }
    }
}

impl AppState {
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = true;
    }

    /// Keep the dish cursor on an existing row after rows were removed.
    pub fn clamp_dish_row(&mut self, rows: usize) {
        self.dish_row = self.dish_row.min(rows.saturating_sub(1));
    }
}

/// Move `cursor` one step through a list of `len` entries, wrapping around.
pub fn step_cursor(cursor: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    let cursor = cursor.min(len - 1);
    if forward {
        (cursor + 1) % len
    } else {
        (cursor + len - 1) % len
    }
}

//! Tests for the terminal front end
//!
//! These tests verify:
//! - AppState default initialization
//! - Key presses reach the wizard as the right operations
//! - A full order can be placed from the keyboard
//! - Every step renders without panicking

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mealwizard::app::{App, AppState, DishColumn, MealFocus};
use mealwizard::{Catalog, FieldKey, MealCategory, WizardController, WizardStep};
use ratatui::{Terminal, backend::TestBackend};

fn app() -> App {
    let catalog = Arc::new(Catalog::builtin().unwrap());
    App::new(WizardController::new(catalog))
}

fn press(app: &mut App, code: KeyCode) -> bool {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
}

fn press_all(app: &mut App, codes: &[KeyCode]) {
    for code in codes {
        assert!(!press(app, *code), "unexpected quit on {:?}", code);
    }
}

fn draw(app: &App) -> String {
    let backend = TestBackend::new(100, 30);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|f| mealwizard::ui::render(f, app)).unwrap();
    terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

// =============================================================================
// AppState Default Tests
// =============================================================================

#[test]
fn test_app_state_default() {
    let state = AppState::default();
    assert_eq!(state.meal_cursor, 0);
    assert_eq!(state.meal_focus, MealFocus::Meal);
    assert_eq!(state.dish_column, DishColumn::Name);
    assert!(!state.help_visible);
    assert!(!state.status_is_error);
}

#[test]
fn test_set_error_marks_status() {
    let mut state = AppState::default();
    state.set_error("bad");
    assert!(state.status_is_error);
    state.set_status("fine");
    assert!(!state.status_is_error);
    assert_eq!(state.status_message, "fine");
}

// =============================================================================
// Key Handling Tests
// =============================================================================

#[test]
fn test_first_arrow_picks_highlighted_meal() {
    let mut app = app();
    press(&mut app, KeyCode::Down);
    assert_eq!(app.wizard().form().meal, Some(MealCategory::Breakfast));

    press(&mut app, KeyCode::Down);
    assert_eq!(app.wizard().form().meal, Some(MealCategory::Lunch));

    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Up);
    assert_eq!(app.wizard().form().meal, Some(MealCategory::Dinner));
}

#[test]
fn test_people_adjust_and_clamp() {
    let mut app = app();
    press(&mut app, KeyCode::Char('+'));
    assert_eq!(app.state().meal_focus, MealFocus::People);
    assert_eq!(app.wizard().form().number_of_people, Some(1));

    for _ in 0..20 {
        press(&mut app, KeyCode::Char('+'));
    }
    assert_eq!(app.wizard().form().number_of_people, Some(10));

    press(&mut app, KeyCode::Char('-'));
    assert_eq!(app.wizard().form().number_of_people, Some(9));
}

#[test]
fn test_enter_on_invalid_step_shows_error() {
    let mut app = app();
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.wizard().current_step(), WizardStep::MealAndParty);
    assert!(app.state().status_is_error);
    assert!(app.state().status_message.contains("2 problems"));
    assert!(app.wizard().errors().get(FieldKey::Meal).is_some());
}

#[test]
fn test_help_toggles_and_blocks_editing() {
    let mut app = app();
    press(&mut app, KeyCode::Char('?'));
    assert!(app.state().help_visible);

    press(&mut app, KeyCode::Down);
    assert!(app.wizard().form().meal.is_none());

    press(&mut app, KeyCode::Esc);
    assert!(!app.state().help_visible);
    assert_eq!(app.wizard().current_step(), WizardStep::MealAndParty);
}

#[test]
fn test_quit_keys() {
    let mut app = app();
    assert!(press(&mut app, KeyCode::Char('q')));
    assert!(app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    assert!(!press(&mut app, KeyCode::Char('z')));
}

#[test]
fn test_escape_on_first_step_reports() {
    let mut app = app();
    press(&mut app, KeyCode::Esc);
    assert!(app.state().status_is_error);
    assert_eq!(app.state().status_message, "Already at the first step");
}

// =============================================================================
// Full Flow
// =============================================================================

#[test]
fn test_place_order_from_keyboard() {
    let mut app = app();

    // Lunch for two
    press_all(
        &mut app,
        &[
            KeyCode::Down,
            KeyCode::Down,
            KeyCode::Tab,
            KeyCode::Char('+'),
            KeyCode::Char('+'),
            KeyCode::Enter,
        ],
    );
    assert_eq!(app.wizard().current_step(), WizardStep::Restaurant);
    assert_eq!(app.wizard().form().meal, Some(MealCategory::Lunch));
    assert_eq!(app.wizard().form().number_of_people, Some(2));

    // First lunch restaurant
    press_all(&mut app, &[KeyCode::Down, KeyCode::Enter]);
    assert_eq!(app.wizard().form().restaurant.as_deref(), Some("Mc Donalds"));
    assert_eq!(app.wizard().current_step(), WizardStep::Dishes);

    // One dish, two servings
    press_all(
        &mut app,
        &[
            KeyCode::Char('a'),
            KeyCode::Right,
            KeyCode::Char('+'),
            KeyCode::Char('+'),
        ],
    );
    let line = &app.wizard().form().dishes[0];
    assert_eq!(line.name.as_deref(), Some("Chicken Burger"));
    assert_eq!(line.number_of_dish, Some(2));

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.wizard().current_step(), WizardStep::Review);

    press(&mut app, KeyCode::Enter);
    assert!(app.wizard().is_submitted());
    assert_eq!(app.orders().len(), 1);
    assert_eq!(app.orders()[0].restaurant, "Mc Donalds");

    // Enter again starts over
    press(&mut app, KeyCode::Enter);
    assert!(!app.wizard().is_submitted());
    assert_eq!(app.wizard().current_step(), WizardStep::MealAndParty);
    assert_eq!(app.into_orders().len(), 1);
}

#[test]
fn test_dish_rows_add_remove() {
    let mut app = app();
    press_all(
        &mut app,
        &[
            KeyCode::Down,
            KeyCode::Char('+'),
            KeyCode::Enter,
            KeyCode::Down,
            KeyCode::Enter,
        ],
    );
    assert_eq!(app.wizard().current_step(), WizardStep::Dishes);

    press_all(&mut app, &[KeyCode::Char('a'), KeyCode::Char('a')]);
    assert_eq!(app.wizard().form().dishes.len(), 2);
    assert_eq!(app.state().dish_row, 1);

    press(&mut app, KeyCode::Delete);
    assert_eq!(app.wizard().form().dishes.len(), 1);
    assert_eq!(app.state().dish_row, 0);

    press(&mut app, KeyCode::Char('x'));
    assert!(app.wizard().form().dishes.is_empty());
    // Nothing left to remove
    press(&mut app, KeyCode::Char('x'));
    assert!(!app.state().status_is_error);
}

#[test]
fn test_dish_cycle_wraps_backwards() {
    let mut app = app();
    // Breakfast at Mc Donalds offers a single dish
    press_all(
        &mut app,
        &[
            KeyCode::Down,
            KeyCode::Char('+'),
            KeyCode::Enter,
            KeyCode::Down,
            KeyCode::Enter,
            KeyCode::Char('a'),
            KeyCode::Left,
        ],
    );
    assert_eq!(
        app.wizard().form().dishes[0].name.as_deref(),
        Some("Egg Muffin")
    );
    press(&mut app, KeyCode::Left);
    assert_eq!(
        app.wizard().form().dishes[0].name.as_deref(),
        Some("Egg Muffin")
    );
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_every_step_renders() {
    let mut app = app();
    let screen = draw(&app);
    assert!(screen.contains("Meal Wizard"));
    assert!(screen.contains("breakfast"));

    press_all(
        &mut app,
        &[KeyCode::Down, KeyCode::Char('+'), KeyCode::Enter],
    );
    assert!(draw(&app).contains("Mc Donalds"));

    press_all(&mut app, &[KeyCode::Down, KeyCode::Enter, KeyCode::Char('a')]);
    assert!(draw(&app).contains("Number of Servings"));

    press_all(&mut app, &[KeyCode::Right, KeyCode::Char('+'), KeyCode::Enter]);
    assert!(draw(&app).contains("Preview Your Order"));
}

#[test]
fn test_errors_render_next_to_fields() {
    let mut app = app();
    press(&mut app, KeyCode::Enter);
    let screen = draw(&app);
    assert!(screen.contains("Meal is required"));
    assert!(screen.contains("number of people is required"));
}

#[test]
fn test_help_overlay_renders() {
    let mut app = app();
    press(&mut app, KeyCode::Char('?'));
    assert!(draw(&app).contains("Meal Wizard Help"));
}

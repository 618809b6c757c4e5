//! User interface rendering module
//!
//! This module is organized into submodules:
//! - `header` - Title, step indicator, status line and navigation bar
//! - `screens` - One screen per wizard step

mod header;
pub mod screens;

pub use header::{nav_bar_line, step_indicator};

use crate::app::App;
use crate::components::help_overlay::HelpOverlay;
use crate::wizard::WizardStep;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

/// Draw the whole application for one frame
pub fn render(f: &mut Frame, app: &App) {
    let wizard = app.wizard();
    let state = app.state();
    let step = wizard.current_step();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(6),    // Step screen
            Constraint::Length(1), // Status
            Constraint::Length(1), // Nav bar
        ])
        .split(f.area());

    header::render_header(f, chunks[0], step, wizard.is_submitted());

    match step {
        WizardStep::MealAndParty => screens::render_meal_step(f, chunks[1], wizard, state),
        WizardStep::Restaurant => screens::render_restaurant_step(f, chunks[1], wizard, state),
        WizardStep::Dishes => screens::render_dishes_step(f, chunks[1], wizard, state),
        WizardStep::Review => screens::render_review_step(f, chunks[1], wizard),
    }

    header::render_status(f, chunks[2], state);
    header::render_nav_bar(f, chunks[3], step, app.keybindings());

    if state.help_visible {
        HelpOverlay::new(step, app.keybindings()).render(f, f.area());
    }
}

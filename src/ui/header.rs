//! Header and common widget rendering
//!
//! Title bar with the step indicator, the status line and the navigation bar.

use crate::app::AppState;
use crate::components::keybindings::{KeybindingContext, NavBarItem};
use crate::theme::Styles;
use crate::wizard::WizardStep;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use strum::IntoEnumIterator;

/// Build the step indicator, e.g. `1 Meal and party size > 2 Choose a restaurant > ...`
pub fn step_indicator(current: WizardStep, submitted: bool) -> Line<'static> {
    let mut spans = Vec::new();
    for step in WizardStep::iter() {
        if step.index() > 0 {
            spans.push(Span::styled("  >  ", Styles::text_muted()));
        }
        // A submitted review step counts as done
        let position = if submitted && step == current {
            std::cmp::Ordering::Less
        } else {
            step.cmp(&current)
        };
        let marker = match position {
            std::cmp::Ordering::Less => "+",
            std::cmp::Ordering::Equal => ">",
            std::cmp::Ordering::Greater => " ",
        };
        spans.push(Span::styled(
            format!("{}{} {}", marker, step.step_number(), step),
            Styles::step(position),
        ));
    }
    Line::from(spans)
}

/// Render the title and step indicator
pub fn render_header(f: &mut Frame, area: Rect, current: WizardStep, submitted: bool) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let header = Paragraph::new(vec![
        Line::from(Span::styled("Meal Wizard", Styles::title())),
        step_indicator(current, submitted),
    ])
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Styles::border_inactive()),
    )
    .alignment(Alignment::Center);
    f.render_widget(header, area);
}

/// Render the status message line
pub fn render_status(f: &mut Frame, area: Rect, state: &AppState) {
    let style = if state.status_is_error {
        Styles::error()
    } else {
        Styles::text_muted()
    };
    let status = Paragraph::new(Span::styled(format!(" {}", state.status_message), style));
    f.render_widget(status, area);
}

/// Build the navigation bar line from key hints
pub fn nav_bar_line(items: &[NavBarItem]) -> Line<'static> {
    let mut spans = Vec::new();
    for item in items {
        spans.push(Span::styled(format!(" [{}] ", item.key_display), Styles::key_hint()));
        spans.push(Span::styled(format!("{} ", item.action_label), Styles::nav_hint()));
    }
    Line::from(spans)
}

/// Render the navigation bar
pub fn render_nav_bar(
    f: &mut Frame,
    area: Rect,
    step: WizardStep,
    keybinding_ctx: &KeybindingContext,
) {
    let items = keybinding_ctx.get_nav_items(step);
    let nav_bar = Paragraph::new(nav_bar_line(&items)).alignment(Alignment::Center);
    f.render_widget(nav_bar, area);
}

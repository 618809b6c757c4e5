//! Help overlay component
//!
//! Displays the keybindings of the current step in a centered popup.

use super::keybindings::{HelpSection, KeybindingContext};
use crate::theme::{Colors, Styles};
use crate::wizard::WizardStep;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Help overlay component
pub struct HelpOverlay {
    content: Vec<Line<'static>>,
}

impl HelpOverlay {
    /// Create a new help overlay for the given step
    pub fn new(step: WizardStep, keybinding_ctx: &KeybindingContext) -> Self {
        let sections = keybinding_ctx.get_help_content(step);
        Self {
            content: Self::build_content(&sections, step),
        }
    }

    /// Lines shown inside the popup
    pub fn content(&self) -> &[Line<'static>] {
        &self.content
    }

    fn build_content(sections: &[HelpSection], step: WizardStep) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();

        lines.push(Line::from(vec![Span::styled(
            "  Meal Wizard Help  ",
            Styles::title(),
        )]));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Current: ", Style::default().fg(Colors::FG_MUTED)),
            Span::styled(
                format!("Step {} - {}", step.step_number(), step),
                Style::default().fg(Colors::SECONDARY),
            ),
        ]));
        lines.push(Line::from(""));

        for section in sections {
            lines.push(Line::from(vec![Span::styled(
                format!("  {}  ", section.title),
                Style::default()
                    .fg(Colors::SUCCESS)
                    .add_modifier(Modifier::BOLD),
            )]));

            for (key, description) in &section.items {
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(format!("{:<10}", key), Styles::focused()),
                    Span::styled(description.clone(), Styles::text()),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![Span::styled(
            "Press ? or Esc to close",
            Style::default().fg(Colors::FG_MUTED),
        )]));

        lines
    }

    /// Render the help overlay centered over `parent`
    pub fn render(&self, f: &mut Frame, parent: Rect) {
        let height = (self.content.len() as u16 + 2).min(parent.height);
        let area = centered_rect(60, height, parent);

        f.render_widget(Clear, area);
        let popup = Paragraph::new(self.content.clone()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .border_style(Styles::border_active()),
        );
        f.render_widget(popup, area);
    }
}

/// Rectangle of `percent_x` width and `height` rows centered in `r`
fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_help_names_current_step() {
        let ctx = KeybindingContext::new();
        let overlay = HelpOverlay::new(WizardStep::Dishes, &ctx);
        let all: Vec<String> = overlay.content().iter().map(text_of).collect();
        assert!(all.iter().any(|l| l.contains("Step 3 - Dishes and servings")));
        assert!(all.iter().any(|l| l.contains("Add dish")));
    }

    #[test]
    fn test_centered_rect_fits_parent() {
        let parent = Rect::new(0, 0, 100, 40);
        let area = centered_rect(60, 10, parent);
        assert_eq!(area.height, 10);
        assert_eq!(area.width, 60);
        assert!(area.x >= 20 && area.y >= 15);
    }
}

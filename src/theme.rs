//! Centralized theme and styling for the TUI
//!
//! This module provides a single source of truth for all colors and styles
//! used by the wizard screens.
//!
//! # Usage
//! ```rust
//! use mealwizard::theme::{Colors, Styles};
//! use ratatui::style::Style;
//!
//! let style = Style::default().fg(Colors::PRIMARY);
//! let title_style = Styles::title();
//! ```

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette for the application
pub struct Colors;

impl Colors {
    /// Default foreground text color
    pub const FG_PRIMARY: Color = Color::White;

    /// Disabled/inactive text color
    pub const FG_MUTED: Color = Color::DarkGray;

    /// Primary accent color - used for borders, titles, highlights
    pub const PRIMARY: Color = Color::Cyan;

    /// Secondary accent color - used for selected items, emphasis
    pub const SECONDARY: Color = Color::Yellow;

    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;

    /// Active border color
    pub const BORDER_ACTIVE: Color = Color::Cyan;

    /// Inactive/unfocused border color
    pub const BORDER_INACTIVE: Color = Color::DarkGray;

    /// Selected item highlight
    pub const SELECTED_BG: Color = Color::Yellow;

    /// Selected item text (for contrast on yellow bg)
    pub const SELECTED_FG: Color = Color::Black;

    /// Unselected list item
    pub const UNSELECTED: Color = Color::Gray;

    /// Navigation hint color
    pub const NAV_HINT: Color = Color::DarkGray;

    // -------------------------------------------------------------------------
    // Step indicator
    // -------------------------------------------------------------------------

    /// Step being edited
    pub const STEP_ACTIVE: Color = Color::Yellow;

    /// Step already passed
    pub const STEP_COMPLETE: Color = Color::Green;

    /// Step not reached yet
    pub const STEP_PENDING: Color = Color::Gray;
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

/// Pre-built styles for common UI patterns
pub struct Styles;

impl Styles {
    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    /// Muted/secondary text
    pub fn text_muted() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    /// Bold text
    pub fn text_bold() -> Style {
        Style::default()
            .fg(Colors::FG_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Main title style (cyan, bold)
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Active border style
    pub fn border_active() -> Style {
        Style::default().fg(Colors::BORDER_ACTIVE)
    }

    /// Inactive border style
    pub fn border_inactive() -> Style {
        Style::default().fg(Colors::BORDER_INACTIVE)
    }

    /// Selected/highlighted item
    pub fn selected() -> Style {
        Style::default()
            .fg(Colors::SELECTED_FG)
            .bg(Colors::SELECTED_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Unselected list item
    pub fn unselected() -> Style {
        Style::default().fg(Colors::UNSELECTED)
    }

    /// Focused item (cyan highlight)
    pub fn focused() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Colors::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Colors::WARNING)
    }

    pub fn error() -> Style {
        Style::default().fg(Colors::ERROR)
    }

    /// Key hint in the navigation bar
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Colors::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Description next to a key hint
    pub fn nav_hint() -> Style {
        Style::default().fg(Colors::NAV_HINT)
    }

    /// Step indicator style for `position` relative to the current step
    pub fn step(position: std::cmp::Ordering) -> Style {
        match position {
            std::cmp::Ordering::Less => Style::default().fg(Colors::STEP_COMPLETE),
            std::cmp::Ordering::Equal => Style::default()
                .fg(Colors::STEP_ACTIVE)
                .add_modifier(Modifier::BOLD),
            std::cmp::Ordering::Greater => Style::default().fg(Colors::STEP_PENDING),
        }
    }
}

//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change with the current wizard step.
//! The same registry drives input dispatch, the navigation bar and the help
//! overlay, so a key can never do something its hint does not say.

use crate::wizard::WizardStep;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Move the cursor up (or pick the previous option)
    NavigateUp,
    /// Move the cursor down (or pick the next option)
    NavigateDown,
    /// Cycle the focused value backwards
    CycleLeft,
    /// Cycle the focused value forwards
    CycleRight,
    /// Move focus to the next field / column
    SwitchField,
    Increment,
    Decrement,
    AddRow,
    RemoveRow,
    /// Validate and go forward (submit on review)
    Next,
    /// Go back one step
    Previous,
    Help,
    Quit,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Whether `event` triggers this binding. Shift is ignored so that
    /// symbols like `+` match on every keyboard layout.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let mut modifiers = event.modifiers;
        modifiers.remove(KeyModifiers::SHIFT);
        self.key == event.code && self.modifiers == modifiers
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Step-specific keybindings
    step_bindings: HashMap<WizardStep, Vec<Keybinding>>,
    /// Global keybindings (available on every step)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            step_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    /// Register default keybindings for all steps
    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::Enter, KeyAction::Next, "Enter", "Next"),
            Keybinding::new(KeyCode::Esc, KeyAction::Previous, "Esc", "Previous"),
            Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
            Keybinding::with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyAction::Quit,
                "Ctrl+C",
                "Quit",
            ),
        ];

        self.step_bindings.insert(
            WizardStep::MealAndParty,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous meal"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next meal"),
                Keybinding::new(KeyCode::Tab, KeyAction::SwitchField, "Tab", "Switch field"),
                Keybinding::new(KeyCode::Char('+'), KeyAction::Increment, "+", "More people"),
                Keybinding::new(KeyCode::Char('-'), KeyAction::Decrement, "-", "Fewer people"),
            ],
        );

        self.step_bindings.insert(
            WizardStep::Restaurant,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous restaurant"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next restaurant"),
            ],
        );

        self.step_bindings.insert(
            WizardStep::Dishes,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous row"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next row"),
                Keybinding::new(KeyCode::Left, KeyAction::CycleLeft, "Left", "Previous dish"),
                Keybinding::new(KeyCode::Right, KeyAction::CycleRight, "Right", "Next dish"),
                Keybinding::new(KeyCode::Tab, KeyAction::SwitchField, "Tab", "Switch column"),
                Keybinding::new(KeyCode::Char('+'), KeyAction::Increment, "+", "More servings"),
                Keybinding::new(KeyCode::Char('-'), KeyAction::Decrement, "-", "Fewer servings"),
                Keybinding::new(KeyCode::Char('a'), KeyAction::AddRow, "A", "Add dish"),
                Keybinding::new(KeyCode::Char('x'), KeyAction::RemoveRow, "X", "Remove dish"),
                Keybinding::new(KeyCode::Delete, KeyAction::RemoveRow, "Del", "Remove dish"),
            ],
        );

        self.step_bindings.insert(
            WizardStep::Review,
            vec![Keybinding::new(KeyCode::Enter, KeyAction::Next, "Enter", "Submit")],
        );
    }

    /// Get keybindings for a step (step bindings first, then global)
    pub fn get_bindings(&self, step: WizardStep) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();

        if let Some(step_bindings) = self.step_bindings.get(&step) {
            bindings.extend(step_bindings.iter());
        }
        bindings.extend(self.global_bindings.iter());

        bindings
    }

    /// Resolve a key event to an action on `step`
    pub fn action_for(&self, step: WizardStep, event: &KeyEvent) -> Option<KeyAction> {
        self.get_bindings(step)
            .into_iter()
            .find(|b| b.matches(event))
            .map(|b| b.action)
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, step: WizardStep) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(step);

        let priority_actions: &[KeyAction] = match step {
            WizardStep::MealAndParty => &[
                KeyAction::NavigateUp,
                KeyAction::SwitchField,
                KeyAction::Increment,
                KeyAction::Next,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            WizardStep::Restaurant => &[
                KeyAction::NavigateUp,
                KeyAction::Next,
                KeyAction::Previous,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            WizardStep::Dishes => &[
                KeyAction::NavigateUp,
                KeyAction::CycleLeft,
                KeyAction::AddRow,
                KeyAction::RemoveRow,
                KeyAction::Next,
                KeyAction::Previous,
                KeyAction::Help,
            ],
            WizardStep::Review => &[
                KeyAction::Next,
                KeyAction::Previous,
                KeyAction::Help,
                KeyAction::Quit,
            ],
        };

        let mut items: Vec<NavBarItem> = Vec::new();
        for action in priority_actions {
            // Paired keys are shown as one item
            let combined = match action {
                KeyAction::NavigateUp => Some(("Up/Dn", "Navigate")),
                KeyAction::CycleLeft => Some(("Lt/Rt", "Change dish")),
                KeyAction::Increment => Some(("+/-", "Adjust")),
                _ => None,
            };

            if let Some(binding) = bindings.iter().find(|b| b.action == *action) {
                let (key_display, action_label) = match combined {
                    Some((key, label)) => (key.to_string(), label.to_string()),
                    None => (binding.display.clone(), binding.description.clone()),
                };
                items.push(NavBarItem {
                    key_display,
                    action_label,
                });
            }
        }

        items
    }

    /// Get full help content for a step (for help overlay)
    pub fn get_help_content(&self, step: WizardStep) -> Vec<HelpSection> {
        let bindings = self.get_bindings(step);
        let mut sections = Vec::new();

        let mut push_section = |title: &str, filter: fn(KeyAction) -> bool| {
            let mut items: Vec<(String, String)> = Vec::new();
            for binding in bindings.iter().filter(|b| filter(b.action)) {
                let item = (binding.display.clone(), binding.description.clone());
                // Step bindings shadow global ones with the same key
                if !items.iter().any(|(key, _)| *key == item.0) {
                    items.push(item);
                }
            }
            if !items.is_empty() {
                sections.push(HelpSection {
                    title: title.to_string(),
                    items,
                });
            }
        };

        push_section("Editing", |a| {
            matches!(
                a,
                KeyAction::NavigateUp
                    | KeyAction::NavigateDown
                    | KeyAction::CycleLeft
                    | KeyAction::CycleRight
                    | KeyAction::SwitchField
                    | KeyAction::Increment
                    | KeyAction::Decrement
                    | KeyAction::AddRow
                    | KeyAction::RemoveRow
            )
        });
        push_section("Steps", |a| matches!(a, KeyAction::Next | KeyAction::Previous));
        push_section("General", |a| matches!(a, KeyAction::Help | KeyAction::Quit));

        sections
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_enter_means_next_everywhere() {
        let ctx = KeybindingContext::new();
        for step in [
            WizardStep::MealAndParty,
            WizardStep::Restaurant,
            WizardStep::Dishes,
            WizardStep::Review,
        ] {
            assert_eq!(ctx.action_for(step, &key(KeyCode::Enter)), Some(KeyAction::Next));
        }
    }

    #[test]
    fn test_row_keys_only_on_dishes_step() {
        let ctx = KeybindingContext::new();
        assert_eq!(
            ctx.action_for(WizardStep::Dishes, &key(KeyCode::Char('a'))),
            Some(KeyAction::AddRow)
        );
        assert_eq!(ctx.action_for(WizardStep::Restaurant, &key(KeyCode::Char('a'))), None);
    }

    #[test]
    fn test_shift_is_ignored_for_symbols() {
        let ctx = KeybindingContext::new();
        let plus = KeyEvent::new(KeyCode::Char('+'), KeyModifiers::SHIFT);
        assert_eq!(
            ctx.action_for(WizardStep::MealAndParty, &plus),
            Some(KeyAction::Increment)
        );
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ctx = KeybindingContext::new();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(ctx.action_for(WizardStep::Review, &ctrl_c), Some(KeyAction::Quit));
    }

    #[test]
    fn test_review_nav_says_submit() {
        let ctx = KeybindingContext::new();
        let items = ctx.get_nav_items(WizardStep::Review);
        assert_eq!(items[0].key_display, "Enter");
        assert_eq!(items[0].action_label, "Submit");
    }

    #[test]
    fn test_help_sections_present() {
        let ctx = KeybindingContext::new();
        let sections = ctx.get_help_content(WizardStep::Dishes);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Editing", "Steps", "General"]);
    }
}

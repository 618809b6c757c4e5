//! Wizard step screens.
//!
//! One render function per step. Each screen draws its fields with the
//! current options and the field errors recorded by the controller:
//! - `MealAndParty` - meal list and party size
//! - `Restaurant` - restaurants serving the chosen meal
//! - `Dishes` - editable dish table
//! - `Review` - read-only order summary

use crate::app::{AppState, DishColumn, MealFocus};
use crate::theme::{Colors, Styles};
use crate::validation::{FieldKey, MAX_PEOPLE, MIN_PEOPLE, ValidationReport};
use crate::wizard::WizardController;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState},
};

/// Error line for `field`, if the controller recorded one.
fn error_line(errors: &ValidationReport, field: FieldKey) -> Option<Line<'static>> {
    errors
        .get(field)
        .map(|e| Line::from(Span::styled(format!("  {}", e.message), Styles::error())))
}

fn panel(title: &str, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .border_style(if focused {
            Styles::border_active()
        } else {
            Styles::border_inactive()
        })
}

// ============================================================================
// Step 1: Meal and party size
// ============================================================================

pub fn render_meal_step(f: &mut Frame, area: Rect, wizard: &WizardController, state: &AppState) {
    let form = wizard.form();
    let errors = wizard.errors();
    let meals = &wizard.options().meals;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(meals.len() as u16 + 2), // Meal list
            Constraint::Length(1),                      // Meal error
            Constraint::Length(3),                      // People
            Constraint::Length(1),                      // People error
            Constraint::Min(0),
        ])
        .split(area);

    let items: Vec<ListItem> = meals
        .iter()
        .map(|meal| {
            let chosen = form.meal == Some(*meal);
            let marker = if chosen { "(*) " } else { "( ) " };
            let style = if chosen {
                Styles::success().add_modifier(Modifier::BOLD)
            } else {
                Styles::unselected()
            };
            ListItem::new(format!("{}{}", marker, meal)).style(style)
        })
        .collect();

    let meal_focused = state.meal_focus == MealFocus::Meal;
    let list = List::new(items)
        .block(panel("Meal", meal_focused))
        .highlight_style(if meal_focused {
            Styles::selected()
        } else {
            Style::default()
        });
    let mut list_state = ListState::default();
    if !meals.is_empty() {
        list_state.select(Some(state.meal_cursor.min(meals.len() - 1)));
    }
    f.render_stateful_widget(list, chunks[0], &mut list_state);

    if let Some(line) = error_line(errors, FieldKey::Meal) {
        f.render_widget(Paragraph::new(line), chunks[1]);
    }

    let people_focused = state.meal_focus == MealFocus::People;
    let people_text = match form.number_of_people {
        Some(n) => format!("  {}", n),
        None => "  (not set)".to_string(),
    };
    let people = Paragraph::new(Line::from(vec![
        Span::styled(
            people_text,
            if people_focused {
                Styles::focused()
            } else {
                Styles::text()
            },
        ),
        Span::styled(
            format!("   ({} to {})", MIN_PEOPLE, MAX_PEOPLE),
            Styles::text_muted(),
        ),
    ]))
    .block(panel("Number of people", people_focused));
    f.render_widget(people, chunks[2]);

    if let Some(line) = error_line(errors, FieldKey::NumberOfPeople) {
        f.render_widget(Paragraph::new(line), chunks[3]);
    }
}

// ============================================================================
// Step 2: Restaurant
// ============================================================================

pub fn render_restaurant_step(
    f: &mut Frame,
    area: Rect,
    wizard: &WizardController,
    state: &AppState,
) {
    let form = wizard.form();
    let restaurants = &wizard.options().restaurants;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Restaurant list
            Constraint::Length(1), // Error
        ])
        .split(area);

    let title = match form.meal {
        Some(meal) => format!("Restaurants serving {}", meal),
        None => "Restaurants".to_string(),
    };

    if restaurants.is_empty() {
        let empty = Paragraph::new("  No restaurant serves this meal. Go back and pick another.")
            .style(Styles::warning())
            .block(panel(&title, true));
        f.render_widget(empty, chunks[0]);
    } else {
        let items: Vec<ListItem> = restaurants
            .iter()
            .map(|name| {
                let chosen = form.restaurant_name() == Some(name.as_str());
                let marker = if chosen { "(*) " } else { "( ) " };
                let style = if chosen {
                    Styles::success().add_modifier(Modifier::BOLD)
                } else {
                    Styles::unselected()
                };
                ListItem::new(format!("{}{}", marker, name)).style(style)
            })
            .collect();

        let list = List::new(items)
            .block(panel(&title, true))
            .highlight_style(Styles::selected());
        let mut list_state = ListState::default();
        list_state.select(Some(state.restaurant_cursor.min(restaurants.len() - 1)));
        f.render_stateful_widget(list, chunks[0], &mut list_state);
    }

    if let Some(line) = error_line(wizard.errors(), FieldKey::Restaurant) {
        f.render_widget(Paragraph::new(line), chunks[1]);
    }
}

// ============================================================================
// Step 3: Dishes
// ============================================================================

pub fn render_dishes_step(f: &mut Frame, area: Rect, wizard: &WizardController, state: &AppState) {
    let form = wizard.form();
    let errors = wizard.errors();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),    // Table
            Constraint::Length(1), // Totals
            Constraint::Length(1), // Aggregate error
        ])
        .split(area);

    let header = Row::new(vec!["#", "Dish", "Number of Servings"])
        .style(Styles::title())
        .bottom_margin(1);

    let rows: Vec<Row> = form
        .dishes
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let name = line.dish_name().unwrap_or("(choose a dish)").to_string();
            let servings = line
                .number_of_dish
                .map_or_else(|| "(not set)".to_string(), |n| n.to_string());

            let focused = |column: DishColumn| i == state.dish_row && state.dish_column == column;
            let cell_style = |column: DishColumn, field: FieldKey| {
                if errors.get(field).is_some() {
                    Styles::error()
                } else if focused(column) {
                    Styles::focused()
                } else {
                    Styles::text()
                }
            };

            let mut name_text = name;
            if let Some(e) = errors.get(FieldKey::DishName(i)) {
                name_text = format!("{}  ! {}", name_text, e.message);
            }
            let mut servings_text = servings;
            if let Some(e) = errors.get(FieldKey::DishServings(i)) {
                servings_text = format!("{}  ! {}", servings_text, e.message);
            }

            Row::new(vec![
                Cell::from(format!("{}", i + 1)).style(Styles::text_muted()),
                Cell::from(name_text).style(cell_style(DishColumn::Name, FieldKey::DishName(i))),
                Cell::from(servings_text)
                    .style(cell_style(DishColumn::Servings, FieldKey::DishServings(i))),
            ])
        })
        .collect();

    let title = match form.restaurant_name() {
        Some(restaurant) => format!("Dishes from {}", restaurant),
        None => "Dishes".to_string(),
    };

    if rows.is_empty() {
        let empty = Paragraph::new("  No dishes yet. Press A to add one.")
            .style(Styles::text_muted())
            .block(panel(&title, true));
        f.render_widget(empty, chunks[0]);
    } else {
        let table = Table::new(
            rows,
            [
                Constraint::Length(3),
                Constraint::Percentage(55),
                Constraint::Percentage(40),
            ],
        )
        .header(header)
        .block(panel(&title, true))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut table_state = TableState::default();
        table_state.select(Some(state.dish_row.min(form.dishes.len() - 1)));
        f.render_stateful_widget(table, chunks[0], &mut table_state);
    }

    let people = form.number_of_people.unwrap_or(0);
    let total = form.total_servings();
    let total_style = if total >= u64::from(people) {
        Styles::success()
    } else {
        Styles::warning()
    };
    let totals = Paragraph::new(Line::from(vec![
        Span::styled("  Total servings: ", Styles::text_muted()),
        Span::styled(total.to_string(), total_style),
        Span::styled(format!("  for {} people", people), Styles::text_muted()),
    ]));
    f.render_widget(totals, chunks[1]);

    if let Some(line) = error_line(errors, FieldKey::Dishes) {
        f.render_widget(Paragraph::new(line), chunks[2]);
    }
}

// ============================================================================
// Step 4: Review
// ============================================================================

pub fn render_review_step(f: &mut Frame, area: Rect, wizard: &WizardController) {
    let form = wizard.form();
    let label = |text: &str| Span::styled(format!("  {:<18}", text), Styles::text_muted());
    let value = |text: String| Span::styled(text, Styles::text_bold());
    let unset = || "(not set)".to_string();

    let mut lines = vec![
        Line::from(Span::styled("  Preview Your Order", Styles::title())),
        Line::from(""),
        Line::from(vec![
            label("Meal"),
            value(form.meal.map_or_else(unset, |m| m.to_string())),
        ]),
        Line::from(vec![
            label("Number of people"),
            value(form.number_of_people.map_or_else(unset, |n| n.to_string())),
        ]),
        Line::from(vec![
            label("Restaurant"),
            value(form.restaurant_name().map_or_else(unset, str::to_string)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  {:<24}", "Dish"), Styles::title()),
            Span::styled("Number of Servings", Styles::title()),
        ]),
    ];

    for line in &form.dishes {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:<24}", line.dish_name().unwrap_or("-")),
                Styles::text(),
            ),
            Span::styled(
                line.number_of_dish.map_or_else(|| "-".to_string(), |n| n.to_string()),
                Styles::text(),
            ),
        ]));
    }

    lines.push(Line::from(""));
    match wizard.submitted_order() {
        Some(order) => lines.push(Line::from(Span::styled(
            format!("  Submitted. {} servings in total.", order.total_servings()),
            Styles::success().add_modifier(Modifier::BOLD),
        ))),
        None => lines.push(Line::from(Span::styled(
            "  Press Enter to submit this order.",
            Style::default().fg(Colors::SECONDARY),
        ))),
    }
    if let Some(line) = error_line(wizard.errors(), FieldKey::Order) {
        lines.push(line);
    }

    let summary = Paragraph::new(lines).block(panel("Review", true));
    f.render_widget(summary, area);
}

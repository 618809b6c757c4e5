//! Finalized orders
//!
//! An [`Order`] is the typed, fully-populated form of [`FormData`]. It is what
//! the wizard hands to its finalization collaborator, an [`OrderSink`].

use serde::{Deserialize, Serialize};
use std::io::Write;
use thiserror::Error;

use crate::form::FormData;
use crate::types::MealCategory;

/// One dish of a finalized order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub name: String,
    pub number_of_dish: u32,
}

/// A complete order, every field set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub meal: MealCategory,
    pub number_of_people: u32,
    pub restaurant: String,
    pub dishes: Vec<OrderItem>,
}

/// The form lacks a field an order needs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IncompleteOrder {
    #[error("meal is not selected")]
    Meal,
    #[error("number of people is not set")]
    NumberOfPeople,
    #[error("restaurant is not selected")]
    Restaurant,
    #[error("no dishes selected")]
    NoDishes,
    #[error("dish row {0} is incomplete")]
    Dish(usize),
}

impl TryFrom<&FormData> for Order {
    type Error = IncompleteOrder;

    fn try_from(form: &FormData) -> Result<Self, Self::Error> {
        let meal = form.meal.ok_or(IncompleteOrder::Meal)?;
        let number_of_people = form.number_of_people.ok_or(IncompleteOrder::NumberOfPeople)?;
        let restaurant = form
            .restaurant_name()
            .ok_or(IncompleteOrder::Restaurant)?
            .to_string();

        if form.dishes.is_empty() {
            return Err(IncompleteOrder::NoDishes);
        }
        let dishes = form
            .dishes
            .iter()
            .enumerate()
            .map(|(i, line)| match (line.dish_name(), line.number_of_dish) {
                (Some(name), Some(number_of_dish)) => Ok(OrderItem {
                    name: name.to_string(),
                    number_of_dish,
                }),
                _ => Err(IncompleteOrder::Dish(i)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            meal,
            number_of_people,
            restaurant,
            dishes,
        })
    }
}

impl Order {
    /// Total servings across all dishes
    pub fn total_servings(&self) -> u64 {
        self.dishes.iter().map(|d| u64::from(d.number_of_dish)).sum()
    }

    /// Review summary as aligned text lines
    pub fn summary_lines(&self) -> Vec<String> {
        let dish_width = self
            .dishes
            .iter()
            .map(|d| d.name.chars().count())
            .chain(std::iter::once("Dish".len()))
            .max()
            .unwrap_or(0);

        let mut lines = vec![
            "Preview Your Order".to_string(),
            String::new(),
            format!("{:<18}{}", "Meal", self.meal),
            format!("{:<18}{}", "Number of people", self.number_of_people),
            format!("{:<18}{}", "Restaurant", self.restaurant),
            "Dishes".to_string(),
            format!("  {:<width$}  {}", "Dish", "Number of Servings", width = dish_width),
        ];
        for dish in &self.dishes {
            lines.push(format!(
                "  {:<width$}  {}",
                dish.name,
                dish.number_of_dish,
                width = dish_width
            ));
        }
        lines
    }
}

/// Receives orders once the wizard has been submitted
pub trait OrderSink {
    /// Accept a finalized order.
    fn accept(&mut self, order: &Order) -> anyhow::Result<()>;
}

/// Collects orders in memory
impl OrderSink for Vec<Order> {
    fn accept(&mut self, order: &Order) -> anyhow::Result<()> {
        self.push(order.clone());
        Ok(())
    }
}

/// Writes each order as pretty-printed JSON
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OrderSink for JsonSink<W> {
    fn accept(&mut self, order: &Order) -> anyhow::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, order)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::OrderLine;

    fn complete_form() -> FormData {
        FormData {
            meal: Some(MealCategory::Dinner),
            number_of_people: Some(3),
            restaurant: Some("BBQ Hut".to_string()),
            dishes: vec![OrderLine::new("Steak", 2), OrderLine::new("Yakitori", 1)],
        }
    }

    #[test]
    fn test_try_from_complete_form() {
        let order = Order::try_from(&complete_form()).unwrap();
        assert_eq!(order.meal, MealCategory::Dinner);
        assert_eq!(order.dishes.len(), 2);
        assert_eq!(order.total_servings(), 3);
    }

    #[test]
    fn test_try_from_reports_first_missing_field() {
        let mut form = complete_form();
        form.restaurant = Some(String::new());
        assert_eq!(Order::try_from(&form).unwrap_err(), IncompleteOrder::Restaurant);

        let mut form = complete_form();
        form.dishes.push(OrderLine::default());
        assert_eq!(Order::try_from(&form).unwrap_err(), IncompleteOrder::Dish(2));

        let mut form = complete_form();
        form.dishes.clear();
        assert_eq!(Order::try_from(&form).unwrap_err(), IncompleteOrder::NoDishes);
    }

    #[test]
    fn test_summary_lines() {
        let lines = Order::try_from(&complete_form()).unwrap().summary_lines();
        assert_eq!(lines[0], "Preview Your Order");
        assert!(lines.iter().any(|l| l.starts_with("Meal") && l.ends_with("dinner")));
        assert!(lines.iter().any(|l| l.contains("Number of Servings")));
        assert!(lines.iter().any(|l| l.contains("Yakitori") && l.ends_with('1')));
    }

    #[test]
    fn test_summary_aligns_non_ascii_names() {
        let mut form = complete_form();
        form.dishes = vec![OrderLine::new("Crème brûlée", 1), OrderLine::new("Steak", 2)];
        let lines = Order::try_from(&form).unwrap().summary_lines();

        let width = |needle: &str| {
            lines
                .iter()
                .find(|l| l.contains(needle))
                .map(|l| l.chars().count())
                .unwrap()
        };
        assert_eq!(width("Crème brûlée"), width("Steak"));
    }

    #[test]
    fn test_json_sink_writes_camel_case() {
        let order = Order::try_from(&complete_form()).unwrap();
        let mut sink = JsonSink::new(Vec::new());
        sink.accept(&order).unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains("\"numberOfPeople\": 3"));
        assert!(output.contains("\"numberOfDish\": 2"));

        let parsed: Order = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, order);
    }

    #[test]
    fn test_vec_sink_collects() {
        let order = Order::try_from(&complete_form()).unwrap();
        let mut sink: Vec<Order> = Vec::new();
        sink.accept(&order).unwrap();
        assert_eq!(sink, vec![order]);
    }
}

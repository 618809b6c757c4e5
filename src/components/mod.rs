//! Reusable UI building blocks
//!
//! - `keybindings` - step-aware key registry shared by input and hints
//! - `help_overlay` - popup listing the current step's keys

pub mod help_overlay;
pub mod keybindings;

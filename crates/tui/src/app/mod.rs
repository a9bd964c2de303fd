//! Demo meal-log screen hosting a search field.
//!
//! The [`App`] type aggregates the field, the scrollable viewport it lives in,
//! and the logged entries. Supporting modules partition the implementation:
//! actions (input handling) and rendering.

mod actions;
mod render;
mod state;

pub use state::{App, MealLogOutcome, portion};

//! Visual styling for the search field, dropdown and toasts.

mod theme;

pub use theme::{Theme, by_name, default_theme, names};

//! Terminal search field for `mealdex`.
//!
//! The crate wires a text input to a debounced background search and shows
//! the ranked results in a dropdown that either floats below the input or
//! fills a caller-provided container. A small meal-log screen hosts the
//! field for interactive use.

mod app;
mod config;
pub mod debounce;
pub mod field;
pub mod input;
pub mod overlay;
pub mod renderer;
mod runtime;
pub mod search;
pub mod style;
pub mod toast;
pub mod viewport;

pub use app::{App, MealLogOutcome, portion};
pub use config::{PlacementKind, UiLabels, UiOptions};
pub use runtime::run;

pub use crate::debounce::{DEFAULT_DEBOUNCE, DebouncedInput, Dispatch, InputDecision};
pub use crate::field::{DEFAULT_MAX_VISIBLE_ROWS, SearchField, setup_search};
pub use crate::input::QueryInput;
pub use crate::overlay::{DropdownPlacement, NO_RESULTS, OverlayHit, ResultOverlay};
pub use crate::renderer::{DefaultItemRenderer, ItemRenderer};
pub use crate::search::SearchRuntime;
pub use crate::style::{Theme, default_theme};
pub use crate::toast::{Toast, ToastNotifier, ToastQueue};
pub use crate::viewport::{Viewport, ViewportEvent, ViewportSubscription};

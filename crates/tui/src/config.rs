use std::time::Duration;

use crate::debounce::DEFAULT_DEBOUNCE;
use crate::field::DEFAULT_MAX_VISIBLE_ROWS;
use crate::style::Theme;

/// Dropdown strategy selected by configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlacementKind {
	/// Overlay floating below the input.
	#[default]
	Floating,
	/// Static container reserved below the input.
	Inline,
}

impl PlacementKind {
	pub fn as_str(self) -> &'static str {
		match self {
			PlacementKind::Floating => "floating",
			PlacementKind::Inline => "inline",
		}
	}

	pub fn from_name(name: &str) -> Option<Self> {
		match name.trim().to_ascii_lowercase().as_str() {
			"floating" | "float" | "overlay" => Some(PlacementKind::Floating),
			"inline" | "static" => Some(PlacementKind::Inline),
			_ => None,
		}
	}
}

/// Textual configuration of the meal-log screen.
#[derive(Debug, Clone)]
pub struct UiLabels {
	/// Title of the search input block.
	pub input_title: String,
	/// Placeholder text displayed in the empty input.
	pub placeholder: String,
	/// Title of the logged meals section.
	pub log_title: String,
	/// Title of the totals section.
	pub totals_title: String,
}

impl Default for UiLabels {
	fn default() -> Self {
		Self {
			input_title: "Search foods".to_string(),
			placeholder: "Type at least two letters".to_string(),
			log_title: "Today's meals".to_string(),
			totals_title: "Totals".to_string(),
		}
	}
}

/// Behaviour and appearance of the interactive screen.
#[derive(Debug, Clone)]
pub struct UiOptions {
	pub debounce: Duration,
	pub min_term_len: usize,
	pub placement: PlacementKind,
	pub max_visible_rows: u16,
	pub initial_query: String,
	pub labels: UiLabels,
	pub theme: Theme,
}

impl Default for UiOptions {
	fn default() -> Self {
		Self {
			debounce: DEFAULT_DEBOUNCE,
			min_term_len: 2,
			placement: PlacementKind::default(),
			max_visible_rows: DEFAULT_MAX_VISIBLE_ROWS,
			initial_query: String::new(),
			labels: UiLabels::default(),
			theme: Theme::default(),
		}
	}
}

use ratatui::style::{Color, Modifier, Style};

/// A theme containing styles for the search UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
	/// Style for block titles.
	pub header: Style,
	/// Style for the highlighted dropdown row.
	pub row_highlight: Style,
	/// Style for the focused input border.
	pub prompt: Style,
	/// Style for placeholders and empty states.
	pub empty: Style,
	/// Style for secondary emphasis such as the recipe tag.
	pub highlight: Style,
	/// Style for unfocused borders.
	pub border: Style,
	/// Style for error toasts.
	pub error: Style,
	/// Style for informational toasts.
	pub info: Style,
}

impl Theme {
	#[must_use]
	pub fn empty_style(&self) -> Style {
		self.empty
	}

	/// Border style for a block that may or may not have focus.
	#[must_use]
	pub fn border_style(&self, focused: bool) -> Style {
		if focused { self.prompt } else { self.border }
	}
}

impl Default for Theme {
	fn default() -> Self {
		default_theme()
	}
}

const SLATE: Theme = Theme {
	header: Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
	row_highlight: Style::new()
		.fg(Color::Black)
		.bg(Color::Cyan)
		.add_modifier(Modifier::BOLD),
	prompt: Style::new().fg(Color::Cyan),
	empty: Style::new().fg(Color::DarkGray),
	highlight: Style::new().fg(Color::Yellow),
	border: Style::new().fg(Color::Gray),
	error: Style::new().fg(Color::White).bg(Color::Red),
	info: Style::new().fg(Color::Black).bg(Color::Green),
};

const PAPER: Theme = Theme {
	header: Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD),
	row_highlight: Style::new().fg(Color::White).bg(Color::Blue),
	prompt: Style::new().fg(Color::Blue),
	empty: Style::new().fg(Color::Gray),
	highlight: Style::new().fg(Color::Magenta),
	border: Style::new().fg(Color::DarkGray),
	error: Style::new().fg(Color::White).bg(Color::LightRed),
	info: Style::new().fg(Color::Black).bg(Color::LightGreen),
};

const BUILTINS: &[(&str, Theme)] = &[("slate", SLATE), ("paper", PAPER)];

/// Get the default built-in theme.
#[must_use]
pub fn default_theme() -> Theme {
	SLATE
}

/// Look up a built-in theme, ignoring case.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
	BUILTINS
		.iter()
		.find(|(candidate, _)| candidate.eq_ignore_ascii_case(name.trim()))
		.map(|(_, theme)| *theme)
}

/// Names of the built-in themes.
#[must_use]
pub fn names() -> Vec<&'static str> {
	BUILTINS.iter().map(|(name, _)| *name).collect()
}

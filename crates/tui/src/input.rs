//! Single-line query input built on `tui-textarea`.

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders};
use tui_textarea::TextArea;

use crate::style::Theme;

/// Text input that the search field anchors its dropdown to.
pub struct QueryInput<'a> {
	textarea: TextArea<'a>,
	title: String,
	placeholder: String,
}

impl<'a> QueryInput<'a> {
	pub fn new(initial: impl Into<String>) -> Self {
		let mut textarea = TextArea::new(vec![initial.into()]);
		textarea.set_cursor_line_style(Style::default());
		textarea.move_cursor(tui_textarea::CursorMove::End);
		Self {
			textarea,
			title: String::new(),
			placeholder: String::new(),
		}
	}

	#[must_use]
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = title.into();
		self
	}

	#[must_use]
	pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = placeholder.into();
		self
	}

	/// Current text of the single input line.
	pub fn text(&self) -> &str {
		self.textarea.lines().first().map_or("", String::as_str)
	}

	pub fn set_text(&mut self, text: impl Into<String>) {
		let mut textarea = TextArea::new(vec![text.into()]);
		textarea.set_cursor_line_style(Style::default());
		textarea.move_cursor(tui_textarea::CursorMove::End);
		self.textarea = textarea;
	}

	pub fn clear(&mut self) {
		self.set_text(String::new());
	}

	/// Feed a key to the input. Returns `true` when the text changed.
	///
	/// Line breaks are swallowed so the input stays on one line.
	pub fn input(&mut self, key: KeyEvent) -> bool {
		if is_line_break(&key) {
			return false;
		}
		let before = self.text().to_string();
		self.textarea.input(key);
		self.text() != before
	}

	/// Height of the bordered input.
	pub const HEIGHT: u16 = 3;

	/// Draw the bordered input into `area`.
	pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme, focused: bool) {
		let mut block = Block::default()
			.borders(Borders::ALL)
			.border_type(BorderType::Rounded)
			.border_style(theme.border_style(focused));
		if !self.title.is_empty() {
			block = block.title(Span::styled(format!(" {} ", self.title), theme.header));
		}
		let inner = block.inner(area);
		frame.render_widget(block, area);

		let cursor = if focused {
			Style::default().add_modifier(ratatui::style::Modifier::REVERSED)
		} else {
			Style::default()
		};
		self.textarea.set_cursor_style(cursor);
		frame.render_widget(&self.textarea, inner);

		if self.text().is_empty() && !self.placeholder.is_empty() && inner.width > 1 {
			let width = (inner.width - 1) as usize;
			let text: String = self.placeholder.chars().take(width).collect();
			frame.buffer_mut().set_line(
				inner.x + 1,
				inner.y,
				&Line::from(Span::styled(text, theme.empty_style())),
				inner.width - 1,
			);
		}
	}
}

fn is_line_break(key: &KeyEvent) -> bool {
	matches!(key.code, KeyCode::Enter)
		|| (key.modifiers.contains(KeyModifiers::CONTROL)
			&& matches!(key.code, KeyCode::Char('m') | KeyCode::Char('j')))
}

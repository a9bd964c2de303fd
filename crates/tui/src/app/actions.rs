use std::time::Instant;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use super::{App, MealLogOutcome};

/// Rows scrolled per mouse wheel step.
const WHEEL_STEP: i32 = 3;

impl<'a> App<'a> {
	/// Process a keyboard event and return an outcome if the user exits.
	pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<MealLogOutcome> {
		if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
			return Some(self.outcome());
		}
		if self.field.handle_key(key, now) {
			return None;
		}
		match key.code {
			KeyCode::Esc => return Some(self.outcome()),
			KeyCode::Tab => {
				let focused = self.field.is_focused();
				self.field.set_focused(!focused);
			}
			KeyCode::PageUp => self.scroll_page(-1),
			KeyCode::PageDown => self.scroll_page(1),
			KeyCode::Char('z') if key.modifiers.contains(KeyModifiers::CONTROL) => {
				self.undo_last();
			}
			_ => {}
		}
		None
	}

	pub fn handle_mouse(&mut self, mouse: MouseEvent) {
		if self.field.handle_mouse(mouse, &self.viewport) {
			return;
		}
		match mouse.kind {
			MouseEventKind::ScrollUp => self.scroll(-WHEEL_STEP),
			MouseEventKind::ScrollDown => self.scroll(WHEEL_STEP),
			_ => {}
		}
	}

	fn scroll_page(&mut self, direction: i32) {
		let page = i32::from(self.viewport.area().height / 2).max(1);
		self.scroll(direction * page);
	}

	fn scroll(&mut self, delta: i32) {
		self.viewport.scroll_by(delta);
		self.place_inline_results();
		self.field.sync_overlay(&self.viewport);
	}
}

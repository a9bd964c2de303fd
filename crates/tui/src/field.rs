//! The search field: input, debounce, worker and dropdown wired together.

use std::sync::Arc;
use std::time::{Duration, Instant};

use mealdex_core::{ItemKey, SearchableItem, Searcher};
use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tracing::debug;

use crate::debounce::{DebouncedInput, InputDecision};
use crate::input::QueryInput;
use crate::overlay::{DropdownPlacement, OverlayHit, ResultOverlay};
use crate::renderer::ItemRenderer;
use crate::search::SearchRuntime;
use crate::style::Theme;
use crate::viewport::Viewport;

/// Default cap on visible dropdown rows.
pub const DEFAULT_MAX_VISIBLE_ROWS: u16 = 8;

type SelectionCallback<'a> = Box<dyn FnMut(SearchableItem) + 'a>;

/// Wire `input` to the debounce, search and dropdown pipeline.
///
/// `results_container` selects the placement: `None` floats the dropdown
/// below the input, `Some(rect)` draws it into that screen rect. The
/// selection callback receives the chosen item after the dropdown closed.
pub fn setup_search<'a>(
	input: QueryInput<'a>,
	results_container: Option<Rect>,
	searcher: Arc<dyn Searcher>,
	on_result_selected: impl FnMut(SearchableItem) + 'a,
	item_renderer: impl ItemRenderer + 'static,
) -> SearchField<'a> {
	let placement =
		results_container.map_or(DropdownPlacement::Floating, DropdownPlacement::Inline);
	SearchField {
		input,
		debounce: DebouncedInput::default(),
		runtime: SearchRuntime::new(searcher),
		placement,
		renderer: Box::new(item_renderer),
		on_selected: Box::new(on_result_selected),
		overlay: None,
		anchor: Rect::default(),
		bounds: Rect::default(),
		max_visible_rows: DEFAULT_MAX_VISIBLE_ROWS,
		focused: true,
		throbber_state: ThrobberState::default(),
	}
}

/// A text input with a live result dropdown.
pub struct SearchField<'a> {
	input: QueryInput<'a>,
	debounce: DebouncedInput,
	runtime: SearchRuntime,
	placement: DropdownPlacement,
	renderer: Box<dyn ItemRenderer>,
	on_selected: SelectionCallback<'a>,
	overlay: Option<ResultOverlay>,
	anchor: Rect,
	bounds: Rect,
	max_visible_rows: u16,
	focused: bool,
	throbber_state: ThrobberState,
}

impl<'a> SearchField<'a> {
	#[must_use]
	pub fn with_debounce(mut self, window: Duration, min_term_len: usize) -> Self {
		self.debounce = DebouncedInput::new(window, min_term_len);
		self
	}

	#[must_use]
	pub fn with_max_visible_rows(mut self, rows: u16) -> Self {
		self.max_visible_rows = rows.max(1);
		self
	}

	pub fn input(&self) -> &QueryInput<'a> {
		&self.input
	}

	pub fn text(&self) -> &str {
		self.input.text()
	}

	pub fn is_focused(&self) -> bool {
		self.focused
	}

	pub fn set_focused(&mut self, focused: bool) {
		self.focused = focused;
	}

	pub fn overlay(&self) -> Option<&ResultOverlay> {
		self.overlay.as_ref()
	}

	pub fn is_open(&self) -> bool {
		self.overlay.is_some()
	}

	/// Whether a search is pending or running.
	pub fn is_searching(&self) -> bool {
		self.debounce.is_pending() || self.runtime.is_in_flight()
	}

	/// Place the input at `anchor` (content coordinates of the viewport).
	pub fn set_anchor(&mut self, anchor: Rect) {
		self.anchor = anchor;
	}

	pub fn anchor(&self) -> Rect {
		self.anchor
	}

	/// Screen area a floating dropdown may cover.
	pub fn set_bounds(&mut self, bounds: Rect) {
		self.bounds = bounds;
	}

	/// Move the inline container; ignored for floating dropdowns.
	pub fn set_results_container(&mut self, container: Rect) {
		if let DropdownPlacement::Inline(current) = &mut self.placement {
			*current = container;
		}
		if let Some(overlay) = self.overlay.as_mut() {
			overlay.set_container(container);
		}
	}

	/// Treat the current text as freshly typed.
	pub fn refresh(&mut self, now: Instant) {
		let text = self.input.text().to_string();
		self.apply_input(&text, now);
	}

	/// Handle a key press. Returns `true` when the field consumed it.
	pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
		if self.overlay.is_some() {
			match key.code {
				KeyCode::Up => {
					self.with_overlay(ResultOverlay::select_previous);
					return true;
				}
				KeyCode::Down => {
					self.with_overlay(ResultOverlay::select_next);
					return true;
				}
				KeyCode::Enter => {
					let highlighted = self
						.overlay
						.as_ref()
						.and_then(|overlay| overlay.selected_key().cloned());
					if let Some(highlighted) = highlighted {
						self.select(&highlighted);
					}
					return true;
				}
				KeyCode::Esc => {
					self.dismiss();
					return true;
				}
				_ => {}
			}
		}
		if !self.focused {
			return false;
		}
		if self.input.input(key) {
			let text = self.input.text().to_string();
			self.apply_input(&text, now);
			return true;
		}
		false
	}

	fn with_overlay(&mut self, f: impl FnOnce(&mut ResultOverlay)) {
		if let Some(overlay) = self.overlay.as_mut() {
			f(overlay);
		}
	}

	fn apply_input(&mut self, text: &str, now: Instant) {
		if self.debounce.on_input(text, now) == InputDecision::Dismiss {
			self.dismiss();
		}
	}

	/// Handle a mouse event. Returns `true` when the field consumed it.
	pub fn handle_mouse(&mut self, mouse: MouseEvent, viewport: &Viewport) -> bool {
		let on_overlay = self
			.overlay
			.as_ref()
			.is_some_and(|overlay| overlay.contains(mouse.column, mouse.row));
		match mouse.kind {
			MouseEventKind::Down(MouseButton::Left) => {
				let on_anchor = self.anchor_contains(viewport, mouse.column, mouse.row);
				let hit = self
					.overlay
					.as_ref()
					.map(|overlay| overlay.hit_test(mouse.column, mouse.row));
				match hit {
					Some(OverlayHit::Row(key)) => {
						self.select(&key);
						true
					}
					Some(OverlayHit::Placeholder | OverlayHit::Chrome) => true,
					Some(OverlayHit::Outside) | None => {
						if !on_anchor && self.overlay.is_some() {
							self.dismiss();
						}
						self.focused = on_anchor;
						on_anchor
					}
				}
			}
			MouseEventKind::ScrollDown if on_overlay => {
				self.with_overlay(ResultOverlay::select_next);
				true
			}
			MouseEventKind::ScrollUp if on_overlay => {
				self.with_overlay(ResultOverlay::select_previous);
				true
			}
			_ => on_overlay,
		}
	}

	fn anchor_contains(&self, viewport: &Viewport, column: u16, row: u16) -> bool {
		viewport
			.to_screen(self.anchor)
			.is_some_and(|area| area.contains(Position::new(column, row)))
	}

	/// Advance timers, issue due searches, apply results and follow the viewport.
	pub fn tick(&mut self, now: Instant, viewport: &Viewport) {
		if let Some(dispatch) = self.debounce.poll(now) {
			let id = self.runtime.issue_search(dispatch.term);
			debug!(id, "search dispatched");
		}

		if let Some(response) = self.runtime.pump() {
			debug!(id = response.id, results = response.items.len(), "search results applied");
			match self.overlay.as_mut() {
				Some(overlay) => overlay.replace_items(response.items),
				None => {
					self.overlay = Some(ResultOverlay::open(
						self.placement,
						response.items,
						self.max_visible_rows,
						viewport,
					));
				}
			}
		}

		self.sync_overlay(viewport);

		if self.is_searching() {
			self.throbber_state.calc_next();
		}
	}

	/// Re-position an open dropdown against the current anchor and viewport.
	pub fn sync_overlay(&mut self, viewport: &Viewport) {
		if let Some(overlay) = self.overlay.as_mut() {
			overlay.sync(viewport, self.anchor, self.bounds);
		}
	}

	/// Resolve `key` in the last result list, close the dropdown, then report it.
	fn select(&mut self, key: &ItemKey) {
		let Some(overlay) = self.overlay.take() else {
			return;
		};
		let item = overlay.item(key).cloned();
		overlay.teardown();
		self.runtime.invalidate();
		self.debounce.cancel();
		if let Some(item) = item {
			debug!(key = %key, "result selected");
			(self.on_selected)(item);
		}
	}

	/// Close the dropdown and forget any pending or running search.
	pub fn dismiss(&mut self) {
		if let Some(overlay) = self.overlay.take() {
			overlay.teardown();
		}
		self.runtime.invalidate();
		self.debounce.cancel();
	}

	pub fn clear(&mut self) {
		self.input.clear();
		self.dismiss();
	}

	/// Draw the input at its anchor, if fully visible.
	pub fn render_input(&mut self, frame: &mut Frame, viewport: &Viewport, theme: &Theme) {
		let Some(area) = viewport.to_screen(self.anchor) else {
			return;
		};
		if area.height < self.anchor.height {
			return;
		}
		self.input.render(frame, area, theme, self.focused);

		if self.is_searching() && area.width > 4 {
			let spinner = Throbber::default()
				.style(theme.empty_style())
				.throbber_style(theme.empty_style())
				.to_symbol_span(&self.throbber_state);
			let x = area.right().saturating_sub(3);
			frame
				.buffer_mut()
				.set_span(x, area.y + 1, &spinner, 1);
		}
	}

	/// Draw the dropdown; call after everything it may cover.
	pub fn render_overlay(&mut self, frame: &mut Frame, theme: &Theme) {
		if let Some(overlay) = self.overlay.as_mut() {
			overlay.render(frame, self.renderer.as_ref(), theme);
		}
	}
}

impl Drop for SearchField<'_> {
	fn drop(&mut self) {
		self.dismiss();
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;
	use std::thread;

	use mealdex_core::{CacheSnapshot, MemoryStore, ScopedSearch, SearchContext};
	use ratatui::Terminal;
	use ratatui::backend::TestBackend;
	use ratatui::crossterm::event::KeyModifiers;

	use super::*;
	use crate::overlay::NO_RESULTS;
	use crate::renderer::DefaultItemRenderer;

	const SCREEN: Rect = Rect {
		x: 0,
		y: 0,
		width: 40,
		height: 20,
	};

	type Picked = Rc<RefCell<Vec<SearchableItem>>>;

	fn searcher() -> Arc<dyn Searcher> {
		let cache = CacheSnapshot::new(
			vec![
				SearchableItem::food("f1", "Mela"),
				SearchableItem::food("f2", "Mela Verde"),
				SearchableItem::food("f9", "Pane integrale"),
			],
			vec![SearchableItem::recipe("r1", "Mela al forno")],
		);
		let context = SearchContext::new(Arc::new(MemoryStore::new()), Arc::new(cache));
		Arc::new(ScopedSearch::foods_and_recipes(Arc::new(context)))
	}

	fn field(picked: &Picked, placement: Option<Rect>) -> SearchField<'static> {
		let picked = Rc::clone(picked);
		let mut field = setup_search(
			QueryInput::new(""),
			placement,
			searcher(),
			move |item| picked.borrow_mut().push(item),
			DefaultItemRenderer,
		);
		field.set_anchor(Rect::new(2, 4, 30, 3));
		field.set_bounds(SCREEN);
		field
	}

	fn viewport() -> Viewport {
		let mut viewport = Viewport::new(SCREEN);
		viewport.set_content_height(40);
		viewport
	}

	fn type_text(field: &mut SearchField<'_>, text: &str, now: Instant) {
		for ch in text.chars() {
			field.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE), now);
		}
	}

	/// Tick past the debounce window until results are showing.
	fn settle(field: &mut SearchField<'_>, viewport: &Viewport, typed_at: Instant) {
		let later = typed_at + Duration::from_secs(1);
		for _ in 0..400 {
			field.tick(later, viewport);
			if field.is_open() && !field.is_searching() {
				return;
			}
			thread::sleep(Duration::from_millis(5));
		}
		panic!("search did not settle");
	}

	fn click(column: u16, row: u16) -> MouseEvent {
		MouseEvent {
			kind: MouseEventKind::Down(MouseButton::Left),
			column,
			row,
			modifiers: KeyModifiers::NONE,
		}
	}

	fn names(field: &SearchField<'_>) -> Vec<String> {
		field
			.overlay()
			.map(|overlay| overlay.items().iter().map(|item| item.name.clone()).collect())
			.unwrap_or_default()
	}

	#[test]
	fn typing_opens_ranked_dropdown_after_the_window() {
		let picked = Picked::default();
		let viewport = viewport();
		let mut field = field(&picked, None);
		let start = Instant::now();

		type_text(&mut field, "mela", start);
		field.tick(start + Duration::from_millis(100), &viewport);
		assert!(!field.is_open());
		assert!(field.is_searching());

		settle(&mut field, &viewport, start);
		assert_eq!(names(&field), vec!["Mela", "Mela al forno", "Mela Verde"]);
		assert_eq!(viewport.listener_count(), 1);
		assert_eq!(
			field.overlay().and_then(ResultOverlay::area),
			Some(Rect::new(2, 7, 30, 5))
		);
	}

	#[test]
	fn clicking_a_row_selects_that_item_and_tears_down() {
		let picked = Picked::default();
		let viewport = viewport();
		let mut field = field(&picked, None);
		let start = Instant::now();
		type_text(&mut field, "mela", start);
		settle(&mut field, &viewport, start);

		assert!(field.handle_mouse(click(6, 9), &viewport));
		assert!(!field.is_open());
		assert_eq!(viewport.listener_count(), 0);
		let picked = picked.borrow();
		assert_eq!(picked.len(), 1);
		assert_eq!(picked[0].key(), ItemKey::recipe("r1"));
	}

	#[test]
	fn clicking_outside_dismisses_but_the_anchor_does_not() {
		let picked = Picked::default();
		let viewport = viewport();
		let mut field = field(&picked, None);
		let start = Instant::now();
		type_text(&mut field, "mela", start);
		settle(&mut field, &viewport, start);

		assert!(field.handle_mouse(click(5, 5), &viewport));
		assert!(field.is_open());

		assert!(!field.handle_mouse(click(38, 18), &viewport));
		assert!(!field.is_open());
		assert_eq!(viewport.listener_count(), 0);
		assert!(picked.borrow().is_empty());
	}

	#[test]
	fn short_input_tears_the_dropdown_down_immediately() {
		let picked = Picked::default();
		let viewport = viewport();
		let mut field = field(&picked, None);
		let start = Instant::now();
		type_text(&mut field, "mela", start);
		settle(&mut field, &viewport, start);

		let now = start + Duration::from_secs(2);
		for _ in 0..3 {
			field.handle_key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE), now);
		}
		assert_eq!(field.text(), "m");
		assert!(!field.is_open());
		assert!(!field.is_searching());
		assert_eq!(viewport.listener_count(), 0);
	}

	#[test]
	fn keyboard_navigation_selects_highlighted_row() {
		let picked = Picked::default();
		let viewport = viewport();
		let mut field = field(&picked, None);
		let start = Instant::now();
		type_text(&mut field, "mela", start);
		settle(&mut field, &viewport, start);

		let now = start + Duration::from_secs(2);
		field.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE), now);
		field.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE), now);
		field.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), now);

		assert!(!field.is_open());
		assert_eq!(picked.borrow()[0].name, "Mela Verde");
	}

	#[test]
	fn scrolling_the_viewport_moves_the_dropdown() {
		let picked = Picked::default();
		let mut viewport = viewport();
		let mut field = field(&picked, None);
		let start = Instant::now();
		type_text(&mut field, "pane", start);
		settle(&mut field, &viewport, start);
		assert_eq!(
			field.overlay().and_then(ResultOverlay::area),
			Some(Rect::new(2, 7, 30, 3))
		);

		viewport.scroll_by(3);
		field.tick(start + Duration::from_secs(2), &viewport);
		assert_eq!(
			field.overlay().and_then(ResultOverlay::area),
			Some(Rect::new(2, 4, 30, 3))
		);
	}

	#[test]
	fn no_matches_render_the_placeholder_row() {
		let picked = Picked::default();
		let viewport = viewport();
		let mut field = field(&picked, None);
		let start = Instant::now();
		type_text(&mut field, "zucchine", start);
		settle(&mut field, &viewport, start);
		assert!(names(&field).is_empty());

		let mut terminal = Terminal::new(TestBackend::new(40, 20)).expect("terminal");
		terminal
			.draw(|frame| {
				field.render_input(frame, &viewport, &Theme::default());
				field.render_overlay(frame, &Theme::default());
			})
			.expect("draw");
		let buffer = terminal.backend().buffer();
		let row: String = (0..40).map(|x| buffer[(x, 8)].symbol()).collect();
		assert!(row.contains(NO_RESULTS));

		assert!(field.handle_mouse(click(10, 8), &viewport));
		assert!(field.is_open());
		assert!(picked.borrow().is_empty());
	}

	#[test]
	fn inline_placement_draws_into_the_container() {
		let picked = Picked::default();
		let viewport = viewport();
		let container = Rect::new(0, 12, 40, 6);
		let mut field = field(&picked, Some(container));
		let start = Instant::now();
		type_text(&mut field, "mela", start);
		settle(&mut field, &viewport, start);

		assert_eq!(viewport.listener_count(), 0);
		assert_eq!(field.overlay().and_then(ResultOverlay::area), Some(container));
	}
}

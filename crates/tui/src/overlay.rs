//! Dropdown listing the ranked results of the latest search.
//!
//! The overlay is either drawn floating over the screen right below the
//! anchor input ([`DropdownPlacement::Floating`]) or into a fixed container
//! chosen by the caller ([`DropdownPlacement::Inline`]). A floating overlay
//! follows its anchor through viewport scroll and resize events for as long
//! as it is open.

use mealdex_core::{ItemKey, SearchableItem};
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph};
use tracing::trace;

use crate::renderer::ItemRenderer;
use crate::style::Theme;
use crate::viewport::{Viewport, ViewportSubscription};

/// Text of the placeholder row shown for an empty result list.
pub const NO_RESULTS: &str = "No results";

/// Rows taken by the top and bottom border.
const BORDER_ROWS: u16 = 2;

/// Where the dropdown is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownPlacement {
	/// Over everything, directly below the anchor input.
	Floating,
	/// Inside a caller-provided container (screen coordinates).
	Inline(Rect),
}

/// What a screen position corresponds to inside the overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayHit {
	/// A result row carrying the item's identity.
	Row(ItemKey),
	/// The non-selectable "No results" row.
	Placeholder,
	/// Border or unused space inside the overlay.
	Chrome,
	/// Not inside the overlay.
	Outside,
}

/// Open dropdown of one search session.
pub struct ResultOverlay {
	placement: DropdownPlacement,
	items: Vec<SearchableItem>,
	rows: Vec<ItemKey>,
	list_state: ListState,
	max_visible_rows: u16,
	area: Option<Rect>,
	laid_out_for: Option<(Rect, Rect)>,
	pending_layout: bool,
	subscription: Option<ViewportSubscription>,
}

impl ResultOverlay {
	/// Open an overlay for `items`.
	///
	/// Floating overlays subscribe to `viewport` until torn down.
	pub fn open(
		placement: DropdownPlacement,
		items: Vec<SearchableItem>,
		max_visible_rows: u16,
		viewport: &Viewport,
	) -> Self {
		let subscription = match placement {
			DropdownPlacement::Floating => Some(viewport.subscribe()),
			DropdownPlacement::Inline(_) => None,
		};
		let mut overlay = Self {
			placement,
			items: Vec::new(),
			rows: Vec::new(),
			list_state: ListState::default(),
			max_visible_rows: max_visible_rows.max(1),
			area: None,
			laid_out_for: None,
			pending_layout: true,
			subscription,
		};
		overlay.replace_items(items);
		overlay
	}

	/// Show a newer result list in the same overlay.
	pub fn replace_items(&mut self, items: Vec<SearchableItem>) {
		self.rows = items.iter().map(SearchableItem::key).collect();
		self.items = items;
		self.list_state = ListState::default().with_selected((!self.items.is_empty()).then_some(0));
		self.pending_layout = true;
	}

	/// Move an inline dropdown to a new container.
	pub fn set_container(&mut self, container: Rect) {
		if let DropdownPlacement::Inline(current) = &mut self.placement
			&& *current != container
		{
			*current = container;
			self.pending_layout = true;
		}
	}

	pub fn placement(&self) -> DropdownPlacement {
		self.placement
	}

	pub fn items(&self) -> &[SearchableItem] {
		&self.items
	}

	/// Screen area from the last layout, `None` while hidden.
	pub fn area(&self) -> Option<Rect> {
		self.area
	}

	/// Whether the viewport moved since the last call.
	pub fn take_reposition(&mut self) -> bool {
		self.subscription
			.as_ref()
			.is_some_and(|subscription| !subscription.take_events().is_empty())
	}

	/// Re-run the layout if the viewport moved or the inputs changed.
	pub fn sync(&mut self, viewport: &Viewport, anchor: Rect, bounds: Rect) {
		let moved = self.take_reposition();
		if moved || self.pending_layout || self.laid_out_for != Some((anchor, bounds)) {
			self.layout(viewport, anchor, bounds);
		}
	}

	/// Compute the on-screen rect.
	///
	/// `anchor` is the anchor input's content rect inside `viewport`; `bounds`
	/// is the whole drawable screen.
	pub fn layout(&mut self, viewport: &Viewport, anchor: Rect, bounds: Rect) {
		self.area = match self.placement {
			DropdownPlacement::Inline(container) => Some(container.intersection(bounds))
				.filter(|area| area.width > 0 && area.height > BORDER_ROWS),
			DropdownPlacement::Floating => self.floating_area(viewport, anchor, bounds),
		};
		self.laid_out_for = Some((anchor, bounds));
		self.pending_layout = false;
	}

	fn floating_area(&self, viewport: &Viewport, anchor: Rect, bounds: Rect) -> Option<Rect> {
		let visible = viewport.to_screen(anchor)?;
		let rows = u16::try_from(self.items.len().max(1))
			.unwrap_or(u16::MAX)
			.min(self.max_visible_rows);
		let desired = rows + BORDER_ROWS;

		let anchor_top = viewport.screen_row(anchor.y);
		let anchor_bottom = anchor_top + i32::from(anchor.height);
		let space_below = i32::from(bounds.bottom()) - anchor_bottom;
		let space_above = anchor_top - i32::from(bounds.y);
		let min_height = i32::from(BORDER_ROWS) + 1;

		let (y, height) = if space_below >= min_height || space_below >= space_above {
			let height = space_below.min(i32::from(desired));
			(anchor_bottom, height)
		} else {
			let height = space_above.min(i32::from(desired));
			(anchor_top - height, height)
		};
		if height < min_height {
			return None;
		}

		let x = visible.x.max(bounds.x);
		let width = anchor.width.min(bounds.right().saturating_sub(x));
		Some(Rect {
			x,
			y: u16::try_from(y).ok()?,
			width,
			height: u16::try_from(height).ok()?,
		})
	}

	pub fn contains(&self, column: u16, row: u16) -> bool {
		self.area
			.is_some_and(|area| area.contains(ratatui::layout::Position::new(column, row)))
	}

	/// Resolve a screen position to what is drawn there.
	pub fn hit_test(&self, column: u16, row: u16) -> OverlayHit {
		let Some(area) = self.area else {
			return OverlayHit::Outside;
		};
		if !self.contains(column, row) {
			return OverlayHit::Outside;
		}
		let inner = inner_area(area);
		if !inner.contains(ratatui::layout::Position::new(column, row)) {
			return OverlayHit::Chrome;
		}
		if self.rows.is_empty() {
			return if row == inner.y {
				OverlayHit::Placeholder
			} else {
				OverlayHit::Chrome
			};
		}
		let index = self.list_state.offset() + usize::from(row - inner.y);
		self.rows
			.get(index)
			.cloned()
			.map_or(OverlayHit::Chrome, OverlayHit::Row)
	}

	/// Look up a row's item by identity.
	pub fn item(&self, key: &ItemKey) -> Option<&SearchableItem> {
		self.items.iter().find(|item| item.key() == *key)
	}

	pub fn selected_index(&self) -> Option<usize> {
		self.list_state.selected()
	}

	pub fn selected_key(&self) -> Option<&ItemKey> {
		self.rows.get(self.list_state.selected()?)
	}

	pub fn select_next(&mut self) {
		if self.rows.is_empty() {
			return;
		}
		let next = self
			.list_state
			.selected()
			.map_or(0, |selected| (selected + 1).min(self.rows.len() - 1));
		self.list_state.select(Some(next));
	}

	pub fn select_previous(&mut self) {
		if self.rows.is_empty() {
			return;
		}
		let previous = self
			.list_state
			.selected()
			.map_or(0, |selected| selected.saturating_sub(1));
		self.list_state.select(Some(previous));
	}

	pub fn render(&mut self, frame: &mut Frame, renderer: &dyn ItemRenderer, theme: &Theme) {
		let Some(area) = self.area else {
			return;
		};
		if matches!(self.placement, DropdownPlacement::Floating) {
			frame.render_widget(Clear, area);
		}

		let title = match self.items.len() {
			0 => String::new(),
			1 => " 1 result ".to_string(),
			n => format!(" {n} results "),
		};
		let block = Block::default()
			.borders(Borders::ALL)
			.border_type(BorderType::Rounded)
			.border_style(theme.prompt)
			.title(Span::styled(title, theme.header));
		let inner = block.inner(area);
		frame.render_widget(block, area);

		if self.items.is_empty() {
			let placeholder = Paragraph::new(NO_RESULTS)
				.style(theme.empty_style())
				.alignment(Alignment::Center);
			frame.render_widget(placeholder, Rect { height: 1, ..inner });
			return;
		}

		let rows: Vec<ListItem<'static>> = self
			.items
			.iter()
			.map(|item| ListItem::new(renderer.render(item, inner.width, theme)))
			.collect();
		let list = List::new(rows).highlight_style(theme.row_highlight);
		frame.render_stateful_widget(list, inner, &mut self.list_state);
	}

	/// Detach viewport listeners and discard the overlay.
	pub fn teardown(mut self) {
		self.subscription.take();
		trace!(rows = self.rows.len(), "result overlay torn down");
	}
}

fn inner_area(area: Rect) -> Rect {
	Rect {
		x: area.x.saturating_add(1),
		y: area.y.saturating_add(1),
		width: area.width.saturating_sub(2),
		height: area.height.saturating_sub(BORDER_ROWS),
	}
}

//! Scrollable screen region with scroll/resize listeners.
//!
//! Widgets laid out inside the viewport use content coordinates; the
//! viewport maps them to screen coordinates according to its scroll offset.
//! Anything that must follow a widget on screen (the floating dropdown)
//! subscribes and gets flagged whenever the mapping changes.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use ratatui::layout::Rect;

/// Why a listener was flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportEvent {
	Scroll,
	Resize,
}

#[derive(Default)]
struct Listener {
	id: u64,
	scrolled: Cell<bool>,
	resized: Cell<bool>,
}

#[derive(Default)]
struct Registry {
	next_id: u64,
	listeners: Vec<Rc<Listener>>,
}

/// Scrollable region of the screen.
pub struct Viewport {
	area: Rect,
	scroll: u16,
	content_height: u16,
	registry: Rc<RefCell<Registry>>,
}

impl Viewport {
	pub fn new(area: Rect) -> Self {
		Self {
			area,
			scroll: 0,
			content_height: 0,
			registry: Rc::default(),
		}
	}

	pub fn area(&self) -> Rect {
		self.area
	}

	pub fn scroll_offset(&self) -> u16 {
		self.scroll
	}

	fn max_scroll(&self) -> u16 {
		self.content_height.saturating_sub(self.area.height)
	}

	/// Record the total height of the laid out content.
	pub fn set_content_height(&mut self, height: u16) {
		self.content_height = height;
		let clamped = self.scroll.min(self.max_scroll());
		self.set_scroll(clamped);
	}

	/// Scroll by `delta` rows, clamped to the content.
	pub fn scroll_by(&mut self, delta: i32) {
		let target = (i32::from(self.scroll) + delta).clamp(0, i32::from(self.max_scroll()));
		self.set_scroll(u16::try_from(target).unwrap_or(0));
	}

	/// Scroll the minimum amount that makes `rows` (content coordinates) visible.
	pub fn scroll_into_view(&mut self, top: u16, height: u16) {
		let bottom = top.saturating_add(height);
		if top < self.scroll {
			self.set_scroll(top);
		} else if bottom > self.scroll.saturating_add(self.area.height) {
			let target = bottom.saturating_sub(self.area.height).min(self.max_scroll());
			self.set_scroll(target);
		}
	}

	fn set_scroll(&mut self, scroll: u16) {
		if scroll != self.scroll {
			self.scroll = scroll;
			self.emit(ViewportEvent::Scroll);
		}
	}

	/// Move or resize the viewport on screen.
	pub fn resize(&mut self, area: Rect) {
		if area != self.area {
			self.area = area;
			self.emit(ViewportEvent::Resize);
			let clamped = self.scroll.min(self.max_scroll());
			self.set_scroll(clamped);
		}
	}

	fn emit(&self, event: ViewportEvent) {
		for listener in &self.registry.borrow().listeners {
			match event {
				ViewportEvent::Scroll => listener.scrolled.set(true),
				ViewportEvent::Resize => listener.resized.set(true),
			}
		}
	}

	/// Screen rect of a content rect, clipped to the viewport.
	///
	/// `None` when the rect is scrolled completely out of view.
	pub fn to_screen(&self, content: Rect) -> Option<Rect> {
		let top = i32::from(content.y) - i32::from(self.scroll) + i32::from(self.area.y);
		let bottom = top + i32::from(content.height);
		let view_top = i32::from(self.area.y);
		let view_bottom = i32::from(self.area.bottom());
		let clipped_top = top.max(view_top);
		let clipped_bottom = bottom.min(view_bottom);
		if clipped_bottom <= clipped_top {
			return None;
		}
		let x = self.area.x.saturating_add(content.x);
		let width = content.width.min(self.area.right().saturating_sub(x));
		Some(Rect {
			x,
			y: u16::try_from(clipped_top).ok()?,
			width,
			height: u16::try_from(clipped_bottom - clipped_top).ok()?,
		})
	}

	/// Unclipped screen row of a content row; may be off-screen.
	pub fn screen_row(&self, content_row: u16) -> i32 {
		i32::from(content_row) - i32::from(self.scroll) + i32::from(self.area.y)
	}

	/// Register for scroll and resize notifications.
	///
	/// The registration lasts as long as the returned handle.
	pub fn subscribe(&self) -> ViewportSubscription {
		let mut registry = self.registry.borrow_mut();
		registry.next_id += 1;
		let listener = Rc::new(Listener {
			id: registry.next_id,
			..Listener::default()
		});
		registry.listeners.push(Rc::clone(&listener));
		ViewportSubscription {
			listener,
			registry: Rc::downgrade(&self.registry),
		}
	}

	/// Number of live subscriptions.
	pub fn listener_count(&self) -> usize {
		self.registry.borrow().listeners.len()
	}
}

/// Handle of a viewport registration; dropping it detaches the listener.
pub struct ViewportSubscription {
	listener: Rc<Listener>,
	registry: Weak<RefCell<Registry>>,
}

impl ViewportSubscription {
	/// Return and clear the events flagged since the last call.
	pub fn take_events(&self) -> Vec<ViewportEvent> {
		let mut events = Vec::new();
		if self.listener.scrolled.replace(false) {
			events.push(ViewportEvent::Scroll);
		}
		if self.listener.resized.replace(false) {
			events.push(ViewportEvent::Resize);
		}
		events
	}
}

impl Drop for ViewportSubscription {
	fn drop(&mut self) {
		if let Some(registry) = self.registry.upgrade() {
			let id = self.listener.id;
			registry
				.borrow_mut()
				.listeners
				.retain(|listener| listener.id != id);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn viewport() -> Viewport {
		let mut viewport = Viewport::new(Rect::new(0, 2, 40, 10));
		viewport.set_content_height(30);
		viewport
	}

	#[test]
	fn subscriptions_detach_on_drop() {
		let viewport = viewport();
		let first = viewport.subscribe();
		let second = viewport.subscribe();
		assert_eq!(viewport.listener_count(), 2);

		drop(first);
		assert_eq!(viewport.listener_count(), 1);
		drop(second);
		assert_eq!(viewport.listener_count(), 0);
	}

	#[test]
	fn scroll_and_resize_flag_listeners_once() {
		let mut viewport = viewport();
		let subscription = viewport.subscribe();

		viewport.scroll_by(3);
		viewport.scroll_by(1);
		viewport.resize(Rect::new(0, 2, 50, 10));
		assert_eq!(
			subscription.take_events(),
			vec![ViewportEvent::Scroll, ViewportEvent::Resize]
		);
		assert!(subscription.take_events().is_empty());

		viewport.scroll_by(-100);
		viewport.scroll_by(-1);
		assert_eq!(viewport.scroll_offset(), 0);
		assert_eq!(subscription.take_events(), vec![ViewportEvent::Scroll]);
	}

	#[test]
	fn screen_mapping_follows_scroll_and_clips() {
		let mut viewport = viewport();
		let field = Rect::new(2, 5, 20, 3);
		assert_eq!(viewport.to_screen(field), Some(Rect::new(2, 7, 20, 3)));

		viewport.scroll_by(4);
		assert_eq!(viewport.to_screen(field), Some(Rect::new(2, 3, 20, 3)));

		viewport.scroll_by(2);
		assert_eq!(viewport.to_screen(field), Some(Rect::new(2, 2, 20, 2)));

		viewport.scroll_by(10);
		assert_eq!(viewport.to_screen(field), None);
	}

	#[test]
	fn scrolling_is_clamped_to_content() {
		let mut viewport = viewport();
		viewport.scroll_by(100);
		assert_eq!(viewport.scroll_offset(), 20);
		viewport.scroll_into_view(2, 3);
		assert_eq!(viewport.scroll_offset(), 2);
		viewport.scroll_into_view(25, 3);
		assert_eq!(viewport.scroll_offset(), 18);
	}
}

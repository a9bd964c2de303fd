//! Keystroke debouncing for the search field.
//!
//! The controller never reads the clock itself: every call takes the current
//! [`Instant`], so the event loop passes `Instant::now()` and tests pass
//! synthetic instants.

use std::time::{Duration, Instant};

use mealdex_core::normalize_term;

/// Default quiet period before a query is dispatched.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// What the field should do right after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDecision {
	/// A dispatch is pending until the window elapses.
	Scheduled,
	/// The term is too short: tear down whatever is showing.
	Dismiss,
}

/// A term whose debounce window elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
	pub term: String,
}

#[derive(Debug)]
struct Pending {
	term: String,
	deadline: Instant,
}

/// Coalesces rapid input into one dispatch per quiet period.
#[derive(Debug)]
pub struct DebouncedInput {
	window: Duration,
	min_len: usize,
	pending: Option<Pending>,
}

impl Default for DebouncedInput {
	fn default() -> Self {
		Self::new(DEFAULT_DEBOUNCE, 2)
	}
}

impl DebouncedInput {
	pub fn new(window: Duration, min_len: usize) -> Self {
		Self {
			window,
			min_len: min_len.max(1),
			pending: None,
		}
	}

	pub fn window(&self) -> Duration {
		self.window
	}

	/// Record an input event carrying the full current text.
	pub fn on_input(&mut self, text: &str, now: Instant) -> InputDecision {
		let term = normalize_term(text);
		if term.chars().count() < self.min_len {
			self.pending = None;
			return InputDecision::Dismiss;
		}
		self.pending = Some(Pending {
			term,
			deadline: now + self.window,
		});
		InputDecision::Scheduled
	}

	/// Yield the pending term once its window has elapsed.
	pub fn poll(&mut self, now: Instant) -> Option<Dispatch> {
		let ready = self
			.pending
			.as_ref()
			.is_some_and(|pending| now >= pending.deadline);
		if !ready {
			return None;
		}
		self.pending.take().map(|pending| Dispatch { term: pending.term })
	}

	/// Deadline of the pending dispatch, if any.
	pub fn deadline(&self) -> Option<Instant> {
		self.pending.as_ref().map(|pending| pending.deadline)
	}

	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}

	/// Drop the pending dispatch without emitting it.
	pub fn cancel(&mut self) {
		self.pending = None;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ms(n: u64) -> Duration {
		Duration::from_millis(n)
	}

	#[test]
	fn rapid_keystrokes_dispatch_once_for_the_last_term() {
		let start = Instant::now();
		let mut debounce = DebouncedInput::default();
		let mut dispatched = Vec::new();

		for (offset, text) in [(0, "m"), (80, "me"), (160, "mel"), (240, "mela")] {
			let now = start + ms(offset);
			if let Some(dispatch) = debounce.poll(now) {
				dispatched.push(dispatch);
			}
			debounce.on_input(text, now);
		}

		for offset in (250..=800).step_by(10) {
			if let Some(dispatch) = debounce.poll(start + ms(offset)) {
				dispatched.push(dispatch);
			}
		}

		assert_eq!(
			dispatched,
			vec![Dispatch {
				term: "mela".to_string()
			}]
		);
	}

	#[test]
	fn dispatch_waits_for_the_full_window() {
		let start = Instant::now();
		let mut debounce = DebouncedInput::default();
		assert_eq!(debounce.on_input("Pane", start), InputDecision::Scheduled);

		assert_eq!(debounce.poll(start + ms(299)), None);
		assert_eq!(debounce.deadline(), Some(start + ms(300)));
		assert_eq!(
			debounce.poll(start + ms(300)).map(|dispatch| dispatch.term),
			Some("pane".to_string())
		);
		assert!(!debounce.is_pending());
	}

	#[test]
	fn short_input_dismisses_and_cancels() {
		let start = Instant::now();
		let mut debounce = DebouncedInput::default();
		debounce.on_input("mela", start);

		assert_eq!(debounce.on_input("a", start + ms(100)), InputDecision::Dismiss);
		assert_eq!(debounce.on_input("  ", start + ms(120)), InputDecision::Dismiss);
		assert_eq!(debounce.poll(start + ms(1_000)), None);
	}
}

//! Transient notifications shown in the bottom-right corner.

use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use mealdex_core::{Notifier, Severity};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::style::Theme;

/// How long a toast stays on screen.
pub const TOAST_TTL: Duration = Duration::from_secs(4);

/// A queued notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
	pub message: String,
	pub severity: Severity,
}

/// [`Notifier`] that forwards messages to the UI thread.
#[derive(Debug, Clone)]
pub struct ToastNotifier {
	tx: Sender<Toast>,
}

impl Notifier for ToastNotifier {
	fn notify(&self, message: &str, severity: Severity) {
		let _ = self.tx.send(Toast {
			message: message.to_string(),
			severity,
		});
	}
}

/// UI-side queue of toasts waiting to be shown.
pub struct ToastQueue {
	rx: Receiver<Toast>,
	queue: VecDeque<Toast>,
	current: Option<(Toast, Instant)>,
	ttl: Duration,
}

/// Create a connected notifier/queue pair.
pub fn channel() -> (ToastNotifier, ToastQueue) {
	let (tx, rx) = mpsc::channel();
	let queue = ToastQueue {
		rx,
		queue: VecDeque::new(),
		current: None,
		ttl: TOAST_TTL,
	};
	(ToastNotifier { tx }, queue)
}

impl ToastQueue {
	/// Pull new toasts and expire the current one.
	pub fn tick(&mut self, now: Instant) {
		self.queue.extend(self.rx.try_iter());
		if let Some((_, shown_at)) = &self.current
			&& now.duration_since(*shown_at) >= self.ttl
		{
			self.current = None;
		}
		if self.current.is_none()
			&& let Some(next) = self.queue.pop_front()
		{
			self.current = Some((next, now));
		}
	}

	pub fn current(&self) -> Option<&Toast> {
		self.current.as_ref().map(|(toast, _)| toast)
	}

	pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
		let Some(toast) = self.current() else {
			return;
		};
		if area.width < 4 || area.height == 0 {
			return;
		}
		let text = format!(" {} ", toast.message);
		let width = u16::try_from(text.width()).unwrap_or(u16::MAX).min(area.width);
		let rect = Rect {
			x: area.right() - width,
			y: area.bottom() - 1,
			width,
			height: 1,
		};
		let style = match toast.severity {
			Severity::Error => theme.error,
			Severity::Info => theme.info,
		};
		frame.render_widget(Clear, rect);
		frame.render_widget(Paragraph::new(Line::from(text)).style(style), rect);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn toasts_show_in_order_and_expire() {
		let (notifier, mut queue) = channel();
		let start = Instant::now();

		notifier.notify("first", Severity::Error);
		notifier.notify("second", Severity::Info);
		queue.tick(start);
		assert_eq!(queue.current().map(|toast| toast.message.as_str()), Some("first"));

		queue.tick(start + Duration::from_secs(1));
		assert_eq!(queue.current().map(|toast| toast.message.as_str()), Some("first"));

		queue.tick(start + TOAST_TTL);
		assert_eq!(queue.current().map(|toast| toast.message.as_str()), Some("second"));

		queue.tick(start + TOAST_TTL * 2);
		assert!(queue.current().is_none());
	}
}

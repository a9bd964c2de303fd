//! User-visible notifications raised by the search pipeline.

use tracing::{error, info};

/// How prominently a notification should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
	Info,
	Error,
}

/// Surface for toasts and error banners owned by the host application.
pub trait Notifier: Send + Sync {
	fn notify(&self, message: &str, severity: Severity);
}

/// Notifier for headless use: forwards messages to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
	fn notify(&self, message: &str, severity: Severity) {
		match severity {
			Severity::Info => info!(target: "mealdex::notify", "{message}"),
			Severity::Error => error!(target: "mealdex::notify", "{message}"),
		}
	}
}

use std::path::PathBuf;
use std::time::Duration;

use mealdex_core::{SearchOptions, SearchScope};
use mealdex_tui::UiOptions;

mod sources;
mod summary;
mod validation;

pub(crate) use sources::{ConfigSources, SettingSource};
pub(crate) use validation::ConfigError;

/// Where the searchable records come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataSettings {
	/// JSON snapshot loaded into the store and the caches.
	pub snapshot: Option<PathBuf>,
	pub user_id: Option<String>,
	pub offline: bool,
	pub latency: Duration,
}

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug)]
pub struct ResolvedConfig {
	pub data: DataSettings,
	pub scope: SearchScope,
	pub search: SearchOptions,
	pub ui: UiOptions,
	pub theme_name: String,
	pub(crate) sources: ConfigSources,
}

impl ResolvedConfig {
	pub(super) fn validate(&self) -> Result<(), ConfigError> {
		validation::validate(self, &self.sources)
	}

	/// Print a human readable summary of the effective configuration.
	pub fn print_summary(&self) {
		summary::print_summary(self);
	}
}

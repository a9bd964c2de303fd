use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::cli::CliArgs;
use crate::settings::DataSettings;

/// Where the searchable records come from.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct DataSection {
	pub(super) snapshot: Option<PathBuf>,
	pub(super) user_id: Option<String>,
	pub(super) offline: Option<bool>,
	pub(super) latency_ms: Option<u64>,
}

impl DataSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(path) = cli.data.clone() {
			self.snapshot = Some(path);
		}
		if let Some(user) = cli.user.clone() {
			self.user_id = Some(user);
		}
		if let Some(offline) = cli.offline {
			self.offline = Some(offline);
		}
		if let Some(latency) = cli.latency_ms {
			self.latency_ms = Some(latency);
		}
	}

	pub(super) fn resolve(self) -> DataSettings {
		DataSettings {
			snapshot: self.snapshot,
			user_id: self
				.user_id
				.map(|user| user.trim().to_string())
				.filter(|user| !user.is_empty()),
			offline: self.offline.unwrap_or(false),
			latency: Duration::from_millis(self.latency_ms.unwrap_or(0)),
		}
	}
}

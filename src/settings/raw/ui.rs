use std::time::Duration;

use anyhow::{Result, anyhow};
use mealdex_tui::style::by_name;
use mealdex_tui::{PlacementKind, UiOptions};
use serde::Deserialize;

use crate::cli::CliArgs;

const DEFAULT_THEME: &str = "slate";

/// UI related configuration values prior to validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct UiSection {
	pub(super) debounce_ms: Option<u64>,
	pub(super) placement: Option<String>,
	pub(super) max_visible_rows: Option<u16>,
	pub(super) input_title: Option<String>,
	pub(super) placeholder: Option<String>,
	pub(super) initial_query: Option<String>,
	pub(super) theme: Option<String>,
}

pub(super) struct UiResolution {
	pub(super) options: UiOptions,
	pub(super) theme_name: String,
}

impl UiSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(debounce) = cli.debounce_ms {
			self.debounce_ms = Some(debounce);
		}
		if let Some(placement) = cli.placement {
			self.placement = Some(placement.as_str().to_string());
		}
		if let Some(title) = cli.title.clone() {
			self.input_title = Some(title);
		}
		if let Some(query) = cli.initial_query.clone() {
			self.initial_query = Some(query);
		}
		if let Some(theme) = cli.theme.clone() {
			self.theme = Some(theme);
		}
	}

	pub(super) fn finalize(self, min_term_len: usize) -> Result<UiResolution> {
		let mut options = UiOptions {
			min_term_len,
			..UiOptions::default()
		};

		if let Some(ms) = self.debounce_ms {
			options.debounce = Duration::from_millis(ms);
		}
		if let Some(name) = self.placement.as_deref() {
			options.placement = PlacementKind::from_name(name)
				.ok_or_else(|| anyhow!("unknown dropdown placement '{}'", name.trim()))?;
		}
		if let Some(rows) = self.max_visible_rows {
			options.max_visible_rows = rows;
		}
		if let Some(title) = self.input_title.filter(|title| !title.trim().is_empty()) {
			options.labels.input_title = title;
		}
		if let Some(placeholder) = self.placeholder {
			options.labels.placeholder = placeholder;
		}
		options.initial_query = self.initial_query.unwrap_or_default();

		let theme_name = self
			.theme
			.map(|name| name.trim().to_ascii_lowercase())
			.filter(|name| !name.is_empty())
			.unwrap_or_else(|| DEFAULT_THEME.to_string());
		options.theme =
			by_name(&theme_name).ok_or_else(|| anyhow!("unknown theme '{theme_name}'"))?;

		Ok(UiResolution {
			options,
			theme_name,
		})
	}
}

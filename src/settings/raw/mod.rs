use std::env;

use anyhow::{Error, Result};
use serde::Deserialize;

use crate::cli::CliArgs;

use super::resolved::{ConfigSources, ResolvedConfig, SettingSource};

mod data;
mod search;
mod ui;

use data::DataSection;
use search::SearchSection;
use ui::UiSection;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	data: DataSection,
	search: SearchSection,
	ui: UiSection,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		self.data.apply_cli_overrides(cli);
		self.search.apply_cli_overrides(cli);
		self.ui.apply_cli_overrides(cli);
	}

	/// Convert the raw configuration into a [`ResolvedConfig`], validating and
	/// filling defaults where required.
	pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
		let mut sources = ConfigSources::default();
		sources.record(
			"data.latency_ms",
			detect_source(
				cli.latency_ms.is_some(),
				self.data.latency_ms.is_some(),
				"MEALDEX__DATA__LATENCY_MS",
				"--latency-ms",
				"data.latency_ms",
			),
		);
		sources.record(
			"search.page_size",
			detect_source(
				false,
				self.search.page_size.is_some(),
				"MEALDEX__SEARCH__PAGE_SIZE",
				"",
				"search.page_size",
			),
		);
		sources.record(
			"search.recipe_page_size",
			detect_source(
				false,
				self.search.recipe_page_size.is_some(),
				"MEALDEX__SEARCH__RECIPE_PAGE_SIZE",
				"",
				"search.recipe_page_size",
			),
		);
		sources.record(
			"search.max_results",
			detect_source(
				false,
				self.search.max_results.is_some(),
				"MEALDEX__SEARCH__MAX_RESULTS",
				"",
				"search.max_results",
			),
		);
		sources.record(
			"search.min_term_len",
			detect_source(
				false,
				self.search.min_term_len.is_some(),
				"MEALDEX__SEARCH__MIN_TERM_LEN",
				"",
				"search.min_term_len",
			),
		);
		sources.record(
			"ui.debounce_ms",
			detect_source(
				cli.debounce_ms.is_some(),
				self.ui.debounce_ms.is_some(),
				"MEALDEX__UI__DEBOUNCE_MS",
				"--debounce-ms",
				"ui.debounce_ms",
			),
		);
		sources.record(
			"ui.max_visible_rows",
			detect_source(
				false,
				self.ui.max_visible_rows.is_some(),
				"MEALDEX__UI__MAX_VISIBLE_ROWS",
				"",
				"ui.max_visible_rows",
			),
		);

		let data = self.data.resolve();
		let (scope, search) = self.search.resolve()?;
		let ui = self.ui.finalize(search.min_term_len)?;

		let config = ResolvedConfig {
			data,
			scope,
			search,
			ui: ui.options,
			theme_name: ui.theme_name,
			sources,
		};

		config.validate().map_err(Error::new)?;

		Ok(config)
	}
}

fn detect_source(
	cli_present: bool,
	value_present: bool,
	env_var: &'static str,
	cli_flag: &'static str,
	key: &'static str,
) -> Option<SettingSource> {
	if !value_present {
		return None;
	}

	if cli_present {
		return Some(SettingSource::CliFlag(cli_flag));
	}

	if env::var_os(env_var).is_some() {
		return Some(SettingSource::Environment(env_var));
	}

	Some(SettingSource::ConfigKey(key))
}

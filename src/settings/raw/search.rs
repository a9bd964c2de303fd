use anyhow::{Result, anyhow};
use mealdex_core::{SearchOptions, SearchScope};
use serde::Deserialize;

use crate::cli::CliArgs;

/// Tunables of the composite search.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SearchSection {
	pub(super) scope: Option<String>,
	pub(super) page_size: Option<usize>,
	pub(super) recipe_page_size: Option<usize>,
	pub(super) max_results: Option<usize>,
	pub(super) min_term_len: Option<usize>,
}

impl SearchSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(scope) = cli.scope {
			self.scope = Some(scope.as_str().to_string());
		}
	}

	pub(super) fn resolve(self) -> Result<(SearchScope, SearchOptions)> {
		let scope = match self.scope.as_deref() {
			None => SearchScope::FoodsAndRecipes,
			Some(name) => SearchScope::from_name(name)
				.ok_or_else(|| anyhow!("unknown search scope '{}'", name.trim()))?,
		};

		let defaults = SearchOptions::default();
		let options = SearchOptions {
			page_size: self.page_size.unwrap_or(defaults.page_size),
			recipe_page_size: self.recipe_page_size.unwrap_or(defaults.recipe_page_size),
			max_results: self.max_results.unwrap_or(defaults.max_results),
			min_term_len: self.min_term_len.unwrap_or(defaults.min_term_len),
		};
		Ok((scope, options))
	}
}

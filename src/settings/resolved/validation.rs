use std::ops::RangeInclusive;

use thiserror::Error;

use super::{ConfigSources, ResolvedConfig, SettingSource};

const PAGE_SIZE_RANGE: RangeInclusive<u128> = 1..=100;
const DEBOUNCE_MS_RANGE: RangeInclusive<u128> = 0..=5_000;

/// A resolved setting that no component can work with.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
	#[error("{key} from {origin} must be between {min} and {max} (value: {value})")]
	OutOfRange {
		key: &'static str,
		value: u128,
		origin: SettingSource,
		min: u128,
		max: u128,
	},
	#[error("{key} from {origin} must be at least 1 (value: 0)")]
	Zero {
		key: &'static str,
		origin: SettingSource,
	},
}

impl ConfigError {
	/// Dotted configuration key the error is about.
	pub(crate) fn key(&self) -> &'static str {
		match self {
			Self::OutOfRange { key, .. } | Self::Zero { key, .. } => key,
		}
	}
}

struct Checker<'a> {
	sources: &'a ConfigSources,
}

impl Checker<'_> {
	fn within(
		&self,
		key: &'static str,
		value: impl Into<u128>,
		range: &RangeInclusive<u128>,
	) -> Result<(), ConfigError> {
		let value = value.into();
		if range.contains(&value) {
			return Ok(());
		}
		Err(ConfigError::OutOfRange {
			key,
			value,
			origin: self.sources.source_for(key),
			min: *range.start(),
			max: *range.end(),
		})
	}

	fn nonzero(&self, key: &'static str, value: impl Into<u128>) -> Result<(), ConfigError> {
		if value.into() > 0 {
			return Ok(());
		}
		Err(ConfigError::Zero {
			key,
			origin: self.sources.source_for(key),
		})
	}
}

pub(super) fn validate(
	config: &ResolvedConfig,
	sources: &ConfigSources,
) -> Result<(), ConfigError> {
	let check = Checker { sources };
	let search = &config.search;

	check.within("search.page_size", search.page_size as u128, &PAGE_SIZE_RANGE)?;
	check.within("search.recipe_page_size", search.recipe_page_size as u128, &PAGE_SIZE_RANGE)?;
	check.nonzero("search.max_results", search.max_results as u128)?;
	check.nonzero("search.min_term_len", search.min_term_len as u128)?;
	check.within("ui.debounce_ms", config.ui.debounce.as_millis(), &DEBOUNCE_MS_RANGE)?;
	check.nonzero("ui.max_visible_rows", config.ui.max_visible_rows)
}

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Environment(&'static str),
	ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
		}
	}
}

/// Origin of each validated key that was set explicitly.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	entries: Vec<(&'static str, SettingSource)>,
}

impl ConfigSources {
	pub(crate) fn record(&mut self, key: &'static str, source: Option<SettingSource>) {
		if let Some(source) = source {
			self.entries.push((key, source));
		}
	}

	/// Explicit origin of `key`, if it was not left at its default.
	pub(crate) fn explicit(&self, key: &str) -> Option<&SettingSource> {
		self.entries
			.iter()
			.find(|(name, _)| *name == key)
			.map(|(_, source)| source)
	}

	pub(crate) fn source_for(&self, key: &'static str) -> SettingSource {
		self.explicit(key)
			.cloned()
			.unwrap_or(SettingSource::ConfigKey(key))
	}
}

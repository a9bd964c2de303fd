use super::ResolvedConfig;

pub(super) fn print_summary(config: &ResolvedConfig) {
	for line in summary_lines(config) {
		println!("{line}");
	}
}

fn summary_lines(config: &ResolvedConfig) -> Vec<String> {
	let origin = |key: &str| match config.sources.explicit(key) {
		Some(source) => format!(" (from {source})"),
		None => String::new(),
	};
	let data = &config.data;
	let search = &config.search;
	let ui = &config.ui;

	let mut lines = vec!["Effective configuration:".to_string()];
	match &data.snapshot {
		Some(path) => lines.push(format!("  Snapshot: {}", path.display())),
		None => lines.push("  Snapshot: (none)".to_string()),
	}
	lines.push(format!(
		"  User: {}",
		data.user_id.as_deref().unwrap_or("(signed out)")
	));
	lines.push(format!("  Offline: {}", bool_to_word(data.offline)));
	lines.push(format!(
		"  Store latency: {} ms{}",
		data.latency.as_millis(),
		origin("data.latency_ms")
	));
	lines.push(format!("  Scope: {}", config.scope.as_str()));
	lines.push(format!(
		"  Page size: {}{}",
		search.page_size,
		origin("search.page_size")
	));
	lines.push(format!(
		"  Recipe page size: {}{}",
		search.recipe_page_size,
		origin("search.recipe_page_size")
	));
	lines.push(format!(
		"  Max results: {}{}",
		search.max_results,
		origin("search.max_results")
	));
	lines.push(format!(
		"  Min term length: {}{}",
		search.min_term_len,
		origin("search.min_term_len")
	));
	lines.push(format!(
		"  Debounce: {} ms{}",
		ui.debounce.as_millis(),
		origin("ui.debounce_ms")
	));
	lines.push(format!("  Placement: {}", ui.placement.as_str()));
	lines.push(format!(
		"  Max visible rows: {}{}",
		ui.max_visible_rows,
		origin("ui.max_visible_rows")
	));
	lines.push(format!("  Input title: {}", ui.labels.input_title));
	if !ui.initial_query.is_empty() {
		lines.push(format!("  Initial query: {}", ui.initial_query));
	}
	lines.push(format!("  UI theme: {}", config.theme_name));
	lines
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
	use mealdex_core::{SearchOptions, SearchScope};
	use mealdex_tui::UiOptions;

	use super::super::{ConfigSources, DataSettings, SettingSource};
	use super::*;

	#[test]
	fn bool_to_word_matches_expectations() {
		assert_eq!(bool_to_word(true), "yes");
		assert_eq!(bool_to_word(false), "no");
	}

	#[test]
	fn summary_marks_explicit_values() {
		let mut sources = ConfigSources::default();
		sources.record("ui.debounce_ms", Some(SettingSource::CliFlag("--debounce-ms")));
		let config = ResolvedConfig {
			data: DataSettings {
				user_id: Some("u1".into()),
				..DataSettings::default()
			},
			scope: SearchScope::FoodsOnly,
			search: SearchOptions::default(),
			ui: UiOptions::default(),
			theme_name: "slate".into(),
			sources,
		};

		let lines = summary_lines(&config);
		assert!(lines.contains(&"  User: u1".to_string()));
		assert!(lines.contains(&"  Scope: foods".to_string()));
		assert!(lines.contains(&"  Debounce: 300 ms (from CLI flag `--debounce-ms`)".to_string()));
		assert!(lines.contains(&"  Page size: 15".to_string()));

		print_summary(&config);
	}
}

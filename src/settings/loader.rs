use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use config::{Config, Environment, File};

use super::raw::RawConfig;
use super::resolved::ResolvedConfig;
use crate::app_dirs;
use crate::cli::CliArgs;

/// Load configuration by combining CLI arguments, config files and environment
/// variables.
pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let mut raw: RawConfig = layered(cli)?
		.try_deserialize()
		.map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
	raw.apply_cli_overrides(cli);
	raw.resolve(cli)
}

/// Stack the config layers, lowest precedence first: discovered files,
/// `--config` files, then `MEALDEX__SECTION__KEY` variables.
fn layered(cli: &CliArgs) -> Result<Config> {
	let discovered = if cli.no_config {
		Vec::new()
	} else {
		discovered_files()
	};

	let mut builder = Config::builder();
	for path in discovered {
		builder = builder.add_source(File::from(path).required(false));
	}
	for path in &cli.config {
		builder = builder.add_source(File::from(path.as_path()).required(true));
	}
	builder
		.add_source(Environment::with_prefix("mealdex").separator("__").try_parsing(true))
		.build()
		.context("failed to read configuration")
}

/// The per-user config file, then the dotfile and plain file in the working directory.
fn discovered_files() -> Vec<PathBuf> {
	let user = app_dirs::get_config_dir().ok().map(|dir| dir.join("config.toml"));
	let local = env::current_dir()
		.ok()
		.into_iter()
		.flat_map(|cwd| [cwd.join(".mealdex.toml"), cwd.join("mealdex.toml")]);
	user.into_iter().chain(local).collect()
}

#[cfg(test)]
mod tests {
	use std::fs;
	use std::time::Duration;

	use clap::Parser;
	use mealdex_core::SearchScope;
	use mealdex_tui::PlacementKind;
	use tempfile::tempdir;

	use super::*;

	fn cli_with_file(contents: &str, extra: &[&str]) -> (tempfile::TempDir, CliArgs) {
		let dir = tempdir().expect("tempdir");
		let path = dir.path().join("mealdex.toml");
		fs::write(&path, contents).expect("write config");
		let mut args = vec![
			"mealdex".to_string(),
			"--no-config".to_string(),
			"--config".to_string(),
			path.display().to_string(),
		];
		args.extend(extra.iter().map(|arg| arg.to_string()));
		(dir, CliArgs::parse_from(args))
	}

	#[test]
	fn file_values_are_resolved() {
		let (_dir, cli) = cli_with_file(
			r#"
[data]
user_id = "u1"
latency_ms = 40

[search]
scope = "foods"
page_size = 5

[ui]
placement = "inline"
debounce_ms = 150
theme = "paper"
"#,
			&[],
		);

		let resolved = load(&cli).expect("config");
		assert_eq!(resolved.data.user_id.as_deref(), Some("u1"));
		assert_eq!(resolved.data.latency, Duration::from_millis(40));
		assert_eq!(resolved.scope, SearchScope::FoodsOnly);
		assert_eq!(resolved.search.page_size, 5);
		assert_eq!(resolved.search.recipe_page_size, 10);
		assert_eq!(resolved.ui.placement, PlacementKind::Inline);
		assert_eq!(resolved.ui.debounce, Duration::from_millis(150));
		assert_eq!(resolved.theme_name, "paper");
	}

	#[test]
	fn cli_flags_override_file_values() {
		let (_dir, cli) = cli_with_file(
			"[ui]\ndebounce_ms = 150\nplacement = \"inline\"\n",
			&["--debounce-ms", "50", "--placement", "floating"],
		);

		let resolved = load(&cli).expect("config");
		assert_eq!(resolved.ui.debounce, Duration::from_millis(50));
		assert_eq!(resolved.ui.placement, PlacementKind::Floating);
	}

	#[test]
	fn invalid_values_name_key_and_origin() {
		let (_dir, cli) = cli_with_file("[search]\npage_size = 0\n", &[]);

		let message = load(&cli).expect_err("invalid").to_string();
		assert!(message.contains("search.page_size"));
		assert!(message.contains("configuration key"));
		assert!(message.contains("value: 0"));
	}

	#[test]
	fn discovered_files_cover_the_working_directory() {
		let files = discovered_files();
		assert!(files.iter().any(|path| path.ends_with(".mealdex.toml")));
		assert!(files.iter().any(|path| path.ends_with("mealdex.toml")));
	}

	#[test]
	fn missing_required_file_is_an_error() {
		let cli = CliArgs::parse_from([
			"mealdex",
			"--no-config",
			"--config",
			"/nonexistent/mealdex.toml",
		]);
		assert!(load(&cli).is_err());
	}
}

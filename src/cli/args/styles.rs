use std::path::PathBuf;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects, Style};

use crate::app_dirs;

fn describe(dir: Result<PathBuf>) -> String {
	dir.map_or_else(|err| format!("unavailable ({err})"), |path| path.display().to_string())
}

/// `--version` banner with the directories mealdex reads config from and logs to.
pub(super) fn long_version() -> &'static str {
	let banner = format!(
		"{version}\n\nconfig: {config}\nlog:    {data}/mealdex.log",
		version = env!("CARGO_PKG_VERSION"),
		config = describe(app_dirs::get_config_dir()),
		data = describe(app_dirs::get_data_dir()),
	);
	Box::leak(banner.into_boxed_str())
}

pub(super) fn cli_styles() -> Styles {
	let heading = AnsiColor::Yellow.on_default().effects(Effects::BOLD);
	Styles::styled()
		.header(heading)
		.usage(heading)
		.literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.placeholder(Style::new().effects(Effects::ITALIC))
		.error(AnsiColor::Red.on_default().effects(Effects::BOLD))
		.invalid(AnsiColor::Red.on_default())
		.valid(AnsiColor::Green.on_default())
}

//! Tracing setup for the binary.
//!
//! The interactive screen owns the terminal, so events go to a log file in the
//! data directory. One-shot queries fall back to stderr when no file can be
//! opened.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::app_dirs;

const LOG_ENV: &str = "MEALDEX_LOG";
const LOG_FILE: &str = "mealdex.log";

fn filter(verbose: bool) -> EnvFilter {
	EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("mealdex=debug,mealdex_core=debug,mealdex_tui=debug,warn")
		} else {
			EnvFilter::new("mealdex=info,mealdex_core=info,mealdex_tui=info,warn")
		}
	})
}

/// Install the global subscriber and return the log file path, if any.
pub fn init(verbose: bool, headless: bool) -> Option<PathBuf> {
	if let Some(path) = log_path()
		&& let Ok(file) = OpenOptions::new().create(true).append(true).open(&path)
	{
		let file_layer = tracing_subscriber::fmt::layer()
			.with_writer(file)
			.with_ansi(false)
			.with_target(true);
		let installed = tracing_subscriber::registry()
			.with(filter(verbose))
			.with(file_layer)
			.try_init()
			.is_ok();
		if installed {
			tracing::info!(path = %path.display(), "mealdex tracing initialized");
			return Some(path);
		}
		return None;
	}

	if headless {
		let _ = tracing_subscriber::fmt()
			.with_env_filter(filter(verbose))
			.with_writer(std::io::stderr)
			.try_init();
	}
	None
}

fn log_path() -> Option<PathBuf> {
	let dir = app_dirs::get_data_dir().ok()?;
	fs::create_dir_all(&dir).ok()?;
	Some(dir.join(LOG_FILE))
}

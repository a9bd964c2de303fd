mod app_dirs;
mod cli;
mod logging;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use settings::ResolvedConfig;
use workflow::MealWorkflow;

fn main() -> Result<()> {
	let cli = parse_cli();

	if cli.list_themes {
		for name in mealdex_tui::style::names() {
			println!("{name}");
		}
		return Ok(());
	}

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	let headless = cli.query.is_some();
	let _log_path = logging::init(cli.verbose, headless);

	run(cli.query, cli.output, resolved)
}

/// Run a one-shot query or the interactive screen, then print the result.
fn run(query: Option<String>, format: OutputFormat, settings: ResolvedConfig) -> Result<()> {
	let workflow = MealWorkflow::from_config(settings)?;
	let report = match query {
		Some(term) => workflow.search_once(&term),
		None => workflow.run_interactive()?,
	};

	match format {
		OutputFormat::Plain => print_plain(&report),
		OutputFormat::Json => print_json(&report)?,
	}

	Ok(())
}

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, ColorChoice, Parser};

use super::options::{OutputFormat, PlacementArg, ScopeArg};
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `mealdex` binary.
#[derive(Parser, Debug)]
#[command(
	name = "mealdex",
	version,
	long_version = long_version(),
	about = "Log meals from a terminal with incremental food and recipe search",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "MEALDEX_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'D',
		long = "data",
		value_name = "FILE",
		help = "JSON snapshot of foods and recipes to search (default: none)"
	)]
	pub(crate) data: Option<PathBuf>,
	#[arg(
		short = 'u',
		long = "user",
		value_name = "ID",
		help = "User whose recipes are searched (default: none, foods only)"
	)]
	pub(crate) user: Option<String>,
	#[arg(
		long,
		value_parser = BoolishValueParser::new(),
		num_args = 0..=1,
		default_missing_value = "true",
		help = "Simulate an unreachable store; only cached items are found (default: disabled)"
	)]
	pub(crate) offline: Option<bool>,
	#[arg(
		long = "latency-ms",
		value_name = "MS",
		help = "Artificial delay added to every store call (default: 0)"
	)]
	pub(crate) latency_ms: Option<u64>,
	#[arg(
		short = 's',
		long,
		value_enum,
		help = "Records covered by a search (default: foods-and-recipes)"
	)]
	pub(crate) scope: Option<ScopeArg>,
	#[arg(
		short = 'P',
		long,
		value_enum,
		help = "Where the result dropdown is drawn (default: floating)"
	)]
	pub(crate) placement: Option<PlacementArg>,
	#[arg(
		long = "debounce-ms",
		value_name = "MS",
		help = "Quiet period after the last keystroke before searching (default: 300)"
	)]
	pub(crate) debounce_ms: Option<u64>,
	#[arg(
		short = 't',
		long,
		value_name = "TITLE",
		help = "Set the search input title (default: Search foods)"
	)]
	pub(crate) title: Option<String>,
	#[arg(
		short = 'i',
		long = "initial-query",
		value_name = "QUERY",
		help = "Pre-fill the search input (default: empty)"
	)]
	pub(crate) initial_query: Option<String>,
	#[arg(
		long,
		value_name = "THEME",
		help = "Select a theme by name (default: slate)"
	)]
	pub(crate) theme: Option<String>,
	#[arg(
		short = 'q',
		long,
		value_name = "TERM",
		help = "Run one search, print the ranked results and exit (default: interactive)"
	)]
	pub(crate) query: Option<String>,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'l',
		long = "list-themes",
		help = "List supported themes and exit (default: disabled)"
	)]
	pub(crate) list_themes: bool,
	#[arg(
		short = 'v',
		long,
		help = "Log debug events to the log file (default: disabled)"
	)]
	pub(crate) verbose: bool,
	#[arg(
		short = 'o',
		long = "output",
		value_enum,
		default_value_t = OutputFormat::Plain,
		help = "Choose how to print the result"
	)]
	pub(crate) output: OutputFormat,
}

use clap::ValueEnum;

/// Search scopes accepted via the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ScopeArg {
	Foods,
	#[clap(name = "foods-and-recipes")]
	FoodsAndRecipes,
}

impl ScopeArg {
	/// Return the string representation consumed by configuration loading.
	pub(crate) fn as_str(self) -> &'static str {
		match self {
			ScopeArg::Foods => "foods",
			ScopeArg::FoodsAndRecipes => "foods-and-recipes",
		}
	}
}

/// Dropdown placements selectable from the CLI.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum PlacementArg {
	Floating,
	Inline,
}

impl PlacementArg {
	pub(crate) fn as_str(self) -> &'static str {
		match self {
			PlacementArg::Floating => "floating",
			PlacementArg::Inline => "inline",
		}
	}
}

/// Output formats supported by the CLI utility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
	Plain,
	Json,
}

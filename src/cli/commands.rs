use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

use jagung::prediction::{SoilQuality, Variety};
use jagung::search::MatchMode;

#[derive(Parser, Debug)]
#[command(name = "jagung")]
#[command(version)]
#[command(about = "Search and browse corn information pages, with a toy yield predictor")]
#[command(
    long_about = "jagung - live section search for markdown information pages.\n\n\
    Launch with just a file for the interactive view: type to filter the page's\n\
    sections, matches are highlighted, Esc clears the query. Use flags to search\n\
    from scripts, and subcommands for the yield predictor and preferences.\n\n\
    Examples:\n  \
    jagung jagung.md                      # Interactive search\n  \
    jagung jagung.md --search hibrida     # Sections mentioning \"hibrida\"\n  \
    jagung jagung.md -l                   # List sections\n  \
    jagung predict --soil baik --month 6  # Yield estimate\n  \
    jagung dark-mode toggle               # Switch the saved theme"
)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Markdown file to search, or '-' for stdin
    ///
    /// Level-2 headings (## ...) split the page into sections; each section
    /// is shown or hidden as a whole.
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,

    /// Filter sections by query (non-interactive)
    ///
    /// Prints every section with the matches marked. Sections whose text
    /// does not contain the query are left out.
    ///
    /// Example: --search "pupuk"
    #[arg(short = 's', long = "search", value_name = "QUERY")]
    pub search: Option<String>,

    /// How the query is matched
    ///
    ///   literal - case-insensitive substring (default)
    ///   pattern - case-insensitive regular expression
    #[arg(short = 'm', long = "match-mode", value_name = "MODE")]
    pub match_mode: Option<MatchMode>,

    /// List section ids and titles (non-interactive)
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Heading level that starts a section (1-6)
    ///
    /// Overrides `search.section_level` from the config file.
    #[arg(
        short = 'L',
        long = "level",
        value_name = "LEVEL",
        value_parser = clap::value_parser!(u8).range(1..=6)
    )]
    pub level: Option<u8>,

    /// Output format for --search and --list
    ///
    ///   plain - Human-readable text (default)
    ///   json  - JSON for scripting
    #[arg(short = 'o', long = "output", default_value = "plain")]
    pub output: OutputFormat,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Estimate corn yield with the ARIMA and regression models
    ///
    /// The estimate uses fixed coefficients per soil quality, variety and
    /// harvest month. Results are in tons per hectare.
    Predict(PredictArgs),

    /// Show or change the saved dark mode preference
    DarkMode {
        /// on, off or toggle; omit to show the current value
        action: Option<DarkModeAction>,
    },
}

#[derive(Debug, Args)]
pub struct PredictArgs {
    /// Soil quality
    #[arg(long, default_value_t = SoilQuality::default())]
    pub soil: SoilQuality,

    /// Corn variety
    #[arg(long, default_value_t = Variety::default())]
    pub variety: Variety,

    /// Harvest month (1-12)
    #[arg(long, default_value_t = 5)]
    pub month: u8,

    /// Land area in hectares
    #[arg(long, default_value_t = 1.0)]
    pub area: f64,

    /// Output format
    #[arg(short = 'o', long = "output", default_value = "plain")]
    pub output: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DarkModeAction {
    On,
    Off,
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// JSON output
    Json,
}

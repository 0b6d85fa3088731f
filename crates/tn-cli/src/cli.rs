//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tn_core::{ClockMode, Precision};

/// Inline time tracking.
///
/// Clocks on and off by appending time ranges such as `time: 8:20-9:20`
/// to plain text files, and sums them up.
#[derive(Debug, Parser)]
#[command(name = "tn", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured precision (hours, minutes or seconds).
    #[arg(long, global = true)]
    pub precision: Option<Precision>,

    /// Override the configured clock (12 or 24).
    #[arg(long, global = true)]
    pub clock: Option<ClockMode>,

    /// Override the configured wrap column.
    #[arg(long, global = true)]
    pub wrap_column: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Clock on or off in the annotation nearest the cursor.
    Toggle(EditArgs),

    /// Insert the current time at the cursor.
    Insert(EditArgs),

    /// Show accumulated time.
    Summary(SummaryArgs),
}

/// File and cursor an operation works on.
#[derive(Debug, Args)]
pub struct Target {
    /// Text file holding the annotations.
    pub file: PathBuf,

    /// Cursor line, 1-based. Defaults to the end of the file.
    #[arg(long)]
    pub line: Option<usize>,

    /// Cursor column, 1-based. Defaults to the end of the line.
    #[arg(long, requires = "line")]
    pub column: Option<usize>,

    /// Use this time instead of the wall clock (H:MM or H:MM:SS).
    #[arg(long)]
    pub now: Option<String>,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    #[command(flatten)]
    pub target: Target,

    /// Print the edited text instead of saving it.
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Debug, Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub target: Target,

    /// Sum every annotation from the cursor back to the start of the file.
    #[arg(long, conflicts_with = "from")]
    pub all: bool,

    /// First line of the selection to sum, 1-based.
    #[arg(long, requires = "to")]
    pub from: Option<usize>,

    /// Last line of the selection to sum, 1-based.
    #[arg(long, requires = "from")]
    pub to: Option<usize>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

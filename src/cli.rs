//! CLI argument parsing for the converter.
//!
//! The CLI only gathers inputs; file discovery and conversion live in the
//! workflow so flags never change how a table is parsed.
use clap::Parser;
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "casepack",
    version,
    about = "Convert CSV test-case tables into Markdown case packages",
    after_help = "Examples:\n  casepack                         Convert every *.csv under ./cases\n  casepack cases/登录.csv           Convert one file\n  casepack --packages-dir out a.csv b.csv\n  casepack --json --fail-on-error"
)]
pub struct RootArgs {
    /// CSV files to convert (default: every *.csv in the cases directory)
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Directory scanned for CSV files when no paths are given
    #[arg(long, value_name = "DIR")]
    pub cases_dir: Option<PathBuf>,

    /// Directory that receives the generated packages
    #[arg(long, value_name = "DIR")]
    pub packages_dir: Option<PathBuf>,

    /// Config file (default: ./casepack.json when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Reject files whose quoting is left open at end of input
    #[arg(long)]
    pub strict_quotes: bool,

    /// Exit non-zero when any file fails to convert
    #[arg(long)]
    pub fail_on_error: bool,

    /// Emit the batch report as JSON instead of progress lines
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging on stderr
    #[arg(long)]
    pub verbose: bool,
}

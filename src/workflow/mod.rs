//! Batch conversion of case tables into packages.
//!
//! Files are converted one at a time; a failure is recorded against its file
//! and the batch moves on.
mod convert;
mod report;

pub use convert::{convert_file, Settings};
pub use report::{BatchReport, FileOutcome, FileReport, Progress};

use crate::cli::RootArgs;
use crate::util::{display_path, resolve_path};
use anyhow::{anyhow, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const SOURCE_EXTENSION: &str = ".csv";

/// Resolve settings, convert every input, and report the batch.
pub fn run_convert(args: RootArgs) -> Result<()> {
    let cwd = env::current_dir().context("resolve current directory")?;
    let settings = Settings::resolve(&args, &cwd)?;
    let progress = Progress::new(!args.json);
    progress.banner();

    let sources = discover_sources(&args.paths, &settings)?;
    if sources.is_empty() {
        return Err(anyhow!(
            "no CSV files found in {}",
            settings.cases_dir.display()
        ));
    }

    let report = convert_batch(&sources, &settings, &progress);
    progress.summary(&report);
    if args.json {
        let text = serde_json::to_string_pretty(&report).context("serialize batch report")?;
        println!("{text}");
    }

    if args.fail_on_error && report.failed > 0 {
        return Err(anyhow!(
            "{} of {} files failed to convert",
            report.failed,
            report.attempted
        ));
    }
    Ok(())
}

/// Named paths resolved against the working directory, or every `*.csv`
/// in the cases directory sorted by name.
pub fn discover_sources(paths: &[PathBuf], settings: &Settings) -> Result<Vec<PathBuf>> {
    if !paths.is_empty() {
        return Ok(paths
            .iter()
            .map(|path| resolve_path(&settings.cwd, path))
            .collect());
    }
    list_sources(&settings.cases_dir)
}

fn list_sources(cases_dir: &Path) -> Result<Vec<PathBuf>> {
    if !cases_dir.is_dir() {
        tracing::debug!(dir = %cases_dir.display(), "cases directory missing");
        return Ok(Vec::new());
    }
    let mut sources = Vec::new();
    for entry in
        fs::read_dir(cases_dir).with_context(|| format!("read {}", cases_dir.display()))?
    {
        let path = entry?.path();
        let is_source = path
            .file_name()
            .map(|name| name.to_string_lossy().ends_with(SOURCE_EXTENSION))
            .unwrap_or(false);
        if is_source && path.is_file() {
            sources.push(path);
        }
    }
    sources.sort();
    Ok(sources)
}

/// Convert each source in order, containing failures to their own file.
pub fn convert_batch(
    sources: &[PathBuf],
    settings: &Settings,
    progress: &Progress,
) -> BatchReport {
    let mut report = BatchReport::default();
    for source in sources {
        let source_label = display_path(source, Some(&settings.cwd));
        progress.start(&source_label);
        let outcome = match convert_file(source, settings) {
            Ok(outcome) => outcome,
            Err(err) => {
                let error = format!("{err:#}");
                tracing::debug!(source = %source.display(), %error, "conversion failed");
                FileOutcome::Failed { error }
            }
        };
        progress.outcome(&outcome);
        report.push(FileReport {
            source: source_label,
            outcome,
        });
    }
    report
}

#[cfg(test)]
mod tests;

use super::report::FileOutcome;
use crate::classify::{classify_rows, Classified};
use crate::cli::RootArgs;
use crate::config::{load_config, load_config_optional, PackConfig, DEFAULT_CONFIG_FILE};
use crate::package::{package_name, source_stem, write_package};
use crate::render::render_document;
use crate::table::read_table;
use crate::util::{display_path, resolve_path};
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Effective settings for one run: config values with CLI overrides applied.
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: PackConfig,
    pub cwd: PathBuf,
    pub cases_dir: PathBuf,
    pub packages_dir: PathBuf,
    pub strict_quotes: bool,
}

impl Settings {
    pub fn resolve(args: &RootArgs, cwd: &Path) -> Result<Self> {
        let config = match args.config.as_deref() {
            Some(path) => load_config(&resolve_path(cwd, path))?,
            None => load_config_optional(&cwd.join(DEFAULT_CONFIG_FILE))?.unwrap_or_default(),
        };
        Ok(Self::from_config(config, args, cwd))
    }

    pub fn from_config(config: PackConfig, args: &RootArgs, cwd: &Path) -> Self {
        let cases_dir = args.cases_dir.as_deref().unwrap_or(&config.cases_dir);
        let packages_dir = args.packages_dir.as_deref().unwrap_or(&config.packages_dir);
        Self {
            cwd: cwd.to_path_buf(),
            cases_dir: resolve_path(cwd, cases_dir),
            packages_dir: resolve_path(cwd, packages_dir),
            strict_quotes: args.strict_quotes || config.strict_quotes,
            config,
        }
    }
}

/// Convert one source file into a package.
///
/// Structural problems with the table come back as
/// [`FileOutcome::Skipped`]; I/O failures and strict-quote violations are
/// errors.
pub fn convert_file(source: &Path, settings: &Settings) -> Result<FileOutcome> {
    let raw =
        fs::read_to_string(source).with_context(|| format!("read {}", source.display()))?;
    let table = read_table(&raw);
    tracing::debug!(source = %source.display(), rows = table.rows.len(), "parsed table");

    if let Some(line) = table.unterminated_quote_line {
        if settings.strict_quotes {
            return Err(anyhow!(
                "quote opened on line {line} of {} is never closed",
                source.display()
            ));
        }
        tracing::warn!(
            source = %source.display(),
            line,
            "quote never closed; rest of file read as one field"
        );
    }

    let records = match classify_rows(&table.rows) {
        Classified::Records {
            header_index,
            records,
        } => {
            tracing::debug!(header_index, records = records.len(), "found case records");
            records
        }
        Classified::Skipped(reason) => return Ok(FileOutcome::Skipped { reason }),
    };

    let stem = source_stem(source);
    let name = package_name(source);
    let rendered = render_document(&stem, &records);
    let written = write_package(
        &settings.config,
        &settings.packages_dir,
        &name,
        &stem,
        &rendered.markdown,
    )?;

    let cwd = Some(settings.cwd.as_path());
    Ok(FileOutcome::Converted {
        package: name,
        package_dir: display_path(&written.root, cwd),
        manifest: display_path(&written.manifest, cwd),
        document: display_path(&written.document, cwd),
        summary: rendered.summary,
    })
}

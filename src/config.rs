//! Converter configuration.
//!
//! Settings come from an optional `casepack.json` next to where the tool is
//! run; command-line flags override individual values afterwards.
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_SCHEMA_VERSION: u32 = 1;
pub const DEFAULT_CONFIG_FILE: &str = "casepack.json";

/// Pack layout and manifest settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackConfig {
    pub schema_version: u32,
    /// Directory scanned for `*.csv` when no paths are given.
    pub cases_dir: PathBuf,
    /// Directory that receives one package per converted file.
    pub packages_dir: PathBuf,
    /// npm scope prefixed to every package name.
    pub package_scope: String,
    pub package_version: String,
    /// Command the manifest scripts invoke.
    pub runner: String,
    /// Platform directories created under `cases/`.
    pub categories: Vec<String>,
    /// Reject files that end inside an open quote.
    pub strict_quotes: bool,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            schema_version: CONFIG_SCHEMA_VERSION,
            cases_dir: PathBuf::from("cases"),
            packages_dir: PathBuf::from("packages"),
            package_scope: "@midscene".to_string(),
            package_version: "1.0.0".to_string(),
            runner: "midscene".to_string(),
            categories: vec!["android".to_string(), "ios".to_string(), "web".to_string()],
            strict_quotes: false,
        }
    }
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<PackConfig> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: PackConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config JSON {}", path.display()))?;
    validate_config(&config).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

/// Load `path` when it exists; a missing file means defaults.
pub fn load_config_optional(path: &Path) -> Result<Option<PackConfig>> {
    if !path.is_file() {
        return Ok(None);
    }
    load_config(path).map(Some)
}

pub fn validate_config(config: &PackConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported schema_version {} (expected {})",
            config.schema_version,
            CONFIG_SCHEMA_VERSION
        ));
    }
    for (label, value) in [
        ("package_scope", &config.package_scope),
        ("package_version", &config.package_version),
        ("runner", &config.runner),
    ] {
        if value.trim().is_empty() {
            return Err(anyhow!("{label} must not be empty"));
        }
    }
    if config.categories.is_empty() {
        return Err(anyhow!("categories must list at least one directory"));
    }
    for category in &config.categories {
        let simple = !category.is_empty()
            && !category.contains(['/', '\\'])
            && category != "."
            && category != "..";
        if !simple {
            return Err(anyhow!("category {category:?} is not a plain directory name"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, text: &str) -> PathBuf {
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, text).expect("write config");
        path
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(&dir, r#"{"packages_dir": "out", "strict_quotes": true}"#);
        let config = load_config(&path).expect("load config");
        assert_eq!(config.packages_dir, PathBuf::from("out"));
        assert!(config.strict_quotes);
        assert_eq!(config.cases_dir, PathBuf::from("cases"));
        assert_eq!(config.categories, vec!["android", "ios", "web"]);
    }

    #[test]
    fn missing_optional_config_is_none() {
        let dir = TempDir::new().expect("temp dir");
        let loaded = load_config_optional(&dir.path().join(DEFAULT_CONFIG_FILE)).expect("load");
        assert!(loaded.is_none());
    }

    #[test]
    fn rejects_unknown_fields_and_schema() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(&dir, r#"{"pakage_scope": "@x"}"#);
        assert!(load_config(&path).is_err());

        let path = write_config(&dir, r#"{"schema_version": 9}"#);
        let err = load_config(&path).expect_err("schema mismatch");
        assert!(format!("{err:#}").contains("unsupported schema_version 9"));
    }

    #[test]
    fn rejects_nested_category_paths() {
        let config = PackConfig {
            categories: vec!["web".to_string(), "../escape".to_string()],
            ..PackConfig::default()
        };
        assert!(validate_config(&config).is_err());
        assert!(validate_config(&PackConfig::default()).is_ok());
    }

    #[test]
    fn rejects_blank_runner() {
        let config = PackConfig {
            runner: "  ".to_string(),
            ..PackConfig::default()
        };
        let err = validate_config(&config).expect_err("blank runner");
        assert!(err.to_string().contains("runner"));
    }
}

use super::manifest::build_manifest;
use super::paths::{category_rel, document_rel, PackagePaths, CASES_REL, MANIFEST_REL};
use crate::config::PackConfig;
use crate::staging::{publish_staging, write_staged_dir, write_staged_json, write_staged_text};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Where a package ended up on disk.
#[derive(Debug, Clone)]
pub struct WrittenPackage {
    pub root: PathBuf,
    pub manifest: PathBuf,
    pub document: PathBuf,
}

/// Publish the package skeleton, manifest, and document as one unit.
///
/// Existing packages with the same name are updated in place: the manifest
/// and document are replaced, any other files already there are left alone.
pub fn write_package(
    config: &PackConfig,
    packages_dir: &Path,
    package_name: &str,
    stem: &str,
    markdown: &str,
) -> Result<WrittenPackage> {
    let paths = PackagePaths::new(packages_dir, package_name);
    fs::create_dir_all(packages_dir)
        .with_context(|| format!("create {}", packages_dir.display()))?;

    let txn = tempfile::Builder::new()
        .prefix(".casepack-")
        .tempdir_in(packages_dir)
        .with_context(|| format!("create staging dir in {}", packages_dir.display()))?;
    let staging_root = txn.path().join("staging");
    let backup_root = txn.path().join("backup");

    // The skeleton goes through staging too, so a failed publish leaves no
    // empty package behind.
    write_staged_dir(&staging_root, CASES_REL)?;
    for category in &config.categories {
        write_staged_dir(&staging_root, &category_rel(category))?;
    }
    let manifest = build_manifest(config, package_name, stem);
    write_staged_json(&staging_root, MANIFEST_REL, &manifest)?;
    write_staged_text(&staging_root, &document_rel(stem), markdown)?;

    let published = publish_staging(&staging_root, paths.root(), &backup_root)?;
    tracing::info!(
        package = package_name,
        files = published.len(),
        "package published"
    );

    Ok(WrittenPackage {
        root: paths.root().to_path_buf(),
        manifest: paths.manifest_path(),
        document: paths.document_path(stem),
    })
}

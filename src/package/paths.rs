//! Typed paths into a package layout.
use std::path::{Path, PathBuf};

pub const MANIFEST_REL: &str = "package.json";
pub const CASES_REL: &str = "cases";

/// Locates the files and directories of one package.
#[derive(Debug, Clone)]
pub struct PackagePaths {
    root: PathBuf,
}

impl PackagePaths {
    pub fn new(packages_dir: &Path, package_name: &str) -> Self {
        Self {
            root: packages_dir.join(package_name),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Return the `package.json` path.
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_REL)
    }

    /// Return the rendered document path for a source stem.
    pub fn document_path(&self, stem: &str) -> PathBuf {
        self.root.join(document_rel(stem))
    }
}

/// Category directory relative to the package root.
pub fn category_rel(category: &str) -> String {
    format!("{CASES_REL}/{category}")
}

/// Document location relative to the package root.
pub fn document_rel(stem: &str) -> String {
    format!("{CASES_REL}/{stem}.md")
}

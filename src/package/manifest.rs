use super::paths::{category_rel, CASES_REL};
use crate::config::PackConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The `package.json` written at the root of every package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
    pub description: String,
    pub private: bool,
    pub scripts: BTreeMap<String, String>,
}

/// Build the manifest for `package_name`, converted from a file named `stem`.
pub fn build_manifest(config: &PackConfig, package_name: &str, stem: &str) -> PackageManifest {
    let runner = config.runner.as_str();
    let mut scripts = BTreeMap::new();
    scripts.insert("test".to_string(), format!("{runner} {CASES_REL}"));
    for category in &config.categories {
        scripts.insert(
            format!("test:{category}"),
            format!("{runner} {}", category_rel(category)),
        );
    }
    PackageManifest {
        name: format!("{}/{package_name}", config.package_scope),
        version: config.package_version.clone(),
        description: format!("{stem} 测试用例包"),
        private: true,
        scripts,
    }
}

//! Shared test infrastructure for integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn manifest_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn copy_tree(from: &Path, to: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.path().is_dir() {
            copy_tree(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// A scratch working directory seeded from `tests/fixtures/<name>`.
pub struct TestFixture {
    pub work_dir: TempDir,
}

/// Captured result of one casepack invocation.
pub struct RunResult {
    pub output: Output,
}

impl RunResult {
    pub fn success(&self) -> bool {
        self.output.status.success()
    }

    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Parse stdout as the `--json` batch report.
    pub fn report(&self) -> serde_json::Value {
        serde_json::from_slice(&self.output.stdout).expect("stdout is a JSON report")
    }
}

impl TestFixture {
    /// Copy a fixture directory into a fresh temp dir.
    pub fn load(name: &str) -> anyhow::Result<Self> {
        let work_dir = TempDir::new()?;
        copy_tree(
            &manifest_dir().join("tests/fixtures").join(name),
            work_dir.path(),
        )?;
        Ok(Self { work_dir })
    }

    /// An empty working directory.
    pub fn empty() -> anyhow::Result<Self> {
        Ok(Self {
            work_dir: TempDir::new()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.work_dir.path()
    }

    pub fn expected(name: &str) -> String {
        fs::read_to_string(manifest_dir().join("tests/fixtures").join(name))
            .expect("expected output fixture")
    }

    /// Run casepack inside the fixture directory.
    pub fn run(&self, args: &[&str]) -> anyhow::Result<RunResult> {
        let output = Command::new(env!("CARGO_BIN_EXE_casepack"))
            .args(args)
            .current_dir(self.path())
            .env_remove("RUST_LOG")
            .output()?;
        Ok(RunResult { output })
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path().join(rel))
            .unwrap_or_else(|err| panic!("read {rel}: {err}"))
    }
}

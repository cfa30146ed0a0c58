//! Staged writes for package outputs.
//!
//! A package is assembled under a staging root and then moved into its
//! destination. Every change made to the destination is journaled; if any
//! step fails, the journal is undone and the destination is left as it was.
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub fn write_staged_bytes(staging_root: &Path, rel_path: &str, bytes: &[u8]) -> Result<()> {
    let staging_path = staging_root.join(rel_path);
    if let Some(parent) = staging_path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(&staging_path, bytes).with_context(|| format!("write {}", staging_path.display()))
}

pub fn write_staged_text(staging_root: &Path, rel_path: &str, text: &str) -> Result<()> {
    write_staged_bytes(staging_root, rel_path, text.as_bytes())
}

pub fn write_staged_json<T: serde::Serialize>(
    staging_root: &Path,
    rel_path: &str,
    value: &T,
) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serialize staged JSON")?;
    write_staged_bytes(staging_root, rel_path, &bytes)
}

/// Stage a directory that must exist after publishing even if it stays empty.
pub fn write_staged_dir(staging_root: &Path, rel_path: &str) -> Result<()> {
    let dir = staging_root.join(rel_path);
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))
}

/// One publishable item, relative to the staging root.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Staged {
    Dir(PathBuf),
    File(PathBuf),
}

impl Staged {
    fn rel(&self) -> &Path {
        match self {
            Staged::Dir(rel) | Staged::File(rel) => rel,
        }
    }
}

/// Files plus empty directories under `root`, ordered by relative path.
fn staged_items(root: &Path) -> Result<Vec<Staged>> {
    fn walk(root: &Path, dir: &Path, items: &mut Vec<Staged>) -> Result<()> {
        let mut empty = true;
        for entry in fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))? {
            empty = false;
            let path = entry?.path();
            if path.is_dir() {
                walk(root, &path, items)?;
            } else if path.is_file() {
                items.push(Staged::File(relative_to(root, &path)?));
            }
        }
        if empty && dir != root {
            items.push(Staged::Dir(relative_to(root, dir)?));
        }
        Ok(())
    }

    let mut items = Vec::new();
    if root.is_dir() {
        walk(root, root, &mut items)?;
    }
    items.sort_by(|a, b| a.rel().cmp(b.rel()));
    Ok(items)
}

fn relative_to(root: &Path, path: &Path) -> Result<PathBuf> {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .with_context(|| format!("{} is outside {}", path.display(), root.display()))
}

/// Changes applied to a destination tree, in the order they happened.
#[derive(Debug, Default)]
struct Journal {
    created_dirs: Vec<PathBuf>,
    placed: Vec<PathBuf>,
    /// Destination file and where its previous contents were moved.
    displaced: Vec<(PathBuf, PathBuf)>,
}

impl Journal {
    /// Create `dir` and any missing ancestors, remembering each one created.
    fn ensure_dir(&mut self, dir: &Path) -> Result<()> {
        let missing: Vec<PathBuf> = dir
            .ancestors()
            .take_while(|ancestor| !ancestor.as_os_str().is_empty() && !ancestor.exists())
            .map(Path::to_path_buf)
            .collect();
        for path in missing.into_iter().rev() {
            fs::create_dir(&path).with_context(|| format!("create {}", path.display()))?;
            self.created_dirs.push(path);
        }
        Ok(())
    }

    /// Move an existing destination file aside so it can be restored.
    fn displace(&mut self, dest: &Path, backup: &Path) -> Result<()> {
        if let Some(parent) = backup.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        if fs::rename(dest, backup).is_err() {
            fs::copy(dest, backup).with_context(|| format!("back up {}", dest.display()))?;
        }
        self.displaced.push((dest.to_path_buf(), backup.to_path_buf()));
        Ok(())
    }

    /// Copy `source` next to `dest` and rename it into place.
    fn place(&mut self, source: &Path, dest: &Path) -> Result<()> {
        let parent = dest
            .parent()
            .ok_or_else(|| anyhow!("publish target {} has no parent", dest.display()))?;
        self.ensure_dir(parent)?;
        let file_name = dest
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "staged".to_string());
        let tmp_path = parent.join(format!(".{file_name}.tmp"));
        let moved = fs::copy(source, &tmp_path)
            .map(|_| ())
            .and_then(|()| fs::rename(&tmp_path, dest));
        if let Err(err) = moved {
            let _ = fs::remove_file(&tmp_path);
            return Err(err).with_context(|| format!("publish {}", dest.display()));
        }
        self.placed.push(dest.to_path_buf());
        Ok(())
    }

    fn apply(
        &mut self,
        item: &Staged,
        staging_root: &Path,
        dest_root: &Path,
        backup_root: &Path,
    ) -> Result<()> {
        let dest = dest_root.join(item.rel());
        match item {
            Staged::Dir(_) => {
                self.ensure_dir(&dest)?;
                if !dest.is_dir() {
                    return Err(anyhow!("{} exists and is not a directory", dest.display()));
                }
                Ok(())
            }
            Staged::File(rel) => {
                if dest.exists() {
                    self.displace(&dest, &backup_root.join(rel))?;
                }
                self.place(&staging_root.join(rel), &dest)
            }
        }
    }

    /// Revert every recorded change, newest first. Best effort: undo keeps
    /// going past individual failures.
    fn undo(self) {
        for path in self.placed.iter().rev() {
            let _ = fs::remove_file(path);
        }
        for (dest, backup) in self.displaced.iter().rev() {
            if fs::rename(backup, dest).is_err() {
                let _ = fs::copy(backup, dest);
            }
        }
        for dir in self.created_dirs.iter().rev() {
            let _ = fs::remove_dir(dir);
        }
    }
}

/// Publish the staged tree into `dest_root` and return the files written.
///
/// Replaced files are parked under `backup_root` until the whole tree is in
/// place. On error, everything published so far is reverted.
pub fn publish_staging(
    staging_root: &Path,
    dest_root: &Path,
    backup_root: &Path,
) -> Result<Vec<PathBuf>> {
    let items = staged_items(staging_root)?;
    let mut journal = Journal::default();
    for item in &items {
        if let Err(err) = journal.apply(item, staging_root, dest_root, backup_root) {
            tracing::debug!(
                placed = journal.placed.len(),
                displaced = journal.displaced.len(),
                "reverting partial publish"
            );
            journal.undo();
            return Err(err);
        }
    }
    Ok(journal.placed)
}

#[cfg(test)]
#[path = "staging_tests.rs"]
mod tests;

//! Test helpers shared across crates.
//!
//! Provides temporary directories for configuration files, addressed with
//! UTF-8 paths.

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Temporary directory holding configuration files for one test.
///
/// The directory and its contents are removed when the value is dropped.
///
/// # Examples
///
/// ```
/// use optmatch_test_helpers::ConfigDir;
///
/// let dir = ConfigDir::new().expect("create temp dir");
/// let path = dir.write("train.conf", &["--epochs 3"]).expect("write file");
/// assert!(path.ends_with("train.conf"));
/// ```
#[derive(Debug)]
pub struct ConfigDir {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl ConfigDir {
    /// Creates an empty temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or its path is
    /// not valid UTF-8.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temporary directory")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("temporary directory {} is not UTF-8", path.display()))?;
        Ok(Self { _dir: dir, root })
    }

    /// Root of the directory.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.root
    }

    /// Writes `lines`, newline-terminated, to `name` under the directory and
    /// returns the file's path. Parent directories are created as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parents cannot be written.
    pub fn write(&self, name: &str, lines: &[&str]) -> Result<Utf8PathBuf> {
        let path = self.root.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {parent}"))?;
        }
        let mut contents = lines.join("\n");
        contents.push('\n');
        std::fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }
}

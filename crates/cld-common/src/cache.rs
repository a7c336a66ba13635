//! File-backed artifact cache with freshness gating
//!
//! One byte blob per logical dataset name under a configurable root
//! directory. Readers gate on the artifact's modification time; writers
//! stream bytes into the artifact and must finish with either
//! [`CacheWriter::commit`] or [`CacheWriter::abort`]. Dropping a writer
//! without committing deletes the artifact, so every early-return path out
//! of a fetch session leaves no truncated blob behind.

use crate::error::{CldError, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::debug;

/// Cache of named byte artifacts under a root directory.
///
/// The root is threaded in at construction; there is no process-wide
/// cache location.
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path to the cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the named artifact within the store.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Read the named artifact if it exists and is fresh.
    ///
    /// Returns [`CldError::CacheMiss`] if the artifact does not exist and
    /// [`CldError::CacheStale`] if its age exceeds `max_age`. A zero
    /// `max_age` disables the age check entirely.
    pub fn read_if_fresh(&self, name: &str, max_age: Duration) -> Result<Vec<u8>> {
        let path = self.path_for(name);

        let metadata =
            std::fs::metadata(&path).map_err(|_| CldError::CacheMiss(name.to_string()))?;

        if !max_age.is_zero() {
            let modified = metadata.modified()?;
            let age = SystemTime::now()
                .duration_since(modified)
                .unwrap_or(Duration::ZERO);
            if age > max_age {
                return Err(CldError::CacheStale(name.to_string()));
            }
        }

        Ok(std::fs::read(&path)?)
    }

    /// Begin writing the named artifact, truncating any prior contents.
    ///
    /// Parent directories are created as needed. The returned writer must
    /// reach exactly one of [`CacheWriter::commit`] or
    /// [`CacheWriter::abort`]; dropping it uncommitted aborts.
    pub fn begin_write(&self, name: &str) -> Result<CacheWriter> {
        let path = self.path_for(name);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(&path)?;
        debug!(artifact = %path.display(), "opened cache artifact for writing");

        Ok(CacheWriter {
            file: Some(file),
            path,
            committed: false,
        })
    }
}

/// In-progress write of a single cache artifact.
///
/// The artifact exists on disk (truncated) from the moment the writer is
/// created, and survives only if `commit` runs.
#[derive(Debug)]
pub struct CacheWriter {
    file: Option<File>,
    path: PathBuf,
    committed: bool,
}

impl CacheWriter {
    /// Append raw bytes to the artifact.
    pub fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        if let Some(file) = self.file.as_mut() {
            file.write_all(bytes)?;
        }
        Ok(())
    }

    /// Finish the write and retain the artifact.
    pub fn commit(mut self) -> Result<()> {
        if let Some(file) = self.file.take() {
            file.sync_all()?;
        }
        self.committed = true;
        debug!(artifact = %self.path.display(), "committed cache artifact");
        Ok(())
    }

    /// Finish the write and delete the artifact.
    pub fn abort(self) {
        // Drop does the cleanup.
    }

    /// Path of the artifact being written.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for CacheWriter {
    fn drop(&mut self) {
        if !self.committed {
            // Close the handle before unlinking.
            self.file.take();
            let _ = std::fs::remove_file(&self.path);
            debug!(artifact = %self.path.display(), "aborted cache artifact");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, CacheStore) {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_read_missing_is_miss() {
        let (_dir, store) = store();
        let err = store
            .read_if_fresh("nope.json", Duration::from_secs(60))
            .unwrap_err();
        assert!(matches!(err, CldError::CacheMiss(_)));
    }

    #[test]
    fn test_write_commit_read_back() {
        let (_dir, store) = store();

        let mut writer = store.begin_write("blob.json").unwrap();
        writer.write_all(b"[1,").unwrap();
        writer.write_all(b"2]").unwrap();
        writer.commit().unwrap();

        let bytes = store
            .read_if_fresh("blob.json", Duration::from_secs(3600))
            .unwrap();
        assert_eq!(bytes, b"[1,2]");
    }

    #[test]
    fn test_abort_removes_artifact() {
        let (_dir, store) = store();

        let mut writer = store.begin_write("blob.json").unwrap();
        writer.write_all(b"partial").unwrap();
        writer.abort();

        assert!(!store.path_for("blob.json").exists());
    }

    #[test]
    fn test_drop_without_commit_removes_artifact() {
        let (_dir, store) = store();

        {
            let mut writer = store.begin_write("blob.json").unwrap();
            writer.write_all(b"partial").unwrap();
            // Dropped here without commit.
        }

        assert!(!store.path_for("blob.json").exists());
    }

    #[test]
    fn test_begin_write_truncates_previous() {
        let (_dir, store) = store();

        let mut writer = store.begin_write("blob.json").unwrap();
        writer.write_all(b"old contents").unwrap();
        writer.commit().unwrap();

        let mut writer = store.begin_write("blob.json").unwrap();
        writer.write_all(b"new").unwrap();
        writer.commit().unwrap();

        let bytes = store.read_if_fresh("blob.json", Duration::ZERO).unwrap();
        assert_eq!(bytes, b"new");
    }

    #[test]
    fn test_zero_max_age_disables_gate() {
        let (_dir, store) = store();

        let mut writer = store.begin_write("blob.json").unwrap();
        writer.write_all(b"x").unwrap();
        writer.commit().unwrap();

        assert!(store.read_if_fresh("blob.json", Duration::ZERO).is_ok());
    }

    #[test]
    fn test_old_artifact_is_stale() {
        let (dir, store) = store();

        let mut writer = store.begin_write("blob.json").unwrap();
        writer.write_all(b"x").unwrap();
        writer.commit().unwrap();

        // Backdate the artifact by 90 minutes.
        let path = dir.path().join("blob.json");
        let mtime = SystemTime::now() - Duration::from_secs(90 * 60);
        let file = File::options().append(true).open(&path).unwrap();
        file.set_modified(mtime).unwrap();
        drop(file);

        // 30 minutes old would be fine, 90 is past a 1 hour max age.
        let err = store
            .read_if_fresh("blob.json", Duration::from_secs(3600))
            .unwrap_err();
        assert!(matches!(err, CldError::CacheStale(_)));
    }

    #[test]
    fn test_nested_artifact_name_creates_dirs() {
        let (_dir, store) = store();

        let mut writer = store.begin_write("us/ct/brands.json").unwrap();
        writer.write_all(b"[]").unwrap();
        writer.commit().unwrap();

        let bytes = store
            .read_if_fresh("us/ct/brands.json", Duration::ZERO)
            .unwrap();
        assert_eq!(bytes, b"[]");
    }
}

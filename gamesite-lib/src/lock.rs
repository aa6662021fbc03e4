//! Exclusive access to site files.
//!
//! Several commands rewrite the same `index.html`. A run holds a sibling
//! `<file>.lock` (created with create-new semantics) for the whole
//! read-modify-write cycle, and the new contents land through a temp file
//! plus rename so readers never see a half-written page.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::SiteError;

/// Guard for `<file>.lock`. The lock file is removed on drop.
#[derive(Debug)]
pub struct WriteLock {
    lock_path: PathBuf,
}

impl WriteLock {
    /// Take the lock for `target`. Fails with [`SiteError::Locked`] if another
    /// run holds it.
    pub fn acquire(target: &Path) -> Result<Self, SiteError> {
        let lock_path = sibling_with_suffix(target, "lock");
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)
        {
            Ok(mut file) => {
                // pid is informational only
                let _ = writeln!(file, "{}", std::process::id());
                log::debug!("Acquired {}", lock_path.display());
                Ok(Self { lock_path })
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Err(SiteError::locked(target))
            }
            Err(e) => Err(SiteError::file(lock_path, e)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.lock_path
    }
}

impl Drop for WriteLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.lock_path) {
            log::warn!("Failed to remove {}: {}", self.lock_path.display(), e);
        }
    }
}

/// Write `contents` to `path` through `<path>.tmp` and a rename.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let tmp = sibling_with_suffix(path, "tmp");
    fs::write(&tmp, contents)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}

/// `index.html` → `index.html.<suffix>`.
fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

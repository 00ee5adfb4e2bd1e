// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Whole-file snapshots on local disk.
//!
//! Every write lands in a temp file in the target's directory and is renamed
//! over the target, so readers see either the old snapshot or the new one.
//! Read-modify-write cycles take an exclusive advisory lock on a sibling
//! `.lock` file for cross-process exclusion. Acquisition polls with a
//! deadline instead of parking the thread indefinitely.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use fs2::FileExt;
use tempfile::NamedTempFile;

/// How long [`SnapshotLock::acquire`] waits for another holder.
pub const LOCK_TIMEOUT: Duration = Duration::from_secs(2);

const LOCK_POLL: Duration = Duration::from_millis(10);

/// Atomically replaces `path` with `contents`.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = parent_dir(path);
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    restrict_permissions(tmp.path())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Reads `path`, returning `None` if it does not exist.
pub fn read_optional(path: &Path) -> io::Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Exclusive lock on a snapshot, released on drop.
pub struct SnapshotLock {
    file: File,
}

impl SnapshotLock {
    /// Takes the lock for `path`, waiting at most [`LOCK_TIMEOUT`].
    pub fn acquire(path: &Path) -> io::Result<Self> {
        Self::acquire_within(path, LOCK_TIMEOUT)
    }

    /// Takes the lock for `path`, failing with `WouldBlock` once `timeout`
    /// has passed while someone else holds it.
    pub fn acquire_within(path: &Path, timeout: Duration) -> io::Result<Self> {
        let lock_path = lock_path(path);
        fs::create_dir_all(parent_dir(&lock_path))?;
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)?;

        let deadline = Instant::now() + timeout;
        loop {
            match file.try_lock_exclusive() {
                Ok(()) => return Ok(SnapshotLock { file }),
                Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
                    if Instant::now() >= deadline {
                        return Err(io::Error::new(
                            io::ErrorKind::WouldBlock,
                            format!("{} is locked by another process", path.display()),
                        ));
                    }
                    std::thread::sleep(LOCK_POLL);
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Drop for SnapshotLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

fn lock_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".lock");
    path.with_file_name(name)
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;

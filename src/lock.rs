//! Exclusive lock over an on-disk snapshot store
//!
//! A [`StoreLock`] is held for as long as a store is open, so two processes
//! never interleave registry updates. The lock is released when dropped.

use crate::error::{Result, TrackError};
use fs4::fs_std::FileExt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};
use tracing::{debug, warn};

/// Holds an exclusive lock on a store directory
///
/// The lock is automatically released when this struct is dropped.
#[derive(Debug)]
pub struct StoreLock {
    /// Lock file handle
    lock_file: File,
    /// Path to the lock file (for error messages)
    lock_path: PathBuf,
}

impl StoreLock {
    /// Acquire the lock for the store rooted at `store_path`
    ///
    /// Waits up to a timeout for a concurrent holder to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create the locks directory or lock file
    /// - Another process still holds the lock when the timeout expires
    pub fn acquire(store_path: &Path) -> Result<Self> {
        let locks_dir = store_path.join(crate::LOCKS_DIR);
        fs::create_dir_all(&locks_dir)
            .map_err(|e| TrackError::storage("failed to create locks directory", e))?;

        let lock_path = locks_dir.join(crate::STORE_LOCK_FILE);
        let lock_file = Self::try_acquire_lock(&lock_path)?;
        debug!(lock = %lock_path.display(), "Store lock acquired");

        Ok(Self {
            lock_file,
            lock_path,
        })
    }

    fn try_acquire_lock(lock_path: &Path) -> Result<File> {
        // Use shorter timeouts in test mode for faster test execution
        let lock_timeout = if cfg!(test) {
            Duration::from_millis(100)
        } else {
            Duration::from_secs(10)
        };
        let retry_interval = if cfg!(test) {
            Duration::from_millis(10)
        } else {
            Duration::from_millis(100)
        };

        let start = Instant::now();

        loop {
            let file = fs::OpenOptions::new()
                .create(true)
                .truncate(false)
                .write(true)
                .open(lock_path)
                .map_err(|e| {
                    TrackError::storage(
                        format!("failed to open lock file {}", lock_path.display()),
                        e,
                    )
                })?;

            match file.try_lock_exclusive() {
                Ok(true) => {
                    // Owner info for debugging a stuck lock
                    let mut file_ref = &file;
                    let _ = file_ref.set_len(0);
                    let _ = writeln!(
                        file_ref,
                        "pid={}\ntime={}",
                        std::process::id(),
                        humantime::format_rfc3339(SystemTime::now())
                    );
                    return Ok(file);
                }
                Ok(false) | Err(_) if start.elapsed() < lock_timeout => {
                    std::thread::sleep(retry_interval);
                }
                Ok(false) | Err(_) => {
                    return Err(TrackError::StoreLocked {
                        lock_path: lock_path.to_path_buf(),
                    });
                }
            }
        }
    }

}

impl Drop for StoreLock {
    fn drop(&mut self) {
        // The file stays in place; removing it would let a waiter lock an unlinked inode
        if let Err(e) = self.lock_file.unlock() {
            warn!(
                lock = %self.lock_path.display(),
                error = %e,
                "Failed to release store lock"
            );
        }
    }
}

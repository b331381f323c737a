use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::Metadata;
use std::path::Path;

/// Identity of a file within one filesystem.
///
/// On Unix this is the `(st_dev, st_ino)` pair. It survives renames and moves
/// inside one filesystem but not copies, and is meaningless across machines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileIdentity {
    /// Device the file lives on
    pub device: u64,
    /// Inode number (or platform equivalent)
    pub inode: u64,
}

impl FileIdentity {
    #[must_use]
    pub const fn new(device: u64, inode: u64) -> Self {
        Self { device, inode }
    }

    /// Reads the identity of `path` from its metadata.
    ///
    /// # Errors
    ///
    /// Infallible on Unix.
    #[cfg(unix)]
    pub fn from_metadata(_path: &Path, metadata: &Metadata) -> Result<Self> {
        use std::os::unix::fs::MetadataExt;

        Ok(Self::new(metadata.dev(), metadata.ino()))
    }

    /// Reads the identity of `path` from its metadata.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::TrackError::IdentityUnsupported`] on platforms without inode numbers.
    #[cfg(not(unix))]
    pub fn from_metadata(path: &Path, _metadata: &Metadata) -> Result<Self> {
        Err(crate::error::TrackError::IdentityUnsupported {
            path: path.to_path_buf(),
        })
    }
}

/// A bare inode number on device 0.
impl From<u64> for FileIdentity {
    fn from(inode: u64) -> Self {
        Self::new(0, inode)
    }
}

impl fmt::Display for FileIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.device, self.inode)
    }
}

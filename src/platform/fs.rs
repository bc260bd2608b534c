// LogSniff - platform/fs.rs
//
// Filesystem abstraction used by the classifier's content sniff.
// Enables testing classification logic (including I/O failure paths such as
// permission denied) without staging those failures on the real filesystem.

use crate::util::error::ProbeError;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::SystemTime;

/// The subset of file metadata the classifier consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    /// True for regular files (after following symlinks).
    pub is_file: bool,
    /// True for directories (after following symlinks).
    pub is_dir: bool,
    pub len: u64,
    pub modified: SystemTime,
}

/// Read-only filesystem operations needed to sniff a candidate file.
pub trait FileSystem: Send + Sync {
    /// Stat `path`, following symlinks.
    fn stat(&self, path: &Path) -> Result<FileStat, ProbeError>;

    /// Read at most `limit` bytes from the start of `path`.
    ///
    /// The handle is closed before returning, on success and on error.
    fn read_head(&self, path: &Path, limit: usize) -> Result<Vec<u8>, ProbeError>;
}

/// `FileSystem` backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn stat(&self, path: &Path) -> Result<FileStat, ProbeError> {
        let meta = std::fs::metadata(path).map_err(|e| ProbeError::new("stat", e))?;
        let modified = meta.modified().map_err(|e| ProbeError::new("stat", e))?;
        Ok(FileStat {
            is_file: meta.is_file(),
            is_dir: meta.is_dir(),
            len: meta.len(),
            modified,
        })
    }

    fn read_head(&self, path: &Path, limit: usize) -> Result<Vec<u8>, ProbeError> {
        let file = File::open(path).map_err(|e| ProbeError::new("open", e))?;
        let mut head = Vec::with_capacity(limit);
        file.take(limit as u64)
            .read_to_end(&mut head)
            .map_err(|e| ProbeError::new("read", e))?;
        Ok(head)
    }
}

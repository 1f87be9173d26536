//! Custom error types for memsift

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for scanner operations
#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("no suitable memory regions could be found")]
    NoSuitableRegions,

    #[error("can't open {path}: {source}")]
    HandleUnopenable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read region {region_id} [{start:#x}, {end:#x}): {source}")]
    RegionUnreadable {
        region_id: u16,
        start: usize,
        end: usize,
        source: std::io::Error,
    },

    #[error("failed to write {len} bytes at {address:#x}: {source}")]
    WriteFailed {
        address: usize,
        len: usize,
        source: std::io::Error,
    },

    #[error("invalid value: {0}")]
    ParseInvalid(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for scanner operations
pub type MemoryResult<T> = Result<T, MemoryError>;

impl MemoryError {
    /// Creates a handle-unopenable error for a path
    pub fn unopenable(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        MemoryError::HandleUnopenable {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a region-unreadable error
    pub fn region_unreadable(
        region_id: u16,
        start: usize,
        end: usize,
        source: std::io::Error,
    ) -> Self {
        MemoryError::RegionUnreadable {
            region_id,
            start,
            end,
            source,
        }
    }

    /// Creates a write-failed error
    pub fn write_failed(address: usize, len: usize, source: std::io::Error) -> Self {
        MemoryError::WriteFailed {
            address,
            len,
            source,
        }
    }
}

//! Core module containing the fundamental types for memsift
//!
//! This module provides the building blocks used throughout the scanner:
//! numeric type tags, value bundles, candidate sets, options and error
//! types.

pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    Candidate, Comparison, MemoryError, MemoryResult, ResultSet, ScanOptions, TypeFilter,
    ValueBundle, ValueType,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// The scanner reads /proc/<pid>/{maps,mem}; there is no other backend.
#[cfg(not(target_os = "linux"))]
compile_error!("memsift only supports Linux targets");

//! memsift: interactive memory scanner/editor for live Linux processes
//!
//! Discovers the writable memory regions of a target process through
//! `/proc/<pid>/maps`, locates numeric values matching user criteria across
//! four widths at once, refines the candidate set through successive
//! comparisons, and overwrites located cells through `/proc/<pid>/mem`.

pub mod core;
pub mod memory;
pub mod process;
pub mod shell;

// Re-export main types from the core module
pub use crate::core::types::{
    Candidate, Comparison, MemoryError, MemoryResult, ResultSet, ScanOptions, TypeFilter,
    ValueBundle, ValueType,
};

pub use crate::memory::Scanner;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_module_accessible() {
        assert_eq!(crate::core::VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_value_type_reexport() {
        let ty = ValueType::I64;
        assert_eq!(ty.width(), 8);
        assert_eq!(ty.label(), "i64");
    }

    #[test]
    fn test_result_set_reexport() {
        let set = ResultSet::new();
        assert_eq!(set.count(), 0);
        assert!(set.at(0).is_none());
    }

    #[test]
    fn test_value_bundle_reexport() {
        let bundle = ValueBundle::parse("42");
        assert!(bundle.is_valid());
        assert_eq!(bundle.as_i32, 42);
    }

    #[test]
    fn test_memory_error_reexport() {
        let err = MemoryError::NoSuitableRegions;
        assert!(err.to_string().contains("no suitable memory regions"));
    }

    #[test]
    fn test_scan_options_reexport() {
        let opts = ScanOptions::for_pid(1234);
        assert_eq!(opts.pid, 1234);
        assert_eq!(opts.memory_limit, 8);
    }
}

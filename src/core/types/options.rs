//! Scanner options shared by construction and the initial scan

use serde::{Deserialize, Serialize};

/// Options for a scan session, mapped one-to-one from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    /// PID of the process to inspect
    pub pid: i32,
    /// Soft ceiling on aggregate stored candidate bytes, in gigabytes
    pub memory_limit: u64,
    /// Snapshot each region twice during the initial scan and drop offsets
    /// that changed between the two images
    pub skip_volatile: bool,
    /// Drop offsets whose interpreted value is zero during the initial scan
    pub skip_zeroes: bool,
    /// Skip regions that contain only zero bytes during the initial scan
    pub skip_null_regions: bool,
    /// Restrict region discovery to the `[stack]` mapping
    pub stack_scan: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            pid: 0,
            memory_limit: 8,
            skip_volatile: false,
            skip_zeroes: false,
            skip_null_regions: false,
            stack_scan: false,
        }
    }
}

impl ScanOptions {
    /// Options for a given pid with everything else at defaults
    pub fn for_pid(pid: i32) -> Self {
        ScanOptions {
            pid,
            ..Default::default()
        }
    }

    /// The memory budget in bytes
    pub fn budget_bytes(&self) -> u64 {
        const GIGABYTE: u64 = 1_000_000_000;
        self.memory_limit.saturating_mul(GIGABYTE)
    }
}

//! Region discovery and the parallel initial scan

use crate::core::types::{
    Candidate, Comparison, MemoryError, MemoryResult, ResultSet, ScanOptions, ScanValue,
    TypeFilter, ValueBundle, ValueType,
};
use crate::process::{maps, MemFile, Region};
use rayon::prelude::*;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Settling delay between the two images of a volatile-skip scan
const SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Width of the candidate window copied at every offset
const WINDOW: usize = 8;

/// Scanner for one target process.
///
/// Owns the path to the target's memory file and the regions discovered at
/// construction. Regions live for the lifetime of the instance; a shell
/// `reset` discards the scanner and builds a fresh one.
#[derive(Debug)]
pub struct Scanner {
    pid: i32,
    mem_path: PathBuf,
    regions: Vec<Region>,
}

impl Scanner {
    /// Discovers the suitable regions of `pid` and builds a scanner for it
    pub fn new(pid: i32, opts: &ScanOptions) -> MemoryResult<Self> {
        let proc_path = PathBuf::from(format!("/proc/{pid}"));
        let maps_path = proc_path.join("maps");
        let mem_path = proc_path.join("mem");

        let maps_file =
            File::open(&maps_path).map_err(|e| MemoryError::unopenable(&maps_path, e))?;
        let regions = maps::discover(BufReader::new(maps_file), opts.stack_scan)?;

        info!(pid, count = regions.len(), "found suitable memory regions");

        Ok(Scanner {
            pid,
            mem_path,
            regions,
        })
    }

    pub fn pid(&self) -> i32 {
        self.pid
    }

    /// Number of regions discovered at construction
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub(crate) fn mem_path(&self) -> &PathBuf {
        &self.mem_path
    }

    /// Swaps the memory-file path, for exercising I/O failure paths
    #[cfg(test)]
    pub(crate) fn with_mem_path(mut self, path: PathBuf) -> Self {
        self.mem_path = path;
        self
    }

    /// The region a candidate references. Ids are assigned from the final
    /// region order, so the id doubles as the index.
    pub(crate) fn region(&self, id: u16) -> &Region {
        &self.regions[id as usize]
    }

    /// Absolute target address of a candidate's cell
    pub(crate) fn resolve_address(&self, candidate: &Candidate) -> usize {
        self.region(candidate.region_id).start + candidate.offset as usize
    }

    /// Sweeps every enabled region and collects, per enabled type, every
    /// offset whose interpreted value satisfies `comparison` against the
    /// user value.
    ///
    /// Regions are processed in parallel, each worker with its own read
    /// handle. When the aggregate stored-value footprint exceeds the memory
    /// budget, no further regions are dispatched and the partial set
    /// collected so far is returned; a log line reports the cutoff.
    pub fn scan(
        &self,
        opts: &ScanOptions,
        filter: &TypeFilter,
        value: &ValueBundle,
        comparison: Comparison,
    ) -> MemoryResult<ResultSet> {
        let aggregate = Mutex::new(ResultSet::new());
        let cancelled = AtomicBool::new(false);
        let budget = opts.budget_bytes();

        self.regions.par_iter().try_for_each(|region| {
            if cancelled.load(Ordering::Relaxed) || region.is_ignored() {
                return Ok::<(), MemoryError>(());
            }

            let mem = MemFile::open_read(&self.mem_path)?;
            let bytes = read_region(&mem, region)?;

            if opts.skip_null_regions && is_null_image(&bytes) {
                debug!(region = region.id, "skipping all-zero region");
                region.set_ignored();
                return Ok(());
            }

            let settled = if opts.skip_volatile {
                std::thread::sleep(SETTLE_DELAY);
                Some(read_region(&mem, region)?)
            } else {
                None
            };

            let local = scan_buffer(
                &bytes,
                settled.as_deref(),
                region.id,
                filter,
                value,
                comparison,
                opts.skip_zeroes,
            );

            if local.is_empty() {
                region.set_ignored();
            }

            let mut results = aggregate.lock().expect("result mutex poisoned");
            results.merge(local);
            if results.total_bytes() > budget && !cancelled.swap(true, Ordering::Relaxed) {
                warn!(
                    limit_gb = opts.memory_limit,
                    "memory limit reached, stopping the scan"
                );
            }

            Ok(())
        })?;

        Ok(aggregate.into_inner().expect("result mutex poisoned"))
    }
}

/// True when a region image holds only zero bytes
pub(crate) fn is_null_image(bytes: &[u8]) -> bool {
    bytes.iter().all(|b| *b == 0)
}

/// Wraps a raw region read with region context for the error path
pub(crate) fn read_region(mem: &MemFile, region: &Region) -> MemoryResult<Vec<u8>> {
    mem.read_range(region.start, region.end)
        .map_err(|e| MemoryError::region_unreadable(region.id, region.start, region.end, e))
}

/// Filters one region image.
///
/// `settled` is the second image of a volatile-skip scan; offsets whose
/// 8-byte windows differ between the two images are ignored. Hits land in
/// the region-local set in ascending offset order.
pub(crate) fn scan_buffer(
    bytes: &[u8],
    settled: Option<&[u8]>,
    region_id: u16,
    filter: &TypeFilter,
    value: &ValueBundle,
    comparison: Comparison,
    skip_zeroes: bool,
) -> ResultSet {
    let mut hits = ResultSet::new();

    for offset in 0..bytes.len().saturating_sub(WINDOW) {
        let mut window = [0u8; WINDOW];
        window.copy_from_slice(&bytes[offset..offset + WINDOW]);

        if let Some(settled) = settled {
            if settled[offset..offset + WINDOW] != window {
                continue;
            }
        }

        if filter.i32_enabled && check::<i32>(&window, value, comparison, skip_zeroes) {
            hits.i32_hits.push(hit(ValueType::I32, region_id, offset, window));
        }
        if filter.i64_enabled && check::<i64>(&window, value, comparison, skip_zeroes) {
            hits.i64_hits.push(hit(ValueType::I64, region_id, offset, window));
        }
        if filter.f32_enabled && check::<f32>(&window, value, comparison, skip_zeroes) {
            hits.f32_hits.push(hit(ValueType::F32, region_id, offset, window));
        }
        if filter.f64_enabled && check::<f64>(&window, value, comparison, skip_zeroes) {
            hits.f64_hits.push(hit(ValueType::F64, region_id, offset, window));
        }
    }

    hits
}

fn hit(value_type: ValueType, region_id: u16, offset: usize, window: [u8; 8]) -> Candidate {
    Candidate {
        value_type,
        region_id,
        offset: offset as u32,
        bytes: window,
    }
}

/// Interprets the window as `T` and evaluates the predicate
fn check<T: ScanValue>(
    window: &[u8; 8],
    value: &ValueBundle,
    comparison: Comparison,
    skip_zeroes: bool,
) -> bool {
    let observed = T::from_ne_slice(window);
    if skip_zeroes && observed.is_zero() {
        return false;
    }
    comparison.eval(T::of_bundle(value), observed)
}

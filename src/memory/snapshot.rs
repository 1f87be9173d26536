//! Per-refinement snapshot cache

use crate::core::types::{MemoryResult, ResultSet};
use crate::memory::scanner::{read_region, Scanner};
use crate::process::MemFile;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};

/// Full byte image of one region at a single instant. Snapshots exist only
/// for the duration of one refinement call.
#[derive(Debug)]
pub(crate) struct RegionSnapshot {
    pub bytes: Vec<u8>,
}

impl Scanner {
    /// Reads every region referenced by `results` exactly once, in
    /// parallel, each worker with its own handle. Any failed read fails the
    /// whole refinement.
    pub(crate) fn snapshot_regions(
        &self,
        results: &ResultSet,
    ) -> MemoryResult<HashMap<u16, RegionSnapshot>> {
        let ids: HashSet<u16> = results
            .sequences()
            .iter()
            .flat_map(|(_, hits)| hits.iter().map(|c| c.region_id))
            .collect();

        ids.into_par_iter()
            .map(|id| -> MemoryResult<(u16, RegionSnapshot)> {
                let mem = MemFile::open_read(self.mem_path())?;
                let bytes = read_region(&mem, self.region(id))?;
                Ok((id, RegionSnapshot { bytes }))
            })
            .collect()
    }
}

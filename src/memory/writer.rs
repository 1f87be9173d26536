//! Overwriting located cells and re-reading their current value

use crate::core::types::{Candidate, MemoryResult, ScanValue, ValueBundle};
use crate::memory::scanner::Scanner;
use crate::process::MemFile;

impl Scanner {
    /// Overwrites the cell a candidate points at with the matching field of
    /// `value`, then updates the candidate's stored bytes so change refines
    /// treat the new value as the baseline.
    ///
    /// On failure the stored bytes are left untouched.
    pub fn set(&self, candidate: &mut Candidate, value: &ValueBundle) -> MemoryResult<()> {
        let width = candidate.value_type.width();
        let bytes = value.to_bytes(candidate.value_type);
        let address = self.resolve_address(candidate);

        let mem = MemFile::open_write(self.mem_path())?;
        mem.write_at(address, &bytes[..width])?;

        candidate.bytes[..width].copy_from_slice(&bytes[..width]);
        Ok(())
    }

    /// Re-reads the current value of a candidate's cell from the target
    pub fn read_current<T: ScanValue>(&self, candidate: &Candidate) -> MemoryResult<T> {
        let address = self.resolve_address(candidate);
        let width = T::TYPE.width();

        let mem = MemFile::open_read(self.mem_path())?;
        let bytes = mem.read_range(address, address + width).map_err(|e| {
            let region = self.region(candidate.region_id);
            crate::core::types::MemoryError::region_unreadable(
                region.id,
                region.start,
                region.end,
                e,
            )
        })?;

        Ok(T::from_ne_slice(&bytes))
    }
}

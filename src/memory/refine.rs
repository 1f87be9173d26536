//! Refinement passes over an existing result set

use crate::core::types::{
    Candidate, Comparison, MemoryResult, ResultSet, ScanValue, ValueBundle,
};
use crate::memory::scanner::Scanner;
use crate::memory::snapshot::RegionSnapshot;
use std::collections::HashMap;

impl Scanner {
    /// Re-evaluates every prior candidate against a new user value.
    ///
    /// Candidates that satisfy `comparison(user, observed)` are carried into
    /// the new set with their stored bytes refreshed from the snapshot. The
    /// four per-type streams run in parallel over a shared snapshot cache.
    pub fn refine_relational(
        &self,
        value: &ValueBundle,
        old: &ResultSet,
        comparison: Comparison,
    ) -> MemoryResult<ResultSet> {
        let cache = self.snapshot_regions(old)?;

        let ((i32_hits, i64_hits), (f32_hits, f64_hits)) = rayon::join(
            || {
                rayon::join(
                    || refine_typed(value.as_i32, &old.i32_hits, comparison, &cache),
                    || refine_typed(value.as_i64, &old.i64_hits, comparison, &cache),
                )
            },
            || {
                rayon::join(
                    || refine_typed(value.as_f32, &old.f32_hits, comparison, &cache),
                    || refine_typed(value.as_f64, &old.f64_hits, comparison, &cache),
                )
            },
        );

        Ok(ResultSet {
            i32_hits,
            i64_hits,
            f32_hits,
            f64_hits,
        })
    }

    /// Keeps candidates whose current bytes equal (`expected_unchanged`) or
    /// differ from their stored bytes.
    ///
    /// The comparison is byte-exact, so distinct NaN payloads and distinct
    /// encodings of the same value count as changes. Stored bytes are left
    /// untouched; a later change refine still compares against the same
    /// baseline.
    pub fn refine_change(
        &self,
        old: &ResultSet,
        expected_unchanged: bool,
    ) -> MemoryResult<ResultSet> {
        let cache = self.snapshot_regions(old)?;

        let keep = |hits: &[Candidate]| -> Vec<Candidate> {
            hits.iter()
                .copied()
                .filter(|c| c.matches_image(&cache[&c.region_id].bytes) == expected_unchanged)
                .collect()
        };

        let ((i32_hits, i64_hits), (f32_hits, f64_hits)) = rayon::join(
            || rayon::join(|| keep(&old.i32_hits), || keep(&old.i64_hits)),
            || rayon::join(|| keep(&old.f32_hits), || keep(&old.f64_hits)),
        );

        Ok(ResultSet {
            i32_hits,
            i64_hits,
            f32_hits,
            f64_hits,
        })
    }
}

fn refine_typed<T: ScanValue>(
    user: T,
    hits: &[Candidate],
    comparison: Comparison,
    cache: &HashMap<u16, RegionSnapshot>,
) -> Vec<Candidate> {
    let width = T::TYPE.width();

    hits.iter()
        .filter_map(|candidate| {
            let offset = candidate.offset as usize;
            let window = &cache[&candidate.region_id].bytes[offset..offset + width];
            let observed = T::from_ne_slice(window);

            comparison.eval(user, observed).then(|| {
                let mut refreshed = *candidate;
                refreshed.bytes[..width].copy_from_slice(window);
                refreshed
            })
        })
        .collect()
}

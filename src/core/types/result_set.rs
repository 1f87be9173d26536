//! Located candidates and the four-sequence result set

use super::value::ValueType;
use serde::{Deserialize, Serialize};

/// One located cell: a typed offset inside a region, together with the byte
/// image the value had when it was last observed.
///
/// Candidates are value objects; they reference their region by id only.
/// The leading `value_type.width()` bytes of `bytes` are significant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub value_type: ValueType,
    pub region_id: u16,
    pub offset: u32,
    pub bytes: [u8; 8],
}

impl Candidate {
    /// The significant prefix of the stored byte image
    pub fn stored_bytes(&self) -> &[u8] {
        &self.bytes[..self.value_type.width()]
    }

    /// Byte-exact comparison of the stored image against the same offset in
    /// a full region image. Byte equality, not numeric equality: distinct
    /// NaN payloads and distinct encodings of the same value count as
    /// different.
    pub fn matches_image(&self, region_bytes: &[u8]) -> bool {
        let offset = self.offset as usize;
        region_bytes
            .get(offset..offset + self.value_type.width())
            .is_some_and(|window| window == self.stored_bytes())
    }
}

/// Four parallel ordered sequences of candidates, one per numeric type.
///
/// A flat index addresses the i32 sequence first, then i64, then f32, then
/// f64. The set is treated as unordered for scan semantics; flat indices are
/// assigned at listing time.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    pub i32_hits: Vec<Candidate>,
    pub i64_hits: Vec<Candidate>,
    pub f32_hits: Vec<Candidate>,
    pub f64_hits: Vec<Candidate>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of candidates across all four sequences
    pub fn count(&self) -> usize {
        self.i32_hits.len() + self.i64_hits.len() + self.f32_hits.len() + self.f64_hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Stored-value footprint in bytes, used for memory budgeting
    pub fn total_bytes(&self) -> u64 {
        self.sequences()
            .iter()
            .map(|(ty, hits)| hits.len() as u64 * ty.width() as u64)
            .sum()
    }

    /// Flat indexing across the four sequences; out of range is absent
    pub fn at(&self, index: usize) -> Option<&Candidate> {
        let mut remaining = index;
        for (_, hits) in self.sequences() {
            if remaining < hits.len() {
                return Some(&hits[remaining]);
            }
            remaining -= hits.len();
        }
        None
    }

    /// Mutable flat indexing, same order as `at`
    pub fn at_mut(&mut self, index: usize) -> Option<&mut Candidate> {
        let mut remaining = index;
        for (_, hits) in self.sequences_mut() {
            if remaining < hits.len() {
                return Some(&mut hits[remaining]);
            }
            remaining -= hits.len();
        }
        None
    }

    /// Empties all four sequences
    pub fn clear(&mut self) {
        self.i32_hits.clear();
        self.i64_hits.clear();
        self.f32_hits.clear();
        self.f64_hits.clear();
    }

    /// The sequences paired with their type tag, in flat-index order
    pub fn sequences(&self) -> [(ValueType, &Vec<Candidate>); 4] {
        [
            (ValueType::I32, &self.i32_hits),
            (ValueType::I64, &self.i64_hits),
            (ValueType::F32, &self.f32_hits),
            (ValueType::F64, &self.f64_hits),
        ]
    }

    pub fn sequences_mut(&mut self) -> [(ValueType, &mut Vec<Candidate>); 4] {
        [
            (ValueType::I32, &mut self.i32_hits),
            (ValueType::I64, &mut self.i64_hits),
            (ValueType::F32, &mut self.f32_hits),
            (ValueType::F64, &mut self.f64_hits),
        ]
    }

    /// The sequence a candidate of type `ty` belongs to
    pub fn sequence_mut(&mut self, ty: ValueType) -> &mut Vec<Candidate> {
        match ty {
            ValueType::I32 => &mut self.i32_hits,
            ValueType::I64 => &mut self.i64_hits,
            ValueType::F32 => &mut self.f32_hits,
            ValueType::F64 => &mut self.f64_hits,
        }
    }

    /// Appends a candidate to the sequence matching its type
    pub fn push(&mut self, candidate: Candidate) {
        self.sequence_mut(candidate.value_type).push(candidate);
    }

    /// Splices another set into this one, preserving per-sequence order
    pub fn merge(&mut self, other: ResultSet) {
        self.i32_hits.extend(other.i32_hits);
        self.i64_hits.extend(other.i64_hits);
        self.f32_hits.extend(other.f32_hits);
        self.f64_hits.extend(other.f64_hits);
    }
}

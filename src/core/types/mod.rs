//! Fundamental types shared across the scanner

mod error;
mod filter;
mod options;
mod result_set;
mod value;

pub use error::{MemoryError, MemoryResult};
pub use filter::TypeFilter;
pub use options::ScanOptions;
pub use result_set::{Candidate, ResultSet};
pub use value::{Comparison, ScanValue, ValueBundle, ValueType, I32_SENTINEL, I64_SENTINEL};

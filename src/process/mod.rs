//! Target-process plumbing: mapping-table discovery and memory-file I/O

pub mod handle;
pub mod maps;

pub use handle::MemFile;
pub use maps::{discover, Region};

//! Scanning, refining and writing target-process memory
//!
//! The scanner sweeps the writable regions of the target in parallel and
//! collects typed candidates; refinement passes narrow an existing set
//! through a per-call snapshot cache; the writer overwrites located cells.

pub mod scanner;

mod refine;
mod snapshot;
mod writer;

pub use scanner::Scanner;

//! Duration annotation for interactive commands

use std::time::Instant;

/// Prints an elapsed-time line to stdout when dropped.
pub struct ScopeTimer {
    message: &'static str,
    start: Instant,
}

impl ScopeTimer {
    pub fn new(message: &'static str) -> Self {
        ScopeTimer {
            message,
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.start.elapsed().as_millis()
    }
}

impl Drop for ScopeTimer {
    fn drop(&mut self) {
        println!("{}{} ms", self.message, self.elapsed_ms());
    }
}

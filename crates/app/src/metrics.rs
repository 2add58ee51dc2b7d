//! Metrics collection and reporting for a run.
//!
//! Counts and timings for each pipeline stage: load, encode, reload.
//!
//! # Thread Safety
//!
//! `Metrics` is updated from a single thread and is NOT synchronized.

use std::time::{Duration, Instant};

/// Observable results of one load/save/reload run.
#[derive(Debug, Clone)]
pub struct Metrics {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Load ===
    /// Non-blank input lines
    pub lines_read: u64,

    /// Lines skipped as malformed
    pub records_skipped: u64,

    /// Nodes in the built sequence
    pub nodes_built: u64,

    /// Nodes with a cross reference
    pub cross_links: u64,

    // === Encode ===
    /// Bytes written to the output file (0 if the write failed)
    pub bytes_written: u64,

    // === Reload ===
    /// Nodes in the reloaded sequence
    pub nodes_reloaded: u64,

    /// Whether the reloaded sequence matches the built one
    pub round_trip_ok: bool,
}

impl Metrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            lines_read: 0,
            records_skipped: 0,
            nodes_built: 0,
            cross_links: 0,
            bytes_written: 0,
            nodes_reloaded: 0,
            round_trip_ok: false,
        }
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Average encoded bytes per node.
    ///
    /// Returns 0.0 if nothing was written.
    pub fn bytes_per_node(&self) -> f64 {
        if self.nodes_built == 0 {
            0.0
        } else {
            self.bytes_written as f64 / self.nodes_built as f64
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Run Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!();

        println!("=== Load ===");
        println!("Lines read: {}", self.lines_read);
        println!("Records skipped: {}", self.records_skipped);
        println!("Nodes built: {}", self.nodes_built);
        println!("Cross links: {}", self.cross_links);
        println!();

        println!("=== Encode ===");
        println!(
            "Bytes written: {} ({:.1} bytes/node)",
            self.bytes_written,
            self.bytes_per_node()
        );
        println!();

        println!("=== Reload ===");
        println!("Nodes reloaded: {}", self.nodes_reloaded);
        if self.round_trip_ok {
            println!("Verification: PASSED ✓");
        } else {
            println!("Verification: FAILED ✗ (topology mismatch)");
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

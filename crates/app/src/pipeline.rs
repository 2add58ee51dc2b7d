//! The load → save → reload run.
//!
//! Each stage's failure is handled where it happens:
//! - unreadable or empty input ends the run with [`RunStatus::EmptyInput`]
//! - encode or write failures are logged and the reload still runs
//! - reload failures are logged and reported as an empty sequence

use std::io::Write;

use anyhow::Context;
use crosslink_core::{builder, codec, framing, inspect::Dump, Sequence};

use crate::config::Config;
use crate::input_gen;
use crate::metrics::Metrics;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// The input produced a sequence and the pipeline ran to the end
    Completed,
    /// The input was unreadable or had no valid records
    EmptyInput,
}

#[derive(Debug)]
pub struct RunOutcome {
    pub status: RunStatus,
    pub metrics: Metrics,
}

/// Run the pipeline described by `config`, writing dumps to `out`.
///
/// # Errors
/// Only failures to write `out` or to generate the requested sample file.
pub fn run(config: &Config, out: &mut impl Write) -> anyhow::Result<RunOutcome> {
    let mut metrics = Metrics::new();

    if let Some(count) = config.sample_records {
        input_gen::write_sample_file(&config.input_file, config.seed, count).with_context(|| {
            format!("failed to write sample to {}", config.input_file.display())
        })?;
        tracing::info!(count, seed = config.seed, path = %config.input_file.display(), "generated sample input");
    }

    writeln!(out, "Reading list from: {}", config.input_file.display())?;
    let parsed = match builder::load_records(&config.input_file) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::error!(path = %config.input_file.display(), %err, "cannot open input");
            return Ok(finish(RunStatus::EmptyInput, metrics));
        }
    };
    metrics.lines_read = parsed.lines as u64;
    metrics.records_skipped = parsed.skipped.len() as u64;

    let sequence = builder::build(&parsed.records);
    if sequence.is_empty() {
        tracing::error!(path = %config.input_file.display(), "empty or invalid list");
        return Ok(finish(RunStatus::EmptyInput, metrics));
    }
    metrics.nodes_built = sequence.iter().count() as u64;
    metrics.cross_links = sequence.iter().filter(|(_, n)| n.cross.is_some()).count() as u64;

    writeln!(out, "List built:")?;
    write!(out, "{}", Dump(&sequence))?;

    writeln!(out, "\nSerializing to: {}", config.output_file.display())?;
    metrics.bytes_written = save(&sequence, config).unwrap_or(0) as u64;

    writeln!(out, "Deserializing back...")?;
    let reloaded = reload(config);
    metrics.nodes_reloaded = reloaded.iter().count() as u64;
    metrics.round_trip_ok = reloaded.topology_eq(&sequence);
    if !metrics.round_trip_ok {
        tracing::warn!("reloaded sequence does not match the original");
    }

    writeln!(out, "List after deserialization:")?;
    write!(out, "{}", Dump(&reloaded))?;
    writeln!(out, "\nDone.")?;

    Ok(finish(RunStatus::Completed, metrics))
}

fn finish(status: RunStatus, mut metrics: Metrics) -> RunOutcome {
    metrics.complete();
    RunOutcome { status, metrics }
}

/// Encode and write; `None` (after logging) on failure.
fn save(sequence: &Sequence, config: &Config) -> Option<usize> {
    let encoded = if config.framed {
        framing::encode_framed(sequence)
    } else {
        codec::encode(sequence)
    };

    let bytes = match encoded {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::error!(%err, "cannot encode sequence");
            return None;
        }
    };

    match std::fs::write(&config.output_file, &bytes) {
        Ok(()) => {
            tracing::debug!(path = %config.output_file.display(), bytes = bytes.len(), "wrote output");
            Some(bytes.len())
        }
        Err(err) => {
            tracing::error!(path = %config.output_file.display(), %err, "cannot open output for writing");
            None
        }
    }
}

/// Read and decode the output file; the empty sequence (after logging) on failure.
fn reload(config: &Config) -> Sequence {
    let bytes = match std::fs::read(&config.output_file) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::error!(path = %config.output_file.display(), %err, "cannot open output for reading");
            return Sequence::empty();
        }
    };

    framing::decode_auto(&bytes).unwrap_or_else(|err| {
        tracing::error!(path = %config.output_file.display(), %err, "cannot decode output");
        Sequence::empty()
    })
}

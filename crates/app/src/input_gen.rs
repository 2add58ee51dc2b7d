//! Sample input generation.
//!
//! When `--sample` is given, we write a record file that exercises every
//! shape the codec has to preserve.
//!
//! # Design
//!
//! Generated records have:
//! - Payloads drawn from a small word list, sometimes containing `;`
//! - Cross indices that are none (-1), self, forward, backward, or past the end
//!
//! This makes the topology visible in the before/after dumps.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::Write;

const WORDS: &[&str] = &[
    "alpha", "bravo", "charlie", "delta", "echo", "fox", "golf", "hotel", "india", "juliet",
];

/// Generate sample record text, one `payload;index` line per record.
///
/// # Arguments
/// - `seed`: random seed for determinism
/// - `count`: number of records
pub fn generate_sample_text(seed: u64, count: usize) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut text = String::new();

    for i in 0..count {
        let payload = generate_payload(&mut rng);

        let cross: i64 = match rng.gen_range(0..10) {
            // 20% no cross reference
            0..=1 => -1,
            // 10% self reference
            2 => i as i64,
            // 10% past the end (resolves to none)
            3 => (count + rng.gen_range(0..5)) as i64,
            // 60% anywhere in the sequence
            _ => rng.gen_range(0..count) as i64,
        };

        text.push_str(&payload);
        text.push(';');
        text.push_str(&cross.to_string());
        text.push('\n');
    }

    text
}

/// One to three words; joined with `;` a quarter of the time.
fn generate_payload(rng: &mut ChaCha8Rng) -> String {
    let words = rng.gen_range(1..=3);
    let separator = if rng.gen_range(0..4) == 0 { ";" } else { " " };
    (0..words)
        .map(|_| WORDS[rng.gen_range(0..WORDS.len())])
        .collect::<Vec<_>>()
        .join(separator)
}

/// Write generated records to a file.
pub fn write_sample_file(path: &std::path::Path, seed: u64, count: usize) -> std::io::Result<()> {
    let text = generate_sample_text(seed, count);
    let mut file = std::fs::File::create(path)?;
    file.write_all(text.as_bytes())?;
    Ok(())
}

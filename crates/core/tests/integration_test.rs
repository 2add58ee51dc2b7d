//! Integration tests for the full crosslink pipeline.
//!
//! These tests verify end-to-end behavior: text -> parse -> build -> encode ->
//! decode, with verification that the decoded topology matches the input.

use crosslink_core::{
    builder::{build, parse_records, Record},
    codec::{decode, encode, load, save},
    framing::{decode_auto, encode_framed},
    inspect::render,
    Sequence,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Cross target position of every node, in visitation order.
fn cross_positions(seq: &Sequence) -> Vec<Option<usize>> {
    seq.iter()
        .map(|(_, node)| node.cross.and_then(|c| seq.position_of(c)))
        .collect()
}

/// Records with random payload bytes and cross indices covering none, self,
/// forward, backward, and out-of-range values.
fn random_records(rng: &mut ChaCha8Rng, count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let len = rng.gen_range(0..24);
            let payload: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            let cross = match rng.gen_range(0..5) {
                0 => -1,
                1 => i as i64,
                2 => count as i64 + rng.gen_range(0..10),
                _ => rng.gen_range(0..count as i64),
            };
            Record::new(payload, cross)
        })
        .collect()
}

#[test]
fn test_text_to_bytes_and_back() {
    let text = b"alpha;2\nbeta;b;1\n\ngamma;0\nbroken line\ndelta;-1\nepsilon;42\n";

    let parsed = parse_records(text);
    assert_eq!(parsed.skipped.len(), 1);

    let seq = build(&parsed.records);
    assert_eq!(seq.iter().count(), 5);
    assert_eq!(
        cross_positions(&seq),
        vec![Some(2), Some(1), Some(0), None, None]
    );

    let decoded = decode(&encode(&seq).expect("encode failed")).expect("decode failed");
    assert!(decoded.topology_eq(&seq));
    assert_eq!(render(&decoded), render(&seq));
    assert!(render(&decoded).contains("[1] data=\"beta;b\" rand=1"));
}

#[test]
fn test_random_graphs_round_trip() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);

    for _ in 0..200 {
        let count = rng.gen_range(1..64);
        let records = random_records(&mut rng, count);
        let seq = build(&records);

        let bytes = encode(&seq).expect("encode failed");
        let decoded = decode(&bytes).expect("decode failed");

        assert_eq!(decoded.iter().count(), count);
        assert!(decoded.topology_eq(&seq));
        assert_eq!(cross_positions(&decoded), cross_positions(&seq));

        // Re-encoding a decoded sequence is stable
        assert_eq!(encode(&decoded).unwrap(), bytes);
    }
}

#[test]
fn test_random_graphs_framed() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..50 {
        let count = rng.gen_range(1..32);
        let seq = build(&random_records(&mut rng, count));
        let framed = encode_framed(&seq).unwrap();
        assert!(decode_auto(&framed).unwrap().topology_eq(&seq));
    }
}

#[test]
fn test_empty_input() {
    let parsed = parse_records(b"\n\n");
    let seq = build(&parsed.records);
    assert!(seq.is_empty());

    let decoded = decode(&encode(&seq).unwrap()).unwrap();
    assert!(decoded.is_empty());
}

#[test]
fn test_exact_bytes_decode() {
    // Hand-written: two nodes, "hi" -> cross 1 (forward), "" -> cross 0 (backward)
    let bytes = [
        0x02, 0x00, 0x00, 0x00, //
        0x02, 0x00, 0x00, 0x00, b'h', b'i', 0x01, 0x00, 0x00, 0x00, //
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];
    let seq = decode(&bytes).unwrap();

    assert_eq!(render(&seq), "[0] data=\"hi\" rand=1\n[1] data=\"\" rand=0\n");
    assert_eq!(encode(&seq).unwrap(), bytes);
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("outlet.out");

    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let seq = build(&random_records(&mut rng, 100));

    save(&seq, &path).unwrap();
    assert!(load(&path).unwrap().topology_eq(&seq));
}

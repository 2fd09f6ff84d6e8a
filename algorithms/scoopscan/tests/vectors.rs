//! Known-Answer Vectors
//!
//! Shabal reference digests and the proof-of-capacity deadline vector.

#![allow(clippy::unwrap_used)]

use scoopscan::{deadline, find_best_deadline, shabal, shabal256, Backend, Shabal256};

const MESSAGE_B: &[u8] = b"abcdefghijklmnopqrstuvwxyz-0123456789-ABCDEFGHIJKLMNOPQRSTUVWXYZ-0123456789-abcdefghijklmnopqrstuvwxyz";

const GENSIG_HEX: &str = "4a6f686e6e7946464d206861742064656e206772f6df74656e2050656e697321";
const ZERO_SCOOP_DEADLINE: u64 = 3_084_580_316_385_335_914;

fn gensig() -> [u8; 32] {
    scoopscan::decode_gensig(GENSIG_HEX).unwrap()
}

// =============================================================================
// SHABAL DIGESTS
// =============================================================================

#[test]
fn test_shabal256_message_a() {
    assert_eq!(
        hex::encode_upper(shabal256(&[0u8; 64])),
        "DA8F08C02A67BA9A56BDD0798E48AE0714215E093B5B850649A37718993F54A2"
    );
}

#[test]
fn test_shabal256_message_b() {
    assert_eq!(MESSAGE_B.len(), 102);
    assert_eq!(
        hex::encode_upper(shabal256(MESSAGE_B)),
        "B49F34BF51864C30533CC46CC2542BDEC2F96FD06F5C539AFF6EAD5883F7327A"
    );
}

#[test]
fn test_shabal256_empty() {
    assert_eq!(
        hex::encode(shabal256(b"")),
        "aec750d11feee9f16271922fbaf5a9be142f62019ef8d720f858940070889014"
    );
}

#[test]
fn test_other_output_sizes() {
    assert_eq!(
        hex::encode(shabal(b"", 512).unwrap()),
        "fc2d5dff5d70b7f6b1f8c2fcc8c1f9fe9934e54257eded0cf2b539a2ef0a19cc\
         ffa84f8d9fa135e4bd3c09f590f3a927ebd603ac29eb729e6f2a9af031ad8dc6"
    );
    assert_eq!(
        hex::encode(shabal(b"", 224).unwrap()),
        "562b4fdbe1706247552927f814b66a3d74b465a090af23e277bf8029"
    );
    assert_eq!(
        hex::encode(shabal(b"abc", 192).unwrap()),
        "fc0e7b3568c6daef93e7b9a44e83739a75ae2722c6713ce8"
    );
}

#[test]
fn test_streaming_message_b_in_pieces() {
    let mut h = Shabal256::new();
    for piece in MESSAGE_B.chunks(7) {
        h.update(piece);
    }
    assert_eq!(h.finalize(), shabal256(MESSAGE_B));
}

// =============================================================================
// DEADLINES
// =============================================================================

#[test]
fn test_zero_scoop_deadline() {
    assert_eq!(deadline(&gensig(), &[0u8; 64]), ZERO_SCOOP_DEADLINE);
}

#[test]
fn test_all_zero_end_to_end() {
    let digest = shabal256(&[0u8; 96]);
    let expected = u64::from_le_bytes(digest[..8].try_into().unwrap());
    assert_eq!(expected, 10_963_124_257_735_659_311);

    let best = find_best_deadline(&[0u8; 64], 1, &[0u8; 32]).unwrap();
    assert_eq!(best.deadline, expected);
    assert_eq!(best.offset, 0);
}

/// One zero "winner" scoop planted among scoops of `5`, at every position
/// and every prefix length, on every backend this CPU runs.
#[test]
fn test_planted_winner_every_backend() {
    let gensig = gensig();
    let winner = [0u8; 64];
    let loser = [5u8; 64];
    let mut data = [5u8; 64 * 32];

    for backend in Backend::ALL.into_iter().filter(|b| b.is_supported()) {
        for i in 0..32 {
            data[i * 64..i * 64 + 64].copy_from_slice(&winner);
            let best =
                scoopscan::find_best_deadline_with(backend, &data[..(i + 1) * 64], (i + 1) as u64, &gensig)
                    .unwrap();
            assert_eq!(best.deadline, ZERO_SCOOP_DEADLINE, "{backend} at {i}");
            assert_eq!(best.offset, i as u64, "{backend} at {i}");
            data[i * 64..i * 64 + 64].copy_from_slice(&loser);
        }
    }
}

use bolero::check;
use scoopscan::{shabal, shabal256, Shabal, Shabal256};

#[test]
fn fuzz_streaming_consistency() {
    check!().with_type::<Vec<u8>>().for_each(|data| {
        // =============================================================================
        // BASELINE (ONE-SHOT)
        // =============================================================================
        let expected = shabal256(data);

        // =============================================================================
        // STREAMING VARIATIONS
        // =============================================================================

        // 1. Single Update
        let mut hasher = Shabal256::new();
        hasher.update(data);
        assert_eq!(hasher.finalize(), expected, "Streaming single update mismatch");

        // 2. Byte-by-Byte (Small Inputs Only)
        if data.len() < 256 {
            let mut hasher = Shabal256::new();
            for b in data {
                hasher.update(&[*b]);
            }
            assert_eq!(hasher.finalize(), expected, "Byte-by-byte streaming mismatch");
        }

        // 3. Arbitrary Split Points
        if data.len() > 1 {
            for split_idx in [1, data.len() / 2, data.len() - 1] {
                let mut hasher = Shabal256::new();
                let (first, second) = data.split_at(split_idx);
                hasher.update(first);
                hasher.update(second);
                assert_eq!(hasher.finalize(), expected, "Split at {split_idx} mismatch");
            }
        }

        // 4. Generic hasher at 256 bits
        let mut generic = Shabal::new(256).unwrap();
        generic.update(data);
        assert_eq!(generic.finalize().as_bytes(), &expected);
    });
}

#[test]
fn fuzz_output_size() {
    check!().with_type::<(Vec<u8>, u8)>().for_each(|(data, size)| {
        let bits = (u32::from(*size) % 16 + 1) * 32;
        let digest = shabal(data, bits).unwrap();
        assert_eq!(digest.len() * 8, bits as usize);

        let mut hasher = Shabal::new(bits).unwrap();
        for piece in data.chunks(17) {
            hasher.update(piece);
        }
        assert_eq!(hasher.finalize(), digest);
    });
}

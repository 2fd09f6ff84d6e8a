#![no_main]

use libfuzzer_sys::fuzz_target;
use scoopscan::{Shabal, Shabal256};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    // Chunk size from the first byte (1 to 255)
    let chunk_size = (data[0] as usize % 255) + 1;

    let reference_hash = scoopscan::shabal256(data);

    let mut hasher = Shabal256::new();
    for chunk in data.chunks(chunk_size) {
        hasher.update(chunk);
    }
    assert_eq!(
        reference_hash,
        hasher.finalize(),
        "Streaming and one-shot digests differ!"
    );

    // Output size from the second byte, a multiple of 32 in 32..=512
    let bits = (u32::from(data.get(1).copied().unwrap_or(7)) % 16 + 1) * 32;
    let mut sized = Shabal::new(bits).unwrap();
    for chunk in data.chunks(chunk_size) {
        sized.update(chunk);
    }
    assert_eq!(sized.finalize(), scoopscan::shabal(data, bits).unwrap());
});

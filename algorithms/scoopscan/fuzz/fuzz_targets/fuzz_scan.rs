#![no_main]

use libfuzzer_sys::fuzz_target;
use scoopscan::{deadline, Backend, BestDeadline};

fuzz_target!(|data: &[u8]| {
    // =============================================================================
    // PREPARATION
    // =============================================================================

    if data.len() < 32 {
        return;
    }
    let mut gensig = [0u8; 32];
    gensig.copy_from_slice(&data[..32]);
    let body = &data[32..];
    let scoops = &body[..body.len() / 64 * 64];
    let n = (scoops.len() / 64) as u64;

    // =============================================================================
    // REFERENCE
    // =============================================================================

    let mut expected = BestDeadline::NONE;
    for (i, s) in scoops.chunks_exact(64).enumerate() {
        expected.update(deadline(&gensig, s.try_into().unwrap()), i as u64);
    }

    // =============================================================================
    // EVERY BACKEND
    // =============================================================================

    for backend in Backend::ALL.into_iter().filter(|b| b.is_supported()) {
        let got = scoopscan::find_best_deadline_with(backend, scoops, n, &gensig).unwrap();
        assert_eq!(got, expected, "{backend} disagrees with the reference");
    }
    let parallel = scoopscan::find_best_deadline_parallel(scoops, n, &gensig).unwrap();
    assert_eq!(parallel, expected, "parallel scan disagrees with the reference");
});

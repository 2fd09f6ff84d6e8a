use bolero::check;
use scoopscan::{deadline, find_best_deadline, find_best_deadline_parallel, BestDeadline};

#[test]
fn fuzz_scan_matches_reference() {
    check!()
        .with_type::<([u8; 32], Vec<u8>)>()
        .for_each(|(gensig, data)| {
            let whole = data.len() / 64 * 64;
            let scoops = &data[..whole];
            let n = (whole / 64) as u64;

            let mut expected = BestDeadline::NONE;
            for (i, s) in scoops.chunks_exact(64).enumerate() {
                expected.update(deadline(gensig, s.try_into().unwrap()), i as u64);
            }

            assert_eq!(find_best_deadline(scoops, n, gensig).unwrap(), expected);
            assert_eq!(find_best_deadline_parallel(scoops, n, gensig).unwrap(), expected);
        });
}

#[test]
fn fuzz_scan_rejects_ragged_buffers() {
    check!().with_type::<(Vec<u8>, u8)>().for_each(|(data, count)| {
        let count = u64::from(*count);
        let result = find_best_deadline(data, count, &[0u8; 32]);
        assert_eq!(result.is_ok(), data.len() as u64 == count * 64);
    });
}

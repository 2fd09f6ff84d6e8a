use bolero::check;
use scoopscan::kernels::portable;
use scoopscan::{deadline, shabal256, PostSignature};

#[test]
fn fuzz_lane_deadlines() {
    check!()
        .with_type::<([u8; 32], Vec<u8>, u8)>()
        .for_each(|(gensig, data, mask)| {
            let mut scoops = [[0u8; 64]; 8];
            for (dst, src) in scoops.iter_mut().zip(data.chunks(64)) {
                dst[..src.len()].copy_from_slice(src);
            }
            let lanes: Vec<Option<&[u8; 64]>> = scoops
                .iter()
                .enumerate()
                .map(|(i, s)| ((*mask >> i) & 1 == 1).then_some(s))
                .collect();

            let sig = PostSignature::new(gensig);
            let mut out = [None; 8];
            portable::deadlines_masked::<8>(&sig, &lanes, &mut out);

            for (lane, got) in lanes.iter().zip(out) {
                assert_eq!(got, lane.map(|s| deadline(gensig, s)));
            }
        });
}

#[test]
fn fuzz_lane_digests() {
    check!().with_type::<Vec<u8>>().for_each(|data| {
        let rotated: Vec<Vec<u8>> = (0..4)
            .map(|r| data.iter().map(|b| b.rotate_left(r)).collect())
            .collect();
        let inputs: Vec<Option<&[u8]>> = rotated.iter().map(|m| Some(&m[..])).collect();

        let digests = portable::hash_lanes::<4>(&inputs, 256).unwrap();
        for (lane, msg) in rotated.iter().enumerate() {
            assert_eq!(digests.get(lane).unwrap().as_bytes(), &shabal256(msg));
        }
    });
}

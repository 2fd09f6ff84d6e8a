//! scoopscan Basic Example
//!
//! Hash a message, then pick the best of a few scoops.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(missing_docs)]

fn main() -> Result<(), scoopscan::ScanError> {
    let data = b"Hello, World!";
    println!("Data:     {:?}", String::from_utf8_lossy(data));
    println!("Shabal:   {}", hex::encode(scoopscan::shabal256(data)));

    let gensig = scoopscan::decode_gensig(
        "4a6f686e6e7946464d206861742064656e206772f6df74656e2050656e697321",
    )?;
    let scoops: Vec<u8> = (0..8u8).flat_map(|n| [n; 64]).collect();
    let best = scoopscan::find_best_deadline(&scoops, 8, &gensig)?;

    println!("Backend:  {}", scoopscan::active_backend());
    println!("Best:     nonce {} deadline {}", best.offset, best.deadline);
    println!("Scoop #:  {}", scoopscan::calculate_scoop(500_000, &gensig));
    Ok(())
}

//! Scoop Command
//!
//! Which scoop of each nonce is mined at a given height.

use anyhow::{Context, Result};

/// Print the scoop number for `height` under `gensig_hex`.
pub fn scoop_number(gensig_hex: &str, height: u64) -> Result<()> {
    let gensig = scoopscan::decode_gensig(gensig_hex).context("Invalid --gensig")?;
    let scoop = scoopscan::calculate_scoop(height, &gensig);
    tracing::info!(height, scoop, "scoop selected");
    println!("{scoop}");
    Ok(())
}

//! Check Command
//!
//! Verify Shabal-256 sums from file (like sha256sum -c).

use super::hash::hash_file;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// =============================================================================
// CHECK
// =============================================================================

/// Verify every `digest  path` line of `checksum_file`.
pub fn check_mode(checksum_file: &Path) -> Result<()> {
    let file = File::open(checksum_file)
        .with_context(|| format!("Failed to open: {}", checksum_file.display()))?;

    let mut total = 0;
    let mut failed = 0;

    for line in BufReader::new(file).lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Format: "hash  filename" (two spaces)
        let Some((expected_hash, file_path)) = line.split_once("  ") else {
            tracing::warn!(line, "skipping malformed checksum line");
            continue;
        };
        let file_path = file_path.trim();
        total += 1;

        match hash_file(Path::new(file_path)) {
            Ok(actual) if actual.eq_ignore_ascii_case(expected_hash.trim()) => {
                println!("{file_path}: OK");
            }
            Ok(_) => {
                println!("{file_path}: FAILED");
                failed += 1;
            }
            Err(e) => {
                println!("{file_path}: FAILED ({e:#})");
                failed += 1;
            }
        }
    }

    println!();
    if failed > 0 {
        anyhow::bail!("{failed} of {total} checksums did NOT match");
    }
    println!("All {total} checksums verified");
    Ok(())
}

//! Hash Command
//!
//! Shabal-256 sums of files, hashed in parallel via Rayon.

use anyhow::{Context, Result};
use rayon::prelude::*;
use scoopscan::Shabal256;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Read buffer per file.
const BUFFER_SIZE: usize = 128 * 1024;

/// Stream a file through Shabal-256 and return the hex digest.
pub fn hash_file(path: &Path) -> Result<String> {
    let mut file =
        std::fs::File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;

    let mut hasher = Shabal256::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];
    loop {
        let n = file
            .read(&mut buffer)
            .with_context(|| format!("Failed to read: {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Hash files and print `digest  path` lines in argument order.
pub fn hash_files(files: &[PathBuf]) -> Result<()> {
    // `collect` on an indexed parallel iterator keeps the input order.
    let results: Vec<(&PathBuf, Result<String>)> =
        files.par_iter().map(|path| (path, hash_file(path))).collect();

    let mut failed = 0usize;
    for (path, result) in results {
        match result {
            Ok(hex_hash) => println!("{}  {}", hex_hash, path.display()),
            Err(e) => {
                eprintln!("Error: {e:#}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("Failed to hash {failed} file(s)");
    }
    Ok(())
}

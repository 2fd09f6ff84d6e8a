//! Scan Command
//!
//! Minimum-deadline search over a file of consecutive 64-byte scoops.

use anyhow::{Context, Result};
use clap::Args;
use scoopscan::{Backend, BestDeadline};
use std::path::PathBuf;
use std::time::Instant;

const SCOOP_SIZE: usize = 64;

/// Arguments of `scoopscan scan`.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Generation signature (64 hex characters)
    #[arg(long)]
    gensig: String,

    /// File of consecutive 64-byte scoops, one per nonce
    #[arg(long, value_name = "FILE")]
    scoops: PathBuf,

    /// Backend to use (default: widest supported)
    #[arg(long, value_parser = parse_backend)]
    backend: Option<Backend>,

    /// Nonce of the first scoop in the file
    #[arg(long, default_value_t = 0)]
    start_nonce: u64,

    /// Divide the deadline by this base target
    #[arg(long)]
    base_target: Option<u64>,

    /// Split the scan across all cores
    #[arg(long)]
    parallel: bool,
}

fn parse_backend(name: &str) -> Result<Backend, String> {
    Backend::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = Backend::ALL.iter().map(|b| b.name()).collect();
        format!("unknown backend '{name}' (expected one of: {})", known.join(", "))
    })
}

// =============================================================================
// SCAN
// =============================================================================

/// Scan a scoop file and print the best nonce and its deadline.
pub fn scan_file(args: &ScanArgs) -> Result<()> {
    let gensig = scoopscan::decode_gensig(&args.gensig).context("Invalid --gensig")?;
    let data = std::fs::read(&args.scoops)
        .with_context(|| format!("Failed to read: {}", args.scoops.display()))?;
    if !data.len().is_multiple_of(SCOOP_SIZE) {
        anyhow::bail!(
            "{} is {} bytes, not a whole number of {SCOOP_SIZE}-byte scoops",
            args.scoops.display(),
            data.len()
        );
    }
    let nonces = (data.len() / SCOOP_SIZE) as u64;
    let backend = args.backend.unwrap_or_else(scoopscan::get_active_backend);
    tracing::info!(nonces, backend = backend.name(), parallel = args.parallel, "scanning");

    let started = Instant::now();
    let best = if args.parallel {
        scoopscan::scan_parallel_with(backend, &data, nonces, &gensig, BestDeadline::NONE)?
    } else {
        scoopscan::find_best_deadline_with(backend, &data, nonces, &gensig)?
    };
    let elapsed = started.elapsed();
    tracing::info!(?elapsed, "scan finished");

    for line in report(best, nonces, args.start_nonce, args.base_target, backend)? {
        println!("{line}");
    }
    Ok(())
}

/// Result lines for a finished scan.
///
/// An empty scan is decided by the nonce count: a scan over scoops that all
/// hash to `u64::MAX` still has a winner at its first offset.
fn report(
    best: BestDeadline,
    nonces: u64,
    start_nonce: u64,
    base_target: Option<u64>,
    backend: Backend,
) -> Result<Vec<String>> {
    if nonces == 0 {
        return Ok(vec!["no scoops scanned".to_string()]);
    }

    let nonce = start_nonce
        .checked_add(best.offset)
        .context("--start-nonce overflows the nonce range")?;
    let mut lines = vec![format!("nonce     {nonce}"), format!("deadline  {}", best.deadline)];
    if let Some(base_target) = base_target {
        lines.push(format!("seconds   {}", scoopscan::scale_deadline(best.deadline, base_target)?));
    }
    lines.push(format!("backend   {backend}"));
    Ok(lines)
}

/// Print each backend with its lane count and support on this CPU.
pub fn list_backends() {
    let active = scoopscan::get_active_backend();
    for backend in Backend::ALL {
        let status = if backend == active {
            "active"
        } else if backend.is_supported() {
            "supported"
        } else {
            "unavailable"
        };
        println!("{:<10} {:>2} lanes  {status}", backend.name(), backend.lanes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_scan_reports_nothing() {
        let lines = report(BestDeadline::NONE, 0, 0, None, Backend::Portable).unwrap();
        assert_eq!(lines, ["no scoops scanned"]);
    }

    #[test]
    fn maximal_deadline_is_still_reported() {
        // Every scoop hashing to u64::MAX leaves the best at its initial value.
        let lines = report(BestDeadline::NONE, 3, 100, None, Backend::Portable).unwrap();
        assert_eq!(lines[0], "nonce     100");
        assert_eq!(lines[1], format!("deadline  {}", u64::MAX));
    }

    #[test]
    fn nonce_overflow_is_an_error() {
        let best = BestDeadline::new(5, 2);
        assert!(report(best, 3, u64::MAX - 1, None, Backend::Portable).is_err());
        let lines = report(best, 3, 7, None, Backend::Portable).unwrap();
        assert_eq!(lines[0], "nonce     9");
        assert_eq!(lines.last().unwrap(), &format!("backend   {}", Backend::Portable));
    }
}

//! CLI Commands
//!
//! All scoopscan CLI commands organized as separate modules.

mod check;
mod hash;
mod scan;
mod scoop;

pub use check::check_mode;
pub use hash::hash_files;
pub use scan::{list_backends, scan_file, ScanArgs};
pub use scoop::scoop_number;

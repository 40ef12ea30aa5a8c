//! CLI command handlers, one per file.

mod classify;
mod completions;
mod format;
mod provider;
mod scan_har;
mod variants;

pub use classify::run_classify;
pub use completions::run_completions;
pub use provider::run_provider;
pub use scan_har::{run_scan_har, ScanHarArgs};
pub use variants::run_variants;

//! issue-digest - Keep GitHub planning and onboarding issues up to date
//!
//! Renders milestone and newcomer digests from GitHub issues and keeps each
//! one in a single tracking issue, creating or updating it after a preview.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

mod cli;

use colored::Colorize;

/// Main entry point for the issue-digest CLI
fn main() {
    if let Err(err) = cli::run() {
        eprintln!("{} {}", "Error:".red().bold(), format!("{err:#}").red());
        std::process::exit(1);
    }
}

//! Terminal adapters
//!
//! - `reporter` - colored progress/outcome messages
//! - `confirm` - y/n prompt on standard input

mod confirm;
mod reporter;

pub use confirm::{StdinConfirm, ask};
pub use reporter::ConsoleReporter;

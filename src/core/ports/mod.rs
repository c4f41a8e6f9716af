//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between the core pipelines and the
//! outside world: the issue tracker, the person answering prompts, and the
//! terminal.
//!
//! Implementations live in the `adapters` module; tests supply fakes.

mod confirm;
mod reporter;
mod tracker;

pub use confirm::{Confirm, FixedAnswer};
pub use reporter::{NullReporter, Reporter};
pub use tracker::IssueTracker;

//! Domain models
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Issue`] / [`Milestone`] - remote snapshots
//! - [`LabelTaxonomy`] - ordered category and rank labels
//! - [`RepoRef`] - `owner/name` repository reference

mod issue;
mod repo;
mod taxonomy;

pub use issue::{Issue, IssueState, Milestone};
pub use repo::RepoRef;
pub use taxonomy::LabelTaxonomy;

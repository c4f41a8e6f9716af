//! Core domain logic
//!
//! Pure logic with no I/O dependencies. All external interactions go
//! through the port traits.
//!
//! ## Architecture
//!
//! - `models/` - Issue, Milestone, LabelTaxonomy, RepoRef
//! - `services/` - classification, statistics, rendering, reconciliation
//! - `ports/` - IssueTracker, Confirm, Reporter
//! - `error` - input validation errors

pub mod error;
pub mod models;
pub mod ports;
pub mod services;

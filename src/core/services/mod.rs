//! Business logic services
//!
//! - [`classifier`] - category and rank from ordered label lists
//! - [`aggregator`] - totals, progress and contributors
//! - [`render`] - deterministic markdown documents
//! - [`resolver`] - pick the canonical existing tracking issue
//! - [`reconciler`] - preview, confirm, create or update
//! - [`planning`] / [`onboarding`] - the two digest pipelines

pub mod aggregator;
pub mod classifier;
pub mod onboarding;
pub mod planning;
pub mod reconciler;
pub mod render;
pub mod resolver;

pub use aggregator::{Stats, aggregate};
pub use classifier::{ClassifiedIssue, classify, classify_all};
pub use onboarding::OnboardOptions;
pub use planning::{MilestoneRun, PlanOptions};
pub use reconciler::{Decision, Outcome, Reconciled, Reconciler, TrackingRequest, WritePolicy};
pub use render::RenderContext;
pub use resolver::{Resolution, TargetIssue, resolve};

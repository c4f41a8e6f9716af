//! Label taxonomy
//!
//! Ordered label lists. Position in a list is both membership and rank:
//! earlier entries are higher priority (or easier). Order is user-configured
//! and is the only source of classification precedence.

use serde::{Deserialize, Serialize};

/// Ordered category and rank label lists
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabelTaxonomy {
    /// Category labels, in display order
    #[serde(default)]
    pub categories: Vec<String>,
    /// Rank labels (priority or difficulty), highest/easiest first
    #[serde(default)]
    pub ranks: Vec<String>,
}

impl LabelTaxonomy {
    /// Build a taxonomy from category and rank lists
    #[must_use]
    pub fn new<C, R>(categories: C, ranks: R) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            ranks: ranks.into_iter().map(Into::into).collect(),
        }
    }

    /// Rank assigned to issues carrying no rank label.
    ///
    /// Always larger than every real rank, so unranked issues sort last.
    #[must_use]
    pub const fn unspecified_rank(&self) -> usize {
        self.ranks.len()
    }

    /// Label for a rank, or `None` for the unspecified sentinel
    #[must_use]
    pub fn rank_label(&self, rank: usize) -> Option<&str> {
        self.ranks.get(rank).map(String::as_str)
    }
}

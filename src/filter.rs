//! Filtering of record sequences.
//!
//! All predicates are conjunctive and an absent predicate imposes no
//! constraint. The filter is stable: it preserves input ordering and
//! never sorts. Top-N ranking is a separate explicit operation.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::{Category, ReviewRecord, Urgency};

/// Filter predicates over review records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    pub category: Option<Category>,
    pub urgency: Option<Urgency>,
    pub min_priority: Option<i64>,
    pub min_rating: Option<i64>,
    pub max_rating: Option<i64>,
    pub search: Option<String>,
}

impl FilterConfig {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.urgency.is_none()
            && self.min_priority.is_none()
            && self.min_rating.is_none()
            && self.max_rating.is_none()
            && self.search.is_none()
    }

    /// Reject self-contradictory configurations before any execution.
    pub fn validate(&self) -> Result<(), Error> {
        if let (Some(min), Some(max)) = (self.min_rating, self.max_rating) {
            if min > max {
                return Err(Error::InvalidFilter(format!(
                    "min_rating {min} exceeds max_rating {max}"
                )));
            }
        }
        Ok(())
    }

    /// Whether one record passes every present predicate.
    pub fn matches(&self, record: &ReviewRecord) -> bool {
        if let Some(category) = self.category {
            if record.category != category {
                return false;
            }
        }
        if let Some(urgency) = self.urgency {
            if record.urgency != urgency {
                return false;
            }
        }
        if let Some(min_priority) = self.min_priority {
            if record.priority_score < min_priority {
                return false;
            }
        }
        if let Some(min_rating) = self.min_rating {
            if record.rating < min_rating {
                return false;
            }
        }
        if let Some(max_rating) = self.max_rating {
            if record.rating > max_rating {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !record.summary.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }

    /// Apply all predicates, preserving input order.
    pub fn apply(&self, records: &[ReviewRecord]) -> Result<Vec<ReviewRecord>, Error> {
        self.validate()?;
        let filtered: Vec<ReviewRecord> = records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect();
        tracing::debug!(
            before = records.len(),
            after = filtered.len(),
            "applied filters"
        );
        Ok(filtered)
    }
}

/// Top-N records by priority, highest first.
///
/// Ties break on `review_id` ascending so the ranking is deterministic.
pub fn top_by_priority(records: &[ReviewRecord], n: usize) -> Vec<ReviewRecord> {
    let mut sorted: Vec<ReviewRecord> = records.to_vec();
    sorted.sort_by(|a, b| {
        b.priority_score
            .cmp(&a.priority_score)
            .then_with(|| a.review_id.cmp(&b.review_id))
    });
    sorted.truncate(n);
    sorted
}

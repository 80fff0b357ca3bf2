//! Judgment validation.
//!
//! Turns one raw judgment payload (arbitrary JSON from the enrichment
//! provider, possibly absent entirely) into a well-typed `ReviewRecord`.
//! Validation never fails: every malformed or missing field is resolved
//! with a safe default, and each applied default is counted so data
//! quality stays diagnosable.

use serde_json::Value;

use crate::model::{Category, RawReview, ReviewRecord, Urgency};
use crate::score::priority_score;

/// Summary placeholder is built from this many chars of the review text.
const SUMMARY_TRUNCATE_CHARS: usize = 80;

/// Which fields of one record were defaulted during validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fallbacks {
    pub category: bool,
    pub urgency: bool,
    pub summary: bool,
    pub rating: bool,
    pub thumbs_up: bool,
}

impl Fallbacks {
    pub fn any(&self) -> bool {
        self.category || self.urgency || self.summary || self.rating || self.thumbs_up
    }
}

/// Fallback counts accumulated over a batch. Observability side-channel,
/// never an error signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FallbackStats {
    pub category: usize,
    pub urgency: usize,
    pub summary: usize,
    pub rating: usize,
    pub thumbs_up: usize,
    /// Number of records with at least one fallback.
    pub records_affected: usize,
}

impl FallbackStats {
    pub fn record(&mut self, fallbacks: &Fallbacks) {
        self.category += fallbacks.category as usize;
        self.urgency += fallbacks.urgency as usize;
        self.summary += fallbacks.summary as usize;
        self.rating += fallbacks.rating as usize;
        self.thumbs_up += fallbacks.thumbs_up as usize;
        if fallbacks.any() {
            self.records_affected += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.category + self.urgency + self.summary + self.rating + self.thumbs_up
    }
}

/// Validate one judgment against its source review.
///
/// `judgment` is `None` when the enrichment call failed outright; the
/// result is then a fully fallback-defaulted record. The priority score
/// is always recomputed from the validated fields, never read from the
/// payload.
pub fn validate_judgment(
    review: &RawReview,
    judgment: Option<&Value>,
) -> (ReviewRecord, Fallbacks) {
    let mut fallbacks = Fallbacks::default();

    let category = match extract_str(judgment, "category").and_then(|s| s.parse().ok()) {
        Some(cat) => cat,
        None => {
            fallbacks.category = true;
            tracing::debug!(review_id = %review.review_id, "category fallback -> other");
            Category::Other
        }
    };

    let urgency = match extract_str(judgment, "urgency").and_then(|s| s.parse().ok()) {
        Some(urg) => urg,
        None => {
            fallbacks.urgency = true;
            tracing::debug!(review_id = %review.review_id, "urgency fallback -> low");
            Urgency::Low
        }
    };

    let summary = match extract_str(judgment, "summary").filter(|s| !s.trim().is_empty()) {
        Some(s) => s.trim().to_string(),
        None => {
            fallbacks.summary = true;
            tracing::debug!(review_id = %review.review_id, "summary fallback -> placeholder");
            placeholder_summary(&review.review_text)
        }
    };

    let rating = match review.rating {
        Some(r) if (1..=5).contains(&r) => r,
        _ => {
            fallbacks.rating = true;
            3
        }
    };

    let thumbs_up = match review.thumbs_up {
        Some(t) if t >= 0 => t,
        _ => {
            fallbacks.thumbs_up = true;
            0
        }
    };

    let record = ReviewRecord {
        review_id: review.review_id.clone(),
        category,
        urgency,
        rating,
        thumbs_up,
        summary,
        priority_score: priority_score(urgency, Some(rating), Some(thumbs_up)),
    };

    (record, fallbacks)
}

/// Pull a string field out of the raw payload, tolerating absence and
/// type mismatch.
fn extract_str<'a>(judgment: Option<&'a Value>, field: &str) -> Option<&'a str> {
    judgment?.get(field)?.as_str()
}

/// Deterministic placeholder derived from the review text.
fn placeholder_summary(review_text: &str) -> String {
    let trimmed = review_text.trim();
    if trimmed.is_empty() {
        return "No summary available".to_string();
    }
    if trimmed.chars().count() <= SUMMARY_TRUNCATE_CHARS {
        trimmed.to_string()
    } else {
        let truncated: String = trimmed.chars().take(SUMMARY_TRUNCATE_CHARS).collect();
        format!("{}...", truncated.trim_end())
    }
}

//! Review input loading.
//!
//! Reviews arrive as a JSON array of raw review objects. Rows with an
//! empty review text and exact duplicate texts are dropped before the
//! pipeline sees them.

use std::collections::HashSet;
use std::path::Path;

use crate::error::Error;
use crate::model::RawReview;

/// Load and clean raw reviews from a JSON file.
pub fn load_reviews(path: &Path) -> Result<Vec<RawReview>, Error> {
    let content = std::fs::read_to_string(path)?;
    let raw: Vec<RawReview> = serde_json::from_str(&content)?;
    let before = raw.len();

    let mut seen_texts = HashSet::new();
    let reviews: Vec<RawReview> = raw
        .into_iter()
        .filter(|r| !r.review_text.trim().is_empty())
        .filter(|r| seen_texts.insert(r.review_text.clone()))
        .collect();

    tracing::info!(before, after = reviews.len(), "reviews cleaned");
    Ok(reviews)
}

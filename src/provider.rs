//! Enrichment provider seam.
//!
//! The actual model call lives outside this crate. The core only needs
//! a collaborator that, given one raw review, either returns a judgment
//! payload or signals terminal failure for that review. Failures flow
//! into validation as "no judgment" and come back as fallback-complete
//! records.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;

use crate::error::Error;
use crate::model::RawReview;

/// Produces one judgment payload per review.
///
/// The payload is untyped on purpose: nothing upstream of the validator
/// is trusted to be well-formed.
pub trait JudgmentProvider {
    fn judge(&self, review: &RawReview) -> Result<Value, Error>;
}

/// Provider backed by pre-computed judgments keyed by review id.
///
/// This is how offline batch output (one JSON object per review) is fed
/// into the pipeline. A review id with no entry is an explicit failure.
pub struct FileProvider {
    judgments: HashMap<String, Value>,
}

impl FileProvider {
    /// Load judgments from a JSON file: an array of objects, each
    /// carrying a `review_id` field. Objects without a usable review_id
    /// are skipped.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        let raw: Vec<Value> = serde_json::from_str(&content)?;

        let mut judgments = HashMap::new();
        for value in raw {
            match value.get("review_id").and_then(Value::as_str) {
                Some(id) => {
                    judgments.insert(id.to_string(), value);
                }
                None => {
                    tracing::warn!("skipping judgment without review_id");
                }
            }
        }
        tracing::info!(count = judgments.len(), path = %path.display(), "loaded judgments");
        Ok(Self { judgments })
    }

    pub fn from_map(judgments: HashMap<String, Value>) -> Self {
        Self { judgments }
    }

    pub fn len(&self) -> usize {
        self.judgments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.judgments.is_empty()
    }
}

impl JudgmentProvider for FileProvider {
    fn judge(&self, review: &RawReview) -> Result<Value, Error> {
        self.judgments
            .get(&review.review_id)
            .cloned()
            .ok_or_else(|| Error::JudgmentUnavailable(review.review_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn review(id: &str) -> RawReview {
        RawReview {
            review_id: id.to_string(),
            review_text: "text".to_string(),
            rating: Some(3),
            thumbs_up: Some(0),
        }
    }

    #[test]
    fn test_load_and_judge() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"review_id": "rev_001", "category": "bug", "urgency": "high", "summary": "crash"}},
                {{"category": "ads"}}
            ]"#
        )
        .unwrap();

        let provider = FileProvider::load(file.path()).unwrap();
        assert_eq!(provider.len(), 1);

        let judgment = provider.judge(&review("rev_001")).unwrap();
        assert_eq!(judgment["category"], "bug");
    }

    #[test]
    fn test_missing_judgment_is_explicit_failure() {
        let provider = FileProvider::from_map(HashMap::new());
        let err = provider.judge(&review("rev_404")).unwrap_err();
        assert!(matches!(err, Error::JudgmentUnavailable(_)));
    }
}

//! Analysis pipeline: judge, validate, score, persist.
//!
//! One review's failed or malformed judgment never aborts the batch;
//! the validator always produces a record. Persistence of the whole run
//! is a single transaction in the store.

use crate::db::Database;
use crate::error::Error;
use crate::model::{RawReview, ReviewRecord};
use crate::provider::JudgmentProvider;
use crate::validate::{validate_judgment, FallbackStats};

/// Outcome of one pipeline execution.
#[derive(Debug)]
pub struct AnalysisOutcome {
    /// Assigned by the store; `None` when persistence was skipped.
    pub run_id: Option<i64>,
    pub records: Vec<ReviewRecord>,
    pub fallbacks: FallbackStats,
    /// Reviews for which the provider reported terminal failure.
    pub provider_failures: usize,
}

/// Enrich, validate and score a batch of reviews, then persist them as
/// one run unless `persist` is false.
pub fn run_analysis(
    db: &mut Database,
    reviews: &[RawReview],
    provider: &dyn JudgmentProvider,
    notes: Option<&str>,
    persist: bool,
) -> Result<AnalysisOutcome, Error> {
    let mut records = Vec::with_capacity(reviews.len());
    let mut fallbacks = FallbackStats::default();
    let mut provider_failures = 0;

    for review in reviews {
        let judgment = match provider.judge(review) {
            Ok(judgment) => Some(judgment),
            Err(e) => {
                provider_failures += 1;
                tracing::warn!(review_id = %review.review_id, error = %e, "enrichment failed");
                None
            }
        };

        let (record, applied) = validate_judgment(review, judgment.as_ref());
        fallbacks.record(&applied);
        records.push(record);
    }

    if fallbacks.total() > 0 {
        tracing::warn!(
            fallbacks = fallbacks.total(),
            records_affected = fallbacks.records_affected,
            "validation applied fallbacks"
        );
    }

    let run_id = if persist {
        Some(db.save_run(&records, notes)?)
    } else {
        None
    };

    Ok(AnalysisOutcome {
        run_id,
        records,
        fallbacks,
        provider_failures,
    })
}

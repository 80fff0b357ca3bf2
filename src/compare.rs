//! Run-over-run comparison.
//!
//! Directional: run A is the baseline, run B the comparand, and every
//! delta is B minus A. Swapping the arguments negates all deltas.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::db::Database;
use crate::error::Error;
use crate::model::{Category, ReviewRecord, Urgency};

/// Count of one categorical value in each run plus the signed delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValueDelta {
    pub count_a: i64,
    pub count_b: i64,
    pub delta: i64,
}

/// Average of one metric in each run.
///
/// `pct_change` is `None` when the baseline average is zero: percentage
/// change is undefined there, and we surface that rather than invent a
/// number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AverageDelta {
    pub avg_a: f64,
    pub avg_b: f64,
    pub delta: f64,
    pub pct_change: Option<f64>,
}

impl AverageDelta {
    fn between(avg_a: f64, avg_b: f64) -> Self {
        let delta = avg_b - avg_a;
        let pct_change = if avg_a == 0.0 {
            None
        } else {
            Some(delta / avg_a * 100.0)
        };
        Self {
            avg_a,
            avg_b,
            delta,
            pct_change,
        }
    }
}

/// Full comparison between two stored runs.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    pub run_a: i64,
    pub run_b: i64,
    pub total_a: i64,
    pub total_b: i64,
    pub categories: BTreeMap<Category, ValueDelta>,
    pub urgencies: BTreeMap<Urgency, ValueDelta>,
    pub rating: AverageDelta,
    pub priority: AverageDelta,
}

/// Compare two stored runs.
///
/// Fails with `RunNotFound` when either run is absent; never returns a
/// partial result. Values present in only one run appear with a zero
/// count in the other.
pub fn compare_runs(db: &Database, run_a: i64, run_b: i64) -> Result<ComparisonResult, Error> {
    // Both runs must exist before any aggregation.
    db.get_run(run_a)?;
    db.get_run(run_b)?;

    let records_a = db.get_records(run_a, None)?;
    let records_b = db.get_records(run_b, None)?;

    Ok(ComparisonResult {
        run_a,
        run_b,
        total_a: records_a.len() as i64,
        total_b: records_b.len() as i64,
        categories: value_deltas(
            &count_by(&records_a, |r| r.category),
            &count_by(&records_b, |r| r.category),
        ),
        urgencies: value_deltas(
            &count_by(&records_a, |r| r.urgency),
            &count_by(&records_b, |r| r.urgency),
        ),
        rating: AverageDelta::between(
            average(&records_a, |r| r.rating),
            average(&records_b, |r| r.rating),
        ),
        priority: AverageDelta::between(
            average(&records_a, |r| r.priority_score),
            average(&records_b, |r| r.priority_score),
        ),
    })
}

pub(crate) fn count_by<K: Ord + Copy>(
    records: &[ReviewRecord],
    key: impl Fn(&ReviewRecord) -> K,
) -> BTreeMap<K, i64> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(key(record)).or_insert(0) += 1;
    }
    counts
}

pub(crate) fn average(records: &[ReviewRecord], value: impl Fn(&ReviewRecord) -> i64) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records.iter().map(&value).sum::<i64>() as f64 / records.len() as f64
}

/// Per-value deltas over the union of keys seen in either run.
fn value_deltas<K: Ord + Copy>(
    counts_a: &BTreeMap<K, i64>,
    counts_b: &BTreeMap<K, i64>,
) -> BTreeMap<K, ValueDelta> {
    let mut deltas = BTreeMap::new();
    for key in counts_a.keys().chain(counts_b.keys()) {
        let count_a = counts_a.get(key).copied().unwrap_or(0);
        let count_b = counts_b.get(key).copied().unwrap_or(0);
        deltas.insert(
            *key,
            ValueDelta {
                count_a,
                count_b,
                delta: count_b - count_a,
            },
        );
    }
    deltas
}

//! Trend analysis over a time window.
//!
//! Aggregation is per run, the natural grain of the store. The window is
//! inclusive at both ends: a run whose timestamp sits exactly `days`
//! days before now is part of the window.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::compare::{average, count_by};
use crate::db::Database;
use crate::error::Error;
use crate::model::{Category, Urgency};

/// Aggregates for one run inside the window.
#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    pub run_id: i64,
    pub timestamp: DateTime<Utc>,
    pub review_count: i64,
    pub categories: BTreeMap<Category, i64>,
    pub urgencies: BTreeMap<Urgency, i64>,
    pub avg_rating: f64,
    pub avg_priority: f64,
}

/// Trend over the window, run_id ascending.
#[derive(Debug, Clone, Serialize)]
pub struct TrendResult {
    pub window_days: i64,
    pub category: Option<Category>,
    pub points: Vec<TrendPoint>,
}

impl TrendResult {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Trend over the last `days` days, optionally restricted to one
/// category. Read-only; no matching records is an empty result, not an
/// error.
pub fn trend(db: &Database, days: i64, category: Option<Category>) -> Result<TrendResult, Error> {
    trend_at(db, Utc::now(), days, category)
}

/// Trend with an explicit reference time, for deterministic evaluation.
pub fn trend_at(
    db: &Database,
    now: DateTime<Utc>,
    days: i64,
    category: Option<Category>,
) -> Result<TrendResult, Error> {
    let cutoff = now - Duration::days(days);
    let mut points = Vec::new();

    for run in db.list_runs()? {
        if run.timestamp < cutoff || run.timestamp > now {
            continue;
        }

        let mut records = db.get_records(run.run_id, None)?;
        if let Some(wanted) = category {
            records.retain(|r| r.category == wanted);
            if records.is_empty() {
                continue;
            }
        }

        points.push(TrendPoint {
            run_id: run.run_id,
            timestamp: run.timestamp,
            review_count: records.len() as i64,
            categories: count_by(&records, |r| r.category),
            urgencies: count_by(&records, |r| r.urgency),
            avg_rating: average(&records, |r| r.rating),
            avg_priority: average(&records, |r| r.priority_score),
        });
    }

    tracing::debug!(days, runs = points.len(), "trend window evaluated");
    Ok(TrendResult {
        window_days: days,
        category,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReviewRecord;

    fn record(id: &str, category: Category, urgency: Urgency, rating: i64, score: i64) -> ReviewRecord {
        ReviewRecord {
            review_id: id.to_string(),
            category,
            urgency,
            rating,
            thumbs_up: 0,
            summary: "s".to_string(),
            priority_score: score,
        }
    }

    /// Rewrite a run's timestamp, simulating history.
    fn backdate(db: &Database, run_id: i64, timestamp: DateTime<Utc>) {
        db.conn()
            .execute(
                "UPDATE analysis_runs SET timestamp = ?1 WHERE run_id = ?2",
                rusqlite::params![timestamp.to_rfc3339(), run_id],
            )
            .unwrap();
    }

    fn seeded_db(now: DateTime<Utc>) -> (Database, i64, i64, i64) {
        let mut db = Database::open_memory().unwrap();
        let recent = db
            .save_run(
                &[
                    record("rev_001", Category::Bug, Urgency::High, 1, 140),
                    record("rev_002", Category::Praise, Urgency::Low, 5, 10),
                ],
                None,
            )
            .unwrap();
        let boundary = db
            .save_run(&[record("rev_003", Category::Bug, Urgency::Medium, 3, 70)], None)
            .unwrap();
        let ancient = db
            .save_run(&[record("rev_004", Category::Ads, Urgency::Low, 4, 20)], None)
            .unwrap();

        backdate(&db, recent, now - Duration::days(2));
        backdate(&db, boundary, now - Duration::days(30));
        backdate(&db, ancient, now - Duration::days(31));
        (db, recent, boundary, ancient)
    }

    #[test]
    fn test_window_is_boundary_inclusive() {
        let now = Utc::now();
        let (db, recent, boundary, ancient) = seeded_db(now);

        let result = trend_at(&db, now, 30, None).unwrap();
        let ids: Vec<i64> = result.points.iter().map(|p| p.run_id).collect();

        assert!(ids.contains(&recent));
        assert!(ids.contains(&boundary), "run at exact boundary must be included");
        assert!(!ids.contains(&ancient));
    }

    #[test]
    fn test_points_are_oldest_first_per_run() {
        let now = Utc::now();
        let (db, recent, boundary, _) = seeded_db(now);

        let result = trend_at(&db, now, 30, None).unwrap();
        assert_eq!(result.points.len(), 2);
        // list_runs is run_id ascending; recent was saved first
        assert_eq!(result.points[0].run_id, recent);
        assert_eq!(result.points[1].run_id, boundary);
    }

    #[test]
    fn test_aggregates_per_run() {
        let now = Utc::now();
        let (db, recent, _, _) = seeded_db(now);

        let result = trend_at(&db, now, 7, None).unwrap();
        let point = result.points.iter().find(|p| p.run_id == recent).unwrap();

        assert_eq!(point.review_count, 2);
        assert_eq!(point.categories[&Category::Bug], 1);
        assert_eq!(point.urgencies[&Urgency::High], 1);
        assert!((point.avg_rating - 3.0).abs() < 1e-9);
        assert!((point.avg_priority - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_category_filter_restricts_before_aggregation() {
        let now = Utc::now();
        let (db, recent, boundary, _) = seeded_db(now);

        let result = trend_at(&db, now, 30, Some(Category::Bug)).unwrap();
        assert_eq!(result.points.len(), 2);

        let point = result.points.iter().find(|p| p.run_id == recent).unwrap();
        assert_eq!(point.review_count, 1);
        assert!((point.avg_priority - 140.0).abs() < 1e-9);

        let point = result.points.iter().find(|p| p.run_id == boundary).unwrap();
        assert_eq!(point.review_count, 1);
    }

    #[test]
    fn test_no_matches_is_empty_not_error() {
        let now = Utc::now();
        let (db, _, _, _) = seeded_db(now);

        let result = trend_at(&db, now, 30, Some(Category::Payment)).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_future_runs_are_excluded() {
        let now = Utc::now();
        let (db, recent, _, _) = seeded_db(now);
        backdate(&db, recent, now + Duration::days(1));

        let result = trend_at(&db, now, 30, None).unwrap();
        assert!(!result.points.iter().any(|p| p.run_id == recent));
    }
}

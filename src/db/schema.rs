//! Database schema and row mapping.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, Result, Row};

use crate::error::Error;
use crate::model::{AnalysisRun, Category, ReviewRecord, Urgency};

/// Initialize database with all tables.
pub fn init_db(conn: &Connection) -> Result<(), Error> {
    // One row per pipeline execution. Immutable once written.
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS analysis_runs (
            run_id        INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp     TEXT NOT NULL,
            total_reviews INTEGER NOT NULL,
            notes         TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_runs_timestamp ON analysis_runs(timestamp);
        "#,
    )?;

    // One row per enriched review, owned by its run. review_id is unique
    // within a run but the same review may reappear across runs.
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS reviews (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            run_id         INTEGER NOT NULL,
            review_id      TEXT NOT NULL,
            category       TEXT NOT NULL,
            urgency        TEXT NOT NULL,
            rating         INTEGER NOT NULL,
            thumbs_up      INTEGER NOT NULL,
            priority_score INTEGER NOT NULL,
            summary        TEXT NOT NULL,
            created_at     TEXT NOT NULL,
            FOREIGN KEY (run_id) REFERENCES analysis_runs(run_id),
            UNIQUE(run_id, review_id)
        );

        CREATE INDEX IF NOT EXISTS idx_reviews_run_id ON reviews(run_id);
        CREATE INDEX IF NOT EXISTS idx_reviews_category ON reviews(category);
        CREATE INDEX IF NOT EXISTS idx_reviews_urgency ON reviews(urgency);
        "#,
    )?;

    Ok(())
}

fn parse_timestamp(idx: usize, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

impl AnalysisRun {
    pub fn from_row(row: &Row<'_>) -> Result<Self> {
        let raw_ts: String = row.get("timestamp")?;
        Ok(Self {
            run_id: row.get("run_id")?,
            timestamp: parse_timestamp(1, &raw_ts)?,
            total_reviews: row.get("total_reviews")?,
            notes: row.get("notes")?,
        })
    }
}

impl ReviewRecord {
    pub fn from_row(row: &Row<'_>) -> Result<Self> {
        let category: String = row.get("category")?;
        let urgency: String = row.get("urgency")?;
        Ok(Self {
            review_id: row.get("review_id")?,
            // Stored values were validated at insert; an unparseable value
            // means the database was edited out-of-band.
            category: category.parse::<Category>().map_err(|_| {
                rusqlite::Error::FromSqlConversionFailure(
                    3,
                    Type::Text,
                    format!("unknown category: {category}").into(),
                )
            })?,
            urgency: urgency.parse::<Urgency>().map_err(|_| {
                rusqlite::Error::FromSqlConversionFailure(
                    4,
                    Type::Text,
                    format!("unknown urgency: {urgency}").into(),
                )
            })?,
            rating: row.get("rating")?,
            thumbs_up: row.get("thumbs_up")?,
            summary: row.get("summary")?,
            priority_score: row.get("priority_score")?,
        })
    }
}

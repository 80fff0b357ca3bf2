//! SQLite store for analysis runs and their review records.
//!
//! Writes for one run go through a single transaction: either the run
//! row and all of its records land together, or nothing does. Readers
//! therefore never observe a run whose `total_reviews` disagrees with
//! its linked records.

mod schema;

pub use schema::init_db;

use std::path::Path;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

use crate::error::Error;
use crate::filter::FilterConfig;
use crate::model::{AnalysisRun, ReviewRecord};

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at path.
    pub fn open(path: &Path) -> Result<Self, Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        init_db(&conn)?;
        tracing::info!(path = %path.display(), "database opened");
        Ok(Self { conn })
    }

    /// Open in-memory database for testing.
    pub fn open_memory() -> Result<Self, Error> {
        let conn = Connection::open_in_memory()?;
        init_db(&conn)?;
        Ok(Self { conn })
    }

    /// Get connection reference.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // ========== Runs ==========

    /// Persist a new run and all of its records atomically.
    ///
    /// Returns the store-assigned run id. On any failure the transaction
    /// rolls back and the store is unchanged.
    pub fn save_run(
        &mut self,
        records: &[ReviewRecord],
        notes: Option<&str>,
    ) -> Result<i64, Error> {
        let timestamp = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO analysis_runs (timestamp, total_reviews, notes) VALUES (?1, ?2, ?3)",
            rusqlite::params![timestamp, records.len() as i64, notes],
        )?;
        let run_id = tx.last_insert_rowid();

        insert_review_rows(&tx, run_id, records, &timestamp)?;
        tx.commit()?;

        tracing::info!(run_id, count = records.len(), "saved analysis run");
        Ok(run_id)
    }

    /// Bulk-insert additional records under an existing run.
    ///
    /// Fails with `MissingRun` when the run does not exist. The run's
    /// `total_reviews` is updated in the same transaction so the
    /// referential invariant holds at commit.
    pub fn insert_records(&mut self, run_id: i64, records: &[ReviewRecord]) -> Result<(), Error> {
        let timestamp = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;

        let exists: Option<i64> = tx
            .query_row(
                "SELECT run_id FROM analysis_runs WHERE run_id = ?1",
                [run_id],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_none() {
            return Err(Error::MissingRun(run_id));
        }

        insert_review_rows(&tx, run_id, records, &timestamp)?;
        tx.execute(
            r#"
            UPDATE analysis_runs
            SET total_reviews = (SELECT COUNT(*) FROM reviews WHERE run_id = ?1)
            WHERE run_id = ?1
            "#,
            [run_id],
        )?;
        tx.commit()?;

        tracing::info!(run_id, count = records.len(), "inserted records into run");
        Ok(())
    }

    /// Get run metadata by id.
    pub fn get_run(&self, run_id: i64) -> Result<AnalysisRun, Error> {
        let run = self
            .conn
            .query_row(
                "SELECT run_id, timestamp, total_reviews, notes FROM analysis_runs WHERE run_id = ?1",
                [run_id],
                AnalysisRun::from_row,
            )
            .optional()?;
        run.ok_or(Error::RunNotFound(run_id))
    }

    /// Latest run id, if any run exists.
    pub fn latest_run_id(&self) -> Result<Option<i64>, Error> {
        let id: Option<i64> = self
            .conn
            .query_row("SELECT MAX(run_id) FROM analysis_runs", [], |row| {
                row.get(0)
            })?;
        Ok(id)
    }

    /// All runs, run_id ascending.
    pub fn list_runs(&self) -> Result<Vec<AnalysisRun>, Error> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT run_id, timestamp, total_reviews, notes
            FROM analysis_runs
            ORDER BY run_id ASC
            "#,
        )?;
        let rows = stmt.query_map([], AnalysisRun::from_row)?;

        let mut runs = Vec::new();
        for row in rows {
            runs.push(row?);
        }
        Ok(runs)
    }

    // ========== Records ==========

    /// Records for a run, priority descending with review_id tiebreak,
    /// optionally narrowed by filter predicates.
    pub fn get_records(
        &self,
        run_id: i64,
        filter: Option<&FilterConfig>,
    ) -> Result<Vec<ReviewRecord>, Error> {
        // Existence check first so an unknown run is NotFound, not an
        // empty result.
        self.get_run(run_id)?;

        let mut stmt = self.conn.prepare(
            r#"
            SELECT review_id, category, urgency, rating, thumbs_up, priority_score, summary
            FROM reviews
            WHERE run_id = ?1
            ORDER BY priority_score DESC, review_id ASC
            "#,
        )?;
        let rows = stmt.query_map([run_id], ReviewRecord::from_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }

        match filter {
            Some(config) if !config.is_empty() => config.apply(&records),
            _ => Ok(records),
        }
    }
}

/// Insert review rows under an open transaction.
fn insert_review_rows(
    tx: &rusqlite::Transaction<'_>,
    run_id: i64,
    records: &[ReviewRecord],
    timestamp: &str,
) -> Result<(), Error> {
    let mut stmt = tx.prepare(
        r#"
        INSERT INTO reviews (
            run_id, review_id, category, urgency, rating,
            thumbs_up, priority_score, summary, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
    )?;
    for record in records {
        stmt.execute(rusqlite::params![
            run_id,
            record.review_id,
            record.category.as_str(),
            record.urgency.as_str(),
            record.rating,
            record.thumbs_up,
            record.priority_score,
            record.summary,
            timestamp,
        ])?;
    }
    Ok(())
}

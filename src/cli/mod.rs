//! CLI subcommand implementations.

pub mod analyze;
pub mod compare;
pub mod export;
pub mod input;
pub mod report;
pub mod runs;
pub mod show;
pub mod trend;

use crate::db::Database;
use crate::error::Error;
use crate::model::{Category, Urgency};

/// Resolve an explicit run id, or default to the latest run.
pub(crate) fn resolve_run_id(db: &Database, run_id: Option<i64>) -> Result<i64, Error> {
    match run_id {
        Some(id) => Ok(id),
        None => db
            .latest_run_id()?
            .ok_or_else(|| Error::other("no analysis runs in the database yet")),
    }
}

pub(crate) fn parse_category(raw: &str) -> Result<Category, Error> {
    raw.parse()
        .map_err(|_| Error::other(format!("unknown category: {raw}")))
}

pub(crate) fn parse_urgency(raw: &str) -> Result<Urgency, Error> {
    raw.parse()
        .map_err(|_| Error::other(format!("unknown urgency: {raw}")))
}

//! `revq show` - display records for a run with optional filters.

use std::path::Path;

use crate::cli::{parse_category, parse_urgency, resolve_run_id};
use crate::db::Database;
use crate::error::Error;
use crate::filter::{top_by_priority, FilterConfig};

/// Filter flags as received from the command line.
#[derive(Debug, Default)]
pub struct ShowArgs {
    pub category: Option<String>,
    pub urgency: Option<String>,
    pub min_priority: Option<i64>,
    pub min_rating: Option<i64>,
    pub max_rating: Option<i64>,
    pub search: Option<String>,
    pub top: Option<usize>,
}

impl ShowArgs {
    fn to_filter(&self) -> Result<FilterConfig, Error> {
        let config = FilterConfig {
            category: self.category.as_deref().map(parse_category).transpose()?,
            urgency: self.urgency.as_deref().map(parse_urgency).transpose()?,
            min_priority: self.min_priority,
            min_rating: self.min_rating,
            max_rating: self.max_rating,
            search: self.search.clone(),
        };
        config.validate()?;
        Ok(config)
    }
}

pub fn run(db_path: &Path, run_id: Option<i64>, args: ShowArgs) -> Result<(), Error> {
    let db = Database::open(db_path)?;
    let run_id = resolve_run_id(&db, run_id)?;
    let filter = args.to_filter()?;

    let mut records = db.get_records(run_id, Some(&filter))?;
    if let Some(n) = args.top {
        records = top_by_priority(&records, n);
    }

    if records.is_empty() {
        println!("No records match for run {run_id}.");
        return Ok(());
    }

    println!(
        "{:12}  {:15}  {:6}  {:>6}  {:>6}  {:>8}  summary",
        "review", "category", "urg", "rating", "thumbs", "priority"
    );
    for record in &records {
        println!(
            "{:12}  {:15}  {:6}  {:>6}  {:>6}  {:>8}  {}",
            record.review_id,
            record.category.as_str(),
            record.urgency.as_str(),
            record.rating,
            record.thumbs_up,
            record.priority_score,
            record.summary
        );
    }
    println!();
    println!("{} records (run {run_id})", records.len());
    Ok(())
}

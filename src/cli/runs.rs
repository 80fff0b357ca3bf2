//! `revq runs` - list persisted analysis runs.

use std::path::Path;

use crate::db::Database;
use crate::error::Error;

pub fn run(db_path: &Path) -> Result<(), Error> {
    let db = Database::open(db_path)?;
    let runs = db.list_runs()?;

    if runs.is_empty() {
        println!("No analysis runs yet.");
        return Ok(());
    }

    println!("{:>6}  {:25}  {:>8}  notes", "run", "timestamp", "reviews");
    for run in runs {
        println!(
            "{:>6}  {:25}  {:>8}  {}",
            run.run_id,
            run.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            run.total_reviews,
            run.notes.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

//! `revq export` - export a run's records as JSON.

use std::path::Path;

use crate::cli::resolve_run_id;
use crate::db::Database;
use crate::error::Error;
use crate::export::write_json;

pub fn run(db_path: &Path, run_id: Option<i64>, output: &Path) -> Result<(), Error> {
    let db = Database::open(db_path)?;
    let run_id = resolve_run_id(&db, run_id)?;
    let records = db.get_records(run_id, None)?;

    write_json(&records, output)?;
    println!(
        "Exported {} records from run {run_id}: {}",
        records.len(),
        output.display()
    );
    Ok(())
}

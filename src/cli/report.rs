//! `revq report` - write the summary report for a run.

use std::path::Path;

use crate::cli::resolve_run_id;
use crate::config::Config;
use crate::db::Database;
use crate::error::Error;
use crate::export::write_report;
use crate::report::render_summary;

pub fn run(
    db_path: &Path,
    config: &Config,
    run_id: Option<i64>,
    output: &Path,
) -> Result<(), Error> {
    let db = Database::open(db_path)?;
    let run_id = resolve_run_id(&db, run_id)?;
    let records = db.get_records(run_id, None)?;

    let report = render_summary(&records, config.report.critical_rating_threshold);
    write_report(&report, output)?;
    println!("Summary report saved: {}", output.display());
    Ok(())
}

//! `revq compare` - compare two analysis runs.

use std::path::Path;

use crate::compare::compare_runs;
use crate::db::Database;
use crate::error::Error;
use crate::export::write_report;
use crate::report::render_comparison;

pub fn run(
    db_path: &Path,
    run_a: i64,
    run_b: i64,
    output: Option<&Path>,
) -> Result<(), Error> {
    let db = Database::open(db_path)?;
    let comparison = compare_runs(&db, run_a, run_b)?;
    let report = render_comparison(&comparison);

    println!("{report}");
    if let Some(path) = output {
        write_report(&report, path)?;
        println!("Comparison report saved: {}", path.display());
    }
    Ok(())
}

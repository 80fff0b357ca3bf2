//! `revq analyze` - run the validation/scoring pipeline over a batch.

use std::collections::HashMap;
use std::path::Path;

use crate::cli::input::load_reviews;
use crate::config::Config;
use crate::db::Database;
use crate::error::Error;
use crate::pipeline::run_analysis;
use crate::provider::FileProvider;
use crate::report::render_summary;

pub fn run(
    db_path: &Path,
    config: &Config,
    reviews_path: &Path,
    judgments_path: Option<&Path>,
    notes: Option<&str>,
    persist: bool,
) -> Result<(), Error> {
    let reviews = load_reviews(reviews_path)?;
    if reviews.is_empty() {
        println!("No reviews to analyze.");
        return Ok(());
    }

    let provider = match judgments_path {
        Some(path) => FileProvider::load(path)?,
        None => {
            tracing::warn!("no judgments file given; every record will be fallback-defaulted");
            FileProvider::from_map(HashMap::new())
        }
    };

    let mut db = Database::open(db_path)?;
    let outcome = run_analysis(&mut db, &reviews, &provider, notes, persist)?;

    println!(
        "{}",
        render_summary(&outcome.records, config.report.critical_rating_threshold)
    );
    println!();
    println!("Reviews analyzed: {}", outcome.records.len());
    if outcome.provider_failures > 0 {
        println!("Judgments unavailable: {}", outcome.provider_failures);
    }
    if outcome.fallbacks.total() > 0 {
        println!(
            "Fallbacks applied: {} across {} records",
            outcome.fallbacks.total(),
            outcome.fallbacks.records_affected
        );
    }
    match outcome.run_id {
        Some(run_id) => println!("Saved as run {run_id}"),
        None => println!("Not persisted (--no-save)"),
    }

    Ok(())
}

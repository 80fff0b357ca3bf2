//! `revq trend` - per-run aggregates over a time window.

use std::path::Path;

use crate::cli::parse_category;
use crate::db::Database;
use crate::error::Error;
use crate::model::Urgency;
use crate::trend::trend;

pub fn run(db_path: &Path, days: i64, category: Option<&str>) -> Result<(), Error> {
    let db = Database::open(db_path)?;
    let category = category.map(parse_category).transpose()?;
    let result = trend(&db, days, category)?;

    match category {
        Some(cat) => println!("Trend over last {days} days (category: {cat})"),
        None => println!("Trend over last {days} days"),
    }

    if result.is_empty() {
        println!("No runs in window.");
        return Ok(());
    }

    println!(
        "{:>6}  {:19}  {:>7}  {:>6}  {:>8}  {:>4} {:>4} {:>4}",
        "run", "timestamp", "reviews", "rating", "priority", "high", "med", "low"
    );
    for point in &result.points {
        println!(
            "{:>6}  {:19}  {:>7}  {:>6.2}  {:>8.1}  {:>4} {:>4} {:>4}",
            point.run_id,
            point.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            point.review_count,
            point.avg_rating,
            point.avg_priority,
            point.urgencies.get(&Urgency::High).copied().unwrap_or(0),
            point.urgencies.get(&Urgency::Medium).copied().unwrap_or(0),
            point.urgencies.get(&Urgency::Low).copied().unwrap_or(0),
        );
    }
    Ok(())
}

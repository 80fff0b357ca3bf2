//! Export of record sequences for downstream consumers.
//!
//! JSON only. The serialized field set and order come straight from
//! `ReviewRecord`, which is the durable contract.

use std::path::Path;

use crate::error::Error;
use crate::model::ReviewRecord;

/// Write records as a pretty-printed JSON array, creating parent
/// directories as needed.
pub fn write_json(records: &[ReviewRecord], path: &Path) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(file, records)?;
    tracing::info!(count = records.len(), path = %path.display(), "exported records");
    Ok(())
}

/// Write a rendered text report, creating parent directories as needed.
pub fn write_report(report: &str, path: &Path) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, report)?;
    tracing::info!(path = %path.display(), "wrote report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Urgency};

    #[test]
    fn test_json_export_round_trips() {
        let records = vec![ReviewRecord {
            review_id: "rev_001".to_string(),
            category: Category::Payment,
            urgency: Urgency::High,
            rating: 1,
            thumbs_up: 0,
            summary: "App crashes after payment".to_string(),
            priority_score: 140,
        }];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("results.json");
        write_json(&records, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<ReviewRecord> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, records);
        assert!(content.contains("\"category\": \"payment\""));
    }

    #[test]
    fn test_report_written_to_nested_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("summary.txt");
        write_report("hello", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
    }
}

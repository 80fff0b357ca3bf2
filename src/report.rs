//! Aggregate statistics and plain-text reports.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::Serialize;

use crate::compare::{average, count_by, ComparisonResult};
use crate::model::{Category, ReviewRecord, Urgency};

const BANNER: &str =
    "======================================================================";
const RULE: &str =
    "----------------------------------------------------------------------";

/// Aggregate statistics over one record sequence.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryStats {
    pub total: usize,
    pub categories: BTreeMap<Category, i64>,
    pub urgencies: BTreeMap<Urgency, i64>,
    pub avg_rating: f64,
    pub min_rating: i64,
    pub max_rating: i64,
    pub avg_priority: f64,
    pub min_priority: i64,
    pub max_priority: i64,
    /// High urgency AND rating at or below the configured threshold.
    pub critical_count: usize,
}

impl SummaryStats {
    pub fn from_records(records: &[ReviewRecord], critical_rating_threshold: i64) -> Self {
        let critical_count = records
            .iter()
            .filter(|r| r.urgency == Urgency::High && r.rating <= critical_rating_threshold)
            .count();

        Self {
            total: records.len(),
            categories: count_by(records, |r| r.category),
            urgencies: count_by(records, |r| r.urgency),
            avg_rating: average(records, |r| r.rating),
            min_rating: records.iter().map(|r| r.rating).min().unwrap_or(0),
            max_rating: records.iter().map(|r| r.rating).max().unwrap_or(0),
            avg_priority: average(records, |r| r.priority_score),
            min_priority: records.iter().map(|r| r.priority_score).min().unwrap_or(0),
            max_priority: records.iter().map(|r| r.priority_score).max().unwrap_or(0),
            critical_count,
        }
    }

    /// Categories ranked by total priority score, highest first.
    pub fn top_categories_by_priority(records: &[ReviewRecord]) -> Vec<(Category, i64)> {
        let mut totals: BTreeMap<Category, i64> = BTreeMap::new();
        for record in records {
            *totals.entry(record.category).or_insert(0) += record.priority_score;
        }
        let mut ranked: Vec<(Category, i64)> = totals.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
    }
}

/// Render the analysis summary report.
pub fn render_summary(records: &[ReviewRecord], critical_rating_threshold: i64) -> String {
    let stats = SummaryStats::from_records(records, critical_rating_threshold);
    let mut lines = Vec::new();

    lines.push(BANNER.to_string());
    lines.push("REVIEW ANALYSIS SUMMARY REPORT".to_string());
    lines.push(BANNER.to_string());
    lines.push(format!("Generated: {}", Utc::now().format("%Y-%m-%d %H:%M:%S")));
    lines.push(String::new());

    lines.push("OVERVIEW".to_string());
    lines.push(RULE.to_string());
    lines.push(format!("Total Reviews Analyzed: {}", stats.total));
    lines.push(String::new());

    lines.push("RATING STATISTICS".to_string());
    lines.push(RULE.to_string());
    lines.push(format!("Average Rating: {:.2}/5.0", stats.avg_rating));
    lines.push(format!("Min Rating: {}/5.0", stats.min_rating));
    lines.push(format!("Max Rating: {}/5.0", stats.max_rating));
    lines.push(String::new());

    lines.push("PRIORITY SCORE STATISTICS".to_string());
    lines.push(RULE.to_string());
    lines.push(format!("Average Priority Score: {:.2}", stats.avg_priority));
    lines.push(format!("Min Priority Score: {}", stats.min_priority));
    lines.push(format!("Max Priority Score: {}", stats.max_priority));
    lines.push(String::new());

    lines.push("CATEGORY DISTRIBUTION".to_string());
    lines.push(RULE.to_string());
    for (category, count) in &stats.categories {
        let pct = percentage(*count, stats.total);
        lines.push(format!("  {:20}: {:3} ({:5.1}%)", category.as_str(), count, pct));
    }
    lines.push(String::new());

    lines.push("URGENCY DISTRIBUTION".to_string());
    lines.push(RULE.to_string());
    for (urgency, count) in &stats.urgencies {
        let pct = percentage(*count, stats.total);
        lines.push(format!("  {:20}: {:3} ({:5.1}%)", urgency.as_str(), count, pct));
    }
    lines.push(String::new());

    lines.push("TOP CATEGORIES BY TOTAL PRIORITY SCORE".to_string());
    lines.push(RULE.to_string());
    for (category, total_score) in SummaryStats::top_categories_by_priority(records)
        .into_iter()
        .take(5)
    {
        lines.push(format!("  {:20}: {}", category.as_str(), total_score));
    }
    lines.push(String::new());

    if stats.critical_count > 0 {
        lines.push("CRITICAL ISSUES (High Urgency + Low Rating)".to_string());
        lines.push(RULE.to_string());
        lines.push(format!("Count: {}", stats.critical_count));
        lines.push(String::new());
    }

    lines.push(BANNER.to_string());
    lines.join("\n")
}

/// Render the run comparison report.
pub fn render_comparison(comparison: &ComparisonResult) -> String {
    let mut lines = Vec::new();

    lines.push(BANNER.to_string());
    lines.push("ANALYSIS RUN COMPARISON".to_string());
    lines.push(BANNER.to_string());
    lines.push(format!("Baseline Run: {}", comparison.run_a));
    lines.push(format!("Comparand Run: {}", comparison.run_b));
    lines.push(String::new());

    lines.push("OVERVIEW".to_string());
    lines.push(RULE.to_string());
    lines.push(format!("Baseline Reviews: {}", comparison.total_a));
    lines.push(format!("Comparand Reviews: {}", comparison.total_b));
    lines.push(format!(
        "Average Priority Change: {:+.2}{}",
        comparison.priority.delta,
        pct_suffix(comparison.priority.pct_change)
    ));
    lines.push(format!(
        "Average Rating Change: {:+.2}{}",
        comparison.rating.delta,
        pct_suffix(comparison.rating.pct_change)
    ));
    lines.push(String::new());

    lines.push("CATEGORY CHANGES".to_string());
    lines.push(RULE.to_string());
    for (category, delta) in &comparison.categories {
        lines.push(format!(
            "  {:20}: {:3} -> {:3} ({:+4})",
            category.as_str(),
            delta.count_a,
            delta.count_b,
            delta.delta
        ));
    }
    lines.push(String::new());

    lines.push("URGENCY CHANGES".to_string());
    lines.push(RULE.to_string());
    for (urgency, delta) in &comparison.urgencies {
        lines.push(format!(
            "  {:20}: {:3} -> {:3} ({:+4})",
            urgency.as_str(),
            delta.count_a,
            delta.count_b,
            delta.delta
        ));
    }
    lines.push(String::new());
    lines.push(BANNER.to_string());
    lines.join("\n")
}

fn percentage(count: i64, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

fn pct_suffix(pct_change: Option<f64>) -> String {
    match pct_change {
        Some(pct) => format!(" ({pct:+.1}%)"),
        None => " (pct undefined)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, category: Category, urgency: Urgency, rating: i64, score: i64) -> ReviewRecord {
        ReviewRecord {
            review_id: id.to_string(),
            category,
            urgency,
            rating,
            thumbs_up: 0,
            summary: "s".to_string(),
            priority_score: score,
        }
    }

    fn sample() -> Vec<ReviewRecord> {
        vec![
            record("rev_001", Category::Bug, Urgency::High, 1, 140),
            record("rev_002", Category::Bug, Urgency::High, 4, 110),
            record("rev_003", Category::Praise, Urgency::Low, 5, 10),
        ]
    }

    #[test]
    fn test_summary_stats() {
        let stats = SummaryStats::from_records(&sample(), 2);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.categories[&Category::Bug], 2);
        assert_eq!(stats.urgencies[&Urgency::High], 2);
        assert_eq!(stats.min_rating, 1);
        assert_eq!(stats.max_rating, 5);
        assert_eq!(stats.max_priority, 140);
        // only rev_001 is high urgency with rating <= 2
        assert_eq!(stats.critical_count, 1);
    }

    #[test]
    fn test_stats_on_empty_records() {
        let stats = SummaryStats::from_records(&[], 2);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.avg_rating, 0.0);
        assert_eq!(stats.critical_count, 0);
    }

    #[test]
    fn test_top_categories_ranked_by_total_priority() {
        let ranked = SummaryStats::top_categories_by_priority(&sample());
        assert_eq!(ranked[0], (Category::Bug, 250));
        assert_eq!(ranked[1], (Category::Praise, 10));
    }

    #[test]
    fn test_summary_report_sections() {
        let report = render_summary(&sample(), 2);
        assert!(report.contains("REVIEW ANALYSIS SUMMARY REPORT"));
        assert!(report.contains("CATEGORY DISTRIBUTION"));
        assert!(report.contains("URGENCY DISTRIBUTION"));
        assert!(report.contains("CRITICAL ISSUES"));
        assert!(report.contains("Total Reviews Analyzed: 3"));
    }

    #[test]
    fn test_comparison_report_renders_undefined_pct() {
        use crate::compare::{AverageDelta, ValueDelta};
        use std::collections::BTreeMap;

        let mut categories = BTreeMap::new();
        categories.insert(
            Category::Bug,
            ValueDelta {
                count_a: 0,
                count_b: 2,
                delta: 2,
            },
        );
        let comparison = ComparisonResult {
            run_a: 1,
            run_b: 2,
            total_a: 0,
            total_b: 2,
            categories,
            urgencies: BTreeMap::new(),
            rating: AverageDelta {
                avg_a: 0.0,
                avg_b: 3.0,
                delta: 3.0,
                pct_change: None,
            },
            priority: AverageDelta {
                avg_a: 0.0,
                avg_b: 70.0,
                delta: 70.0,
                pct_change: None,
            },
        };

        let report = render_comparison(&comparison);
        assert!(report.contains("ANALYSIS RUN COMPARISON"));
        assert!(report.contains("pct undefined"));
    }
}

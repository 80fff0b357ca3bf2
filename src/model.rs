//! Core record types: reviews, judgments, runs.
//!
//! `Category` and `Urgency` are closed enums. Raw judgment payloads are
//! normalized into them at the validation boundary and arbitrary strings
//! never travel past it.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Review category, closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Bug,
    Payment,
    Ads,
    Performance,
    FeatureRequest,
    Praise,
    Complaint,
    Other,
}

impl Category {
    /// All categories, in report order.
    pub const ALL: [Category; 8] = [
        Category::Bug,
        Category::Payment,
        Category::Ads,
        Category::Performance,
        Category::FeatureRequest,
        Category::Praise,
        Category::Complaint,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bug => "bug",
            Category::Payment => "payment",
            Category::Ads => "ads",
            Category::Performance => "performance",
            Category::FeatureRequest => "feature_request",
            Category::Praise => "praise",
            Category::Complaint => "complaint",
            Category::Other => "other",
        }
    }
}

impl FromStr for Category {
    type Err = ();

    /// Case-insensitive; surrounding whitespace tolerated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bug" => Ok(Category::Bug),
            "payment" => Ok(Category::Payment),
            "ads" => Ok(Category::Ads),
            "performance" => Ok(Category::Performance),
            "feature_request" => Ok(Category::FeatureRequest),
            "praise" => Ok(Category::Praise),
            "complaint" => Ok(Category::Complaint),
            "other" => Ok(Category::Other),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review urgency, closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    /// All urgencies, lowest first.
    pub const ALL: [Urgency; 3] = [Urgency::Low, Urgency::Medium, Urgency::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }

    /// Scoring weight. Exhaustive over the closed set.
    pub fn weight(&self) -> i64 {
        match self {
            Urgency::High => 100,
            Urgency::Medium => 50,
            Urgency::Low => 10,
        }
    }
}

impl FromStr for Urgency {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Urgency::Low),
            "medium" => Ok(Urgency::Medium),
            "high" => Ok(Urgency::High),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One raw review as ingested, before enrichment.
///
/// `rating` and `thumbs_up` come from the review source and may be
/// missing; the validator defaults them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawReview {
    pub review_id: String,
    #[serde(default)]
    pub review_text: String,
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub thumbs_up: Option<i64>,
}

/// One validated, scored review.
///
/// Field order is the durable export contract:
/// `review_id, category, urgency, rating, thumbs_up, summary,
/// priority_score`. Reordering or renaming is a breaking change for
/// downstream consumers.
///
/// Transient until persisted; the store tags it with a run id at insert
/// time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub review_id: String,
    pub category: Category,
    pub urgency: Urgency,
    pub rating: i64,
    pub thumbs_up: i64,
    pub summary: String,
    pub priority_score: i64,
}

/// One persisted analysis run.
///
/// Immutable once written. `total_reviews` always equals the number of
/// records linked to the run (enforced transactionally by the store).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRun {
    pub run_id: i64,
    pub timestamp: DateTime<Utc>,
    pub total_reviews: i64,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for cat in Category::ALL {
            assert_eq!(cat.as_str().parse::<Category>(), Ok(cat));
        }
    }

    #[test]
    fn test_category_case_insensitive() {
        assert_eq!("Feature_Request".parse::<Category>(), Ok(Category::FeatureRequest));
        assert_eq!(" BUG ".parse::<Category>(), Ok(Category::Bug));
        assert!("crash".parse::<Category>().is_err());
    }

    #[test]
    fn test_urgency_weights() {
        assert_eq!(Urgency::High.weight(), 100);
        assert_eq!(Urgency::Medium.weight(), 50);
        assert_eq!(Urgency::Low.weight(), 10);
    }

    #[test]
    fn test_record_serializes_in_contract_order() {
        let record = ReviewRecord {
            review_id: "rev_001".to_string(),
            category: Category::Payment,
            urgency: Urgency::High,
            rating: 1,
            thumbs_up: 0,
            summary: "App crashes after payment".to_string(),
            priority_score: 140,
        };
        let json = serde_json::to_string(&record).unwrap();
        let fields = ["review_id", "category", "urgency", "rating", "thumbs_up", "summary", "priority_score"];
        let mut last = 0;
        for field in fields {
            let pos = json.find(&format!("\"{field}\"")).unwrap();
            assert!(pos > last, "field {field} out of order");
            last = pos;
        }
    }
}

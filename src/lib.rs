//! revq library.
//!
//! Review enrichment validation and historical analytics engine:
//! validates external judgments into closed types, scores them, and
//! accumulates runs in a SQLite store for comparison and trend queries.

pub mod cli;
pub mod compare;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod filter;
pub mod model;
pub mod pipeline;
pub mod provider;
pub mod report;
pub mod score;
pub mod trend;
pub mod validate;

pub use error::Error;

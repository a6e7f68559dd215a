//! Rule-based SEO scoring for blog posts.
//!
//! Metric functions in [`metrics`] score one aspect of a post each. The
//! engines in [`analyze`] run them in fixed tables and aggregate the results
//! with [`aggregate`]; [`unified`] composes the per-section scores into one
//! cached, history-tracked report.

pub mod aggregate;
pub mod analyze;
pub mod config;
pub mod content;
pub mod error;
pub mod metrics;
pub mod recommend;
pub mod report;
pub mod store;
pub mod text;
pub mod types;
pub mod unified;

//! # pmr_core - Post-Match Report Aggregation Engine
//!
//! Turns one match's raw event feed into the tables a post-match report is
//! drawn from.
//!
//! ## Features
//! - Lenient ingestion of the extraction document (bad fields degrade to defaults)
//! - Event normalization into 105m × 68m match-space, done exactly once
//! - Team, player and event statistics with explicit zero-denominator guards
//! - Pass networks, zonal control, momentum and xG timelines
//! - JSON API for hosts that exchange strings

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod ingest;
pub mod models;
pub mod pitch;
pub mod summary;

#[cfg(test)]
mod summary_tests;

// Re-export main API functions
pub use api::{pass_networks_json, summarize_match_json, SummaryResponse};
pub use config::AnalysisConfig;
pub use error::{CoreError, Result};

// Re-export the table and its rows
pub use events::{normalize, normalize_records, EventTable, PassFilter};
pub use models::{Event, EventType, MatchInfo, Player, Team};

// Re-export the summary
pub use summary::{MatchSummary, Side, SummaryStatistics, XgSummary, XgTotalSource};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;

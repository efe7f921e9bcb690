//! JSON in, JSON out entry points for hosts that only exchange strings.

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::summary::{MatchSummary, Side};
use crate::SCHEMA_VERSION;

#[derive(Debug, Serialize)]
pub struct SummaryResponse<'a> {
    pub schema_version: u8,
    #[serde(flatten)]
    pub summary: &'a MatchSummary,
}

/// Extraction document → serialized [`MatchSummary`].
///
/// Errors only when the input is not an extraction document. A missing event
/// feed still produces a response, with `success: false`.
pub fn summarize_match_json(extraction_json: &str, config: &AnalysisConfig) -> Result<String> {
    let summary = MatchSummary::from_json(extraction_json, config)?;
    Ok(serde_json::to_string(&SummaryResponse {
        schema_version: SCHEMA_VERSION,
        summary: &summary,
    })?)
}

/// Extraction document → serialized pass networks of both sides.
pub fn pass_networks_json(extraction_json: &str, config: &AnalysisConfig) -> Result<String> {
    let summary = MatchSummary::from_json(extraction_json, config)?;
    let networks = serde_json::json!({
        "schema_version": SCHEMA_VERSION,
        "success": summary.success,
        "home": summary.pass_network(Side::Home, &config.pass_network),
        "away": summary.pass_network(Side::Away, &config.pass_network),
    });
    Ok(networks.to_string())
}

//! Ingestion boundary: explicit schemas for the extraction collaborator's output.
//!
//! Nothing past this module touches untyped JSON except the qualifier bag,
//! which is decoded once by [`crate::events::qualifiers`].

pub mod lenient;
pub mod raw;

pub use raw::{
    DisplayValue, ExternalStats, ExternalXg, RawEvent, RawEventsFeed, RawExtraction,
    RawMatchCentre, RawMatchInfo, RawPlayer, RawPlayersFeed, RawTeam,
};

use crate::error::Result;

/// Parse an extraction document.
///
/// Fails only when the text is not JSON or the top level is not an object;
/// every nested inconsistency degrades to defaults.
pub fn parse_extraction(json: &str) -> Result<RawExtraction> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_non_json() {
        assert!(parse_extraction("not json").is_err());
    }

    #[test]
    fn test_parse_minimal_document() {
        let doc = parse_extraction(r#"{"match_id": 99}"#).unwrap();
        assert_eq!(doc.match_id, Some(99));
        assert!(doc.match_centre.is_none());
    }
}

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;

use crate::ingest::RawMatchInfo;

/// Match metadata carried through to the summary.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchInfo {
    pub match_id: Option<i64>,
    pub score: Option<String>,
    pub ft_score: Option<String>,
    pub ht_score: Option<String>,
    pub venue: Option<String>,
    pub referee: Option<String>,
    pub attendance: Option<i64>,
    /// Kick-off as delivered by the source.
    pub date: Option<String>,
    /// Kick-off parsed, when the source format is recognised.
    pub start_time: Option<NaiveDateTime>,
    pub competition: Value,
    pub season: Value,
}

impl MatchInfo {
    pub fn from_raw(match_id: Option<i64>, raw: &RawMatchInfo) -> Self {
        let referee = match &raw.referee {
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => map.get("name").and_then(Value::as_str).map(str::to_string),
            _ => None,
        };
        Self {
            match_id,
            score: raw.score.clone(),
            ft_score: raw.ft_score.clone(),
            ht_score: raw.ht_score.clone(),
            venue: raw.venue.clone(),
            referee,
            attendance: raw.attendance,
            date: raw.date.clone(),
            start_time: raw.date.as_deref().and_then(parse_start_time),
            competition: raw.competition.clone(),
            season: raw.season.clone(),
        }
    }

    /// Final score as (home, away), from `ft_score` or `score`.
    pub fn final_score(&self) -> Option<(u32, u32)> {
        self.ft_score
            .as_deref()
            .and_then(parse_score)
            .or_else(|| self.score.as_deref().and_then(parse_score))
    }
}

/// Parse "2 : 1" / "2-1" style score strings.
pub fn parse_score(text: &str) -> Option<(u32, u32)> {
    let (home, away) = text.split_once(':').or_else(|| text.split_once('-'))?;
    Some((home.trim().parse().ok()?, away.trim().parse().ok()?))
}

fn parse_start_time(text: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%m/%d/%Y %H:%M:%S"];
    let text = text.trim().trim_end_matches('Z');
    let text = text.split_once('.').map_or(text, |(head, _)| head);
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_raw() {
        let raw: RawMatchInfo = serde_json::from_value(json!({
            "score": "2 : 1",
            "htScore": "1 : 0",
            "venueName": "Anfield",
            "referee": {"name": "M. Oliver"},
            "attendance": "53000",
            "startDate": "2024-08-17T12:30:00"
        }))
        .unwrap();
        let info = MatchInfo::from_raw(Some(7), &raw);
        assert_eq!(info.venue.as_deref(), Some("Anfield"));
        assert_eq!(info.referee.as_deref(), Some("M. Oliver"));
        assert_eq!(info.attendance, Some(53000));
        assert_eq!(info.final_score(), Some((2, 1)));
        let kickoff = info.start_time.unwrap();
        assert_eq!(kickoff.format("%H:%M").to_string(), "12:30");
    }

    #[test]
    fn test_parse_score_variants() {
        assert_eq!(parse_score("0-0"), Some((0, 0)));
        assert_eq!(parse_score(" 3 : 2 "), Some((3, 2)));
        assert_eq!(parse_score("vs"), None);
    }

    #[test]
    fn test_unrecognised_date_kept_raw() {
        let raw = RawMatchInfo {
            date: Some("Saturday".to_string()),
            ..RawMatchInfo::default()
        };
        let info = MatchInfo::from_raw(None, &raw);
        assert_eq!(info.date.as_deref(), Some("Saturday"));
        assert!(info.start_time.is_none());
        assert!(parse_start_time("2024-08-17").is_some());
        assert!(parse_start_time("2024-08-17T12:30:00.000Z").is_some());
    }
}

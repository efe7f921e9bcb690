//! Wire shapes of the extraction result.
//!
//! These structs mirror what the scraping collaborator hands over and are
//! only read by the normalizer and the roster/match-info converters. Field
//! names accept both the extractor's snake_case and the source's camelCase.

use serde::Deserialize;
use serde_json::Value;

use super::lenient;

/// Top-level extraction document (one match).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawExtraction {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub match_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub match_centre: Option<RawMatchCentre>,
    /// Secondary stats source (optional xG totals).
    #[serde(default, alias = "fotmob", deserialize_with = "lenient::opt_struct")]
    pub external: Option<ExternalStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMatchCentre {
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub match_info: Option<RawMatchInfo>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub home_team: Option<RawTeam>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub away_team: Option<RawTeam>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub events: Option<RawEventsFeed>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub players: Option<RawPlayersFeed>,
}

/// The event feed, either grouped under `all_events` or as a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawEventsFeed {
    Flat(Vec<Value>),
    Grouped { all_events: Option<Vec<Value>> },
}

impl RawEventsFeed {
    /// Event records, or `None` when the feed carries no events array at all.
    pub fn records(&self) -> Option<&[Value]> {
        match self {
            RawEventsFeed::Flat(records) => Some(records),
            RawEventsFeed::Grouped { all_events } => all_events.as_deref(),
        }
    }
}

/// `{ "displayName": ..., "value": ... }` pair used for type, outcome and period.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayValue {
    #[serde(default, rename = "displayName", deserialize_with = "lenient::opt_string")]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub value: Option<i64>,
}

/// One raw event record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEvent {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub id: Option<i64>,
    #[serde(default, rename = "eventId", alias = "event_id", deserialize_with = "lenient::opt_i64")]
    pub event_id: Option<i64>,
    #[serde(default, rename = "teamId", alias = "team_id", deserialize_with = "lenient::opt_i64")]
    pub team_id: Option<i64>,
    #[serde(default, rename = "playerId", alias = "player_id", deserialize_with = "lenient::opt_i64")]
    pub player_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub minute: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub second: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub x: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub y: Option<f64>,
    #[serde(default, rename = "endX", alias = "end_x", deserialize_with = "lenient::opt_f64")]
    pub end_x: Option<f64>,
    #[serde(default, rename = "endY", alias = "end_y", deserialize_with = "lenient::opt_f64")]
    pub end_y: Option<f64>,
    #[serde(default, rename = "type", deserialize_with = "lenient::opt_struct")]
    pub event_type: Option<DisplayValue>,
    #[serde(default, rename = "outcomeType", deserialize_with = "lenient::opt_struct")]
    pub outcome_type: Option<DisplayValue>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub period: Option<DisplayValue>,
    /// Left as raw JSON; the qualifier decoder owns its tolerance.
    #[serde(default)]
    pub qualifiers: Value,
}

impl RawEvent {
    const ALIASES: &'static [(&'static str, &'static str)] = &[
        ("eventId", "event_id"),
        ("teamId", "team_id"),
        ("playerId", "player_id"),
        ("endX", "end_x"),
        ("endY", "end_y"),
    ];

    /// Parse one record. Anything that is not an event object becomes an
    /// all-default record so the table keeps one row per input record.
    pub fn from_value(value: &Value) -> (Self, bool) {
        if !value.is_object() {
            return (Self::default(), false);
        }
        let value = lenient::resolve_aliases(value, Self::ALIASES);
        match RawEvent::deserialize(&*value) {
            Ok(event) => (event, true),
            Err(_) => (Self::default(), false),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlayersFeed {
    #[serde(default)]
    pub all_players: Vec<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTeam {
    #[serde(default, alias = "teamId", deserialize_with = "lenient::opt_i64")]
    pub team_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, alias = "countryName", deserialize_with = "lenient::opt_string")]
    pub country_name: Option<String>,
    #[serde(default, alias = "managerName", deserialize_with = "lenient::opt_string")]
    pub manager: Option<String>,
    /// A plain string, or the source's list of formation objects.
    #[serde(default, alias = "formations")]
    pub formation: Value,
    #[serde(default)]
    pub players: Value,
    #[serde(default)]
    pub stats: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRatings {
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub overall: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSubstituteInfo {
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub subon_minute: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub suboff_minute: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlayer {
    #[serde(default, alias = "playerId", deserialize_with = "lenient::opt_i64")]
    pub player_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, alias = "shirtNo", deserialize_with = "lenient::opt_i64")]
    pub shirt_no: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub position: Option<String>,
    #[serde(default, alias = "teamId", deserialize_with = "lenient::opt_i64")]
    pub team_id: Option<i64>,
    #[serde(default, alias = "isFirstEleven", deserialize_with = "lenient::opt_bool")]
    pub is_first_eleven: Option<bool>,
    #[serde(default, alias = "isCaptain", deserialize_with = "lenient::opt_bool")]
    pub is_captain: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub ratings: Option<RawRatings>,
    #[serde(default, alias = "subOnMin", deserialize_with = "lenient::opt_f64")]
    pub sub_on_minute: Option<f64>,
    #[serde(default, alias = "subOffMin", deserialize_with = "lenient::opt_f64")]
    pub sub_off_minute: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub substitute_info: Option<RawSubstituteInfo>,
}

impl RawPlayer {
    const ALIASES: &'static [(&'static str, &'static str)] = &[
        ("player_id", "playerId"),
        ("shirt_no", "shirtNo"),
        ("team_id", "teamId"),
        ("is_first_eleven", "isFirstEleven"),
        ("is_captain", "isCaptain"),
        ("sub_on_minute", "subOnMin"),
        ("sub_off_minute", "subOffMin"),
    ];

    /// Parse one roster record; `None` when it is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        let value = lenient::resolve_aliases(value, Self::ALIASES);
        RawPlayer::deserialize(&*value).ok()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMatchInfo {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub score: Option<String>,
    #[serde(default, alias = "ftScore", deserialize_with = "lenient::opt_string")]
    pub ft_score: Option<String>,
    #[serde(default, alias = "htScore", deserialize_with = "lenient::opt_string")]
    pub ht_score: Option<String>,
    #[serde(default, alias = "venueName", deserialize_with = "lenient::opt_string")]
    pub venue: Option<String>,
    #[serde(default, alias = "startDate", deserialize_with = "lenient::opt_string")]
    pub date: Option<String>,
    /// A plain name, or `{ "name": ... }`.
    #[serde(default)]
    pub referee: Value,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub attendance: Option<i64>,
    #[serde(default)]
    pub competition: Value,
    #[serde(default)]
    pub season: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalXg {
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub home_xg: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub away_xg: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalStats {
    #[serde(default, deserialize_with = "lenient::opt_bool")]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "lenient::opt_struct")]
    pub xg: Option<ExternalXg>,
    #[serde(default)]
    pub possession: Value,
}

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::event::{PlayerId, TeamId};
use crate::ingest::{RawPlayer, RawTeam};

/// One rostered player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub player_id: PlayerId,
    pub name: String,
    pub shirt_number: Option<i64>,
    pub position: Option<String>,
    pub team_id: Option<TeamId>,
    pub is_starting_eleven: bool,
    pub is_captain: bool,
    pub sub_on_minute: Option<f64>,
    pub sub_off_minute: Option<f64>,
    pub rating: Option<f64>,
}

impl Player {
    /// Convert a roster record. Records without a player id are unusable.
    pub fn from_raw(raw: RawPlayer) -> Option<Self> {
        let player_id = raw.player_id?;
        let (sub_on, sub_off) = match &raw.substitute_info {
            Some(info) => (
                info.subon_minute.or(raw.sub_on_minute),
                info.suboff_minute.or(raw.sub_off_minute),
            ),
            None => (raw.sub_on_minute, raw.sub_off_minute),
        };
        Some(Self {
            player_id,
            name: raw.name.unwrap_or_default(),
            shirt_number: raw.shirt_no,
            position: raw.position,
            team_id: raw.team_id,
            is_starting_eleven: raw.is_first_eleven.unwrap_or(false),
            is_captain: raw.is_captain.unwrap_or(false),
            sub_on_minute: sub_on,
            sub_off_minute: sub_off,
            rating: raw.ratings.and_then(|r| r.overall).or(raw.rating),
        })
    }

    pub fn is_substitute(&self) -> bool {
        !self.is_starting_eleven
    }
}

/// One side of the match with its ordered roster.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Team {
    pub team_id: Option<TeamId>,
    pub name: String,
    pub country: Option<String>,
    pub manager: Option<String>,
    pub formation: Option<String>,
    pub players: Vec<Player>,
    /// Source stat blob, passed through untouched.
    pub stats: Value,
}

impl Team {
    /// Build a team from its raw record.
    ///
    /// The roster comes from the match-wide player feed filtered by team id;
    /// when that yields nobody, the team record's own `players` list is used.
    pub fn from_raw(raw: &RawTeam, all_players: &[Value]) -> Self {
        let team_id = raw.team_id;

        let mut players: Vec<Player> = match team_id {
            Some(id) => parse_players(all_players)
                .into_iter()
                .filter(|p| p.team_id == Some(id))
                .collect(),
            None => Vec::new(),
        };

        if players.is_empty() {
            if let Value::Array(own) = &raw.players {
                players = parse_players(own);
                for player in &mut players {
                    if player.team_id.is_none() {
                        player.team_id = team_id;
                    }
                }
            }
        }

        Self {
            team_id,
            name: raw.name.clone().unwrap_or_default(),
            country: raw.country_name.clone(),
            manager: raw.manager.clone(),
            formation: formation_name(&raw.formation),
            players,
            stats: raw.stats.clone(),
        }
    }

    pub fn player(&self, player_id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.player_id == player_id)
    }

    pub fn starting_xi(&self) -> impl Iterator<Item = &Player> + '_ {
        self.players.iter().filter(|p| p.is_starting_eleven)
    }

    pub fn substitutes(&self) -> impl Iterator<Item = &Player> + '_ {
        self.players.iter().filter(|p| p.is_substitute())
    }
}

fn parse_players(records: &[Value]) -> Vec<Player> {
    let mut skipped = 0usize;
    let players: Vec<Player> = records
        .iter()
        .filter_map(|value| {
            let player = RawPlayer::from_value(value).and_then(Player::from_raw);
            if player.is_none() {
                skipped += 1;
            }
            player
        })
        .collect();
    if skipped > 0 {
        warn!(skipped, "Roster records without a usable player id");
    }
    players
}

/// Formation as a plain string, or the first `formationName` of the
/// source's formation list.
fn formation_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => items.first().and_then(formation_name),
        Value::Object(map) => map
            .get("formationName")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_team(value: Value) -> RawTeam {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_roster_from_player_feed() {
        let team = raw_team(json!({"team_id": 26, "name": "Liverpool", "formation": "4-3-3"}));
        let feed = vec![
            json!({"player_id": 1, "name": "A", "team_id": 26, "is_first_eleven": true,
                   "ratings": {"overall": 7.4}}),
            json!({"player_id": 2, "name": "B", "team_id": 13}),
            json!({"player_id": 3, "name": "C", "team_id": 26,
                   "substitute_info": {"subon_minute": 61}}),
            json!({"name": "no id", "team_id": 26}),
        ];
        let team = Team::from_raw(&team, &feed);
        assert_eq!(team.formation.as_deref(), Some("4-3-3"));
        assert_eq!(team.players.len(), 2);
        assert_eq!(team.starting_xi().count(), 1);
        assert_eq!(team.players[0].rating, Some(7.4));
        let sub = team.substitutes().next().unwrap();
        assert_eq!(sub.player_id, 3);
        assert_eq!(sub.sub_on_minute, Some(61.0));
    }

    #[test]
    fn test_roster_falls_back_to_team_players() {
        let team = raw_team(json!({
            "teamId": 13,
            "name": "Arsenal",
            "formations": [{"formationName": "4231"}, {"formationName": "433"}],
            "players": [
                {"playerId": 9, "name": "Striker", "shirtNo": 9, "isFirstEleven": true,
                 "rating": 6.8, "subOffMin": 80}
            ]
        }));
        let team = Team::from_raw(&team, &[]);
        assert_eq!(team.formation.as_deref(), Some("4231"));
        let p = team.player(9).unwrap();
        assert_eq!(p.team_id, Some(13));
        assert_eq!(p.shirt_number, Some(9));
        assert!(p.is_starting_eleven);
        assert_eq!(p.rating, Some(6.8));
        assert_eq!(p.sub_off_minute, Some(80.0));
    }

    #[test]
    fn test_missing_formation() {
        let team = Team::from_raw(&raw_team(json!({"team_id": 1, "formation": 4})), &[]);
        assert!(team.formation.is_none());
        assert!(team.players.is_empty());
    }
}

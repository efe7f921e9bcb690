//! Normalized event table and its read-only queries.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Event, EventType, Outcome, TeamId};
use crate::pitch::PitchZone;

/// The normalized event table of one match, in feed order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct EventTable {
    events: Vec<Event>,
}

/// Filter for [`EventTable::passes`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PassFilter {
    pub team_id: Option<TeamId>,
    pub successful_only: bool,
    pub progressive_only: bool,
}

impl EventTable {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// Events attributed to `team_id`.
    pub fn for_team(&self, team_id: TeamId) -> impl Iterator<Item = &Event> + '_ {
        self.events.iter().filter(move |e| e.belongs_to(team_id))
    }

    /// Events attributed to `team_id`, or every event when `None`.
    fn scoped(&self, team_id: Option<TeamId>) -> impl Iterator<Item = &Event> + '_ {
        self.events
            .iter()
            .filter(move |e| team_id.map_or(true, |t| e.belongs_to(t)))
    }

    pub fn passes(&self, filter: PassFilter) -> Vec<&Event> {
        self.scoped(filter.team_id)
            .filter(|e| e.is_pass())
            .filter(|e| !filter.successful_only || e.is_successful())
            .filter(|e| !filter.progressive_only || e.is_progressive)
            .collect()
    }

    pub fn shots(&self, team_id: Option<TeamId>) -> Vec<&Event> {
        self.scoped(team_id).filter(|e| e.is_shot()).collect()
    }

    pub fn defensive_actions(&self, team_id: Option<TeamId>) -> Vec<&Event> {
        self.scoped(team_id)
            .filter(|e| e.event_type.is_defensive_action())
            .collect()
    }

    pub fn carries(&self, team_id: Option<TeamId>) -> Vec<&Event> {
        self.scoped(team_id)
            .filter(|e| e.event_type.is_carry())
            .collect()
    }

    /// Goals, substitutions and cards, ordered by cumulative minute.
    ///
    /// Ties keep feed order.
    pub fn key_moments(&self) -> Vec<&Event> {
        let mut moments: Vec<&Event> = self
            .events
            .iter()
            .filter(|e| e.event_type.is_key_moment())
            .collect();
        moments.sort_by(|a, b| a.cumulative_minute.total_cmp(&b.cumulative_minute));
        moments
    }

    /// Events whose origin lies in `zone`. Events without coordinates never match.
    pub fn events_by_zone(&self, zone: PitchZone, team_id: Option<TeamId>) -> Vec<&Event> {
        self.scoped(team_id)
            .filter(|e| e.position().map_or(false, |(x, y)| zone.contains(x, y)))
            .collect()
    }

    pub fn statistics(&self) -> EventStatistics {
        let mut stats = EventStatistics {
            total_events: self.events.len(),
            ..EventStatistics::default()
        };

        for event in &self.events {
            *stats
                .by_type
                .entry(event.event_type.as_str().to_string())
                .or_insert(0) += 1;
            *stats.by_period.entry(event.period.value()).or_insert(0) += 1;
            if let Some(team_id) = event.team_id {
                *stats.by_team.entry(team_id).or_insert(0) += 1;
            }
            if event.outcome == Some(Outcome::Successful) {
                stats.successful_events += 1;
            }
            if event.is_key_pass {
                stats.key_passes += 1;
            }
            if event.is_assist {
                stats.assists += 1;
            }
            if event.is_goal {
                stats.goal_qualifiers += 1;
            }
            stats.total_xg += event.xg;
        }
        stats
    }

    /// Number of events of one type.
    pub fn count_type(&self, event_type: &EventType) -> usize {
        self.events
            .iter()
            .filter(|e| &e.event_type == event_type)
            .count()
    }
}

impl<'a> IntoIterator for &'a EventTable {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// Whole-table event counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventStatistics {
    pub total_events: usize,
    /// Keyed by type display name; unknown types under `""`.
    pub by_type: BTreeMap<String, usize>,
    /// Keyed by numeric period value.
    pub by_period: BTreeMap<i64, usize>,
    pub by_team: BTreeMap<TeamId, usize>,
    pub successful_events: usize,
    pub key_passes: usize,
    pub assists: usize,
    /// Events carrying the `Goal` qualifier (not the `Goal` event type).
    pub goal_qualifiers: usize,
    /// Sum of observed per-event xG.
    pub total_xg: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::normalizer::normalize_records;
    use serde_json::{json, Value};

    fn ev(team: i64, player: i64, kind: &str, x: f64, y: f64) -> Value {
        json!({
            "teamId": team,
            "playerId": player,
            "type": {"displayName": kind},
            "outcomeType": {"displayName": "Successful"},
            "x": x,
            "y": y,
            "qualifiers": []
        })
    }

    fn at(mut v: Value, period: i64, minute: i64) -> Value {
        v["period"] = json!({"value": period});
        v["minute"] = json!(minute);
        v
    }

    #[test]
    fn test_pass_filters() {
        let mut progressive = ev(1, 10, "Pass", 10.0, 50.0);
        progressive["endX"] = json!(40.0);
        progressive["endY"] = json!(50.0);
        let mut failed = ev(1, 11, "Pass", 10.0, 50.0);
        failed["outcomeType"] = json!({"displayName": "Unsuccessful"});
        let table = normalize_records(&[progressive, failed, ev(2, 20, "Pass", 50.0, 50.0)]);

        assert_eq!(table.passes(PassFilter::default()).len(), 3);
        let team_one = PassFilter {
            team_id: Some(1),
            ..PassFilter::default()
        };
        assert_eq!(table.passes(team_one).len(), 2);
        assert_eq!(
            table
                .passes(PassFilter {
                    successful_only: true,
                    ..team_one
                })
                .len(),
            1
        );
        let prog = table.passes(PassFilter {
            progressive_only: true,
            ..team_one
        });
        assert_eq!(prog.len(), 1);
        assert_eq!(prog[0].player_id, Some(10));
    }

    #[test]
    fn test_type_queries() {
        let table = normalize_records(&[
            ev(1, 10, "Tackle", 20.0, 20.0),
            ev(1, 10, "Challenge", 20.0, 20.0),
            ev(2, 20, "Interception", 20.0, 20.0),
            ev(1, 10, "TakeOn", 20.0, 20.0),
            ev(1, 10, "Shot", 90.0, 50.0),
            ev(2, 20, "Goal", 95.0, 50.0),
            ev(2, 20, "Aerial", 50.0, 50.0),
        ]);
        assert_eq!(table.defensive_actions(Some(1)).len(), 2);
        assert_eq!(table.defensive_actions(None).len(), 3);
        assert_eq!(table.carries(None).len(), 1);
        assert_eq!(table.shots(None).len(), 2);
        assert_eq!(table.shots(Some(2)).len(), 1);
        assert_eq!(table.count_type(&EventType::Aerial), 1);
    }

    #[test]
    fn test_key_moments_sorted_stably() {
        let table = normalize_records(&[
            at(ev(1, 10, "Goal", 95.0, 50.0), 2, 10),
            at(ev(1, 11, "SubstitutionOn", 0.0, 0.0), 1, 30),
            at(ev(2, 20, "Card", 50.0, 50.0), 2, 10),
            at(ev(1, 12, "Pass", 50.0, 50.0), 1, 1),
        ]);
        let moments: Vec<usize> = table.key_moments().iter().map(|e| e.index).collect();
        assert_eq!(moments, vec![1, 0, 2]);
    }

    #[test]
    fn test_events_by_zone() {
        // raw 75,50 -> 78.75m, 34m: attacking third and zone 14
        let table = normalize_records(&[
            ev(1, 10, "Pass", 75.0, 50.0),
            ev(1, 10, "Pass", 20.0, 50.0),
            ev(2, 20, "Pass", 95.0, 50.0),
            json!({"teamId": 1, "type": {"displayName": "Pass"}}),
        ]);
        assert_eq!(table.events_by_zone(PitchZone::Zone14, Some(1)).len(), 1);
        assert_eq!(table.events_by_zone(PitchZone::AttackingThird, None).len(), 2);
        assert_eq!(table.events_by_zone(PitchZone::DefensiveThird, None).len(), 1);
        assert_eq!(table.events_by_zone(PitchZone::PenaltyBox, Some(2)).len(), 1);
    }

    #[test]
    fn test_statistics() {
        let mut key = ev(1, 10, "Pass", 50.0, 50.0);
        key["qualifiers"] = json!([
            {"type": {"displayName": "KeyPass"}},
            {"type": {"displayName": "Assist"}}
        ]);
        let mut shot = ev(1, 11, "Goal", 95.0, 50.0);
        shot["qualifiers"] = json!([{"type": {"displayName": "xG"}, "value": 0.4}]);
        let table = normalize_records(&[key, shot, json!({"x": 1})]);

        let stats = table.statistics();
        assert_eq!(stats.total_events, 3);
        assert_eq!(stats.by_type.get("Pass"), Some(&1));
        assert_eq!(stats.by_type.get(""), Some(&1));
        assert_eq!(stats.by_period.get(&1), Some(&3));
        assert_eq!(stats.by_team.get(&1), Some(&2));
        assert_eq!(stats.successful_events, 2);
        assert_eq!(stats.key_passes, 1);
        assert_eq!(stats.assists, 1);
        assert!((stats.total_xg - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_empty_table_statistics() {
        let stats = EventTable::default().statistics();
        assert_eq!(stats.total_events, 0);
        assert!(stats.by_type.is_empty());
        assert_eq!(stats.total_xg, 0.0);
    }
}

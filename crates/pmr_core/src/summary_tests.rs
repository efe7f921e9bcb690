//! End-to-end tests: extraction document → [`MatchSummary`].

use serde_json::{json, Value};

use crate::analysis::{RankMetric, ZoneLabel};
use crate::config::AnalysisConfig;
use crate::error::CoreError;
use crate::ingest::parse_extraction;
use crate::models::EventType;
use crate::summary::{MatchSummary, Side, XgTotalSource};

fn player(id: i64, team: i64, name: &str, starter: bool) -> Value {
    json!({
        "player_id": id,
        "team_id": team,
        "name": name,
        "shirt_no": id % 100,
        "position": if starter { "MC" } else { "Sub" },
        "is_first_eleven": starter,
        "ratings": {"overall": 6.0 + (id % 10) as f64 / 10.0},
    })
}

fn event(team: i64, player: i64, kind: &str, minute: f64, x: f64, y: f64) -> Value {
    json!({
        "teamId": team,
        "playerId": player,
        "minute": minute,
        "second": 0,
        "type": {"displayName": kind},
        "outcomeType": {"displayName": "Successful"},
        "period": {"displayName": "FirstHalf", "value": 1},
        "x": x,
        "y": y,
    })
}

fn events() -> Vec<Value> {
    let mut goal = event(1, 11, "Goal", 30.0, 94.0, 50.0);
    goal["qualifiers"] = json!([
        {"type": {"displayName": "RightFoot"}},
        {"type": {"displayName": "xG"}, "value": 0.4}
    ]);
    let mut card = event(2, 22, "Card", 40.0, 50.0, 50.0);
    card["qualifiers"] = json!([{"type": {"displayName": "YellowCard"}}]);
    vec![
        event(1, 11, "Pass", 1.0, 30.0, 50.0),
        event(1, 12, "Pass", 2.0, 45.0, 40.0),
        event(1, 11, "Pass", 3.0, 50.0, 55.0),
        event(1, 12, "Pass", 4.0, 60.0, 45.0),
        event(2, 21, "Interception", 5.0, 40.0, 50.0),
        event(2, 22, "Pass", 6.0, 45.0, 50.0),
        event(2, 21, "Pass", 7.0, 55.0, 50.0),
        event(1, 11, "Pass", 8.0, 35.0, 50.0),
        event(1, 12, "Tackle", 9.0, 30.0, 50.0),
        goal,
        card,
        event(1, 13, "Pass", 50.0, 70.0, 50.0),
    ]
}

fn document(events: Value) -> Value {
    json!({
        "match_id": 1234,
        "match_centre": {
            "success": true,
            "match_info": {"score": "1 : 0", "venue": "Home Ground", "startDate": "2024-03-10T15:00:00Z"},
            "home_team": {"team_id": 1, "name": "Home FC", "manager": "A", "formation": "4-3-3"},
            "away_team": {"teamId": 2, "name": "Away FC", "formations": [{"formationName": "4-4-2"}]},
            "events": {"all_events": events},
            "players": {"all_players": [
                player(11, 1, "Striker", true),
                player(12, 1, "Midfielder", true),
                player(13, 1, "Sub", false),
                player(21, 2, "Defender", true),
                player(22, 2, "Keeper", true),
            ]},
        },
    })
}

fn summary_of(doc: Value) -> MatchSummary {
    MatchSummary::from_json(&doc.to_string(), &AnalysisConfig::default()).unwrap()
}

#[test]
fn test_full_summary() {
    let summary = summary_of(document(Value::Array(events())));
    assert!(summary.success);
    assert_eq!(summary.match_id, Some(1234));
    assert_eq!(summary.match_info.final_score(), Some((1, 0)));
    assert!(summary.match_info.start_time.is_some());
    assert_eq!(summary.home_team.formation.as_deref(), Some("4-3-3"));
    assert_eq!(summary.away_team.formation.as_deref(), Some("4-4-2"));
    assert_eq!(summary.events.len(), 12);

    let stats = summary.statistics.as_ref().unwrap();
    assert_eq!(stats.match_stats.home.goals, 1);
    assert_eq!(stats.match_stats.home.passes, 6);
    assert_eq!(stats.match_stats.away.yellow_cards, 1);
    assert_eq!(stats.event_statistics.total_events, 12);
    assert!((stats.possession.home + stats.possession.away - 100.0).abs() < 1e-9);
    assert!((stats.possession.home - 200.0 / 3.0).abs() < 1e-9);

    assert_eq!(stats.xg.source, XgTotalSource::Observed);
    assert!((stats.xg.home - 0.4).abs() < 1e-12);
    assert_eq!(stats.shot_xg.len(), 1);
    assert_eq!(stats.momentum.points.len(), 10);
    assert!(stats.momentum.smoothed);
}

#[test]
fn test_roster_views() {
    let summary = summary_of(document(Value::Array(events())));
    assert_eq!(summary.starting_xi(Side::Home).len(), 2);
    assert_eq!(summary.substitutes(Side::Home).len(), 1);
    assert_eq!(summary.starting_xi(Side::Away).len(), 2);
}

#[test]
fn test_pass_network_from_summary() {
    let summary = summary_of(document(Value::Array(events())));
    let config = AnalysisConfig::full_squad();
    let net = summary.pass_network(Side::Home, &config.pass_network);
    // 11->12, 12->11, 11->12, 12->11 (other team rows skipped), 11->12
    let edge = net.connection(11, 12).unwrap();
    assert_eq!(edge.pass_count, 5);
    assert_eq!(net.node(11).unwrap().name.as_deref(), Some("Striker"));

    // player 13 is not a starter
    let starters = summary.pass_network(Side::Home, &AnalysisConfig::default().pass_network);
    assert!(starters.node(13).is_none());
    assert!(net.node(13).is_some());
}

#[test]
fn test_key_moments_and_rankings() {
    let summary = summary_of(document(Value::Array(events())));
    let moments: Vec<EventType> = summary
        .key_moments()
        .iter()
        .map(|e| e.event_type.clone())
        .collect();
    assert_eq!(moments, vec![EventType::Goal, EventType::Card]);

    let top = summary.top_performers(RankMetric::PassesCompleted, Some(Side::Home), 2);
    let ids: Vec<i64> = top.iter().map(|r| r.player_id).collect();
    assert_eq!(ids, vec![11, 12]);

    let rated = summary.top_performers(RankMetric::Rating, None, 1);
    assert_eq!(rated[0].player_id, 13);
}

#[test]
fn test_zones_and_positions() {
    let summary = summary_of(document(Value::Array(events())));
    let zones = summary.zones(&AnalysisConfig::default().zonal).unwrap();
    assert_eq!(zones.cells.len(), 5);
    assert!(zones
        .cells
        .iter()
        .flatten()
        .all(|c| c.home_touches + c.away_touches > 0 || c.label == ZoneLabel::Contested));

    let positions = summary.player_positions(Side::Home, true);
    assert_eq!(positions.len(), 2);
    assert_eq!(summary.player_positions(Side::Home, false).len(), 3);

    let timeline = summary.xg_timeline(Side::Home);
    assert_eq!(timeline.len(), 1);
    assert!(summary.xg_timeline(Side::Away).is_empty());
}

#[test]
fn test_external_xg_takes_precedence() {
    let mut doc = document(Value::Array(events()));
    doc["fotmob"] = json!({"success": true, "xg": {"home_xg": 1.7, "away_xg": "0.9"}});
    let stats = summary_of(doc).statistics.unwrap();
    assert_eq!(stats.xg.source, XgTotalSource::External);
    assert_eq!((stats.xg.home, stats.xg.away), (1.7, 0.9));
    // per-shot values are still available for shot maps
    assert_eq!(stats.shot_xg.len(), 1);

    let mut failed = document(Value::Array(events()));
    failed["external"] = json!({"success": false, "xg": {"home_xg": 1.7}});
    assert_eq!(
        summary_of(failed).statistics.unwrap().xg.source,
        XgTotalSource::Observed
    );
}

#[test]
fn test_heuristic_xg_when_feed_has_none() {
    let doc = document(json!([event(2, 21, "SavedShot", 10.0, 90.0, 50.0)]));
    let stats = summary_of(doc).statistics.unwrap();
    assert_eq!(stats.xg.source, XgTotalSource::Heuristic);
    assert_eq!(stats.xg.home, 0.0);
    assert!(stats.xg.away > 0.0);
}

#[test]
fn test_missing_event_feed() {
    let mut doc = document(json!([]));
    doc["match_centre"]
        .as_object_mut()
        .unwrap()
        .remove("events");
    let summary = summary_of(doc.clone());
    assert!(!summary.success);
    assert!(summary.statistics.is_none());
    assert!(summary.events.is_empty());
    assert_eq!(summary.home_team.name, "Home FC");

    let raw = parse_extraction(&doc.to_string()).unwrap();
    assert!(matches!(
        MatchSummary::try_from_extraction(&raw, &AnalysisConfig::default()),
        Err(CoreError::MissingEventFeed)
    ));

    doc["match_centre"]["events"] = json!({"home_events": []});
    assert!(!summary_of(doc).success);
}

#[test]
fn test_empty_event_array_is_not_fatal() {
    let summary = summary_of(document(json!([])));
    assert!(summary.success);
    let stats = summary.statistics.unwrap();
    assert_eq!(stats.possession.home, 50.0);
    assert_eq!(stats.match_stats.home.pass_accuracy, 0.0);
    assert!(stats.momentum.points.is_empty());
}

#[test]
fn test_unsuccessful_match_centre() {
    let mut doc = document(Value::Array(events()));
    doc["match_centre"]["success"] = json!(false);
    let summary = summary_of(doc);
    assert!(!summary.success);
    assert!(summary.error.is_some());
}

#[test]
fn test_bad_records_keep_one_row_each() {
    let mut records = events();
    records.push(json!("garbage"));
    records.push(json!({"teamId": "not a number", "x": "12.5"}));
    let summary = summary_of(document(Value::Array(records)));
    assert_eq!(summary.events.len(), 14);
    assert_eq!(summary.events.events()[13].team_id, None);
    assert!((summary.events.events()[13].x.unwrap() - 12.5 * 1.05).abs() < 1e-9);
}

#[test]
fn test_summary_serializes() {
    let summary = summary_of(document(Value::Array(events())));
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["home_team"]["name"], "Home FC");
    assert!(json.get("error").is_none());
    assert_eq!(json["statistics"]["xg"]["source"], "observed");
}

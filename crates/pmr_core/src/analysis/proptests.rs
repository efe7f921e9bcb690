use proptest::prelude::*;
use serde_json::{json, Value};

use super::pass_network::{build, infer_receivers};
use super::stats::aggregate;
use super::team_stats::calculate_possession;
use super::zonal::{classify, ZoneLabel};
use crate::events::{normalize_records, EventTable};
use crate::models::PlayerId;

const KINDS: &[&str] = &["Pass", "Tackle", "Clearance", "TakeOn", "SavedShot", "Pass"];

fn arb_record() -> impl Strategy<Value = Value> {
    (
        1i64..=3,
        1i64..=6,
        0usize..KINDS.len(),
        any::<bool>(),
        0.0f64..=100.0,
        0.0f64..=100.0,
    )
        .prop_map(|(team, player, kind, ok, x, y)| {
            json!({
                "teamId": team,
                "playerId": player,
                "type": {"displayName": KINDS[kind]},
                "outcomeType": {"displayName": if ok { "Successful" } else { "Unsuccessful" }},
                "x": x,
                "y": y,
            })
        })
}

fn arb_table() -> impl Strategy<Value = EventTable> {
    prop::collection::vec(arb_record(), 0..80).prop_map(|records| normalize_records(&records))
}

/// Forward scan per pass, the quadratic reference.
fn naive_receivers(table: &EventTable) -> Vec<Option<PlayerId>> {
    let events = table.events();
    events
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let team = e.team_id?;
            if !e.is_pass() {
                return None;
            }
            events[i + 1..]
                .iter()
                .find(|next| next.team_id == Some(team))
                .and_then(|next| next.player_id)
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_scaled_coordinates_in_bounds(
        x in 0.0f64..=100.0,
        y in 0.0f64..=100.0,
        end_x in 0.0f64..=100.0,
        end_y in 0.0f64..=100.0,
    ) {
        let table = normalize_records(&[json!({
            "teamId": 1, "type": {"displayName": "Pass"},
            "x": x, "y": y, "endX": end_x, "endY": end_y,
        })]);
        let e = &table.events()[0];
        for v in [e.x.unwrap(), e.end_x.unwrap()] {
            prop_assert!((0.0..=105.0 + 1e-9).contains(&v));
        }
        for v in [e.y.unwrap(), e.end_y.unwrap()] {
            prop_assert!((0.0..=68.0 + 1e-9).contains(&v));
        }
    }

    #[test]
    fn prop_possession_zero_sum(table in arb_table()) {
        let p = calculate_possession(&table, 1, 2);
        prop_assert!((p.home + p.away - 100.0).abs() < 1e-9);
        prop_assert!(p.home >= 0.0 && p.away >= 0.0);
    }

    #[test]
    fn prop_pass_accuracy_bounded(table in arb_table(), team in 1i64..=3) {
        let s = aggregate(&table, team);
        prop_assert!((0.0..=100.0).contains(&s.pass_accuracy));
        if s.passes == 0 {
            prop_assert_eq!(s.pass_accuracy, 0.0);
        }
    }

    #[test]
    fn prop_zone_labels_cover_grid(table in arb_table(), cols in 1usize..10, rows in 1usize..10) {
        let m = classify(&table, 1, 2, cols, rows).unwrap();
        prop_assert_eq!(m.cells.len(), rows);
        let mut touches = 0;
        for cell in m.cells.iter().flatten() {
            touches += cell.home_touches + cell.away_touches;
            if cell.home_touches + cell.away_touches == 0 {
                prop_assert_eq!(cell.label, ZoneLabel::Contested);
            }
        }
        let positioned = table
            .iter()
            .filter(|e| matches!(e.team_id, Some(1) | Some(2)) && e.position().is_some())
            .count();
        prop_assert_eq!(touches, positioned);
        prop_assert_eq!(
            m.count(ZoneLabel::Home) + m.count(ZoneLabel::Away) + m.count(ZoneLabel::Contested),
            cols * rows
        );
    }

    #[test]
    fn prop_receivers_match_forward_scan(table in arb_table()) {
        prop_assert_eq!(infer_receivers(&table), naive_receivers(&table));
    }

    #[test]
    fn prop_pass_network_deterministic(table in arb_table(), min in 0usize..4) {
        prop_assert_eq!(build(&table, 1, min, None), build(&table, 1, min, None));
    }
}

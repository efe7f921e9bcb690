//! # Statistics Aggregator
//!
//! Per-team counting statistics over the normalized event table, in the
//! layout of a match-centre summary page.
//!
//! ## Counting rules
//! - shot family: `Shot`, `MissedShots`, `SavedShot`, `ShotOnPost`, `Goal`
//! - on target: `SavedShot`, `Goal`
//! - goals: `Goal` events minus those flagged own goal
//! - open play / set piece: absence / presence of FreeKick, Corner, ThrowIn, Penalty
//! - cards, errors, bad touches, body parts: qualifier presence
//!
//! A team with no events gets all-zero statistics.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{percentage, round_to, xg};
use crate::events::EventTable;
use crate::models::{Event, EventType, TeamId};
use crate::pitch;

/// Per-team statistics. Ratios are kept at full precision.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamStats {
    // Shots
    pub shots: usize,
    pub shots_on_target: usize,
    pub shots_off_target: usize,
    pub blocked_shots: usize,
    pub goals: usize,

    // Passing
    pub passes: usize,
    pub passes_completed: usize,
    pub pass_accuracy: f64,

    // Possession
    pub touches: usize,

    // Defensive
    pub tackles: usize,
    pub interceptions: usize,
    pub clearances: usize,
    pub blocks: usize,

    // Dribbles
    pub dribbles: usize,
    pub dribbles_successful: usize,

    // Discipline
    pub fouls: usize,
    pub yellow_cards: usize,
    pub red_cards: usize,
    pub offsides: usize,

    // Aerials
    pub aerial_duels: usize,
    pub aerial_duels_won: usize,

    // Goalkeeping
    pub saves: usize,

    // Errors
    pub errors_leading_to_shot: usize,
    pub errors_leading_to_goal: usize,

    // Lost possession
    pub dispossessed: usize,
    pub bad_touches: usize,

    /// Sum of feed-observed xG.
    pub xg: f64,
    /// Sum of heuristic per-shot estimates. Never mixed into `xg`.
    pub heuristic_xg: f64,

    // Shot location
    pub penalty_area_shots: usize,
    pub six_yard_box_shots: usize,
    pub outside_box_shots: usize,

    // Body part
    pub right_foot_shots: usize,
    pub left_foot_shots: usize,
    pub headed_shots: usize,

    // Situation
    pub open_play_shots: usize,
    pub set_piece_shots: usize,
    pub counter_attack_shots: usize,
}

/// Scalar statistic value for flat exports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Count(usize),
    Ratio(f64),
}

impl StatValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            StatValue::Count(n) => n as f64,
            StatValue::Ratio(r) => r,
        }
    }
}

/// Build the stats of one team from its slice of the table.
///
/// Events of other teams are ignored, so the whole table may be passed.
pub fn aggregate(table: &EventTable, team_id: TeamId) -> TeamStats {
    aggregate_events(table.for_team(team_id))
}

/// Build stats from an already-partitioned event set.
pub fn aggregate_events<'a>(events: impl IntoIterator<Item = &'a Event>) -> TeamStats {
    let mut s = TeamStats::default();

    for e in events {
        s.touches += 1;
        let q = &e.qualifiers;

        match e.event_type {
            EventType::MissedShots => s.shots_off_target += 1,
            EventType::BlockedPass => s.blocked_shots += 1,
            EventType::Pass => {
                s.passes += 1;
                if e.is_successful() {
                    s.passes_completed += 1;
                }
            }
            EventType::Tackle => s.tackles += 1,
            EventType::Interception => s.interceptions += 1,
            EventType::Clearance => s.clearances += 1,
            EventType::TakeOn => {
                s.dribbles += 1;
                if e.is_successful() {
                    s.dribbles_successful += 1;
                }
            }
            EventType::Foul => s.fouls += 1,
            EventType::OffsidePass => s.offsides += 1,
            EventType::Aerial => {
                s.aerial_duels += 1;
                if e.is_successful() {
                    s.aerial_duels_won += 1;
                }
            }
            EventType::Save => s.saves += 1,
            EventType::Error => s.errors_leading_to_shot += 1,
            EventType::Dispossessed => s.dispossessed += 1,
            _ => {}
        }
        if matches!(e.event_type, EventType::BlockedPass | EventType::Block) {
            s.blocks += 1;
        }

        if q.yellow_card {
            s.yellow_cards += 1;
        }
        if q.red_card {
            s.red_cards += 1;
        }
        if q.lead_to_goal {
            s.errors_leading_to_goal += 1;
        }
        if q.bad_touch {
            s.bad_touches += 1;
        }
        s.xg += e.xg;

        if e.is_shot() {
            count_shot(&mut s, e);
        }
    }

    s.pass_accuracy = percentage(s.passes_completed, s.passes);
    s
}

fn count_shot(s: &mut TeamStats, e: &Event) {
    let q = &e.qualifiers;
    s.shots += 1;
    if e.event_type.is_shot_on_target() {
        s.shots_on_target += 1;
    }
    // Open question: an own goal is dropped from this tally and is not
    // credited to the opponent either.
    if e.event_type == EventType::Goal && !e.is_own_goal {
        s.goals += 1;
    }
    s.heuristic_xg += xg::estimate(e);

    let (x, y) = (e.x_or_nan(), e.y_or_nan());
    if pitch::in_penalty_area(x, y) {
        s.penalty_area_shots += 1;
    }
    if pitch::in_six_yard_box(x, y) {
        s.six_yard_box_shots += 1;
    }
    if x < pitch::boxes::PENALTY_AREA_X_MIN {
        s.outside_box_shots += 1;
    }

    if q.right_foot {
        s.right_foot_shots += 1;
    }
    if q.left_foot {
        s.left_foot_shots += 1;
    }
    if q.head {
        s.headed_shots += 1;
    }

    if q.is_set_piece() {
        s.set_piece_shots += 1;
    } else {
        s.open_play_shots += 1;
    }
    if q.counter_attack {
        s.counter_attack_shots += 1;
    }
}

impl TeamStats {
    /// All statistics in fixed export order, at full precision.
    pub fn entries(&self) -> Vec<(&'static str, StatValue)> {
        use StatValue::{Count as C, Ratio as R};
        vec![
            ("shots", C(self.shots)),
            ("shots_on_target", C(self.shots_on_target)),
            ("shots_off_target", C(self.shots_off_target)),
            ("blocked_shots", C(self.blocked_shots)),
            ("goals", C(self.goals)),
            ("passes", C(self.passes)),
            ("passes_completed", C(self.passes_completed)),
            ("pass_accuracy", R(self.pass_accuracy)),
            ("touches", C(self.touches)),
            ("tackles", C(self.tackles)),
            ("interceptions", C(self.interceptions)),
            ("clearances", C(self.clearances)),
            ("blocks", C(self.blocks)),
            ("dribbles", C(self.dribbles)),
            ("dribbles_successful", C(self.dribbles_successful)),
            ("fouls", C(self.fouls)),
            ("yellow_cards", C(self.yellow_cards)),
            ("red_cards", C(self.red_cards)),
            ("offsides", C(self.offsides)),
            ("aerial_duels", C(self.aerial_duels)),
            ("aerial_duels_won", C(self.aerial_duels_won)),
            ("saves", C(self.saves)),
            ("errors_leading_to_shot", C(self.errors_leading_to_shot)),
            ("errors_leading_to_goal", C(self.errors_leading_to_goal)),
            ("dispossessed", C(self.dispossessed)),
            ("bad_touches", C(self.bad_touches)),
            ("xg", R(self.xg)),
            ("heuristic_xg", R(self.heuristic_xg)),
            ("penalty_area_shots", C(self.penalty_area_shots)),
            ("six_yard_box_shots", C(self.six_yard_box_shots)),
            ("outside_box_shots", C(self.outside_box_shots)),
            ("right_foot_shots", C(self.right_foot_shots)),
            ("left_foot_shots", C(self.left_foot_shots)),
            ("headed_shots", C(self.headed_shots)),
            ("open_play_shots", C(self.open_play_shots)),
            ("set_piece_shots", C(self.set_piece_shots)),
            ("counter_attack_shots", C(self.counter_attack_shots)),
        ]
    }

    /// Flat name → value map with export rounding applied.
    pub fn to_map(&self) -> BTreeMap<&'static str, StatValue> {
        self.entries()
            .into_iter()
            .map(|(name, value)| (name, export_value(name, value)))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<StatValue> {
        self.entries()
            .into_iter()
            .find_map(|(n, v)| (n == name).then_some(v))
    }
}

/// Percentages to 1 d.p., xG to 2 d.p.
fn export_value(name: &str, value: StatValue) -> StatValue {
    match value {
        StatValue::Ratio(r) if name.contains("xg") => StatValue::Ratio(round_to(r, 2)),
        StatValue::Ratio(r) => StatValue::Ratio(round_to(r, 1)),
        count => count,
    }
}

/// One `stat / home / away` line of the comparison export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub stat: &'static str,
    pub home: StatValue,
    pub away: StatValue,
}

/// A named group of comparison rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatCategory {
    pub name: &'static str,
    pub stats: Vec<ComparisonRow>,
}

/// (category, [(label, stat name)])
const CATEGORIES: &[(&str, &[(&str, &str)])] = &[
    (
        "offensive",
        &[
            ("shots", "shots"),
            ("shots_on_target", "shots_on_target"),
            ("passes", "passes"),
            ("dribbles", "dribbles"),
        ],
    ),
    (
        "defensive",
        &[
            ("tackles", "tackles"),
            ("clearances", "clearances"),
            ("interceptions", "interceptions"),
            ("blocks", "blocks"),
        ],
    ),
    (
        "possession",
        &[("touches", "touches"), ("dispossessed", "dispossessed")],
    ),
    (
        "discipline",
        &[
            ("fouls", "fouls"),
            ("yellow_cards", "yellow_cards"),
            ("red_cards", "red_cards"),
            ("offsides", "offsides"),
        ],
    ),
    (
        "aerials",
        &[
            ("aerial_duels", "aerial_duels"),
            ("aerial_duels_won", "aerial_duels_won"),
        ],
    ),
    ("goalkeeping", &[("saves", "saves")]),
    (
        "errors",
        &[
            ("errors_leading_to_shot", "errors_leading_to_shot"),
            ("errors_leading_to_goal", "errors_leading_to_goal"),
        ],
    ),
    (
        "shot_breakdown",
        &[
            ("penalty_area", "penalty_area_shots"),
            ("six_yard_box", "six_yard_box_shots"),
            ("outside_box", "outside_box_shots"),
            ("right_foot", "right_foot_shots"),
            ("left_foot", "left_foot_shots"),
            ("headed", "headed_shots"),
            ("open_play", "open_play_shots"),
            ("set_piece", "set_piece_shots"),
            ("counter_attack", "counter_attack_shots"),
        ],
    ),
];

/// Both teams' statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchStats {
    pub home: TeamStats,
    pub away: TeamStats,
}

impl MatchStats {
    pub fn compute(table: &EventTable, home_id: TeamId, away_id: TeamId) -> Self {
        Self {
            home: aggregate(table, home_id),
            away: aggregate(table, away_id),
        }
    }

    /// Every statistic side by side, rounded for export.
    pub fn comparison(&self) -> Vec<ComparisonRow> {
        self.home
            .entries()
            .into_iter()
            .zip(self.away.entries())
            .map(|((stat, home), (_, away))| ComparisonRow {
                stat,
                home: export_value(stat, home),
                away: export_value(stat, away),
            })
            .collect()
    }

    /// Comparison grouped the way a match-centre page lays it out.
    pub fn categories(&self) -> Vec<StatCategory> {
        CATEGORIES
            .iter()
            .map(|&(name, rows)| StatCategory {
                name,
                stats: rows
                    .iter()
                    .filter_map(|&(label, stat)| {
                        Some(ComparisonRow {
                            stat: label,
                            home: export_value(stat, self.home.get(stat)?),
                            away: export_value(stat, self.away.get(stat)?),
                        })
                    })
                    .collect(),
            })
            .collect()
    }
}

//! # Shot xG
//!
//! Per-shot expected-goals values, observed or estimated.
//!
//! The estimate is a presentation heuristic for feeds that carry no per-shot
//! xG. It is deliberately rough and kept stable so reports stay comparable
//! across runs; it is not a fitted model.
//!
//! ```text
//! penalty            → 0.76 (fixed)
//! otherwise          → base 0.02
//!                      + location (box bands by distance to goal)
//!                      + 0.15 × goal-mouth angle / π
//!                      × 0.7 for headers
//!                      + outcome nudge (Goal +0.05, SavedShot/ShotOnPost +0.02)
//! result clamped to [0.01, 0.95]
//! ```

use std::f64::consts::PI;

use serde::Serialize;

use crate::events::EventTable;
use crate::models::{Event, EventType, PlayerId, TeamId};
use crate::pitch;

pub const PENALTY_XG: f64 = 0.76;
pub const BASE_XG: f64 = 0.02;
pub const ANGLE_WEIGHT: f64 = 0.15;
pub const HEADER_FACTOR: f64 = 0.7;
pub const MIN_XG: f64 = 0.01;
pub const MAX_XG: f64 = 0.95;

/// Where a shot's xG value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum XgSource {
    /// Carried by the feed's `xG` qualifier.
    Observed,
    /// Estimated by [`estimate`].
    Heuristic,
}

/// xG of one shot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotXg {
    pub event_index: usize,
    pub team_id: Option<TeamId>,
    pub player_id: Option<PlayerId>,
    pub minute: f64,
    pub value: f64,
    pub source: XgSource,
}

/// One step of a cumulative xG line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XgPoint {
    pub minute: f64,
    pub event_index: usize,
    pub shot_xg: f64,
    pub cumulative_xg: f64,
}

/// Location component of the estimate.
fn location_bonus(x: f64, y: f64) -> f64 {
    let dist = pitch::dist_to_goal(x, y);
    if pitch::in_penalty_area(x, y) {
        if dist < 6.0 {
            0.35
        } else if dist < 11.0 {
            0.20
        } else if dist < 16.5 {
            0.10
        } else {
            0.05
        }
    } else if dist < 25.0 {
        0.03
    } else {
        0.0
    }
}

/// Heuristic xG for a shot event.
pub fn estimate(event: &Event) -> f64 {
    if event.qualifiers.penalty {
        return PENALTY_XG;
    }

    let mut xg = BASE_XG;
    if let Some((x, y)) = event.position() {
        xg += location_bonus(x, y);
        let angle = pitch::goal_mouth_angle(x, y);
        if angle.is_finite() {
            xg += ANGLE_WEIGHT * angle / PI;
        }
    }
    if event.qualifiers.head {
        xg *= HEADER_FACTOR;
    }
    xg += match event.event_type {
        EventType::Goal => 0.05,
        EventType::SavedShot | EventType::ShotOnPost => 0.02,
        _ => 0.0,
    };
    xg.clamp(MIN_XG, MAX_XG)
}

/// Observed xG when the feed carries a positive value, the estimate otherwise.
pub fn shot_xg(event: &Event) -> ShotXg {
    let (value, source) = if event.xg > 0.0 {
        (event.xg, XgSource::Observed)
    } else {
        (estimate(event), XgSource::Heuristic)
    };
    ShotXg {
        event_index: event.index,
        team_id: event.team_id,
        player_id: event.player_id,
        minute: event.cumulative_minute,
        value,
        source,
    }
}

/// xG for every shot of `team_id` (or both teams), in table order.
pub fn shot_xgs(table: &EventTable, team_id: Option<TeamId>) -> Vec<ShotXg> {
    table.shots(team_id).into_iter().map(shot_xg).collect()
}

/// Sum of heuristic estimates over a set of events' shots.
pub fn heuristic_total<'a>(events: impl IntoIterator<Item = &'a Event>) -> f64 {
    events
        .into_iter()
        .filter(|e| e.is_shot())
        .map(estimate)
        .sum()
}

/// Cumulative xG line for one team, ordered by cumulative minute (ties keep
/// table order).
pub fn xg_timeline(table: &EventTable, team_id: TeamId) -> Vec<XgPoint> {
    let mut shots = shot_xgs(table, Some(team_id));
    shots.sort_by(|a, b| a.minute.total_cmp(&b.minute));

    let mut running = 0.0;
    shots
        .into_iter()
        .map(|shot| {
            running += shot.value;
            XgPoint {
                minute: shot.minute,
                event_index: shot.event_index,
                shot_xg: shot.value,
                cumulative_xg: running,
            }
        })
        .collect()
}

//! Team-level aggregations: possession proxy, passing, shooting, defending
//! and territory, bundled per side by [`comprehensive_team_stats`].

use serde::Serialize;

use super::{mean, percentage, xg, TeamMetrics};
use crate::events::{EventTable, PassFilter};
use crate::models::{Event, EventType, Team, TeamId};
use crate::pitch::{self, thirds};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamBasicInfo {
    pub id: Option<TeamId>,
    pub name: String,
    pub manager: Option<String>,
    pub formation: Option<String>,
    pub country: Option<String>,
}

pub fn team_basic_info(team: &Team) -> TeamBasicInfo {
    TeamBasicInfo {
        id: team.team_id,
        name: team.name.clone(),
        manager: team.manager.clone(),
        formation: team.formation.clone(),
        country: team.country.clone(),
    }
}

/// Possession share in percent.
///
/// This is an event-count proxy (share of recorded on-ball events), not
/// time in possession.
pub type Possession = TeamMetrics<f64>;

/// `home + away == 100`; 50/50 when neither side has events.
pub fn calculate_possession(table: &EventTable, home_id: TeamId, away_id: TeamId) -> Possession {
    let home = table.for_team(home_id).count();
    let away = table.for_team(away_id).count();
    let total = home + away;
    if total == 0 {
        return TeamMetrics::new(50.0, 50.0);
    }
    let home_share = home as f64 / total as f64 * 100.0;
    TeamMetrics::new(home_share, 100.0 - home_share)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PassingStats {
    pub total_passes: usize,
    pub completed_passes: usize,
    pub pass_accuracy: f64,
    /// Positive x displacement on the absolute pitch.
    pub forward_passes: usize,
    pub backward_passes: usize,
    pub progressive_passes: usize,
    pub short_passes: usize,
    pub long_passes: usize,
    pub key_passes: usize,
    pub assists: usize,
    /// Mean length of passes with both endpoints, in meters.
    pub avg_pass_length: Option<f64>,
}

/// Passing profile of one team.
///
/// Open question: forward/backward uses absolute pitch x, not the team's
/// attacking direction, so one side's forward passes count as backward.
pub fn passing_stats(table: &EventTable, team_id: TeamId) -> PassingStats {
    let passes = table.passes(PassFilter {
        team_id: Some(team_id),
        ..PassFilter::default()
    });

    let mut s = PassingStats {
        total_passes: passes.len(),
        ..PassingStats::default()
    };
    for p in &passes {
        if p.is_successful() {
            s.completed_passes += 1;
        }
        let dx = p.dx();
        if dx > 0.0 {
            s.forward_passes += 1;
        } else if dx < 0.0 {
            s.backward_passes += 1;
        }
        if p.is_progressive {
            s.progressive_passes += 1;
        }
        if p.distance < pitch::SHORT_PASS_MAX_M {
            s.short_passes += 1;
        } else if p.distance >= pitch::LONG_PASS_MIN_M {
            s.long_passes += 1;
        }
        if p.is_key_pass {
            s.key_passes += 1;
        }
        if p.is_assist {
            s.assists += 1;
        }
    }
    s.pass_accuracy = percentage(s.completed_passes, s.total_passes);
    s.avg_pass_length = mean(passes.iter().map(|p| p.distance));
    s
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShootingStats {
    pub total_shots: usize,
    pub shots_on_target: usize,
    pub goals: usize,
    pub xg: f64,
    pub heuristic_xg: f64,
    pub shot_accuracy: f64,
    pub shots_inside_box: usize,
    pub shots_outside_box: usize,
}

pub fn shooting_stats(table: &EventTable, team_id: TeamId) -> ShootingStats {
    let shots = table.shots(Some(team_id));
    let on_target = shots
        .iter()
        .filter(|e| e.event_type.is_shot_on_target())
        .count();
    ShootingStats {
        total_shots: shots.len(),
        shots_on_target: on_target,
        goals: shots
            .iter()
            .filter(|e| e.event_type == EventType::Goal && !e.is_own_goal)
            .count(),
        xg: shots.iter().map(|e| e.xg).sum(),
        heuristic_xg: xg::heuristic_total(shots.iter().copied()),
        shot_accuracy: percentage(on_target, shots.len()),
        shots_inside_box: shots
            .iter()
            .filter(|e| pitch::in_penalty_area(e.x_or_nan(), e.y_or_nan()))
            .count(),
        shots_outside_box: shots
            .iter()
            .filter(|e| e.x_or_nan() < pitch::boxes::PENALTY_AREA_X_MIN)
            .count(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DefensiveStats {
    pub total_defensive_actions: usize,
    pub tackles: usize,
    pub interceptions: usize,
    pub clearances: usize,
    pub blocked_passes: usize,
    pub challenges: usize,
    pub successful_defensive_actions: usize,
}

pub fn defensive_stats(table: &EventTable, team_id: TeamId) -> DefensiveStats {
    let actions = table.defensive_actions(Some(team_id));
    let count = |t: EventType| actions.iter().filter(|e| e.event_type == t).count();
    DefensiveStats {
        total_defensive_actions: actions.len(),
        tackles: count(EventType::Tackle),
        interceptions: count(EventType::Interception),
        clearances: count(EventType::Clearance),
        blocked_passes: count(EventType::BlockedPass),
        challenges: count(EventType::Challenge),
        successful_defensive_actions: actions.iter().filter(|e| e.is_successful()).count(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TerritorialStats {
    pub defensive_third_events: usize,
    pub middle_third_events: usize,
    pub attacking_third_events: usize,
    /// Shares of all team events, including those without coordinates.
    pub defensive_third_pct: f64,
    pub middle_third_pct: f64,
    pub attacking_third_pct: f64,
    pub avg_event_x: Option<f64>,
    pub avg_event_y: Option<f64>,
}

pub fn territorial_stats(table: &EventTable, team_id: TeamId) -> TerritorialStats {
    let events: Vec<&Event> = table.for_team(team_id).collect();
    let mut s = TerritorialStats::default();
    for e in &events {
        let Some(x) = e.x else { continue };
        if x <= thirds::DEFENSIVE_MAX_X {
            s.defensive_third_events += 1;
        } else if x <= thirds::MIDDLE_MAX_X {
            s.middle_third_events += 1;
        } else {
            s.attacking_third_events += 1;
        }
    }
    let total = events.len();
    s.defensive_third_pct = percentage(s.defensive_third_events, total);
    s.middle_third_pct = percentage(s.middle_third_events, total);
    s.attacking_third_pct = percentage(s.attacking_third_events, total);
    s.avg_event_x = mean(events.iter().map(|e| e.x_or_nan()));
    s.avg_event_y = mean(events.iter().map(|e| e.y_or_nan()));
    s
}

/// Everything computed for one side.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamReport {
    pub info: TeamBasicInfo,
    pub passing: PassingStats,
    pub shooting: ShootingStats,
    pub defensive: DefensiveStats,
    pub territorial: TerritorialStats,
}

impl TeamReport {
    /// A team without an id has no attributable events; its report is all zero.
    pub fn build(table: &EventTable, team: &Team) -> Self {
        let info = team_basic_info(team);
        match team.team_id {
            Some(id) => Self {
                info,
                passing: passing_stats(table, id),
                shooting: shooting_stats(table, id),
                defensive: defensive_stats(table, id),
                territorial: territorial_stats(table, id),
            },
            None => Self {
                info,
                ..Self::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComprehensiveTeamStats {
    pub home: TeamReport,
    pub away: TeamReport,
    pub possession: Possession,
}

pub fn comprehensive_team_stats(
    table: &EventTable,
    home: &Team,
    away: &Team,
) -> ComprehensiveTeamStats {
    let possession = match (home.team_id, away.team_id) {
        (Some(h), Some(a)) => calculate_possession(table, h, a),
        _ => TeamMetrics::new(50.0, 50.0),
    };
    ComprehensiveTeamStats {
        home: TeamReport::build(table, home),
        away: TeamReport::build(table, away),
        possession,
    }
}

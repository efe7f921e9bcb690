//! Player-level aggregations: touch positions, per-player totals and rankings.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use super::{median, percentage};
use crate::events::EventTable;
use crate::models::{Event, EventType, Player, PlayerId, Team, TeamId};

/// Typical touch location of one player (median of all touches).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerPosition {
    pub player_id: PlayerId,
    pub x: f64,
    pub y: f64,
    /// Touches with coordinates that went into the median.
    pub event_count: usize,
    pub name: Option<String>,
    pub shirt_number: Option<i64>,
    pub position: Option<String>,
}

/// Median touch positions for a team's players, ordered by player id.
///
/// With `starting_xi_only`, only players flagged as starters in `team` are
/// included. Players with no positioned touch are omitted.
pub fn player_positions(
    table: &EventTable,
    team: &Team,
    starting_xi_only: bool,
) -> Vec<PlayerPosition> {
    let Some(team_id) = team.team_id else {
        return Vec::new();
    };
    let allowed: Option<HashSet<PlayerId>> =
        starting_xi_only.then(|| team.starting_xi().map(|p| p.player_id).collect());

    let mut touches: BTreeMap<PlayerId, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for e in table.for_team(team_id) {
        let (Some(pid), Some((x, y))) = (e.player_id, e.position()) else {
            continue;
        };
        if allowed.as_ref().map_or(false, |ids| !ids.contains(&pid)) {
            continue;
        }
        let entry = touches.entry(pid).or_default();
        entry.0.push(x);
        entry.1.push(y);
    }

    touches
        .into_iter()
        .filter_map(|(player_id, (xs, ys))| {
            let event_count = xs.len();
            let player = team.player(player_id);
            Some(PlayerPosition {
                player_id,
                x: median(xs)?,
                y: median(ys)?,
                event_count,
                name: player.map(|p| p.name.clone()),
                shirt_number: player.and_then(|p| p.shirt_number),
                position: player.and_then(|p| p.position.clone()),
            })
        })
        .collect()
}

/// Per-player event totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerStats {
    pub player_id: PlayerId,
    pub total_events: usize,
    pub passes_attempted: usize,
    pub passes_completed: usize,
    pub pass_completion_pct: f64,
    pub shots: usize,
    pub key_passes: usize,
    pub assists: usize,
    pub tackles: usize,
    pub interceptions: usize,
    pub clearances: usize,
    pub total_xg: f64,
}

pub fn player_stats(table: &EventTable, player_id: PlayerId) -> PlayerStats {
    let mut s = PlayerStats {
        player_id,
        ..PlayerStats::default()
    };
    for e in table.iter().filter(|e| e.player_id == Some(player_id)) {
        add_event(&mut s, e);
    }
    s.pass_completion_pct = percentage(s.passes_completed, s.passes_attempted);
    s
}

fn add_event(s: &mut PlayerStats, e: &Event) {
    s.total_events += 1;
    match e.event_type {
        EventType::Pass => {
            s.passes_attempted += 1;
            if e.is_successful() {
                s.passes_completed += 1;
            }
        }
        EventType::Tackle => s.tackles += 1,
        EventType::Interception => s.interceptions += 1,
        EventType::Clearance => s.clearances += 1,
        _ => {}
    }
    if e.is_shot() {
        s.shots += 1;
    }
    if e.is_key_pass {
        s.key_passes += 1;
    }
    if e.is_assist {
        s.assists += 1;
    }
    s.total_xg += e.xg;
}

/// Metric used by [`top_performers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankMetric {
    TotalEvents,
    PassesCompleted,
    PassCompletionPct,
    Shots,
    KeyPasses,
    Assists,
    Tackles,
    Interceptions,
    TotalXg,
    Rating,
}

impl RankMetric {
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "total_events" | "event_count" => RankMetric::TotalEvents,
            "passes_completed" => RankMetric::PassesCompleted,
            "pass_completion_pct" => RankMetric::PassCompletionPct,
            "shots" => RankMetric::Shots,
            "key_passes" => RankMetric::KeyPasses,
            "assists" => RankMetric::Assists,
            "tackles" => RankMetric::Tackles,
            "interceptions" => RankMetric::Interceptions,
            "total_xg" | "xg" => RankMetric::TotalXg,
            "rating" => RankMetric::Rating,
            _ => return None,
        })
    }

    fn value(&self, player: &Player, stats: &PlayerStats) -> f64 {
        match self {
            RankMetric::TotalEvents => stats.total_events as f64,
            RankMetric::PassesCompleted => stats.passes_completed as f64,
            RankMetric::PassCompletionPct => stats.pass_completion_pct,
            RankMetric::Shots => stats.shots as f64,
            RankMetric::KeyPasses => stats.key_passes as f64,
            RankMetric::Assists => stats.assists as f64,
            RankMetric::Tackles => stats.tackles as f64,
            RankMetric::Interceptions => stats.interceptions as f64,
            RankMetric::TotalXg => stats.total_xg,
            // unrated players rank last
            RankMetric::Rating => player.rating.unwrap_or(f64::NEG_INFINITY),
        }
    }
}

/// A ranked roster entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPlayer {
    pub player_id: PlayerId,
    pub name: String,
    pub team_id: Option<TeamId>,
    pub value: f64,
    pub stats: PlayerStats,
}

/// Top `top_n` rostered players by `metric`, descending.
///
/// Ties are broken by ascending player id. `team_id` restricts the pool.
pub fn top_performers<'a>(
    table: &EventTable,
    roster: impl IntoIterator<Item = &'a Player>,
    metric: RankMetric,
    team_id: Option<TeamId>,
    top_n: usize,
) -> Vec<RankedPlayer> {
    let mut per_player: BTreeMap<PlayerId, PlayerStats> = BTreeMap::new();
    for e in table.iter() {
        if let Some(pid) = e.player_id {
            add_event(
                per_player.entry(pid).or_insert_with(|| PlayerStats {
                    player_id: pid,
                    ..PlayerStats::default()
                }),
                e,
            );
        }
    }

    let mut ranked: Vec<RankedPlayer> = roster
        .into_iter()
        .filter(|p| team_id.map_or(true, |t| p.team_id == Some(t)))
        .map(|player| {
            let mut stats = per_player
                .get(&player.player_id)
                .cloned()
                .unwrap_or_else(|| PlayerStats {
                    player_id: player.player_id,
                    ..PlayerStats::default()
                });
            stats.pass_completion_pct = percentage(stats.passes_completed, stats.passes_attempted);
            RankedPlayer {
                player_id: player.player_id,
                name: player.name.clone(),
                team_id: player.team_id,
                value: metric.value(player, &stats),
                stats,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
    ranked.dedup_by_key(|r| r.player_id);
    ranked.truncate(top_n);
    ranked
}

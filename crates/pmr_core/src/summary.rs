//! # Match Summary
//!
//! The single hand-off object for rendering and export: match metadata, both
//! rosters, the normalized event table and the aggregated statistics.
//!
//! ## Construction
//! ```text
//! RawExtraction ─▶ Team::from_raw (×2), MatchInfo::from_raw
//!               ─▶ normalize_records(events) ─▶ EventTable
//!               ─▶ MatchStats, ComprehensiveTeamStats, EventStatistics,
//!                  shot xG, XgSummary, momentum
//! ```
//!
//! A summary is immutable once built. The heavier per-request views (pass
//! networks, zone grids, rankings) are computed on demand from the stored
//! table and can be cached by the caller.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::analysis::momentum::MomentumTimeline;
use crate::analysis::pass_network::{self, PassNetwork};
use crate::analysis::player_stats::{self, PlayerPosition, RankMetric, RankedPlayer};
use crate::analysis::stats::{self, MatchStats};
use crate::analysis::team_stats::{comprehensive_team_stats, ComprehensiveTeamStats, Possession};
use crate::analysis::xg::{self, ShotXg, XgPoint};
use crate::analysis::zonal::{self, ZoneMatrix};
use crate::config::{AnalysisConfig, MomentumConfig, PassNetworkConfig, ZonalConfig};
use crate::error::{CoreError, Result};
use crate::events::{normalize_records, EventStatistics, EventTable};
use crate::ingest::{parse_extraction, ExternalStats, RawExtraction, RawTeam};
use crate::models::{Event, MatchInfo, Player, PlayerId, Team, TeamId};

/// Home or away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

/// Where the match-level xG totals come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum XgTotalSource {
    /// Secondary stats source; takes precedence when present.
    External,
    /// Sum of the feed's per-shot xG qualifiers.
    Observed,
    /// Sum of heuristic per-shot estimates.
    Heuristic,
}

/// Match-level xG totals for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XgSummary {
    pub home: f64,
    pub away: f64,
    pub source: XgTotalSource,
}

impl XgSummary {
    pub fn resolve(external: Option<&ExternalStats>, stats: &MatchStats) -> Self {
        let external_xg = external
            .filter(|ext| ext.success == Some(true))
            .and_then(|ext| ext.xg.as_ref());
        if let Some(totals) = external_xg {
            let summary = Self {
                home: totals.home_xg.unwrap_or(0.0),
                away: totals.away_xg.unwrap_or(0.0),
                source: XgTotalSource::External,
            };
            info!(
                home = summary.home,
                away = summary.away,
                "External xG totals take precedence"
            );
            return summary;
        }

        if stats.home.xg > 0.0 || stats.away.xg > 0.0 {
            Self {
                home: stats.home.xg,
                away: stats.away.xg,
                source: XgTotalSource::Observed,
            }
        } else {
            Self {
                home: stats.home.heuristic_xg,
                away: stats.away.heuristic_xg,
                source: XgTotalSource::Heuristic,
            }
        }
    }
}

/// Aggregates computed once at construction.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryStatistics {
    pub event_statistics: EventStatistics,
    pub match_stats: MatchStats,
    pub team_stats: ComprehensiveTeamStats,
    pub possession: Possession,
    pub xg: XgSummary,
    pub shot_xg: Vec<ShotXg>,
    pub momentum: MomentumTimeline,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchSummary {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub match_id: Option<i64>,
    pub match_info: MatchInfo,
    pub home_team: Team,
    pub away_team: Team,
    pub events: EventTable,
    pub statistics: Option<SummaryStatistics>,
}

impl MatchSummary {
    /// Build a summary. Never fails: a structurally absent event feed yields
    /// `success = false` and no statistics.
    pub fn from_extraction(raw: &RawExtraction, config: &AnalysisConfig) -> Self {
        match Self::try_from_extraction(raw, config) {
            Ok(summary) => summary,
            Err(err) => {
                warn!(match_id = raw.match_id, error = %err, "Match summary unavailable");
                let (match_info, home_team, away_team) = metadata(raw);
                Self {
                    success: false,
                    error: Some(err.to_string()),
                    match_id: raw.match_id,
                    match_info,
                    home_team,
                    away_team,
                    events: EventTable::default(),
                    statistics: None,
                }
            }
        }
    }

    /// Like [`from_extraction`](Self::from_extraction), but reports the
    /// missing event feed as [`CoreError::MissingEventFeed`].
    pub fn try_from_extraction(raw: &RawExtraction, config: &AnalysisConfig) -> Result<Self> {
        let centre = raw
            .match_centre
            .as_ref()
            .filter(|c| c.success.unwrap_or(true))
            .ok_or(CoreError::MissingEventFeed)?;
        let records = centre
            .events
            .as_ref()
            .and_then(|feed| feed.records())
            .ok_or(CoreError::MissingEventFeed)?;

        let (match_info, home_team, away_team) = metadata(raw);
        let events = normalize_records(records);

        let match_stats = MatchStats {
            home: side_stats(&events, home_team.team_id),
            away: side_stats(&events, away_team.team_id),
        };
        let team_stats = comprehensive_team_stats(&events, &home_team, &away_team);
        let momentum = match (home_team.team_id, away_team.team_id) {
            (Some(h), Some(a)) => {
                MomentumTimeline::compute(&events, h, a, &config.momentum).smoothed(&config.momentum)
            }
            _ => MomentumTimeline::default(),
        };

        let statistics = SummaryStatistics {
            event_statistics: events.statistics(),
            possession: team_stats.possession.clone(),
            xg: XgSummary::resolve(raw.external.as_ref(), &match_stats),
            shot_xg: xg::shot_xgs(&events, None),
            match_stats,
            team_stats,
            momentum,
        };

        info!(
            match_id = raw.match_id,
            events = events.len(),
            home = %home_team.name,
            away = %away_team.name,
            "Built match summary"
        );

        Ok(Self {
            success: true,
            error: None,
            match_id: raw.match_id,
            match_info,
            home_team,
            away_team,
            events,
            statistics: Some(statistics),
        })
    }

    /// Parse an extraction document and build its summary.
    pub fn from_json(json: &str, config: &AnalysisConfig) -> Result<Self> {
        let raw = parse_extraction(json)?;
        Ok(Self::from_extraction(&raw, config))
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Home => &self.home_team,
            Side::Away => &self.away_team,
        }
    }

    pub fn team_id(&self, side: Side) -> Option<TeamId> {
        self.team(side).team_id
    }

    fn team_ids(&self) -> Option<(TeamId, TeamId)> {
        Some((self.home_team.team_id?, self.away_team.team_id?))
    }

    pub fn starting_xi(&self, side: Side) -> Vec<&Player> {
        self.team(side).starting_xi().collect()
    }

    pub fn substitutes(&self, side: Side) -> Vec<&Player> {
        self.team(side).substitutes().collect()
    }

    /// Goals, substitutions and cards by cumulative minute.
    pub fn key_moments(&self) -> Vec<&Event> {
        self.events.key_moments()
    }

    /// Pass network of one side, nodes labelled from the roster.
    ///
    /// With `starting_xi_only`, passers and receivers are restricted to the
    /// starters; a roster without starter flags falls back to everyone.
    pub fn pass_network(&self, side: Side, config: &PassNetworkConfig) -> PassNetwork {
        let team = self.team(side);
        let Some(team_id) = team.team_id else {
            return PassNetwork::default();
        };

        let starters: HashSet<PlayerId> = team.starting_xi().map(|p| p.player_id).collect();
        let filter = if config.starting_xi_only && !starters.is_empty() {
            Some(&starters)
        } else {
            if config.starting_xi_only {
                debug!(team_id, "No starting XI flags, pass network uses the whole squad");
            }
            None
        };

        let mut network = pass_network::build(&self.events, team_id, config.min_pass_count, filter);
        pass_network::label_nodes(&mut network, team);
        network
    }

    /// Zonal control grid. Without both team ids every cell is Contested.
    pub fn zones(&self, config: &ZonalConfig) -> Result<ZoneMatrix> {
        match self.team_ids() {
            Some((h, a)) => zonal::classify(&self.events, h, a, config.grid_cols, config.grid_rows),
            None => zonal::classify(
                &EventTable::default(),
                0,
                0,
                config.grid_cols,
                config.grid_rows,
            ),
        }
    }

    /// Momentum recomputed with a different configuration.
    pub fn momentum(&self, config: &MomentumConfig) -> MomentumTimeline {
        match self.team_ids() {
            Some((h, a)) => MomentumTimeline::compute(&self.events, h, a, config).smoothed(config),
            None => MomentumTimeline::default(),
        }
    }

    pub fn shot_xgs(&self, side: Option<Side>) -> Vec<ShotXg> {
        match side {
            None => xg::shot_xgs(&self.events, None),
            Some(side) => match self.team_id(side) {
                Some(id) => xg::shot_xgs(&self.events, Some(id)),
                None => Vec::new(),
            },
        }
    }

    pub fn xg_timeline(&self, side: Side) -> Vec<XgPoint> {
        self.team_id(side)
            .map(|id| xg::xg_timeline(&self.events, id))
            .unwrap_or_default()
    }

    pub fn player_positions(&self, side: Side, starting_xi_only: bool) -> Vec<PlayerPosition> {
        player_stats::player_positions(&self.events, self.team(side), starting_xi_only)
    }

    /// Best `top_n` players by `metric`, over one side or both rosters.
    pub fn top_performers(
        &self,
        metric: RankMetric,
        side: Option<Side>,
        top_n: usize,
    ) -> Vec<RankedPlayer> {
        let roster = self.home_team.players.iter().chain(&self.away_team.players);
        let team_id = match side {
            Some(side) => match self.team_id(side) {
                Some(id) => Some(id),
                None => return Vec::new(),
            },
            None => None,
        };
        player_stats::top_performers(&self.events, roster, metric, team_id, top_n)
    }
}

fn metadata(raw: &RawExtraction) -> (MatchInfo, Team, Team) {
    let centre = raw.match_centre.as_ref();
    let all_players = centre
        .and_then(|c| c.players.as_ref())
        .map(|p| p.all_players.as_slice())
        .unwrap_or_default();
    let team = |t: Option<&RawTeam>| {
        t.map(|t| Team::from_raw(t, all_players)).unwrap_or_default()
    };

    let match_info = centre
        .and_then(|c| c.match_info.as_ref())
        .map(|info| MatchInfo::from_raw(raw.match_id, info))
        .unwrap_or_else(|| MatchInfo {
            match_id: raw.match_id,
            ..MatchInfo::default()
        });
    (
        match_info,
        team(centre.and_then(|c| c.home_team.as_ref())),
        team(centre.and_then(|c| c.away_team.as_ref())),
    )
}

fn side_stats(events: &EventTable, team_id: Option<TeamId>) -> stats::TeamStats {
    team_id
        .map(|id| stats::aggregate(events, id))
        .unwrap_or_default()
}

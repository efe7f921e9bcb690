//! # Pass Network
//!
//! Nodes are players placed at the mean origin of their successful passes;
//! edges are undirected pass counts between player pairs.
//!
//! ## Receiver inference
//! The receiver of the pass at row `i` by team `T` is the player of the
//! first later row (table order) whose team is `T`, whatever its type.
//! Rows of the other team are skipped, not treated as interruptions.
//!
//! Computed in one reverse sweep with a "next row per team" pointer, so the
//! whole table costs O(n) instead of a forward scan per pass.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use super::mean;
use crate::events::EventTable;
use crate::models::{PlayerId, Team, TeamId};

/// Inferred receiver per table row, aligned with `table.events()`.
///
/// Rows that are not passes get `None`. A receiver may equal the passer.
pub fn infer_receivers(table: &EventTable) -> Vec<Option<PlayerId>> {
    let events = table.events();
    let mut receivers = vec![None; events.len()];
    // team -> player of the nearest later row of that team
    let mut next_by_team: HashMap<TeamId, Option<PlayerId>> = HashMap::new();

    for (i, event) in events.iter().enumerate().rev() {
        let Some(team_id) = event.team_id else {
            continue;
        };
        if event.is_pass() {
            receivers[i] = next_by_team.get(&team_id).copied().flatten();
        }
        next_by_team.insert(team_id, event.player_id);
    }
    receivers
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerNode {
    pub player_id: PlayerId,
    pub x: f64,
    pub y: f64,
    /// Successful passes that placed this node.
    pub pass_count: usize,
    pub name: Option<String>,
    pub shirt_number: Option<i64>,
    pub position: Option<String>,
}

/// Undirected edge, `player_a <= player_b` (equal for self-passes).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassConnection {
    pub player_a: PlayerId,
    pub player_b: PlayerId,
    pub pass_count: usize,
    /// Node positions of both ends, when both players have one.
    pub a_x: Option<f64>,
    pub a_y: Option<f64>,
    pub b_x: Option<f64>,
    pub b_y: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PassNetwork {
    pub team_id: TeamId,
    pub nodes: Vec<PlayerNode>,
    pub connections: Vec<PassConnection>,
    /// Successful passes considered (after the player filter).
    pub total_passes: usize,
    pub passes_with_receiver: usize,
}

impl PassNetwork {
    pub fn node(&self, player_id: PlayerId) -> Option<&PlayerNode> {
        self.nodes.iter().find(|n| n.player_id == player_id)
    }

    pub fn connection(&self, a: PlayerId, b: PlayerId) -> Option<&PassConnection> {
        let key = (a.min(b), a.max(b));
        self.connections
            .iter()
            .find(|c| (c.player_a, c.player_b) == key)
    }
}

/// Build the pass network of `team_id`.
///
/// - only successful passes contribute, to nodes and to edges
/// - `players`, when given, restricts both passer and receiver (e.g. the starting XI)
/// - a pass whose inferred receiver is the passer yields a `(p, p)` edge
/// - edges with fewer than `min_pass_count` passes are dropped
///
/// Output is ordered by player id, so repeated calls are identical.
pub fn build(
    table: &EventTable,
    team_id: TeamId,
    min_pass_count: usize,
    players: Option<&HashSet<PlayerId>>,
) -> PassNetwork {
    let receivers = infer_receivers(table);
    let allowed = |pid: PlayerId| players.map_or(true, |set| set.contains(&pid));

    let mut origins: BTreeMap<PlayerId, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    let mut pair_counts: BTreeMap<(PlayerId, PlayerId), usize> = BTreeMap::new();
    let mut total_passes = 0;
    let mut passes_with_receiver = 0;

    for (event, receiver) in table.events().iter().zip(&receivers) {
        if !(event.belongs_to(team_id) && event.is_pass() && event.is_successful()) {
            continue;
        }
        let Some(passer) = event.player_id.filter(|&p| allowed(p)) else {
            continue;
        };
        total_passes += 1;

        let entry = origins.entry(passer).or_default();
        entry.0.push(event.x_or_nan());
        entry.1.push(event.y_or_nan());

        let Some(receiver) = receiver.filter(|&r| allowed(r)) else {
            continue;
        };
        passes_with_receiver += 1;
        *pair_counts
            .entry((passer.min(receiver), passer.max(receiver)))
            .or_insert(0) += 1;
    }

    let nodes: Vec<PlayerNode> = origins
        .into_iter()
        .filter_map(|(player_id, (xs, ys))| {
            let pass_count = xs.len();
            Some(PlayerNode {
                player_id,
                x: mean(xs)?,
                y: mean(ys)?,
                pass_count,
                name: None,
                shirt_number: None,
                position: None,
            })
        })
        .collect();

    let position_of = |pid: PlayerId| {
        nodes
            .iter()
            .find(|n| n.player_id == pid)
            .map(|n| (n.x, n.y))
    };
    let connections: Vec<PassConnection> = pair_counts
        .into_iter()
        .filter(|&(_, count)| count >= min_pass_count)
        .map(|((a, b), pass_count)| {
            let pa = position_of(a);
            let pb = position_of(b);
            PassConnection {
                player_a: a,
                player_b: b,
                pass_count,
                a_x: pa.map(|p| p.0),
                a_y: pa.map(|p| p.1),
                b_x: pb.map(|p| p.0),
                b_y: pb.map(|p| p.1),
            }
        })
        .collect();

    debug!(
        team_id,
        passes = total_passes,
        with_receiver = passes_with_receiver,
        nodes = nodes.len(),
        edges = connections.len(),
        "Built pass network"
    );

    PassNetwork {
        team_id,
        nodes,
        connections,
        total_passes,
        passes_with_receiver,
    }
}

/// Attach roster details (name, shirt, position) to the nodes.
pub fn label_nodes(network: &mut PassNetwork, team: &Team) {
    for node in &mut network.nodes {
        if let Some(p) = team.player(node.player_id) {
            node.name = Some(p.name.clone());
            node.shirt_number = p.shirt_number;
            node.position = p.position.clone();
        }
    }
}

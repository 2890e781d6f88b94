//! Passing network model.

use serde::{Deserialize, Serialize};

use super::{MatchId, PlayerId, TeamSide};

/// A starter placed at their average position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkNode {
    pub player_id: PlayerId,
    pub player_name: String,
    pub team: String,
    pub x: f64,
    pub y: f64,
    /// Passes with a receiver made by this player
    pub passes: u32,
    /// `passes` relative to the busiest passer in the match
    pub pass_frac: f64,
}

/// Undirected pass link between two starters; `player_1 < player_2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkEdge {
    pub player_1: PlayerId,
    pub player_2: PlayerId,
    pub passes: u32,
    /// `passes` relative to the busiest pair in the match
    pub pass_frac: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamNetwork {
    pub team: String,
    pub side: TeamSide,
    pub nodes: Vec<NetworkNode>,
    pub edges: Vec<NetworkEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassingNetwork {
    pub match_id: MatchId,
    pub home: TeamNetwork,
    pub away: TeamNetwork,
}

impl PassingNetwork {
    pub fn side(&self, side: TeamSide) -> &TeamNetwork {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }
}

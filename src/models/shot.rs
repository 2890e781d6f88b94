//! Derived shot rows.

use serde::{Deserialize, Serialize};

use super::{MatchId, PlayerId, Point, ShotOutcome, TeamSide};

/// Marker colour for goals on every chart.
pub const GOAL_COLOR: &str = "black";

/// One row per shot or synthesized own goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    /// Source event id
    pub shot_id: String,
    pub match_id: MatchId,
    pub player_id: PlayerId,
    pub player_name: String,
    pub team: String,
    pub period: u8,
    pub minute: u32,
    pub second: u32,
    pub location: Point,
    pub xg: f64,
    pub end_location: Point,
    pub outcome: ShotOutcome,
    pub body_part: String,
    pub technique: String,
    pub possession: u32,

    /// Minute plus fractional seconds
    pub dec_time: f64,

    /// Running xG total for (match, team) up to and including this row
    pub cum_xg: f64,

    pub hover_text: String,
    pub team_side: TeamSide,
    pub shot_color: String,

    /// Synthesized from an `Own Goal Against` event
    pub own_goal: bool,
}

impl Shot {
    pub fn is_goal(&self) -> bool {
        self.outcome == ShotOutcome::Goal
    }

    pub fn is_header(&self) -> bool {
        self.body_part == "Head"
    }

    /// Strictly inside the open window `(from, to)`.
    pub fn within(&self, from: f64, to: f64) -> bool {
        self.dec_time > from && self.dec_time < to
    }
}

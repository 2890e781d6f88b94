//! Derived pass rows.

use serde::{Deserialize, Serialize};

use super::{MatchId, PlayerId, Point};

/// Passes aimed within this many degrees of straight ahead count as progressive.
pub const PROGRESSIVE_ANGLE: f64 = 90.0;

/// One row per `Pass` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pass {
    /// Source event id
    pub event_id: String,
    pub match_id: MatchId,
    pub player_id: PlayerId,
    pub player_name: String,
    pub team: String,
    pub period: u8,
    pub minute: u32,
    pub second: u32,
    pub location: Point,

    /// Absent on incomplete passes
    pub receiver_id: Option<PlayerId>,
    pub receiver_name: Option<String>,

    pub height: String,
    pub length: f64,

    /// Degrees in (-180, 180]; absent for degenerate zero-length passes
    pub angle: Option<f64>,

    pub is_cross: bool,
    pub assisted_shot_id: Option<String>,
    pub is_goal_assist: bool,
    pub possession: u32,

    /// `None` encodes a completed pass
    pub outcome: Option<String>,
}

impl Pass {
    pub fn is_completed(&self) -> bool {
        self.outcome.is_none()
    }

    pub fn is_progressive(&self) -> bool {
        self.angle
            .map(|a| a.abs() < PROGRESSIVE_ANGLE)
            .unwrap_or(false)
    }

    /// Inside the closed minute window `[from, to]`.
    pub fn within(&self, from: f64, to: f64) -> bool {
        let minute = self.minute as f64;
        minute >= from && minute <= to
    }
}

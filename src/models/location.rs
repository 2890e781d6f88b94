//! Positional rows and starting lineups.

use serde::{Deserialize, Serialize};

use super::{MatchId, PlayerId, Point, TeamSide};

/// Any open-play event carrying both a player and a coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationEvent {
    pub event_id: String,
    pub match_id: MatchId,
    pub player_id: PlayerId,
    pub player_name: String,
    pub team: String,
    pub period: u8,
    pub minute: u32,
    pub second: u32,
    pub location: Point,
    /// StatsBomb type name, e.g. "Pressure"
    pub event_type: String,
}

/// Starting elevens for one match, in lineup order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    pub match_id: MatchId,
    pub home: Vec<PlayerId>,
    pub away: Vec<PlayerId>,
}

impl Lineup {
    pub fn new(match_id: MatchId) -> Self {
        Self {
            match_id,
            ..Default::default()
        }
    }

    pub fn side(&self, side: TeamSide) -> &[PlayerId] {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn starts(&self, side: TeamSide, player_id: PlayerId) -> bool {
        self.side(side).contains(&player_id)
    }
}

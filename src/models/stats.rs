//! Derived statistics models.

use serde::{Deserialize, Serialize};

use super::{MatchId, PlayerId};

/// Per (match, player, team) passing and xG summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerMatchStats {
    pub match_id: MatchId,
    pub player_id: PlayerId,
    pub player_name: String,
    pub team: String,

    /// Total passes attempted
    pub num_passes: u32,

    /// Completed / attempted (0.0 to 1.0)
    pub pass_completion_rate: f64,

    /// Progressive / attempted (0.0 to 1.0)
    pub percent_progressive_passes: f64,

    pub average_pass_length: f64,

    /// xG of every shot the player shot, assisted or built up to
    pub xg_contribution: f64,
    pub xg_buildup: f64,
    pub xg_assist: f64,
    pub xg_shot: f64,
}

/// A top shooter in a match by total xG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPerformer {
    pub match_id: MatchId,
    pub team: String,
    pub player_id: PlayerId,
    pub player_name: String,
    pub total_xg: f64,
    pub shots: u32,
    pub max_xg: f64,
    pub goals: u32,
    pub hover_text: String,
}

/// Ordinal pass-length class for a sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PassStyle {
    VeryShort,
    Short,
    Medium,
    Long,
    VeryLong,
}

impl PassStyle {
    /// Bucket a mean pass length. Upper bounds are inclusive: 10, 20, 40, 60;
    /// anything longer is very long.
    pub fn from_mean_length(mean: f64) -> Self {
        if mean <= 10.0 {
            PassStyle::VeryShort
        } else if mean <= 20.0 {
            PassStyle::Short
        } else if mean <= 40.0 {
            PassStyle::Medium
        } else if mean <= 60.0 {
            PassStyle::Long
        } else {
            PassStyle::VeryLong
        }
    }

    /// 1-based ordinal class.
    pub fn class(&self) -> u8 {
        match self {
            PassStyle::VeryShort => 1,
            PassStyle::Short => 2,
            PassStyle::Medium => 3,
            PassStyle::Long => 4,
            PassStyle::VeryLong => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PassStyle::VeryShort => "Very Short",
            PassStyle::Short => "Short",
            PassStyle::Medium => "Medium",
            PassStyle::Long => "Long",
            PassStyle::VeryLong => "Very Long",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            PassStyle::VeryShort => "rgb(152, 252, 36)",
            PassStyle::Short => "rgb(207, 250, 30)",
            PassStyle::Medium => "rgb(248, 208, 22)",
            PassStyle::Long => "rgb(247, 144, 17)",
            PassStyle::VeryLong => "rgb(245, 88, 12)",
        }
    }
}

impl std::fmt::Display for PassStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Histogram cell: one player's passes in one direction sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassSectorBin {
    pub match_id: MatchId,
    pub team: String,
    pub player_id: PlayerId,
    pub player_name: String,

    /// 1..=16 by direction, 0 for passes without an angle
    pub pass_sector: u8,

    pub count: u32,
    pub mean_length: f64,
    pub pass_style: PassStyle,
}

/// Radar spoke grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RadarGroup {
    Possession,
    Attack,
    Defense,
    Aggression,
}

impl RadarGroup {
    pub fn color(&self) -> &'static str {
        match self {
            RadarGroup::Possession => "rgba(240, 18, 190, 1)",
            RadarGroup::Attack => "rgba(0, 116, 217, 1)",
            RadarGroup::Defense => "rgba(255, 133, 27, 1)",
            RadarGroup::Aggression => "rgba(61, 153, 112, 1)",
        }
    }
}

/// One spoke of the team performance radar, in angular order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadarAttribute {
    Dribble,
    PassLength,
    ProgressivePasses,
    Passes,
    IsCross,
    Sog,
    Xg,
    Goals,
    Pressure,
    Clearance,
    Block,
    Interception,
    Dispossessed,
    FoulCommitted,
    FoulWon,
    Headers,
}

impl RadarAttribute {
    pub const ALL: [RadarAttribute; 16] = [
        RadarAttribute::Dribble,
        RadarAttribute::PassLength,
        RadarAttribute::ProgressivePasses,
        RadarAttribute::Passes,
        RadarAttribute::IsCross,
        RadarAttribute::Sog,
        RadarAttribute::Xg,
        RadarAttribute::Goals,
        RadarAttribute::Pressure,
        RadarAttribute::Clearance,
        RadarAttribute::Block,
        RadarAttribute::Interception,
        RadarAttribute::Dispossessed,
        RadarAttribute::FoulCommitted,
        RadarAttribute::FoulWon,
        RadarAttribute::Headers,
    ];

    /// Centre angle of the spoke in degrees: 11.25 + k * 22.5.
    pub fn angle(&self) -> f64 {
        let k = Self::ALL.iter().position(|a| a == self).unwrap_or(0);
        11.25 + k as f64 * 22.5
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            RadarAttribute::Dribble => "DRIBBLES",
            RadarAttribute::PassLength => "APL",
            RadarAttribute::ProgressivePasses => "PP",
            RadarAttribute::Passes => "PASSES",
            RadarAttribute::IsCross => "CROSSES",
            RadarAttribute::Sog => "SOG",
            RadarAttribute::Xg => "xG",
            RadarAttribute::Goals => "GOALS",
            RadarAttribute::Pressure => "PRESSURE",
            RadarAttribute::Clearance => "CL",
            RadarAttribute::Block => "BLOCKS",
            RadarAttribute::Interception => "INT",
            RadarAttribute::Dispossessed => "DP",
            RadarAttribute::FoulCommitted => "FC",
            RadarAttribute::FoulWon => "FW",
            RadarAttribute::Headers => "HEADERS",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RadarAttribute::Dribble => "Dribbles",
            RadarAttribute::PassLength => "Average Pass Length",
            RadarAttribute::ProgressivePasses => "Progressive Passes",
            RadarAttribute::Passes => "Passes",
            RadarAttribute::IsCross => "Crosses",
            RadarAttribute::Sog => "Shots on Goal",
            RadarAttribute::Xg => "Expected Goals(xG)",
            RadarAttribute::Goals => "Goals",
            RadarAttribute::Pressure => "Defensive Pressure",
            RadarAttribute::Clearance => "Clearances",
            RadarAttribute::Block => "Blocks",
            RadarAttribute::Interception => "Interceptions",
            RadarAttribute::Dispossessed => "Dispossessions",
            RadarAttribute::FoulCommitted => "Fouls Committed",
            RadarAttribute::FoulWon => "Fouls Won",
            RadarAttribute::Headers => "Attacking Headers",
        }
    }

    pub fn group(&self) -> RadarGroup {
        match self {
            RadarAttribute::Dribble
            | RadarAttribute::PassLength
            | RadarAttribute::ProgressivePasses
            | RadarAttribute::Passes => RadarGroup::Possession,
            RadarAttribute::IsCross
            | RadarAttribute::Sog
            | RadarAttribute::Xg
            | RadarAttribute::Goals => RadarGroup::Attack,
            RadarAttribute::Pressure
            | RadarAttribute::Clearance
            | RadarAttribute::Block
            | RadarAttribute::Interception => RadarGroup::Defense,
            RadarAttribute::Dispossessed
            | RadarAttribute::FoulCommitted
            | RadarAttribute::FoulWon
            | RadarAttribute::Headers => RadarGroup::Aggression,
        }
    }
}

/// A radar spoke with raw values and each side's share of their sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarEntry {
    pub attribute: RadarAttribute,
    pub angle: f64,
    pub abbreviation: String,
    pub label: String,
    pub group: RadarGroup,
    pub home_value: f64,
    pub away_value: f64,
    pub home_share: f64,
    pub away_share: f64,
}

/// Team performance radar for one match window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRadar {
    pub match_id: MatchId,
    pub home_team: String,
    pub away_team: String,
    pub entries: Vec<RadarEntry>,
}

impl TeamRadar {
    pub fn entry(&self, attribute: RadarAttribute) -> Option<&RadarEntry> {
        self.entries.iter().find(|e| e.attribute == attribute)
    }
}

//! In-game event model.
//!
//! StatsBomb events carry a `type` tag and a tag-specific payload object.
//! Here each tag maps to an [`EventKind`] variant with a fixed payload
//! schema; tags without a payload we consume collapse into
//! [`EventKind::Other`].

use serde::{Deserialize, Serialize};

use super::{MatchId, PlayerId};

/// Pitch length in StatsBomb coordinates.
pub const PITCH_LENGTH: f64 = 120.0;

/// Pitch width in StatsBomb coordinates.
pub const PITCH_WIDTH: f64 = 80.0;

/// A 2-D pitch coordinate. Serialized as `[x, y]`; a trailing height
/// component (shot end locations) is accepted and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The same spot seen from the opposing end.
    pub fn mirrored(&self) -> Self {
        Self {
            x: PITCH_LENGTH - self.x,
            y: PITCH_WIDTH - self.y,
        }
    }
}

impl TryFrom<Vec<f64>> for Point {
    type Error = String;

    fn try_from(coords: Vec<f64>) -> Result<Self, Self::Error> {
        match coords.as_slice() {
            [x, y, ..] => Ok(Point::new(*x, *y)),
            _ => Err(format!(
                "expected at least 2 coordinates, got {}",
                coords.len()
            )),
        }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// `{ "id": .., "name": .. }` reference to a player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerRef {
    pub id: PlayerId,
    pub name: String,
}

impl PlayerRef {
    pub fn new(id: PlayerId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}

/// The closed set of StatsBomb event type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    StartingXi,
    HalfStart,
    HalfEnd,
    Pass,
    BallReceipt,
    Carry,
    Pressure,
    Shot,
    Dribble,
    DribbledPast,
    Duel,
    Block,
    Clearance,
    Interception,
    FoulCommitted,
    FoulWon,
    BallRecovery,
    Miscontrol,
    Dispossessed,
    GoalKeeper,
    Substitution,
    TacticalShift,
    InjuryStoppage,
    FiftyFifty,
    PlayerOff,
    PlayerOn,
    RefereeBallDrop,
    Error,
    OwnGoalFor,
    OwnGoalAgainst,
    Offside,
    Shield,
    BadBehaviour,
    CameraOn,
    CameraOff,
}

const EVENT_TYPE_NAMES: &[(EventType, &str)] = &[
    (EventType::StartingXi, "Starting XI"),
    (EventType::HalfStart, "Half Start"),
    (EventType::HalfEnd, "Half End"),
    (EventType::Pass, "Pass"),
    (EventType::BallReceipt, "Ball Receipt*"),
    (EventType::Carry, "Carry"),
    (EventType::Pressure, "Pressure"),
    (EventType::Shot, "Shot"),
    (EventType::Dribble, "Dribble"),
    (EventType::DribbledPast, "Dribbled Past"),
    (EventType::Duel, "Duel"),
    (EventType::Block, "Block"),
    (EventType::Clearance, "Clearance"),
    (EventType::Interception, "Interception"),
    (EventType::FoulCommitted, "Foul Committed"),
    (EventType::FoulWon, "Foul Won"),
    (EventType::BallRecovery, "Ball Recovery"),
    (EventType::Miscontrol, "Miscontrol"),
    (EventType::Dispossessed, "Dispossessed"),
    (EventType::GoalKeeper, "Goal Keeper"),
    (EventType::Substitution, "Substitution"),
    (EventType::TacticalShift, "Tactical Shift"),
    (EventType::InjuryStoppage, "Injury Stoppage"),
    (EventType::FiftyFifty, "50/50"),
    (EventType::PlayerOff, "Player Off"),
    (EventType::PlayerOn, "Player On"),
    (EventType::RefereeBallDrop, "Referee Ball-Drop"),
    (EventType::Error, "Error"),
    (EventType::OwnGoalFor, "Own Goal For"),
    (EventType::OwnGoalAgainst, "Own Goal Against"),
    (EventType::Offside, "Offside"),
    (EventType::Shield, "Shield"),
    (EventType::BadBehaviour, "Bad Behaviour"),
    (EventType::CameraOn, "Camera On"),
    (EventType::CameraOff, "Camera off"),
];

impl EventType {
    /// Look up a type by its StatsBomb name. `None` for unknown tags.
    pub fn from_name(name: &str) -> Option<Self> {
        EVENT_TYPE_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(t, _)| *t)
    }

    pub fn name(&self) -> &'static str {
        EVENT_TYPE_NAMES
            .iter()
            .find(|(t, _)| t == self)
            .map(|(_, n)| *n)
            .unwrap_or("Unknown")
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Shot outcomes recorded by StatsBomb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotOutcome {
    Goal,
    Saved,
    #[serde(rename = "Saved Off T")]
    SavedOffTarget,
    #[serde(rename = "Saved to Post")]
    SavedToPost,
    Post,
    Blocked,
    #[serde(rename = "Off T")]
    OffTarget,
    Wayward,
    Missed,
}

impl ShotOutcome {
    pub fn from_name(name: &str) -> Option<Self> {
        let outcome = match name {
            "Goal" => ShotOutcome::Goal,
            "Saved" => ShotOutcome::Saved,
            "Saved Off T" => ShotOutcome::SavedOffTarget,
            "Saved to Post" | "Saved To Post" => ShotOutcome::SavedToPost,
            "Post" => ShotOutcome::Post,
            "Blocked" => ShotOutcome::Blocked,
            "Off T" => ShotOutcome::OffTarget,
            "Wayward" => ShotOutcome::Wayward,
            "Missed" => ShotOutcome::Missed,
            _ => return None,
        };
        Some(outcome)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShotOutcome::Goal => "Goal",
            ShotOutcome::Saved => "Saved",
            ShotOutcome::SavedOffTarget => "Saved Off T",
            ShotOutcome::SavedToPost => "Saved to Post",
            ShotOutcome::Post => "Post",
            ShotOutcome::Blocked => "Blocked",
            ShotOutcome::OffTarget => "Off T",
            ShotOutcome::Wayward => "Wayward",
            ShotOutcome::Missed => "Missed",
        }
    }

    /// Goal, post or saved: counted as a shot on goal by the radar.
    pub fn is_on_goal(&self) -> bool {
        matches!(
            self,
            ShotOutcome::Goal | ShotOutcome::Post | ShotOutcome::Saved
        )
    }
}

impl std::fmt::Display for ShotOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Payload of a `Shot` event.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotDetail {
    pub statsbomb_xg: f64,
    pub end_location: Point,
    pub outcome: ShotOutcome,
    pub body_part: String,
    pub technique: String,
}

/// Payload of a `Pass` event.
#[derive(Debug, Clone, PartialEq)]
pub struct PassDetail {
    /// Absent on incomplete passes
    pub recipient: Option<PlayerRef>,
    pub height: String,
    pub length: f64,
    /// Radians, as recorded
    pub angle: Option<f64>,
    pub cross: bool,
    pub assisted_shot_id: Option<String>,
    pub goal_assist: bool,
    /// `None` means the pass was completed
    pub outcome: Option<String>,
}

/// Payload of a `Starting XI` event.
#[derive(Debug, Clone, PartialEq)]
pub struct Tactics {
    pub formation: Option<u32>,
    pub lineup: Vec<PlayerRef>,
}

/// Type tag plus its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Shot(ShotDetail),
    Pass(PassDetail),
    StartingXi(Tactics),
    OwnGoalAgainst,
    Other(EventType),
}

impl EventKind {
    pub fn event_type(&self) -> EventType {
        match self {
            EventKind::Shot(_) => EventType::Shot,
            EventKind::Pass(_) => EventType::Pass,
            EventKind::StartingXi(_) => EventType::StartingXi,
            EventKind::OwnGoalAgainst => EventType::OwnGoalAgainst,
            EventKind::Other(t) => *t,
        }
    }
}

/// One in-game action, tagged with the match it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Source event UUID
    pub id: String,
    pub index: u64,
    pub match_id: MatchId,
    pub period: u8,
    pub minute: u32,
    pub second: u32,
    pub kind: EventKind,
    pub team: String,
    pub possession_team: String,
    /// Absent for team-level events
    pub player: Option<PlayerRef>,
    pub location: Option<Point>,
    pub play_pattern: String,
    pub possession: u32,
}

impl Event {
    pub fn event_type(&self) -> EventType {
        self.kind.event_type()
    }

    /// Minute plus fractional seconds.
    pub fn decimal_time(&self) -> f64 {
        self.minute as f64 + self.second as f64 / 60.0
    }

    /// Whether the event belongs to a set-piece restart phase.
    pub fn is_restart_phase(&self) -> bool {
        matches!(self.play_pattern.as_str(), "From Free Kick" | "From Corner")
    }
}

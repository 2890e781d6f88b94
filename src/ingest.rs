//! Event store.
//!
//! Reads one StatsBomb event file per catalog match, validates each record
//! into a typed [`Event`], tags it with its match id and keeps only events
//! inside the regulation plus stoppage window (`minute < max_minute`).

use std::collections::HashMap;
use std::ops::Range;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::catalog::MatchCatalog;
use crate::config::DatasetConfig;
use crate::models::{
    Event, EventKind, EventType, MatchId, PassDetail, PlayerRef, Point, ShotDetail, ShotOutcome,
    Tactics,
};
use crate::storage::{read_json_array, StorageConfig, StorageError};

/// `{ "id": .., "name": .. }` where only the name is kept.
#[derive(Debug, Clone, Deserialize)]
pub struct RawName {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawShot {
    pub statsbomb_xg: f64,
    pub end_location: Point,
    pub outcome: RawName,
    #[serde(default)]
    pub body_part: Option<RawName>,
    #[serde(default)]
    pub technique: Option<RawName>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPass {
    #[serde(default)]
    pub recipient: Option<PlayerRef>,
    pub length: f64,
    #[serde(default)]
    pub angle: Option<f64>,
    #[serde(default)]
    pub height: Option<RawName>,
    #[serde(default)]
    pub cross: bool,
    #[serde(default)]
    pub assisted_shot_id: Option<String>,
    #[serde(default)]
    pub goal_assist: bool,
    #[serde(default)]
    pub outcome: Option<RawName>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLineupEntry {
    pub player: PlayerRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTactics {
    #[serde(default)]
    pub formation: Option<u32>,
    #[serde(default)]
    pub lineup: Vec<RawLineupEntry>,
}

/// An event record as it appears in an event file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    pub id: String,
    #[serde(default)]
    pub index: u64,
    pub period: u8,
    pub minute: u32,
    pub second: u32,
    #[serde(rename = "type")]
    pub event_type: RawName,
    pub team: RawName,
    pub possession_team: RawName,
    #[serde(default)]
    pub possession: u32,
    pub play_pattern: RawName,
    #[serde(default)]
    pub player: Option<PlayerRef>,
    #[serde(default)]
    pub location: Option<Point>,
    #[serde(default)]
    pub shot: Option<RawShot>,
    #[serde(default)]
    pub pass: Option<RawPass>,
    #[serde(default)]
    pub tactics: Option<RawTactics>,
}

fn name_or_unknown(name: Option<RawName>) -> String {
    name.map(|n| n.name).unwrap_or_else(|| "Unknown".to_string())
}

impl RawEvent {
    fn malformed(&self, reason: impl Into<String>) -> StorageError {
        StorageError::MalformedRecord {
            id: self.id.clone(),
            reason: reason.into(),
        }
    }

    fn kind(&mut self) -> Result<EventKind, StorageError> {
        let event_type = EventType::from_name(&self.event_type.name).ok_or_else(|| {
            StorageError::UnknownEventType {
                event_id: self.id.clone(),
                name: self.event_type.name.clone(),
            }
        })?;

        let kind = match event_type {
            EventType::Shot => {
                let shot = self
                    .shot
                    .take()
                    .ok_or_else(|| self.malformed("Shot event without shot payload"))?;
                let outcome = ShotOutcome::from_name(&shot.outcome.name).ok_or_else(|| {
                    self.malformed(format!("unknown shot outcome '{}'", shot.outcome.name))
                })?;
                EventKind::Shot(ShotDetail {
                    statsbomb_xg: shot.statsbomb_xg,
                    end_location: shot.end_location,
                    outcome,
                    body_part: name_or_unknown(shot.body_part),
                    technique: name_or_unknown(shot.technique),
                })
            }
            EventType::Pass => {
                let pass = self
                    .pass
                    .take()
                    .ok_or_else(|| self.malformed("Pass event without pass payload"))?;
                EventKind::Pass(PassDetail {
                    recipient: pass.recipient,
                    height: name_or_unknown(pass.height),
                    length: pass.length,
                    angle: pass.angle,
                    cross: pass.cross,
                    assisted_shot_id: pass.assisted_shot_id,
                    goal_assist: pass.goal_assist,
                    outcome: pass.outcome.map(|o| o.name),
                })
            }
            EventType::StartingXi => {
                let tactics = self
                    .tactics
                    .take()
                    .ok_or_else(|| self.malformed("Starting XI event without tactics payload"))?;
                EventKind::StartingXi(Tactics {
                    formation: tactics.formation,
                    lineup: tactics.lineup.into_iter().map(|e| e.player).collect(),
                })
            }
            EventType::OwnGoalAgainst => EventKind::OwnGoalAgainst,
            other => EventKind::Other(other),
        };

        Ok(kind)
    }

    /// Validate into a typed event belonging to `match_id`.
    pub fn into_event(mut self, match_id: MatchId) -> Result<Event, StorageError> {
        let kind = self.kind()?;

        Ok(Event {
            id: self.id,
            index: self.index,
            match_id,
            period: self.period,
            minute: self.minute,
            second: self.second,
            kind,
            team: self.team.name,
            possession_team: self.possession_team.name,
            player: self.player,
            location: self.location,
            play_pattern: self.play_pattern.name,
            possession: self.possession,
        })
    }
}

/// Read and validate one match's event file, keeping `minute < max_minute`.
pub fn load_match_events(
    path: &Path,
    match_id: MatchId,
    max_minute: u32,
) -> Result<Vec<Event>, StorageError> {
    let raw: Vec<RawEvent> = read_json_array(path)?;
    let total = raw.len();

    let events = raw
        .into_iter()
        .filter(|r| r.minute < max_minute)
        .map(|r| r.into_event(match_id))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "Match {}: kept {} of {} events",
        match_id,
        events.len(),
        total
    );
    Ok(events)
}

/// The unified event log, grouped by match in ascending id order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
    ranges: HashMap<MatchId, Range<usize>>,
}

impl EventLog {
    /// Load every catalog match's events. A missing file is fatal.
    pub fn load(
        storage: &StorageConfig,
        catalog: &MatchCatalog,
        dataset: &DatasetConfig,
    ) -> Result<Self, StorageError> {
        let mut events = Vec::new();

        for match_id in catalog.ids() {
            let path = storage.event_path(match_id);
            events.extend(load_match_events(&path, match_id, dataset.max_minute)?);
        }

        let log = Self::from_events(events, dataset.max_minute);
        info!(
            "Loaded {} events across {} matches",
            log.len(),
            log.ranges.len()
        );
        Ok(log)
    }

    /// Build from already-typed events. Events at or past `max_minute` are
    /// dropped; per-match order is preserved.
    pub fn from_events(events: Vec<Event>, max_minute: u32) -> Self {
        let mut events: Vec<Event> = events
            .into_iter()
            .filter(|e| e.minute < max_minute)
            .collect();
        events.sort_by_key(|e| e.match_id);

        let mut ranges: HashMap<MatchId, Range<usize>> = HashMap::new();
        for (i, event) in events.iter().enumerate() {
            ranges
                .entry(event.match_id)
                .and_modify(|r| r.end = i + 1)
                .or_insert(i..i + 1);
        }

        Self { events, ranges }
    }

    /// Every event, grouped by match id.
    pub fn all(&self) -> &[Event] {
        &self.events
    }

    /// Events of one match in source order; empty for unknown matches.
    pub fn for_match(&self, match_id: MatchId) -> &[Event] {
        self.ranges
            .get(&match_id)
            .map(|r| &self.events[r.clone()])
            .unwrap_or(&[])
    }

    /// Latest minute recorded for a match.
    pub fn last_minute(&self, match_id: MatchId) -> Option<u32> {
        self.for_match(match_id).iter().map(|e| e.minute).max()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

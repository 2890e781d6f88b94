//! Match catalog loading.
//!
//! Reads the StatsBomb match list, flattens nested team objects, coerces
//! ids and scores to integers and assigns competition stages by position
//! in the id-sorted list. The stage layout encodes the fixed tournament
//! bracket; a catalog whose size does not match it is rejected.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::config::DatasetConfig;
use crate::models::{Match, MatchId, Stage, TeamSide};
use crate::storage::{read_json_array, StorageConfig, StorageError};

/// Errors raised while building the catalog. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Match {match_id}: invalid {field} '{value}'")]
    InvalidField {
        match_id: String,
        field: &'static str,
        value: String,
    },

    #[error("Stage layout expects {expected} matches, catalog has {found}")]
    StageLayout { expected: usize, found: usize },

    #[error("Duplicate match id {0}")]
    DuplicateMatch(MatchId),
}

/// A number that may arrive as a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IntLike {
    Int(u64),
    Float(f64),
    Text(String),
}

impl IntLike {
    pub fn to_u64(&self) -> Option<u64> {
        match self {
            IntLike::Int(n) => Some(*n),
            IntLike::Float(f) if f.fract() == 0.0 && *f >= 0.0 => Some(*f as u64),
            IntLike::Float(_) => None,
            IntLike::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl std::fmt::Display for IntLike {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntLike::Int(n) => write!(f, "{}", n),
            IntLike::Float(x) => write!(f, "{}", x),
            IntLike::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawHomeTeam {
    pub home_team_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAwayTeam {
    pub away_team_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawNamed {
    pub name: String,
}

/// A match record as it appears in the source file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMatch {
    pub match_id: IntLike,
    pub match_date: String,
    pub home_team: RawHomeTeam,
    pub away_team: RawAwayTeam,
    pub home_score: IntLike,
    pub away_score: IntLike,
    #[serde(default)]
    pub stadium_name: Option<String>,
    #[serde(default)]
    pub stadium: Option<RawNamed>,
    #[serde(default)]
    pub referee_name: Option<String>,
    #[serde(default)]
    pub referee: Option<RawNamed>,
}

impl RawMatch {
    fn field_u64(&self, field: &'static str, value: &IntLike) -> Result<u64, CatalogError> {
        value.to_u64().ok_or_else(|| CatalogError::InvalidField {
            match_id: self.match_id.to_string(),
            field,
            value: value.to_string(),
        })
    }

    fn field_u32(&self, field: &'static str, value: &IntLike) -> Result<u32, CatalogError> {
        let n = self.field_u64(field, value)?;
        u32::try_from(n).map_err(|_| CatalogError::InvalidField {
            match_id: self.match_id.to_string(),
            field,
            value: value.to_string(),
        })
    }

    fn date(&self) -> Result<NaiveDate, CatalogError> {
        // Some exports carry a full timestamp; only the date part matters.
        let day = self.match_date.get(..10).unwrap_or(&self.match_date);
        NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| CatalogError::InvalidField {
            match_id: self.match_id.to_string(),
            field: "match_date",
            value: self.match_date.clone(),
        })
    }

    /// Normalize into a [`Match`] played at `stage`.
    pub fn normalize(&self, stage: Stage) -> Result<Match, CatalogError> {
        let match_id = self.field_u64("match_id", &self.match_id)?;
        let home_score = self.field_u32("home_score", &self.home_score)?;
        let away_score = self.field_u32("away_score", &self.away_score)?;

        let mut m = Match::new(
            match_id,
            self.home_team.home_team_name.clone(),
            self.away_team.away_team_name.clone(),
            home_score,
            away_score,
            self.date()?,
            stage,
        );

        let stadium = self
            .stadium_name
            .clone()
            .or_else(|| self.stadium.as_ref().map(|s| s.name.clone()));
        if let Some(stadium) = stadium {
            m = m.with_stadium(stadium);
        }

        let referee = self
            .referee_name
            .clone()
            .or_else(|| self.referee.as_ref().map(|r| r.name.clone()));
        if let Some(referee) = referee {
            m = m.with_referee(referee);
        }

        Ok(m)
    }
}

/// Expand per-stage counts into one stage label per position.
pub fn assign_stages(
    match_count: usize,
    stage_counts: &[usize; Stage::COUNT],
) -> Result<Vec<Stage>, CatalogError> {
    let expected: usize = stage_counts.iter().sum();
    if expected != match_count {
        return Err(CatalogError::StageLayout {
            expected,
            found: match_count,
        });
    }

    Ok(Stage::ALL
        .iter()
        .zip(stage_counts.iter())
        .flat_map(|(stage, n)| std::iter::repeat(*stage).take(*n))
        .collect())
}

/// Normalized match metadata, sorted by match id, with an id lookup.
#[derive(Debug, Clone, Default)]
pub struct MatchCatalog {
    matches: Vec<Match>,
    index: HashMap<MatchId, usize>,
}

impl MatchCatalog {
    /// Load and normalize the catalog file.
    pub fn load(storage: &StorageConfig, dataset: &DatasetConfig) -> Result<Self, CatalogError> {
        let path = storage.matches_path();
        let raw: Vec<RawMatch> = read_json_array(&path)?;
        let catalog = Self::from_raw(raw, &dataset.stage_counts)?;
        info!("Loaded {} matches from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    /// Normalize raw records, assigning stages by id order.
    pub fn from_raw(
        raw: Vec<RawMatch>,
        stage_counts: &[usize; Stage::COUNT],
    ) -> Result<Self, CatalogError> {
        let mut keyed = raw
            .into_iter()
            .map(|r| Ok((r.field_u64("match_id", &r.match_id)?, r)))
            .collect::<Result<Vec<_>, CatalogError>>()?;
        keyed.sort_by_key(|(id, _)| *id);

        let stages = assign_stages(keyed.len(), stage_counts)?;
        let matches = keyed
            .iter()
            .zip(stages)
            .map(|((_, r), stage)| r.normalize(stage))
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_matches(matches)
    }

    /// Build from already-normalized matches.
    pub fn from_matches(mut matches: Vec<Match>) -> Result<Self, CatalogError> {
        matches.sort_by_key(|m| m.match_id);

        let mut index = HashMap::with_capacity(matches.len());
        for (i, m) in matches.iter().enumerate() {
            if index.insert(m.match_id, i).is_some() {
                return Err(CatalogError::DuplicateMatch(m.match_id));
            }
        }

        Ok(Self { matches, index })
    }

    pub fn get(&self, match_id: MatchId) -> Option<&Match> {
        self.index.get(&match_id).map(|&i| &self.matches[i])
    }

    pub fn contains(&self, match_id: MatchId) -> bool {
        self.index.contains_key(&match_id)
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Matches in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = MatchId> + '_ {
        self.matches.iter().map(|m| m.match_id)
    }

    /// Matches in kick-off date order, id as tie-break.
    pub fn by_date(&self) -> Vec<&Match> {
        let mut sorted: Vec<&Match> = self.matches.iter().collect();
        sorted.sort_by(|a, b| {
            a.match_date
                .cmp(&b.match_date)
                .then_with(|| a.match_id.cmp(&b.match_id))
        });
        sorted
    }

    /// Side `team` played on in `match_id`, if both resolve.
    pub fn side_of(&self, match_id: MatchId, team: &str) -> Option<TeamSide> {
        self.get(match_id).and_then(|m| m.side_of(team))
    }
}

//! Derived table computation.
//!
//! Turns the unified event log into typed tables:
//! - Shots (own goals merged in) with running xG
//! - Passes with angles in degrees
//! - Per-player passing and xG summaries
//! - Top performers by xG
//! - Pass-direction sector histograms
//! - Open-play locations and starting lineups
//! - Passing networks and team radar statistics
//!
//! Every function here is pure: the same input always yields the same rows
//! in the same order.

mod locations;
mod network;
mod pass_sectors;
mod passes;
mod player_stats;
mod radar;
mod shots;
mod top_performers;

pub use locations::*;
pub use network::*;
pub use pass_sectors::*;
pub use passes::*;
pub use player_stats::*;
pub use radar::*;
pub use shots::*;
pub use top_performers::*;

use thiserror::Error;
use tracing::info;

use crate::catalog::MatchCatalog;
use crate::ingest::EventLog;
use crate::models::{
    Lineup, LocationEvent, MatchId, Pass, PassSectorBin, PassingNetwork, PlayerId,
    PlayerMatchStats, Shot, TeamSide, TopPerformer,
};

/// Integrity failures found while deriving tables.
#[derive(Debug, Error)]
pub enum DeriveError {
    #[error("Unknown match id {0}")]
    UnknownMatch(MatchId),

    #[error("Match {match_id}: team '{team}' is neither home nor away")]
    UnknownTeam { match_id: MatchId, team: String },

    #[error("Match {match_id}: more than one Starting XI for '{team}'")]
    DuplicateLineup { match_id: MatchId, team: String },

    #[error("Match {match_id}: player {player_id} has no average position")]
    DanglingPlayer { match_id: MatchId, player_id: PlayerId },

    #[error("Event {event_id}: missing {field}")]
    MissingField {
        event_id: String,
        field: &'static str,
    },
}

/// Resolve which side `team` played on in `match_id`.
pub fn resolve_side(
    catalog: &MatchCatalog,
    match_id: MatchId,
    team: &str,
) -> Result<TeamSide, DeriveError> {
    let m = catalog
        .get(match_id)
        .ok_or(DeriveError::UnknownMatch(match_id))?;
    m.side_of(team).ok_or_else(|| DeriveError::UnknownTeam {
        match_id,
        team: team.to_string(),
    })
}

/// Number of top performers kept per match.
pub const TOP_PERFORMERS_PER_MATCH: usize = 3;

/// All tables computed once at startup.
#[derive(Debug, Clone, Default)]
pub struct DerivedTables {
    pub shots: Vec<Shot>,
    pub passes: Vec<Pass>,
    pub player_stats: Vec<PlayerMatchStats>,
    pub top_performers: Vec<TopPerformer>,
    pub pass_sectors: Vec<PassSectorBin>,
    pub locations: Vec<LocationEvent>,
    pub lineups: Vec<Lineup>,
    pub networks: Vec<PassingNetwork>,
}

impl DerivedTables {
    /// Run every derivation over the event log.
    pub fn build(catalog: &MatchCatalog, events: &EventLog) -> Result<Self, DeriveError> {
        let all = events.all();

        let shots = extract_shots(all, catalog)?;
        let passes = extract_passes(all)?;
        let player_stats = compute_player_match_stats(&shots, &passes);
        let top_performers = compute_top_performers(&shots, TOP_PERFORMERS_PER_MATCH);
        let pass_sectors = compute_pass_sectors(&passes);
        let locations = extract_locations(all);
        let lineups = extract_lineups(all, catalog)?;
        let networks = compute_passing_networks(catalog, &passes, &locations, &lineups)?;

        info!(
            "Derived {} shots, {} passes, {} player rows, {} location events",
            shots.len(),
            passes.len(),
            player_stats.len(),
            locations.len()
        );

        Ok(Self {
            shots,
            passes,
            player_stats,
            top_performers,
            pass_sectors,
            locations,
            lineups,
            networks,
        })
    }

    pub fn shots_for(&self, match_id: MatchId) -> impl Iterator<Item = &Shot> {
        self.shots.iter().filter(move |s| s.match_id == match_id)
    }

    pub fn passes_for(&self, match_id: MatchId) -> impl Iterator<Item = &Pass> {
        self.passes.iter().filter(move |p| p.match_id == match_id)
    }

    pub fn player_stats_for(&self, match_id: MatchId) -> impl Iterator<Item = &PlayerMatchStats> {
        self.player_stats
            .iter()
            .filter(move |s| s.match_id == match_id)
    }

    pub fn top_performers_for(&self, match_id: MatchId) -> impl Iterator<Item = &TopPerformer> {
        self.top_performers
            .iter()
            .filter(move |t| t.match_id == match_id)
    }

    pub fn pass_sectors_for(&self, match_id: MatchId) -> impl Iterator<Item = &PassSectorBin> {
        self.pass_sectors
            .iter()
            .filter(move |b| b.match_id == match_id)
    }

    pub fn lineup(&self, match_id: MatchId) -> Option<&Lineup> {
        self.lineups.iter().find(|l| l.match_id == match_id)
    }

    pub fn network(&self, match_id: MatchId) -> Option<&PassingNetwork> {
        self.networks.iter().find(|n| n.match_id == match_id)
    }
}

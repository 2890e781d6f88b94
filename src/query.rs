//! Request-time views over the dashboard context.
//!
//! Every view is a filtered, read-only slice of the derived tables. An
//! unknown match is an error; an empty window or an unknown player is not,
//! and yields empty collections.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculate::compute_team_radar;
use crate::context::DashboardContext;
use crate::models::{
    Match, MatchId, PassSectorBin, PassingNetwork, PlayerId, PlayerMatchStats, Shot, Stage,
    TeamRadar, TeamSide, TopPerformer,
};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Match {0} not found")]
    UnknownMatch(MatchId),

    #[error("Invalid time range: from {from} is after to {to}")]
    InvalidRange { from: f64, to: f64 },
}

/// A minute window selected on the xG timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: f64,
    pub to: f64,
}

impl TimeRange {
    pub fn new(from: f64, to: f64) -> Result<Self, QueryError> {
        if from.is_nan() || to.is_nan() || from > to {
            return Err(QueryError::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// Build from optional bounds. No bounds means the whole match; a single
    /// bound leaves the other side open.
    pub fn from_bounds(from: Option<f64>, to: Option<f64>) -> Result<Option<Self>, QueryError> {
        match (from, to) {
            (None, None) => Ok(None),
            (from, to) => Self::new(from.unwrap_or(0.0), to.unwrap_or(f64::INFINITY)).map(Some),
        }
    }

    fn bounds(range: Option<Self>) -> Option<(f64, f64)> {
        range.map(|r| (r.from, r.to))
    }
}

fn find_match(ctx: &DashboardContext, match_id: MatchId) -> Result<&Match, QueryError> {
    ctx.match_info(match_id)
        .ok_or(QueryError::UnknownMatch(match_id))
}

// ── Match header ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct MatchHeader {
    pub match_id: MatchId,
    /// e.g. "FRANCE 4-2 CROATIA"
    pub header: String,
    pub home: String,
    pub away: String,
    pub home_score: u32,
    pub away_score: u32,
    pub display_date: String,
    pub stage: Stage,
    pub stadium: Option<String>,
    pub referee: Option<String>,
    pub description: String,
}

pub fn match_header(ctx: &DashboardContext, match_id: MatchId) -> Result<MatchHeader, QueryError> {
    let m = find_match(ctx, match_id)?;
    Ok(MatchHeader {
        match_id,
        header: m.header(),
        home: m.home.clone(),
        away: m.away.clone(),
        home_score: m.home_score,
        away_score: m.away_score,
        display_date: m.display_date.clone(),
        stage: m.stage,
        stadium: m.stadium.clone(),
        referee: m.referee.clone(),
        description: m.description.clone(),
    })
}

/// Catalog in kick-off order, as shown in the match picker.
pub fn match_list(ctx: &DashboardContext) -> Vec<&Match> {
    ctx.catalog.by_date()
}

// ── Shots ─────────────────────────────────────────────────────────

/// Shots of a match, optionally restricted to the open window `(from, to)`.
pub fn shots_in_window(
    ctx: &DashboardContext,
    match_id: MatchId,
    range: Option<TimeRange>,
) -> Result<Vec<Shot>, QueryError> {
    find_match(ctx, match_id)?;
    Ok(ctx
        .tables
        .shots_for(match_id)
        .filter(|s| range.map_or(true, |r| s.within(r.from, r.to)))
        .cloned()
        .collect())
}

// ── xG timeline ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XgPoint {
    pub minute: f64,
    pub cum_xg: f64,
    pub hover_text: Option<String>,
}

/// Step series of one side's running xG.
#[derive(Debug, Clone, Serialize)]
pub struct XgSeries {
    pub team: String,
    pub side: TeamSide,
    pub color: String,
    pub points: Vec<XgPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalMarker {
    pub team: String,
    pub side: TeamSide,
    pub minute: f64,
    pub cum_xg: f64,
    pub own_goal: bool,
    pub hover_text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct XgTimeline {
    pub match_id: MatchId,
    pub home: XgSeries,
    pub away: XgSeries,
    pub goals: Vec<GoalMarker>,
    /// Final running xG per side, shown next to the score
    pub home_total_xg: f64,
    pub away_total_xg: f64,
    pub top_performers: Vec<TopPerformer>,
}

fn xg_series(m: &Match, side: TeamSide, shots: &[&Shot], end_minute: f64) -> XgSeries {
    let mut points = vec![XgPoint {
        minute: 0.0,
        cum_xg: 0.0,
        hover_text: None,
    }];
    let mut last = 0.0;
    for shot in shots.iter().filter(|s| s.team_side == side) {
        points.push(XgPoint {
            minute: shot.dec_time,
            cum_xg: shot.cum_xg,
            hover_text: Some(shot.hover_text.clone()),
        });
        last = shot.cum_xg;
    }
    points.push(XgPoint {
        minute: end_minute,
        cum_xg: last,
        hover_text: None,
    });

    XgSeries {
        team: m.team(side).to_string(),
        side,
        color: side.color().to_string(),
        points,
    }
}

pub fn xg_timeline(ctx: &DashboardContext, match_id: MatchId) -> Result<XgTimeline, QueryError> {
    let m = find_match(ctx, match_id)?;
    let shots: Vec<&Shot> = ctx.tables.shots_for(match_id).collect();
    let end_minute = ctx.events.last_minute(match_id).unwrap_or(0) as f64 + 1.0;

    let home = xg_series(m, TeamSide::Home, &shots, end_minute);
    let away = xg_series(m, TeamSide::Away, &shots, end_minute);

    let goals = shots
        .iter()
        .filter(|s| s.is_goal())
        .map(|s| GoalMarker {
            team: s.team.clone(),
            side: s.team_side,
            minute: s.dec_time,
            cum_xg: s.cum_xg,
            own_goal: s.own_goal,
            hover_text: s.hover_text.clone(),
        })
        .collect();

    let max_for = |side: TeamSide| {
        shots
            .iter()
            .filter(|s| s.team_side == side)
            .map(|s| s.cum_xg)
            .fold(0.0, f64::max)
    };

    Ok(XgTimeline {
        match_id,
        home_total_xg: max_for(TeamSide::Home),
        away_total_xg: max_for(TeamSide::Away),
        home,
        away,
        goals,
        top_performers: ctx.tables.top_performers_for(match_id).cloned().collect(),
    })
}

// ── Radar & network ───────────────────────────────────────────────

pub fn team_radar(
    ctx: &DashboardContext,
    match_id: MatchId,
    range: Option<TimeRange>,
) -> Result<TeamRadar, QueryError> {
    let m = find_match(ctx, match_id)?;

    Ok(compute_team_radar(
        m,
        ctx.events.for_match(match_id),
        &ctx.tables.passes,
        &ctx.tables.shots,
        TimeRange::bounds(range),
    ))
}

pub fn passing_network(
    ctx: &DashboardContext,
    match_id: MatchId,
) -> Result<&PassingNetwork, QueryError> {
    find_match(ctx, match_id)?;
    ctx.tables
        .network(match_id)
        .ok_or(QueryError::UnknownMatch(match_id))
}

// ── Players ───────────────────────────────────────────────────────

pub fn player_stats(
    ctx: &DashboardContext,
    match_id: MatchId,
) -> Result<Vec<&PlayerMatchStats>, QueryError> {
    find_match(ctx, match_id)?;
    Ok(ctx.tables.player_stats_for(match_id).collect())
}

/// Pass-direction histogram and summary row for one player.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlayerProfile {
    pub match_id: MatchId,
    pub player_id: Option<PlayerId>,
    pub player_name: Option<String>,
    pub team: Option<String>,
    pub sectors: Vec<PassSectorBin>,
    pub stats: Option<PlayerMatchStats>,
}

/// Profile of `player_id`, or of the match's top performer when no player
/// is given. Unknown players yield an empty profile.
pub fn player_profile(
    ctx: &DashboardContext,
    match_id: MatchId,
    player_id: Option<PlayerId>,
) -> Result<PlayerProfile, QueryError> {
    find_match(ctx, match_id)?;

    let selected = player_id.or_else(|| {
        ctx.tables
            .top_performers_for(match_id)
            .next()
            .map(|t| t.player_id)
    });
    let Some(player_id) = selected else {
        return Ok(PlayerProfile {
            match_id,
            ..Default::default()
        });
    };

    let sectors: Vec<PassSectorBin> = ctx
        .tables
        .pass_sectors_for(match_id)
        .filter(|b| b.player_id == player_id)
        .cloned()
        .collect();

    // A player can own two rows when an own goal is credited to the
    // opponents; the one with their passes is the profile row.
    let stats = ctx
        .tables
        .player_stats_for(match_id)
        .filter(|s| s.player_id == player_id)
        .max_by_key(|s| s.num_passes)
        .cloned();

    if sectors.is_empty() && stats.is_none() {
        return Ok(PlayerProfile {
            match_id,
            ..Default::default()
        });
    }

    Ok(PlayerProfile {
        match_id,
        player_id: Some(player_id),
        player_name: stats.as_ref().map(|s| s.player_name.clone()),
        team: stats.as_ref().map(|s| s.team.clone()),
        sectors,
        stats,
    })
}

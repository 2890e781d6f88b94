use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{MatchId, PassingNetwork, PlayerId, Shot, TeamRadar};
use crate::query::{self, PlayerProfile, TimeRange, XgTimeline};

/// Optional minute window, as selected on the xG timeline.
#[derive(Debug, Deserialize)]
pub struct WindowParams {
    pub from: Option<f64>,
    pub to: Option<f64>,
}

impl WindowParams {
    fn range(&self) -> Result<Option<TimeRange>, ApiError> {
        Ok(TimeRange::from_bounds(self.from, self.to)?)
    }
}

pub async fn xg_timeline(
    State(state): State<AppState>,
    Path(match_id): Path<MatchId>,
) -> Result<Json<XgTimeline>, ApiError> {
    Ok(Json(query::xg_timeline(&state.context, match_id)?))
}

#[derive(Debug, Serialize)]
pub struct ShotsResponse {
    pub match_id: MatchId,
    pub range: Option<TimeRange>,
    pub total: usize,
    pub shots: Vec<Shot>,
}

pub async fn shots(
    State(state): State<AppState>,
    Path(match_id): Path<MatchId>,
    Query(params): Query<WindowParams>,
) -> Result<Json<ShotsResponse>, ApiError> {
    let range = params.range()?;
    let shots = query::shots_in_window(&state.context, match_id, range)?;

    Ok(Json(ShotsResponse {
        match_id,
        // Infinite bounds have no JSON form
        range: range.filter(|r| r.to.is_finite()),
        total: shots.len(),
        shots,
    }))
}

pub async fn radar(
    State(state): State<AppState>,
    Path(match_id): Path<MatchId>,
    Query(params): Query<WindowParams>,
) -> Result<Json<TeamRadar>, ApiError> {
    let range = params.range()?;
    Ok(Json(query::team_radar(&state.context, match_id, range)?))
}

pub async fn network(
    State(state): State<AppState>,
    Path(match_id): Path<MatchId>,
) -> Result<Json<PassingNetwork>, ApiError> {
    let network = query::passing_network(&state.context, match_id)?;
    Ok(Json(network.clone()))
}

#[derive(Debug, Deserialize)]
pub struct ProfileParams {
    pub player_id: Option<PlayerId>,
}

pub async fn profile(
    State(state): State<AppState>,
    Path(match_id): Path<MatchId>,
    Query(params): Query<ProfileParams>,
) -> Result<Json<PlayerProfile>, ApiError> {
    Ok(Json(query::player_profile(
        &state.context,
        match_id,
        params.player_id,
    )?))
}

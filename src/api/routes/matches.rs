use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{ApiError, Pagination, PaginationMeta};
use crate::models::{Match, MatchId, PlayerMatchStats};
use crate::query::{self, MatchHeader};

// ── Health ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub matches: usize,
    pub events: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        matches: state.context.catalog.len(),
        events: state.context.events.len(),
    })
}

// ── Catalog ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MatchListResponse {
    pub matches: Vec<Match>,
    pub total: usize,
}

pub async fn list_matches(State(state): State<AppState>) -> Json<MatchListResponse> {
    let matches: Vec<Match> = query::match_list(&state.context)
        .into_iter()
        .cloned()
        .collect();
    Json(MatchListResponse {
        total: matches.len(),
        matches,
    })
}

pub async fn match_header(
    State(state): State<AppState>,
    Path(match_id): Path<MatchId>,
) -> Result<Json<MatchHeader>, ApiError> {
    Ok(Json(query::match_header(&state.context, match_id)?))
}

// ── Player stats ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PlayerStatsParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct PlayerStatsResponse {
    pub players: Vec<PlayerMatchStats>,
    pub pagination: PaginationMeta,
}

pub async fn player_stats(
    State(state): State<AppState>,
    Path(match_id): Path<MatchId>,
    Query(params): Query<PlayerStatsParams>,
) -> Result<Json<PlayerStatsResponse>, ApiError> {
    let rows = query::player_stats(&state.context, match_id)?;
    let pagination = Pagination::new(params.page, params.page_size);

    let players = rows
        .iter()
        .skip(pagination.offset() as usize)
        .take(pagination.page_size as usize)
        .map(|r| (*r).clone())
        .collect();

    Ok(Json(PlayerStatsResponse {
        players,
        pagination: PaginationMeta::new(&pagination, rows.len() as u32),
    }))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::state::AppState;
    use crate::config::ServerConfig;
    use crate::context::DashboardContext;
    use crate::ingest::EventLog;
    use crate::test_support::write_dataset;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    fn setup_test_state(dir: &std::path::Path) -> AppState {
        let (storage, catalog, dataset) = write_dataset(dir);
        let events = EventLog::load(&storage, &catalog, &dataset).unwrap();
        let context = DashboardContext::from_parts(catalog, events).unwrap();
        AppState::new(context, ServerConfig::default())
    }

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(dir.path()));

        let (status, json) = get_json(app, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["matches"], 2);
    }

    #[tokio::test]
    async fn test_list_matches_in_date_order() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(dir.path()));

        let (status, json) = get_json(app, "/api/matches").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total"], 2);
        assert_eq!(json["matches"][0]["match_id"], 101);
        assert_eq!(json["matches"][0]["stage"], "Group Stage");
        assert_eq!(json["matches"][1]["stage"], "Final");
    }

    #[tokio::test]
    async fn test_match_header() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(dir.path()));

        let (status, json) = get_json(app, "/api/matches/101").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["header"], "ALPHA 2-0 BETA");
        assert_eq!(json["referee"], "Néstor Pitana");
    }

    #[tokio::test]
    async fn test_unknown_match_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(dir.path()));

        let (status, json) = get_json(app, "/api/matches/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_player_stats_paginated() {
        let dir = tempfile::tempdir().unwrap();
        let state = setup_test_state(dir.path());
        let total = state.context.tables.player_stats_for(101).count();

        let app = build_router(state);
        let (status, json) = get_json(app, "/api/matches/101/players?page=1&page_size=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["players"].as_array().unwrap().len(), 2);
        assert_eq!(json["pagination"]["total_items"], total);
        assert_eq!(json["pagination"]["has_next"], true);
        assert_eq!(json["pagination"]["has_prev"], false);
    }

    #[tokio::test]
    async fn test_player_stats_page_past_end_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let app = build_router(setup_test_state(dir.path()));

        let (status, json) =
            get_json(app, "/api/matches/101/players?page=4294967295&page_size=100").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["players"].as_array().unwrap().is_empty());
        assert_eq!(json["pagination"]["page"], 4294967295u32);
        assert_eq!(json["pagination"]["has_next"], false);
    }
}

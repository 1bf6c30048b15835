use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::place::{
    collect_locations, markers, try_parse_line, Location, LocationSet, Marker, SourceBlock,
};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

#[derive(Debug)]
pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

// ─── GET /api/health ─────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub threshold_m: f64,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        threshold_m: state.config.threshold_m,
    })
}

// ─── POST /api/parse ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ParseRequest {
    pub line: String,
    pub title: Option<String>,
    pub url: Option<String>,
}

pub async fn parse(Json(req): Json<ParseRequest>) -> Result<Json<Location>, ApiError> {
    let loc = try_parse_line(&req.line, req.title.as_deref(), req.url.as_deref())
        .map_err(|e| api_error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;
    info!("POST /api/parse {:?} -> ({}, {})", req.line, loc.lat, loc.lon);
    Ok(Json(loc))
}

// ─── POST /api/merge ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct MergeRequest {
    pub blocks: Vec<SourceBlock>,
    pub threshold: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct MergeResponse {
    pub count: usize,
    pub locations: Vec<Location>,
    pub markers: Vec<Marker>,
}

pub async fn merge(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MergeRequest>,
) -> Result<Json<MergeResponse>, ApiError> {
    let start = Instant::now();

    let mut set = match req.threshold {
        Some(t) if !t.is_finite() || t <= 0.0 => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                format!("threshold must be a positive number, got {}", t),
            ));
        }
        Some(t) => LocationSet::with_threshold(t).with_radius(state.config.earth_radius_m),
        None => state.config.location_set(),
    };

    let accepted = collect_locations(&req.blocks, &mut set)
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let markers = markers(&set);
    let count = set.len();

    info!(
        "POST /api/merge blocks={} lines={} -> {} locations ({:.1}ms)",
        req.blocks.len(),
        accepted,
        count,
        start.elapsed().as_secs_f64() * 1000.0,
    );

    Ok(Json(MergeResponse {
        count,
        locations: set.into_locations(),
        markers,
    }))
}

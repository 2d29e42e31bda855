//! JSON endpoints mirroring the pages, for scripts and quick checks.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use crate::data::{fetch_ranking, fetch_time_series, Region, YearValue};
use crate::server::forms::{RankingForm, TrendForm, TrendRequest};
use crate::server::SharedState;

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/health", get(health))
        .route("/regions", get(regions))
        .route("/ranking", get(ranking))
        .route("/trend", get(trend))
        .fallback(not_found)
}

#[derive(Debug, Serialize)]
pub struct RegionsResponse {
    pub regions: Vec<Region>,
}

#[derive(Debug, Serialize)]
pub struct TrendResponse {
    pub region: String,
    pub from: i32,
    pub to: i32,
    pub points: Vec<YearValue>,
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "regional-prices",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn regions(State(state): State<SharedState>) -> Json<RegionsResponse> {
    Json(RegionsResponse {
        regions: state.regions.regions(),
    })
}

async fn ranking(State(state): State<SharedState>, Query(form): Query<RankingForm>) -> Response {
    let year = form.year();
    match fetch_ranking(&state.client, &year).await {
        Ok(table) => Json(table).into_response(),
        Err(err) => {
            warn!(%year, error = %err, "ranking fetch failed");
            error_response(StatusCode::BAD_GATEWAY, &err.to_string())
        }
    }
}

async fn trend(State(state): State<SharedState>, Query(form): Query<TrendForm>) -> Response {
    let request = TrendRequest::from(&form);
    let years = match request.years() {
        Ok(years) => years,
        Err(message) => return error_response(StatusCode::BAD_REQUEST, &message),
    };

    match fetch_time_series(&state.client, &state.regions, &request.region, &years).await {
        Ok(series) => Json(TrendResponse {
            region: series.region,
            from: request.from,
            to: request.to,
            points: series.points,
        })
        .into_response(),
        Err(err) => {
            warn!(region = %request.region, error = %err, "time series fetch failed");
            error_response(StatusCode::BAD_GATEWAY, &err.to_string())
        }
    }
}

async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Route not found")
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "status": "error", "message": message }))).into_response()
}

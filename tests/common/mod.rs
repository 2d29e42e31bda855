//! Fake BDL API served on an ephemeral port, plus helpers to drive the dashboard router.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::{Path, Query, RawQuery, State};
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower::ServiceExt;

use regional_prices::config::Config;
use regional_prices::server::{build_state, routes, SharedState};

pub const MAZOWIECKIE_ID: &str = "071400000000";

/// Five published values (out of order, split over two groups) and one null for Mazowieckie.
const MAZOWIECKIE_VALUES: [(&str, Option<f64>); 6] = [
    ("2019", Some(9800.0)),
    ("2012", None),
    ("2011", Some(6900.0)),
    ("2015", Some(7400.0)),
    ("2023", Some(14100.0)),
    ("2013", Some(7100.0)),
];

#[derive(Clone, Default)]
pub struct Hits {
    pub by_variable: Arc<AtomicUsize>,
    pub by_unit: Arc<AtomicUsize>,
}

impl Hits {
    pub fn by_unit(&self) -> usize {
        self.by_unit.load(Ordering::SeqCst)
    }

    pub fn by_variable(&self) -> usize {
        self.by_variable.load(Ordering::SeqCst)
    }
}

pub struct Upstream {
    pub base_url: String,
    pub hits: Hits,
}

#[derive(Clone)]
struct FakeState {
    hits: Hits,
    data_fails: bool,
    data_delay: Option<Duration>,
}

/// Healthy fake API.
pub async fn spawn_upstream() -> Upstream {
    spawn(false, None).await
}

/// Units endpoint works, both data endpoints answer 500.
pub async fn spawn_failing_upstream() -> Upstream {
    spawn(true, None).await
}

/// Units endpoint works, both data endpoints sleep for `delay` before answering.
pub async fn spawn_stalled_upstream(delay: Duration) -> Upstream {
    spawn(false, Some(delay)).await
}

async fn spawn(data_fails: bool, data_delay: Option<Duration>) -> Upstream {
    let hits = Hits::default();
    let app = Router::new()
        .route("/units", get(units))
        .route("/data/by-variable/:var", get(by_variable))
        .route("/data/by-unit/:unit", get(by_unit))
        .with_state(FakeState {
            hits: hits.clone(),
            data_fails,
            data_delay,
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("fake upstream should bind");
    let addr = listener.local_addr().expect("fake upstream should have an address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake upstream should serve");
    });

    Upstream {
        base_url: format!("http://{addr}"),
        hits,
    }
}

impl FakeState {
    async fn stall(&self) {
        if let Some(delay) = self.data_delay {
            tokio::time::sleep(delay).await;
        }
    }
}

async fn units(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    assert_eq!(query.get("level").map(String::as_str), Some("2"));
    Json(json!({
        "totalRecords": 3,
        "results": [
            {"id": MAZOWIECKIE_ID, "name": "MAZOWIECKIE", "level": 2},
            {"id": "011200000000", "name": "małopolskie", "level": 2},
            {"id": "023000000000", "name": "wielkopolskie", "level": 2}
        ]
    }))
}

async fn by_variable(
    State(state): State<FakeState>,
    Path(_variable): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.hits.by_variable.fetch_add(1, Ordering::SeqCst);
    state.stall().await;
    if state.data_fails {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let year = query.get("year").cloned().unwrap_or_default();
    if year != "2023" {
        return Json(json!({ "results": [] })).into_response();
    }
    Json(json!({
        "results": [
            {"id": "1", "name": "A", "values": [{"year": "2023", "val": 100.0, "attrId": 1}]},
            {"id": "2", "name": "B", "values": [{"year": "2022", "val": 50.0, "attrId": 1},
                                                {"year": "2023", "val": null, "attrId": 1}]},
            {"id": "3", "name": "C", "values": [{"year": "2023", "val": 75.0, "attrId": 1}]}
        ]
    }))
    .into_response()
}

async fn by_unit(
    State(state): State<FakeState>,
    Path(unit): Path<String>,
    RawQuery(query): RawQuery,
) -> Response {
    state.hits.by_unit.fetch_add(1, Ordering::SeqCst);
    state.stall().await;
    if state.data_fails {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    if unit != MAZOWIECKIE_ID {
        return Json(json!({ "results": [] })).into_response();
    }
    let requested: Vec<String> = query
        .unwrap_or_default()
        .split('&')
        .filter_map(|pair| pair.strip_prefix("year="))
        .map(str::to_string)
        .collect();
    let values: Vec<Value> = MAZOWIECKIE_VALUES
        .iter()
        .filter(|(year, _)| requested.iter().any(|r| r == year))
        .map(|(year, val)| json!({ "year": year, "val": val, "attrId": 1 }))
        .collect();
    let (first, second) = values.split_at(values.len() / 2);
    Json(json!({
        "results": [
            {"id": 633692, "values": first},
            {"id": 633692, "values": second}
        ]
    }))
    .into_response()
}

pub fn config_for(base_url: &str) -> Config {
    Config {
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(5),
        ..Config::default()
    }
}

pub async fn state_for(upstream: &Upstream) -> SharedState {
    state_with_timeout(upstream, Duration::from_secs(5)).await
}

pub async fn state_with_timeout(upstream: &Upstream, timeout: Duration) -> SharedState {
    let config = Config {
        timeout,
        ..config_for(&upstream.base_url)
    };
    build_state(config)
        .await
        .expect("state should build against the fake upstream")
}

pub async fn send(state: &SharedState, request: Request<Body>) -> (StatusCode, String) {
    let response = routes::router(state.clone())
        .oneshot(request)
        .await
        .expect("router should respond");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request should build")
}

pub fn form_post(uri: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .expect("request should build")
}

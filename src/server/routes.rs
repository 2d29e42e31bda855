use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Form, Router};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::charts::{self, ChartImage};
use crate::config::selectable_years;
use crate::data::{fetch_ranking, fetch_time_series, RankingTable, TimeSeries};
use crate::error::ChartError;
use crate::server::forms::{RankingForm, TrendForm, TrendRequest};
use crate::server::pages::{self, RankingPage, TrendPage};
use crate::server::{api, SharedState};

const UPSTREAM_NOTICE: &str = "Nie udało się pobrać danych z GUS. Spróbuj ponownie później.";

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/ranking", get(ranking).post(ranking))
        .route("/trend", get(trend_form).post(trend_submit))
        .route("/wykres", get(chart_placeholder))
        .route("/mapa", get(map_placeholder))
        .route("/login", get(login))
        .nest("/api", api::router())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<String> {
    Html(pages::index_html())
}

async fn ranking(State(state): State<SharedState>, Form(form): Form<RankingForm>) -> Html<String> {
    let year = form.year();
    let (table, notice) = match fetch_ranking(&state.client, &year).await {
        Ok(table) => (table, None),
        Err(err) => {
            warn!(%year, error = %err, "ranking fetch failed");
            (RankingTable::empty(&year), Some(UPSTREAM_NOTICE))
        }
    };

    let chart = if table.is_empty() {
        None
    } else {
        let for_chart = table.clone();
        render_off_thread(move || charts::ranking_chart(&for_chart)).await
    };

    let years = selectable_years();
    Html(pages::ranking_html(&RankingPage {
        table: &table,
        chart: chart.as_ref(),
        years: &years,
        selected_year: &year,
        notice,
    }))
}

async fn trend_form(State(state): State<SharedState>) -> Html<String> {
    Html(render_trend(&state, &TrendRequest::default(), None, None, None))
}

async fn trend_submit(
    State(state): State<SharedState>,
    Form(form): Form<TrendForm>,
) -> Html<String> {
    let request = TrendRequest::from(&form);
    let outcome = run_trend(&state, &request).await;
    Html(render_trend(
        &state,
        &request,
        outcome.chart.as_ref(),
        outcome.error.as_deref(),
        outcome.notice,
    ))
}

/// Result of a submitted trend form.
pub struct TrendOutcome {
    pub series: TimeSeries,
    pub chart: Option<ChartImage>,
    pub error: Option<String>,
    pub notice: Option<&'static str>,
}

/// Validates the range, fetches the series and renders the line chart when there is data.
/// Upstream failures degrade to an empty series with a notice.
pub async fn run_trend(state: &SharedState, request: &TrendRequest) -> TrendOutcome {
    let years = match request.years() {
        Ok(years) => years,
        Err(message) => {
            return TrendOutcome {
                series: TimeSeries::empty(&request.region),
                chart: None,
                error: Some(message),
                notice: None,
            }
        }
    };

    let (series, notice) =
        match fetch_time_series(&state.client, &state.regions, &request.region, &years).await {
            Ok(series) => (series, None),
            Err(err) => {
                warn!(region = %request.region, error = %err, "time series fetch failed");
                (TimeSeries::empty(&request.region), Some(UPSTREAM_NOTICE))
            }
        };

    let chart = if series.is_empty() {
        None
    } else {
        let for_chart = series.clone();
        render_off_thread(move || charts::trend_chart(&for_chart)).await
    };

    TrendOutcome {
        series,
        chart,
        error: None,
        notice,
    }
}

fn render_trend(
    state: &SharedState,
    request: &TrendRequest,
    chart: Option<&ChartImage>,
    error: Option<&str>,
    notice: Option<&str>,
) -> String {
    let regions: Vec<&str> = state.regions.names().collect();
    let years = selectable_years();
    pages::trend_html(&TrendPage {
        regions: &regions,
        selected_region: &request.region,
        years: &years,
        from: request.from,
        to: request.to,
        chart,
        error,
        notice,
    })
}

async fn render_off_thread<F>(render: F) -> Option<ChartImage>
where
    F: FnOnce() -> Result<ChartImage, ChartError> + Send + 'static,
{
    match tokio::task::spawn_blocking(render).await {
        Ok(Ok(image)) => Some(image),
        Ok(Err(err)) => {
            warn!(error = %err, "chart rendering failed");
            None
        }
        Err(err) => {
            warn!(error = %err, "chart task did not complete");
            None
        }
    }
}

async fn chart_placeholder() -> Html<String> {
    Html(pages::placeholder_html("Wykres"))
}

async fn map_placeholder() -> Html<String> {
    Html(pages::placeholder_html("Mapa"))
}

async fn login() -> Html<String> {
    Html(pages::login_html())
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(pages::not_found_html()))
}

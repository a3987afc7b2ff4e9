//! JSON endpoints backing the dashboard page.
//!
//! Every request recomputes its view from the shared, read-only dataset. Each
//! request also owns its random source: seeded from `?seed=` for reproducible
//! fact picks, OS entropy otherwise.

use axum::extract::{Path as AxumPath, Query, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use compute::{build_dashboard, filter, DashboardQuery, SelectionError};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, warn};

use crate::AppState;

fn api_error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message.into() })))
}

fn selection_error(err: SelectionError) -> (StatusCode, Json<Value>) {
    warn!("selection failed: {err}");
    api_error(StatusCode::NOT_FOUND, err.to_string())
}

#[derive(Debug, Serialize)]
struct CountryList<'a> {
    countries: &'a [String],
    default_country: Option<&'a str>,
}

pub async fn get_countries(State(state): State<AppState>) -> Response {
    let body = CountryList {
        countries: state.dataset.countries(),
        default_country: state
            .dataset
            .default_country(&state.config.default_country),
    };
    Json(body).into_response()
}

pub async fn get_volcanoes(
    State(state): State<AppState>,
    AxumPath(country): AxumPath<String>,
) -> Response {
    if !state.dataset.has_country(&country) {
        debug!("unknown country requested: {country:?}");
        return api_error(StatusCode::NOT_FOUND, format!("unknown country: {country}"))
            .into_response();
    }
    let volcanoes = state.dataset.volcano_names(&country);
    Json(json!({ "country": country, "volcanoes": volcanoes })).into_response()
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub volcano: Option<String>,
    #[serde(default)]
    pub zoom: Option<u8>,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Explicit country, else the configured default (or the first country).
fn resolve_country(state: &AppState, requested: Option<String>) -> Option<String> {
    requested.filter(|c| !c.is_empty()).or_else(|| {
        state
            .dataset
            .default_country(&state.config.default_country)
            .map(str::to_string)
    })
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> Response {
    let Some(country) = resolve_country(&state, params.country) else {
        return api_error(StatusCode::NOT_FOUND, "dataset has no countries").into_response();
    };

    let query = DashboardQuery {
        country,
        volcano: params.volcano.filter(|v| !v.is_empty()),
        zoom: params.zoom,
    };
    let mut rng = match params.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    match build_dashboard(&state.dataset, &query, &state.config.settings, &mut rng) {
        Ok(view) => Json(view).into_response(),
        Err(err) => selection_error(err).into_response(),
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportParams {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub volcano: Option<String>,
}

pub async fn get_export(
    State(state): State<AppState>,
    Query(params): Query<ExportParams>,
) -> Response {
    let Some(country) = resolve_country(&state, params.country) else {
        return api_error(StatusCode::NOT_FOUND, "dataset has no countries").into_response();
    };
    let volcano = params.volcano.filter(|v| !v.is_empty());

    let view = match filter(&state.dataset, &country, volcano.as_deref()) {
        Ok(view) => view,
        Err(err) => return selection_error(err).into_response(),
    };

    let collection = formats::records_to_geojson_value(view.rows.iter().copied());
    let body = match serde_json::to_vec(&collection) {
        Ok(bytes) => bytes,
        Err(err) => {
            error!("geojson serialization failed: {err}");
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, "export error").into_response();
        }
    };

    (
        StatusCode::OK,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/geo+json"),
        )],
        body,
    )
        .into_response()
}

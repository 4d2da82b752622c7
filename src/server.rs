use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::{header::CONTENT_TYPE, HeaderMap, Method},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tracing::{info, instrument};

use crate::{
    config::AppConfig,
    net::response::{ResponseError, Result},
    proxy::{self, upstream_url, UpstreamResponse},
    report::ReportDraft,
    types::dto::{picker_config::PickerConfig, upload::NewUpload},
};

#[derive(Clone)]
pub struct AppState {
    client: reqwest::Client,
    analysis_url: Arc<str>,
    picker: Arc<PickerConfig>,
}

pub fn router(config: &AppConfig, client: reqwest::Client) -> Router {
    let state = AppState {
        client,
        analysis_url: config.analysis_url.as_str().into(),
        picker: Arc::new(config.picker.clone()),
    };
    Router::new()
        .route("/picker/config", get(picker_config))
        .route("/reports/validate", post(validate_report))
        .route("/api/flask-proxy/*path", get(proxy_get).post(proxy_post))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn picker_config(State(state): State<AppState>) -> Json<PickerConfig> {
    Json(state.picker.as_ref().clone())
}

#[instrument(skip_all)]
async fn validate_report(Json(draft): Json<ReportDraft>) -> Result<Json<NewUpload>> {
    let upload = draft
        .submit()
        .map_err(|e| ResponseError::bad_request(e.to_string()))?;
    info!(location = %upload.location_name, "report location accepted");
    Ok(Json(upload))
}

async fn proxy_get(
    State(state): State<AppState>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<UpstreamResponse> {
    let url = upstream_url(&state.analysis_url, &path, query.as_deref());
    proxy::forward(&state.client, Method::GET, url, None, Bytes::new())
        .await
        .map_err(|e| ResponseError::bad_gateway(e.to_string()))
}

async fn proxy_post(
    State(state): State<AppState>,
    Path(path): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<UpstreamResponse> {
    let url = upstream_url(&state.analysis_url, &path, None);
    let content_type = headers.get(CONTENT_TYPE).cloned();
    proxy::forward(&state.client, Method::POST, url, content_type, body)
        .await
        .map_err(|e| ResponseError::bad_gateway(e.to_string()))
}

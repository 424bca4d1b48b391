//! Jira filter endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::{jira_error, window};
use crate::jira::FilterPayload;
use crate::mock_server::state::MockState;
use crate::pagination::Page;

/// Query parameters for searching filters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFiltersQuery {
    pub start_at: Option<u32>,
    pub max_results: Option<u32>,
    pub filter_name: Option<String>,
}

fn not_found(id: &str) -> Response {
    jira_error(
        StatusCode::NOT_FOUND,
        format!("The selected filter is not available to you, perhaps it has been deleted or had its permissions changed. ({id})"),
    )
}

fn invalid_payload(payload: &FilterPayload) -> Option<Response> {
    if payload.name.trim().is_empty() {
        return Some(jira_error(
            StatusCode::BAD_REQUEST,
            "You must specify a name for the filter.".to_string(),
        ));
    }
    None
}

/// POST /rest/api/3/filter
pub async fn create_filter(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(payload): Json<FilterPayload>,
) -> Response {
    if let Some(rejection) = invalid_payload(&payload) {
        return rejection;
    }

    let mut state = state.write().await;
    let filter = state.create_filter(payload);
    (StatusCode::OK, Json(filter)).into_response()
}

/// GET /rest/api/3/filter/search
pub async fn search_filters(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<SearchFiltersQuery>,
) -> Response {
    let state = state.read().await;

    let start_at = query.start_at.unwrap_or(0);
    let max_results = query.max_results.unwrap_or(50);

    let matches = state.search_filters(query.filter_name.as_deref());
    let total = matches.len() as u64;
    let values = window(&matches, start_at as usize, max_results as usize);
    let is_last = u64::from(start_at) + values.len() as u64 >= total;

    let page = Page {
        self_link: None,
        next_page: None,
        start_at,
        max_results,
        total: Some(total),
        is_last: Some(is_last),
        values,
    };

    (StatusCode::OK, Json(page)).into_response()
}

/// GET /rest/api/3/filter/{id}
pub async fn get_filter(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<String>,
) -> Response {
    let state = state.read().await;

    match id.parse().ok().and_then(|id| state.get_filter(id)) {
        Some(filter) => (StatusCode::OK, Json(filter.clone())).into_response(),
        None => not_found(&id),
    }
}

/// PUT /rest/api/3/filter/{id}
pub async fn update_filter(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<String>,
    Json(payload): Json<FilterPayload>,
) -> Response {
    if let Some(rejection) = invalid_payload(&payload) {
        return rejection;
    }

    let mut state = state.write().await;

    match id.parse().ok().and_then(|n| state.update_filter(n, payload)) {
        Some(filter) => (StatusCode::OK, Json(filter.clone())).into_response(),
        None => not_found(&id),
    }
}

/// DELETE /rest/api/3/filter/{id}
pub async fn delete_filter(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(id): Path<String>,
) -> Response {
    let mut state = state.write().await;

    match id.parse::<u64>().ok().and_then(|n| state.filters.remove(&n)) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(&id),
    }
}

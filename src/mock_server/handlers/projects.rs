//! Jira project endpoint handlers.

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
use crate::mock_server::state::MockState;
use crate::pagination::Page;

/// Query parameters for searching projects.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchProjectsQuery {
    pub start_at: Option<u32>,
    pub max_results: Option<u32>,
    pub query: Option<String>,
}

/// Query parameters for deleting a project.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProjectQuery {
    #[allow(dead_code)]
    pub enable_undo: Option<bool>,
}

/// GET /rest/api/3/project/{projectIdOrKey}
pub async fn get_project(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(key): Path<String>,
) -> Response {
    let state = state.read().await;

    match state.get_project(&key) {
        Some(project) => (StatusCode::OK, Json(project.clone())).into_response(),
        None => jira_error(
            StatusCode::NOT_FOUND,
            format!("No project could be found with key '{key}'."),
        ),
    }
}

/// GET /rest/api/3/project/search
pub async fn search_projects(
    State(state): State<Arc<RwLock<MockState>>>,
    Query(query): Query<SearchProjectsQuery>,
) -> Response {
    let state = state.read().await;

    let start_at = query.start_at.unwrap_or(0);
    let max_results = query.max_results.unwrap_or(50);

    let matches = state.search_projects(query.query.as_deref());
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

/// DELETE /rest/api/3/project/{projectIdOrKey}
pub async fn delete_project(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(key): Path<String>,
    Query(_query): Query<DeleteProjectQuery>,
) -> Response {
    let mut state = state.write().await;

    match state.delete_project(&key) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => jira_error(
            StatusCode::NOT_FOUND,
            format!("No project could be found with key '{key}'."),
        ),
    }
}

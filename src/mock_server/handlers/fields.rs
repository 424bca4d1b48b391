//! Jira issue field endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;

use super::window;
use crate::jira::IssueField;
use crate::mock_server::state::MockState;
use crate::pagination::Page;

/// GET /rest/api/3/field
pub async fn list_fields(State(state): State<Arc<RwLock<MockState>>>) -> Response {
    let state = state.read().await;
    (StatusCode::OK, Json(state.fields.clone())).into_response()
}

/// GET /rest/api/3/field/search
///
/// `type` may repeat, so the raw query string is parsed here.
pub async fn search_fields(
    State(state): State<Arc<RwLock<MockState>>>,
    uri: Uri,
) -> Response {
    let mut start_at = 0u32;
    let mut max_results = 50u32;
    let mut types = Vec::new();
    let mut query = None;

    let pairs = url::form_urlencoded::parse(uri.query().unwrap_or_default().as_bytes());
    for (key, value) in pairs {
        match key.as_ref() {
            "startAt" => start_at = value.parse().unwrap_or(0),
            "maxResults" => max_results = value.parse().unwrap_or(50),
            "type" => types.push(value.into_owned()),
            "query" => query = Some(value.into_owned()),
            _ => {}
        }
    }

    let state = state.read().await;
    let matches = state.search_fields(&types, query.as_deref());
    let total = matches.len() as u64;
    let values: Vec<IssueField> = window(&matches, start_at as usize, max_results as usize);
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

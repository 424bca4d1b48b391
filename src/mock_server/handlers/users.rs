//! SCIM user endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::scim_error;
use crate::admin::{ScimPage, ScimUser};
use crate::mock_server::state::MockState;

const LIST_RESPONSE_SCHEMA: &str = "urn:ietf:params:scim:api:messages:2.0:ListResponse";

/// Query parameters for listing users.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersQuery {
    pub start_index: Option<u64>,
    pub count: Option<u64>,
    /// Only `userName eq "<value>"` is understood.
    pub filter: Option<String>,
}

/// Extract the value from a `userName eq "<value>"` filter.
fn user_name_filter(filter: &str) -> Option<&str> {
    let mut parts = filter.trim().splitn(3, ' ');
    let attribute = parts.next()?;
    let op = parts.next()?;
    let value = parts.next()?.trim();

    if !attribute.eq_ignore_ascii_case("userName") || !op.eq_ignore_ascii_case("eq") {
        return None;
    }
    value.strip_prefix('"')?.strip_suffix('"')
}

fn not_found(id: &str) -> Response {
    scim_error(StatusCode::NOT_FOUND, format!("User {id} not found"))
}

/// GET /scim/directory/{directoryId}/Users
pub async fn list_users(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(directory): Path<String>,
    Query(query): Query<ListUsersQuery>,
) -> Response {
    let user_name = match query.filter.as_deref() {
        Some(filter) => match user_name_filter(filter) {
            Some(name) => Some(name.to_string()),
            None => {
                return scim_error(
                    StatusCode::BAD_REQUEST,
                    format!("Unsupported filter: {filter}"),
                )
            }
        },
        None => None,
    };

    let state = state.read().await;

    // SCIM indexes are 1-based.
    let start_index = query.start_index.unwrap_or(1).max(1);
    let count = query.count.unwrap_or(100);

    let matches = state.list_users(&directory, user_name.as_deref());
    let total_results = matches.len() as u64;
    let resources: Vec<ScimUser> = matches
        .into_iter()
        .skip((start_index - 1) as usize)
        .take(count as usize)
        .cloned()
        .collect();

    let page = ScimPage {
        schemas: vec![LIST_RESPONSE_SCHEMA.to_string()],
        total_results,
        start_index,
        items_per_page: resources.len() as u64,
        resources,
    };

    (StatusCode::OK, Json(page)).into_response()
}

/// POST /scim/directory/{directoryId}/Users
pub async fn create_user(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(directory): Path<String>,
    Json(user): Json<ScimUser>,
) -> Response {
    if user.user_name.trim().is_empty() {
        return scim_error(StatusCode::BAD_REQUEST, "userName is required".to_string());
    }

    let mut state = state.write().await;
    let user_name = user.user_name.clone();

    match state.create_user(&directory, user) {
        Some(created) => (StatusCode::CREATED, Json(created)).into_response(),
        None => scim_error(
            StatusCode::CONFLICT,
            format!("User with userName {user_name} already exists"),
        ),
    }
}

/// GET /scim/directory/{directoryId}/Users/{userId}
pub async fn get_user(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((directory, id)): Path<(String, String)>,
) -> Response {
    let state = state.read().await;

    match state.get_user(&directory, &id) {
        Some(user) => (StatusCode::OK, Json(user.clone())).into_response(),
        None => not_found(&id),
    }
}

/// PUT /scim/directory/{directoryId}/Users/{userId}
pub async fn replace_user(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((directory, id)): Path<(String, String)>,
    Json(user): Json<ScimUser>,
) -> Response {
    let mut state = state.write().await;

    match state.replace_user(&directory, &id, user) {
        Some(user) => (StatusCode::OK, Json(user.clone())).into_response(),
        None => not_found(&id),
    }
}

/// DELETE /scim/directory/{directoryId}/Users/{userId}
pub async fn deactivate_user(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((directory, id)): Path<(String, String)>,
) -> Response {
    let mut state = state.write().await;

    if state.deactivate_user(&directory, &id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found(&id)
    }
}

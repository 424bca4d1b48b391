//! Bitbucket workspace endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::bitbucket_error;
use crate::bitbucket::WorkspaceMembership;
use crate::mock_server::state::MockState;
use crate::pagination::BitbucketPage;

/// Query parameters for the permissions listing.
#[derive(Debug, Default, Deserialize)]
pub struct PermissionsQuery {
    /// Only `permission="<level>"` is understood.
    pub q: Option<String>,
}

/// Extract the level from a `permission="owner"` expression.
fn permission_level(q: &str) -> Option<&str> {
    q.trim()
        .strip_prefix("permission")?
        .trim_start()
        .strip_prefix('=')?
        .trim()
        .strip_prefix('"')?
        .strip_suffix('"')
}

fn page(values: Vec<WorkspaceMembership>) -> BitbucketPage<WorkspaceMembership> {
    BitbucketPage {
        size: Some(values.len() as u64),
        page: Some(1),
        pagelen: Some(values.len().max(10) as u32),
        next: None,
        previous: None,
        values,
    }
}

/// GET /2.0/workspaces/{workspace}
pub async fn get_workspace(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(slug): Path<String>,
) -> Response {
    let state = state.read().await;

    match state.workspaces.get(&slug) {
        Some(workspace) => (StatusCode::OK, Json(workspace.clone())).into_response(),
        None => bitbucket_error(
            StatusCode::NOT_FOUND,
            format!("No workspace with identifier '{slug}'."),
        ),
    }
}

/// GET /2.0/workspaces/{workspace}/members
pub async fn list_members(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(slug): Path<String>,
) -> Response {
    let state = state.read().await;

    if !state.workspaces.contains_key(&slug) {
        return bitbucket_error(
            StatusCode::NOT_FOUND,
            format!("No workspace with identifier '{slug}'."),
        );
    }

    // Plain membership listings carry no permission level.
    let members = state
        .members
        .get(&slug)
        .map(|members| {
            members
                .iter()
                .cloned()
                .map(|mut m| {
                    m.permission = None;
                    m
                })
                .collect()
        })
        .unwrap_or_default();

    (StatusCode::OK, Json(page(members))).into_response()
}

/// GET /2.0/workspaces/{workspace}/permissions
pub async fn list_permissions(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(slug): Path<String>,
    Query(query): Query<PermissionsQuery>,
) -> Response {
    let state = state.read().await;

    if !state.workspaces.contains_key(&slug) {
        return bitbucket_error(
            StatusCode::NOT_FOUND,
            format!("No workspace with identifier '{slug}'."),
        );
    }

    let level = match query.q.as_deref().filter(|q| !q.trim().is_empty()) {
        Some(q) => match permission_level(q) {
            Some(level) => Some(level.to_string()),
            None => {
                return bitbucket_error(
                    StatusCode::BAD_REQUEST,
                    format!("Invalid filter query: {q}"),
                )
            }
        },
        None => None,
    };

    let members = state
        .members
        .get(&slug)
        .map(|members| {
            members
                .iter()
                .filter(|m| level.is_none() || m.permission == level)
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    (StatusCode::OK, Json(page(members))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_level() {
        assert_eq!(permission_level(r#"permission="owner""#), Some("owner"));
        assert_eq!(permission_level(r#" permission = "member" "#), Some("member"));
        assert_eq!(permission_level("nickname=\"x\""), None);
        assert_eq!(permission_level("permission=owner"), None);
    }
}

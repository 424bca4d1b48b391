//! HTTP request handlers for the mock server.
//!
//! Error bodies follow each product's shape: Bitbucket wraps a message in
//! `error`, Jira returns `errorMessages`, SCIM returns an `Error` message.

pub mod fields;
pub mod filters;
pub mod projects;
pub mod users;
pub mod workspaces;

pub use fields::*;
pub use filters::*;
pub use projects::*;
pub use users::*;
pub use workspaces::*;

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};

pub(crate) fn bitbucket_error(status: StatusCode, message: String) -> Response {
    (
        status,
        Json(serde_json::json!({
            "type": "error",
            "error": { "message": message }
        })),
    )
        .into_response()
}

pub(crate) fn jira_error(status: StatusCode, message: String) -> Response {
    (
        status,
        Json(serde_json::json!({
            "errorMessages": [message],
            "errors": {}
        })),
    )
        .into_response()
}

pub(crate) fn scim_error(status: StatusCode, detail: String) -> Response {
    (
        status,
        Json(serde_json::json!({
            "schemas": ["urn:ietf:params:scim:api:messages:2.0:Error"],
            "status": status.as_u16().to_string(),
            "detail": detail
        })),
    )
        .into_response()
}

/// Slice `items` for a zero-based offset page.
pub(crate) fn window<T: Clone>(items: &[&T], start: usize, count: usize) -> Vec<T> {
    items
        .iter()
        .skip(start)
        .take(count)
        .map(|item| (*item).clone())
        .collect()
}

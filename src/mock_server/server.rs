//! Mock Atlassian API server.
//!
//! Provides an axum-based HTTP server that serves Bitbucket, Jira and SCIM
//! routes from one address, so any [`AtlassianClient`](crate::AtlassianClient)
//! constructor can point at it.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock Atlassian Cloud server for testing.
///
/// The server runs in the background and keeps state across requests.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn with_state(state: MockState) -> Self {
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "mock server stopped");
            }
        });

        Self {
            url: format!("http://{}", addr),
            handle,
            state: shared_state,
        }
    }

    /// Base URL of the server; use it as the site, Bitbucket or admin URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Access to the server's shared state.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server. Aborts the server task.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for workspace in scenario.workspaces {
            state = state.with_workspace(workspace);
        }

        for (workspace, member) in scenario.members {
            state = state.with_member(&workspace, member);
        }

        for project in scenario.projects {
            state = state.with_project(project);
        }

        for field in scenario.fields {
            state = state.with_field(field);
        }

        for filter in scenario.filters {
            state = state.with_filter(filter);
        }

        for (directory, user) in scenario.users {
            state = state.with_user(&directory, user);
        }

        state
    }

    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Bitbucket
            .route("/2.0/workspaces/:workspace", get(handlers::get_workspace))
            .route(
                "/2.0/workspaces/:workspace/members",
                get(handlers::list_members),
            )
            .route(
                "/2.0/workspaces/:workspace/permissions",
                get(handlers::list_permissions),
            )
            // Jira projects
            .route("/rest/api/3/project/search", get(handlers::search_projects))
            .route(
                "/rest/api/3/project/:key",
                get(handlers::get_project).delete(handlers::delete_project),
            )
            // Jira fields
            .route("/rest/api/3/field", get(handlers::list_fields))
            .route("/rest/api/3/field/search", get(handlers::search_fields))
            // Jira filters
            .route(
                "/rest/api/3/filter",
                axum::routing::post(handlers::create_filter),
            )
            .route("/rest/api/3/filter/search", get(handlers::search_filters))
            .route(
                "/rest/api/3/filter/:id",
                get(handlers::get_filter)
                    .put(handlers::update_filter)
                    .delete(handlers::delete_filter),
            )
            // SCIM
            .route(
                "/scim/directory/:directory/Users",
                get(handlers::list_users).post(handlers::create_user),
            )
            .route(
                "/scim/directory/:directory/Users/:user",
                get(handlers::get_user)
                    .put(handlers::replace_user)
                    .delete(handlers::deactivate_user),
            )
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_token,
            ))
            // Health check stays open
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Reject requests without the configured bearer token.
async fn require_token(
    State(state): State<Arc<RwLock<MockState>>>,
    request: Request,
    next: Next,
) -> Response {
    let required = state.read().await.required_token.clone();

    if let Some(token) = required {
        let expected = format!("Bearer {token}");
        let presented = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        if presented != Some(expected.as_str()) {
            return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
        }
    }

    next.run(request).await
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

//! Mock Atlassian API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates a slice of
//! the Bitbucket, Jira and SCIM APIs. Unlike wiremock which mocks at the
//! HTTP level per-test, this server maintains state across requests, enabling
//! realistic workflow testing.
//!
//! # Example
//!
//! ```ignore
//! use atlassapi::mock_server::MockServer;
//! use atlassapi::jira::{ProjectApi, ProjectService};
//! use atlassapi::{AtlassianClient, Authentication};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = AtlassianClient::new(server.url(), Authentication::bearer("t")).unwrap();
//!
//!     // Server comes with default fixtures
//!     let project = ProjectService::new(client).get("KP", &[]).await.unwrap();
//!     assert_eq!(project.data.name, "Kitchen Porter");
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures, DEFAULT_DIRECTORY};
pub use server::MockServer;
pub use state::MockState;

//! Atlassian Cloud API client library.
//!
//! Typed access to Jira, Confluence, Bitbucket and the Admin SCIM API,
//! built on one request executor. Every service operation follows the same
//! path: validate required identifiers, build the endpoint, send it through
//! the client's [`Connector`], decode the JSON answer.
//!
//! # Quick Start
//!
//! ```no_run
//! use atlassapi::bitbucket::{WorkspaceApi, WorkspaceService};
//! use atlassapi::jira::{IssueFieldApi, IssueFieldService};
//! use atlassapi::{AtlassianClient, Authentication};
//!
//! #[tokio::main]
//! async fn main() -> atlassapi::Result<()> {
//!     // Jira client from environment variables
//!     let jira = AtlassianClient::from_env()?;
//!     let fields = IssueFieldService::new(jira).gets().await?;
//!     println!("{} fields", fields.data.len());
//!
//!     // Bitbucket client with explicit credentials
//!     let auth = Authentication::basic("dev@example.com", "app-password");
//!     let workspaces = WorkspaceService::new(AtlassianClient::bitbucket(auth)?);
//!     let workspace = workspaces.get("work-space-name-sample").await?;
//!     println!("{} -> HTTP {}", workspace.data.name, workspace.status());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`AtlassianClient`] builds [`RequestDescriptor`]s, executes them and
//!   decodes [`ResponseDescriptor`]s.
//! - [`Connector`] is the transport seam; [`HttpConnector`] uses `reqwest`
//!   and applies the [`Authentication`] to each request.
//! - [`Observer`] receives one span per request; [`TracingObserver`] is the default.
//! - Product modules ([`bitbucket`], [`jira`], [`confluence`], [`admin`])
//!   expose each resource as a capability trait plus a service struct.
//!
//! # Configuration
//!
//! [`AtlassianClient::from_env`] reads:
//!
//! - `ATLASSIAN_SITE_URL` (required) - e.g. `https://your-site.atlassian.net`
//! - `ATLASSIAN_EMAIL` and `ATLASSIAN_API_TOKEN` - basic authentication
//! - `ATLASSIAN_BEARER_TOKEN` - bearer authentication, preferred when set
//! - `ATLASSIAN_USER_AGENT` (optional)

mod auth;
mod client;
mod connector;
mod endpoint;
mod error;
mod observe;
mod output;
mod pagination;
mod request;

#[cfg(test)]
mod testing;

pub mod admin;
pub mod bitbucket;
pub mod cli;
pub mod confluence;
pub mod jira;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use auth::Authentication;
pub use client::{AtlassianClient, ADMIN_API_URL, BITBUCKET_API_URL};
pub use connector::{Connector, HttpConnector};
pub use error::{AtlassianError, Required, Result};
pub use observe::{attr, NoopObserver, Observer, Span, TracingObserver};
pub use output::PrettyPrint;
pub use pagination::{BitbucketPage, Page};
pub use request::{
    FilePart, Method, RequestBody, RequestDescriptor, Response, ResponseDescriptor,
    JSON_CONTENT_TYPE,
};

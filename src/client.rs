//! Atlassian API client.
//!
//! The request executor shared by every service: it resolves endpoints
//! against a base URL, serializes payloads, sends the result through a
//! [`Connector`] and decodes what comes back. Resource-specific operations
//! live in the product modules and only call [`AtlassianClient::build`] and
//! [`AtlassianClient::call`].

use std::env;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::auth::Authentication;
use crate::connector::{Connector, HttpConnector};
use crate::error::{AtlassianError, Result};
use crate::observe::{attr, Observer, TracingObserver};
use crate::request::{
    FilePart, Method, RequestBody, RequestDescriptor, Response, ResponseDescriptor,
    JSON_CONTENT_TYPE,
};

/// Bitbucket Cloud API host.
pub const BITBUCKET_API_URL: &str = "https://api.bitbucket.org/";

/// Organization administration (Admin, SCIM) API host.
pub const ADMIN_API_URL: &str = "https://api.atlassian.com/";

/// Request executor for one Atlassian API host.
///
/// Holds only immutable configuration, so it is cheap to clone and safe to
/// share across tasks. Clones reference the same connector and observer.
///
/// # Example
///
/// ```no_run
/// use atlassapi::{AtlassianClient, Authentication};
///
/// # fn example() -> atlassapi::Result<()> {
/// // Create from environment variables
/// let jira = AtlassianClient::from_env()?;
///
/// // Or configure manually
/// let auth = Authentication::basic("dev@example.com", "api-token");
/// let jira = AtlassianClient::new("https://your-site.atlassian.net", auth.clone())?;
/// let bitbucket = AtlassianClient::bitbucket(auth)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AtlassianClient {
    base_url: Arc<Url>,
    connector: Arc<dyn Connector>,
    observer: Arc<dyn Observer>,
}

impl std::fmt::Debug for AtlassianClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtlassianClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl AtlassianClient {
    /// Create a client for a Cloud site from environment variables.
    ///
    /// Reads `ATLASSIAN_SITE_URL`, then either `ATLASSIAN_BEARER_TOKEN` or the
    /// `ATLASSIAN_EMAIL` / `ATLASSIAN_API_TOKEN` pair, and optionally
    /// `ATLASSIAN_USER_AGENT`.
    ///
    /// # Errors
    ///
    /// Returns an error if the site URL or the credentials are not set.
    pub fn from_env() -> Result<Self> {
        let site = env::var("ATLASSIAN_SITE_URL").map_err(|_| {
            AtlassianError::ConfigMissing(
                "ATLASSIAN_SITE_URL environment variable not set".to_string(),
            )
        })?;

        Self::new(&site, Authentication::from_env()?)
    }

    /// Create a client for the given base URL using the HTTP connector.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: &str, auth: Authentication) -> Result<Self> {
        let connector = HttpConnector::new(auth)?;
        Self::with_connector(base_url, Arc::new(connector))
    }

    /// Client for Bitbucket Cloud (`https://api.bitbucket.org/`).
    pub fn bitbucket(auth: Authentication) -> Result<Self> {
        Self::new(BITBUCKET_API_URL, auth)
    }

    /// Client for the organization admin and SCIM APIs (`https://api.atlassian.com/`).
    pub fn admin(auth: Authentication) -> Result<Self> {
        Self::new(ADMIN_API_URL, auth)
    }

    /// Create a client that sends requests through `connector`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn with_connector(base_url: &str, connector: Arc<dyn Connector>) -> Result<Self> {
        // Ensure base URL ends with / so relative endpoints append to its path
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        Ok(Self {
            base_url: Arc::new(base_url),
            connector,
            observer: Arc::new(TracingObserver),
        })
    }

    /// Replace the observer that receives request spans.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn Observer>) -> Self {
        self.observer = observer;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a request carrying an optional JSON payload.
    ///
    /// `endpoint` is relative to the base URL and may include a query
    /// string. `content_type` overrides the default `application/json` for
    /// payload-bearing requests.
    ///
    /// # Errors
    ///
    /// Returns [`AtlassianError::UrlError`] if the endpoint cannot be
    /// resolved, or [`AtlassianError::EncodeError`] if the payload cannot be
    /// serialized.
    pub fn build<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        content_type: Option<&str>,
        body: Option<&B>,
    ) -> Result<RequestDescriptor> {
        let body = body
            .map(|payload| serde_json::to_vec(payload).map_err(AtlassianError::EncodeError))
            .transpose()?
            .map(RequestBody::Json);

        let content_type = match (&body, content_type) {
            (_, Some(explicit)) => Some(explicit.to_string()),
            (Some(_), None) => Some(JSON_CONTENT_TYPE.to_string()),
            (None, None) => None,
        };

        self.descriptor(method, endpoint, content_type, body)
    }

    /// Build a request without a body.
    pub fn build_empty(&self, method: Method, endpoint: &str) -> Result<RequestDescriptor> {
        self.build::<()>(method, endpoint, None, None)
    }

    /// Build a request whose body is sent as-is.
    pub fn build_raw(
        &self,
        method: Method,
        endpoint: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<RequestDescriptor> {
        self.descriptor(
            method,
            endpoint,
            Some(content_type.to_string()),
            Some(RequestBody::Raw(bytes)),
        )
    }

    /// Build a `multipart/form-data` upload. The connector picks the boundary.
    pub fn build_multipart(
        &self,
        method: Method,
        endpoint: &str,
        parts: Vec<FilePart>,
    ) -> Result<RequestDescriptor> {
        self.descriptor(method, endpoint, None, Some(RequestBody::Multipart(parts)))
    }

    fn descriptor(
        &self,
        method: Method,
        endpoint: &str,
        content_type: Option<String>,
        body: Option<RequestBody>,
    ) -> Result<RequestDescriptor> {
        let url = self.base_url.join(endpoint.trim_start_matches('/'))?;

        Ok(RequestDescriptor {
            method,
            url,
            endpoint: endpoint.to_string(),
            content_type,
            body,
            headers: Default::default(),
            timeout: None,
        })
    }

    /// Send a request and return the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns the connector's error unchanged when the request could not be
    /// sent or the response not read.
    pub async fn execute(&self, request: &RequestDescriptor) -> Result<ResponseDescriptor> {
        let mut span = self.observer.start_span("execute");
        span.record(attr::HTTP_METHOD, request.method.as_str());
        span.record(attr::HTTP_URL, request.url.as_str());

        match self.connector.send(request).await {
            Ok(response) => {
                span.record(attr::HTTP_STATUS_CODE, response.status.as_str());
                Ok(response)
            }
            Err(err) => {
                span.record(attr::ERROR, &err.to_string());
                Err(err)
            }
        }
    }

    /// Send a request and decode a successful response into `T`.
    ///
    /// An empty body decodes as JSON `null`, so `()` and `Option<_>` are
    /// valid destinations for endpoints that return nothing.
    ///
    /// # Errors
    ///
    /// Transport failures are returned unchanged. A non-success status
    /// yields [`AtlassianError::Api`] and a body that does not match `T`
    /// yields [`AtlassianError::Decode`]; both carry the response.
    pub async fn call<T: DeserializeOwned>(
        &self,
        request: &RequestDescriptor,
    ) -> Result<Response<T>> {
        let response = self.execute(request).await?.error_for_status()?;

        match response.json::<T>() {
            Ok(data) => Ok(Response { data, response }),
            Err(source) => Err(AtlassianError::Decode {
                source,
                response: Box::new(response),
            }),
        }
    }

    /// Send a request whose successful body is ignored.
    ///
    /// Any 2xx body (empty, `{}` or a payload) is accepted without decoding.
    ///
    /// # Errors
    ///
    /// Transport failures are returned unchanged and a non-success status
    /// yields [`AtlassianError::Api`].
    pub async fn call_empty(&self, request: &RequestDescriptor) -> Result<Response<()>> {
        let response = self.execute(request).await?.error_for_status()?;
        Ok(Response { data: (), response })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::NoopObserver;
    use crate::testing::FakeConnector;
    use reqwest::StatusCode;

    fn client(connector: FakeConnector) -> AtlassianClient {
        AtlassianClient::with_connector("https://example.atlassian.net", Arc::new(connector))
            .unwrap()
            .with_observer(Arc::new(NoopObserver))
    }

    #[test]
    fn test_client_debug() {
        let client = AtlassianClient::new(
            "https://example.atlassian.net",
            Authentication::bearer("test-token"),
        )
        .unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("AtlassianClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 =
            AtlassianClient::new("https://example.atlassian.net/wiki", Authentication::new())
                .unwrap();
        let client2 =
            AtlassianClient::new("https://example.atlassian.net/wiki/", Authentication::new())
                .unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_build_resolves_endpoint_and_query() {
        let client = client(FakeConnector::default());
        let request = client
            .build_empty(
                Method::Get,
                "2.0/workspaces/acme/permissions?q=permission%3D%22owner%22",
            )
            .unwrap();

        assert_eq!(request.method(), Method::Get);
        assert_eq!(
            request.url().as_str(),
            "https://example.atlassian.net/2.0/workspaces/acme/permissions?q=permission%3D%22owner%22"
        );
        assert!(request.body().is_none());
        assert!(request.content_type().is_none());
    }

    #[test]
    fn test_build_keeps_base_path() {
        let client = AtlassianClient::with_connector(
            "https://example.atlassian.net/wiki",
            Arc::new(FakeConnector::default()),
        )
        .unwrap();
        let request = client.build_empty(Method::Get, "/rest/api/space").unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://example.atlassian.net/wiki/rest/api/space"
        );
    }

    #[test]
    fn test_build_serializes_json_payload() {
        let client = client(FakeConnector::default());
        let payload = serde_json::json!({"name": "My filter"});
        let request = client
            .build(Method::Post, "rest/api/3/filter", None, Some(&payload))
            .unwrap();

        assert_eq!(request.content_type(), Some(JSON_CONTENT_TYPE));
        assert_eq!(
            request.body().and_then(RequestBody::as_bytes),
            Some(br#"{"name":"My filter"}"#.as_slice())
        );
    }

    #[test]
    fn test_build_is_idempotent() {
        let client = client(FakeConnector::default());
        let payload = serde_json::json!({"key": "KP", "name": "Kanban"});
        let first = client
            .build(Method::Put, "rest/api/3/project/KP", None, Some(&payload))
            .unwrap();
        let second = client
            .build(Method::Put, "rest/api/3/project/KP", None, Some(&payload))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_build_raw_keeps_content_type() {
        let client = client(FakeConnector::default());
        let request = client
            .build_raw(Method::Put, "rest/api/3/x", "text/plain", b"abc".to_vec())
            .unwrap();
        assert_eq!(request.content_type(), Some("text/plain"));
        assert_eq!(request.body(), Some(&RequestBody::Raw(b"abc".to_vec())));
    }

    #[test]
    fn test_build_rejects_unencodable_payload() {
        use std::collections::HashMap;

        let client = client(FakeConnector::default());
        // Non-string map keys cannot be represented in JSON
        let payload: HashMap<(u8, u8), u8> = HashMap::from([((1, 2), 3)]);
        let err = client
            .build(Method::Post, "rest/api/3/x", None, Some(&payload))
            .unwrap_err();
        assert!(err.is_invalid_request());
    }

    #[test]
    fn test_call_decodes_success() {
        let connector = FakeConnector::respond(200, r#"{"id":"10000","name":"Story Points"}"#);
        let client = client(connector.clone());
        let request = client.build_empty(Method::Get, "rest/api/3/field/10000").unwrap();

        let response: Response<serde_json::Value> =
            tokio_test::block_on(client.call(&request)).unwrap();

        assert_eq!(response.data["name"], "Story Points");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.response.endpoint, *request.url());
        assert_eq!(connector.sent().len(), 1);
    }

    #[test]
    fn test_call_keeps_response_on_error_status() {
        let client = client(FakeConnector::respond(404, r#"{"errorMessages":["nope"]}"#));
        let request = client.build_empty(Method::Get, "rest/api/3/filter/1").unwrap();

        let err = tokio_test::block_on(client.call::<serde_json::Value>(&request)).unwrap_err();

        assert!(matches!(err, AtlassianError::Api { .. }));
        assert_eq!(err.status_code(), Some(404));
        assert!(err.response().unwrap().text().contains("nope"));
    }

    #[test]
    fn test_call_empty_ignores_success_body() {
        let client = client(FakeConnector::respond(200, "{}"));
        let request = client
            .build_empty(Method::Post, "rest/api/3/field/customfield_10000/trash")
            .unwrap();

        let trashed = tokio_test::block_on(client.call_empty(&request)).unwrap();

        assert_eq!(trashed.status(), 200);
        assert_eq!(trashed.response.text(), "{}");
    }

    #[test]
    fn test_call_empty_keeps_error_status() {
        let client = client(FakeConnector::respond(409, r#"{"errorMessages":["locked"]}"#));
        let request = client.build_empty(Method::Delete, "rest/api/3/filter/1").unwrap();

        let err = tokio_test::block_on(client.call_empty(&request)).unwrap_err();

        assert!(matches!(err, AtlassianError::Api { .. }));
        assert_eq!(err.status_code(), Some(409));
    }

    #[test]
    fn test_execute_does_not_interpret_status() {
        let client = client(FakeConnector::respond(500, "oops"));
        let request = client.build_empty(Method::Get, "rest/api/3/field").unwrap();

        let response = tokio_test::block_on(client.execute(&request)).unwrap();

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.body, b"oops");
    }

    #[test]
    fn test_call_reports_decode_error() {
        let client = client(FakeConnector::respond(200, "not json"));
        let request = client.build_empty(Method::Get, "rest/api/3/field").unwrap();

        let err = tokio_test::block_on(client.call::<Vec<String>>(&request)).unwrap_err();

        match err {
            AtlassianError::Decode { response, .. } => assert_eq!(response.body, b"not json"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_transport_failure_is_returned_unchanged() {
        let client = client(FakeConnector::failing("connection refused"));
        let request = client.build_empty(Method::Get, "rest/api/3/field").unwrap();

        let err = tokio_test::block_on(client.call::<()>(&request)).unwrap_err();

        match err {
            AtlassianError::Transport(source) => {
                assert_eq!(source.to_string(), "connection refused")
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }
}

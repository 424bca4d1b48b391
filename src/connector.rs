//! Transport seam.
//!
//! The executor never talks to the network directly; it hands a
//! [`RequestDescriptor`] to a [`Connector`]. [`HttpConnector`] is the
//! reqwest-backed implementation; tests substitute their own.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

use crate::auth::Authentication;
use crate::error::{AtlassianError, Result};
use crate::request::{RequestBody, RequestDescriptor, ResponseDescriptor};

const USER_AGENT: &str = concat!("atlassapi/", env!("CARGO_PKG_VERSION"));

/// Sends a request and reads the whole response.
///
/// Implementations return a [`ResponseDescriptor`] whenever the server
/// answered, whatever the status, and an error only when the request could
/// not be sent or the response not read.
#[async_trait]
pub trait Connector: Send + Sync + std::fmt::Debug {
    async fn send(&self, request: &RequestDescriptor) -> Result<ResponseDescriptor>;
}

/// Connector backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct HttpConnector {
    http: Client,
    auth: Authentication,
}

impl std::fmt::Debug for HttpConnector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpConnector")
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

impl HttpConnector {
    /// Build a connector with the default HTTP client settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(auth: Authentication) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(AtlassianError::HttpError)?;

        Ok(Self::with_client(http, auth))
    }

    /// Use a preconfigured client (proxies, custom TLS, shorter timeouts).
    pub fn with_client(http: Client, auth: Authentication) -> Self {
        Self { http, auth }
    }

    pub fn authentication(&self) -> &Authentication {
        &self.auth
    }

    fn prepare(&self, request: &RequestDescriptor) -> Result<reqwest::RequestBuilder> {
        let mut builder = self
            .http
            .request(request.method.into(), request.url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .headers(request.headers.clone());

        builder = self.auth.apply(builder);

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        builder = match &request.body {
            None => builder,
            Some(RequestBody::Json(bytes) | RequestBody::Raw(bytes)) => {
                let builder = match request.content_type.as_deref() {
                    Some(content_type) => {
                        builder.header(reqwest::header::CONTENT_TYPE, content_type)
                    }
                    None => builder,
                };
                builder.body(bytes.clone())
            }
            Some(RequestBody::Multipart(parts)) => {
                let mut form = Form::new();
                for file in parts {
                    let mut part =
                        Part::bytes(file.content.clone()).file_name(file.file_name.clone());
                    if let Some(mime) = file.mime_type.as_deref() {
                        part = part.mime_str(mime)?;
                    }
                    form = form.part(file.field.clone(), part);
                }
                builder.multipart(form)
            }
        };

        Ok(builder)
    }
}

#[async_trait]
impl Connector for HttpConnector {
    async fn send(&self, request: &RequestDescriptor) -> Result<ResponseDescriptor> {
        let response = self.prepare(request)?.send().await?;

        let status = response.status();
        let endpoint = response.url().clone();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(ResponseDescriptor {
            status,
            method: request.method,
            endpoint,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{FilePart, Method};
    use reqwest::header::HeaderMap;
    use url::Url;

    fn descriptor(body: Option<RequestBody>, content_type: Option<&str>) -> RequestDescriptor {
        RequestDescriptor {
            method: Method::Post,
            url: Url::parse("https://example.atlassian.net/rest/api/3/filter").unwrap(),
            endpoint: "rest/api/3/filter".to_string(),
            content_type: content_type.map(str::to_string),
            body,
            headers: HeaderMap::new(),
            timeout: Some(Duration::from_secs(5)),
        }
    }

    #[test]
    fn test_prepare_sets_content_type_and_auth() {
        let connector =
            HttpConnector::new(Authentication::basic("dev@example.com", "token")).unwrap();
        let request = descriptor(
            Some(RequestBody::Json(br#"{"name":"f"}"#.to_vec())),
            Some("application/json"),
        );

        let built = connector.prepare(&request).unwrap().build().unwrap();
        assert_eq!(built.method(), reqwest::Method::POST);
        assert_eq!(
            built.headers().get(reqwest::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert!(built
            .headers()
            .get(reqwest::header::AUTHORIZATION)
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("Basic "));
        assert_eq!(built.timeout(), Some(&Duration::from_secs(5)));
    }

    #[test]
    fn test_prepare_multipart_sets_boundary() {
        let connector = HttpConnector::new(Authentication::bearer("t")).unwrap();
        let request = descriptor(
            Some(RequestBody::Multipart(vec![FilePart::new(
                "file",
                "notes.txt",
                b"hello".to_vec(),
            )
            .with_mime_type("text/plain")])),
            None,
        );

        let built = connector.prepare(&request).unwrap().build().unwrap();
        let content_type = built
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.starts_with("multipart/form-data; boundary="));
    }
}

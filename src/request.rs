//! Request and response descriptors.
//!
//! A [`RequestDescriptor`] is everything needed to perform one HTTP call,
//! built by [`AtlassianClient::build`](crate::AtlassianClient::build) without
//! touching the network. A [`ResponseDescriptor`] is what came back: status,
//! headers, raw body and the endpoint that answered. Both are plain values.

use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{AtlassianError, Result};

/// Content type used for serialized payloads.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// HTTP methods used by the Atlassian REST APIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Patch => reqwest::Method::PATCH,
        }
    }
}

/// One file in a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name (Jira expects `file`).
    pub field: String,
    pub file_name: String,
    pub content: Vec<u8>,
    pub mime_type: Option<String>,
}

impl FilePart {
    pub fn new(field: impl Into<String>, file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            content,
            mime_type: None,
        }
    }

    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// A payload already serialized to JSON.
    Json(Vec<u8>),
    /// Bytes sent untouched.
    Raw(Vec<u8>),
    /// File parts encoded by the connector as `multipart/form-data`.
    Multipart(Vec<FilePart>),
}

impl RequestBody {
    /// Serialized bytes, or `None` for multipart bodies which the transport encodes.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RequestBody::Json(bytes) | RequestBody::Raw(bytes) => Some(bytes),
            RequestBody::Multipart(_) => None,
        }
    }
}

/// An immutable, fully resolved HTTP request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub(crate) method: Method,
    pub(crate) url: Url,
    pub(crate) endpoint: String,
    pub(crate) content_type: Option<String>,
    pub(crate) body: Option<RequestBody>,
    pub(crate) headers: HeaderMap,
    pub(crate) timeout: Option<Duration>,
}

impl RequestDescriptor {
    pub fn method(&self) -> Method {
        self.method
    }

    /// Absolute URL, base included.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Relative endpoint as given by the caller, query included.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    /// Extra headers added on top of authentication and content type.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Return a copy with an additional header.
    #[must_use]
    pub fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers
            .insert(HeaderName::from_static(name), HeaderValue::from_static(value));
        self
    }

    /// Return a copy that the transport abandons after `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// What the transport returned for one request.
///
/// Always produced when a round-trip happened, whatever the status code.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseDescriptor {
    pub status: StatusCode,
    pub method: Method,
    /// Absolute URL that answered.
    pub endpoint: Url,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ResponseDescriptor {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body decoded as UTF-8, lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body into `T`. An empty body decodes as JSON `null`.
    pub fn json<T: DeserializeOwned>(&self) -> core::result::Result<T, serde_json::Error> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return serde_json::from_value(serde_json::Value::Null);
        }
        serde_json::from_slice(&self.body)
    }

    /// Value of the `Retry-After` header in seconds, when present.
    pub fn retry_after(&self) -> Option<u64> {
        self.headers
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    }

    /// Turn a non-success status into [`AtlassianError::Api`].
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(AtlassianError::Api {
                response: Box::new(self),
            })
        }
    }
}

/// A decoded result together with the response it came from.
#[derive(Debug, Clone)]
pub struct Response<T> {
    pub data: T,
    pub response: ResponseDescriptor,
}

impl<T> Response<T> {
    pub fn into_data(self) -> T {
        self.data
    }

    pub fn status(&self) -> StatusCode {
        self.response.status
    }

    /// Map the decoded data, keeping the response.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Response<U> {
        Response {
            data: f(self.data),
            response: self.response,
        }
    }
}

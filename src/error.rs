//! Error types for Atlassian API operations.

use std::fmt;

use thiserror::Error;

use crate::request::ResponseDescriptor;

/// Identifiers and parameters that an operation refuses to run without.
///
/// Each variant names one required input, so callers can tell exactly which
/// argument was empty without parsing the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Required {
    Workspace,
    Member,
    Repository,
    Webhook,
    ProjectKeyOrId,
    FieldId,
    DashboardId,
    FilterId,
    AccountId,
    IssueKeyOrId,
    AttachmentId,
    FileName,
    SpaceKey,
    Directory,
    UserId,
    Payload,
}

impl Required {
    /// Human-readable name of the missing parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Required::Workspace => "workspace",
            Required::Member => "member",
            Required::Repository => "repository",
            Required::Webhook => "webhook id",
            Required::ProjectKeyOrId => "project key or id",
            Required::FieldId => "field id",
            Required::DashboardId => "dashboard id",
            Required::FilterId => "filter id",
            Required::AccountId => "account id",
            Required::IssueKeyOrId => "issue key or id",
            Required::AttachmentId => "attachment id",
            Required::FileName => "file name",
            Required::SpaceKey => "space key",
            Required::Directory => "directory id",
            Required::UserId => "user id",
            Required::Payload => "payload",
        }
    }
}

impl fmt::Display for Required {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during Atlassian API operations.
#[derive(Debug, Error)]
pub enum AtlassianError {
    /// Configuration is missing or incomplete.
    #[error("Atlassian configuration required: {0}")]
    ConfigMissing(String),

    /// A required identifier was empty. Raised before any I/O.
    #[error("{0} is required")]
    Missing(Required),

    /// A parameter was present but malformed. Raised before any I/O.
    #[error("invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The endpoint could not be resolved against the base URL.
    #[error("Invalid request URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// The request payload could not be serialized.
    #[error("Failed to encode request body: {0}")]
    EncodeError(#[source] serde_json::Error),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Transport failure reported by a custom connector.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The response body did not match the expected type.
    #[error("Failed to parse response from {}: {source}", response.endpoint)]
    Decode {
        #[source]
        source: serde_json::Error,
        response: Box<ResponseDescriptor>,
    },

    /// The API answered with a non-success status. The payload is left
    /// uninterpreted on the attached response.
    #[error("Atlassian API returned {} for {} {}", response.status, response.method, response.endpoint)]
    Api { response: Box<ResponseDescriptor> },
}

impl AtlassianError {
    /// True for errors detected before any request was built.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AtlassianError::Missing(_) | AtlassianError::InvalidParameter { .. }
        )
    }

    /// True when the request could not be constructed.
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            AtlassianError::UrlError(_) | AtlassianError::EncodeError(_)
        )
    }

    /// True when the connection could not be established or the request not sent.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AtlassianError::HttpError(_) | AtlassianError::Transport(_)
        )
    }

    /// The response that accompanied this error, if a round-trip happened.
    pub fn response(&self) -> Option<&ResponseDescriptor> {
        match self {
            AtlassianError::Decode { response, .. } | AtlassianError::Api { response } => {
                Some(response)
            }
            _ => None,
        }
    }

    /// HTTP status code, if a round-trip happened.
    pub fn status_code(&self) -> Option<u16> {
        self.response().map(|r| r.status.as_u16())
    }
}

/// Result type alias for Atlassian operations.
pub type Result<T> = core::result::Result<T, AtlassianError>;

/// Fail with [`AtlassianError::Missing`] when `value` is empty or whitespace.
pub(crate) fn require(value: &str, what: Required) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AtlassianError::Missing(what));
    }
    Ok(())
}

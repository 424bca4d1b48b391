//! Bitbucket Cloud services.
//!
//! Endpoints live under `2.0/` on `https://api.bitbucket.org/`; build the
//! client with [`AtlassianClient::bitbucket`](crate::AtlassianClient::bitbucket).

mod hook;
mod workspace;

pub use hook::*;
pub use workspace::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Bitbucket account as embedded in other resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BitbucketUser {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
}

/// A link object (`{"href": ...}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

//! Jira Cloud platform services (`rest/api/3/...`).
//!
//! Build the client against the site URL, e.g.
//! `https://your-site.atlassian.net`.

mod attachment;
mod dashboard;
mod field;
mod filter;
mod project;

pub use attachment::*;
pub use dashboard::*;
pub use field::*;
pub use filter::*;
pub use project::*;

use serde::{Deserialize, Serialize};

/// A Jira user as embedded in other resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraUser {
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub account_type: Option<String>,
}

/// Who can see a dashboard or filter.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SharePermission {
    #[serde(default)]
    pub id: Option<i64>,
    /// `user`, `group`, `project`, `projectRole`, `global`, `loggedin` or `project-unknown`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub project: Option<ProjectRef>,
    #[serde(default)]
    pub group: Option<GroupRef>,
    #[serde(default)]
    pub user: Option<JiraUser>,
}

/// A project reference inside share permissions.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: Option<String>,
    pub key: Option<String>,
    pub name: Option<String>,
}

/// A group reference inside share permissions.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRef {
    pub name: Option<String>,
    pub group_id: Option<String>,
}

/// Reference to a long-running task, returned by asynchronous deletes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRef {
    #[serde(rename = "self")]
    pub self_link: String,
    pub id: String,
}

//! Jira projects.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::JiraUser;
use crate::client::AtlassianClient;
use crate::endpoint::{segment, Query};
use crate::error::{require, AtlassianError, Required, Result};
use crate::pagination::Page;
use crate::request::{Method, Response};

/// A Jira project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "self", default)]
    pub self_link: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub lead: Option<JiraUser>,
    #[serde(default)]
    pub project_type_key: Option<String>,
    #[serde(default)]
    pub simplified: Option<bool>,
    /// `classic` or `next-gen`.
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub is_private: Option<bool>,
    #[serde(default)]
    pub archived: Option<bool>,
    #[serde(default)]
    pub deleted: Option<bool>,
    #[serde(default)]
    pub project_category: Option<ProjectCategory>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub assignee_type: Option<String>,
}

impl Project {
    /// Whether the project is team-managed (next-gen).
    pub fn is_team_managed(&self) -> bool {
        self.simplified.unwrap_or(false) || self.style.as_deref() == Some("next-gen")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectCategory {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Payload for `POST rest/api/3/project`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    pub key: String,
    pub name: String,
    pub description: Option<String>,
    pub lead_account_id: Option<String>,
    pub url: Option<String>,
    pub assignee_type: Option<String>,
    pub avatar_id: Option<i64>,
    pub issue_security_scheme: Option<i64>,
    pub permission_scheme: Option<i64>,
    pub notification_scheme: Option<i64>,
    pub category_id: Option<i64>,
    pub project_type_key: Option<String>,
    pub project_template_key: Option<String>,
    pub workflow_scheme: Option<i64>,
    pub issue_type_screen_scheme: Option<i64>,
    pub issue_type_scheme: Option<i64>,
    pub field_configuration_scheme: Option<i64>,
}

/// Payload for `PUT rest/api/3/project/{key}`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdatePayload {
    pub key: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub lead_account_id: Option<String>,
    pub url: Option<String>,
    pub assignee_type: Option<String>,
    pub avatar_id: Option<i64>,
    pub category_id: Option<i64>,
}

/// Identifiers of a freshly created project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProject {
    #[serde(rename = "self")]
    pub self_link: String,
    pub id: i64,
    pub key: String,
}

/// Filters for `GET rest/api/3/project/search`.
#[derive(Debug, Clone, Default)]
pub struct ProjectSearchOptions {
    pub order_by: Option<String>,
    pub ids: Vec<i64>,
    pub keys: Vec<String>,
    pub query: Option<String>,
    pub type_keys: Vec<String>,
    pub category_id: Option<i64>,
    /// `view`, `browse` or `edit`.
    pub action: Option<String>,
    pub expand: Vec<String>,
    /// `live`, `archived` or `deleted`.
    pub status: Vec<String>,
}

/// Issue type with its workflow statuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectIssueTypeStatuses {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subtask: bool,
    #[serde(default)]
    pub statuses: Vec<ProjectStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStatus {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Project operations.
#[async_trait]
pub trait ProjectApi: Send + Sync {
    async fn create(&self, payload: &ProjectPayload) -> Result<Response<NewProject>>;

    async fn search(
        &self,
        options: &ProjectSearchOptions,
        start_at: u32,
        max_results: u32,
    ) -> Result<Response<Page<Project>>>;

    async fn get(&self, project_key_or_id: &str, expand: &[String]) -> Result<Response<Project>>;

    async fn update(
        &self,
        project_key_or_id: &str,
        payload: &ProjectUpdatePayload,
    ) -> Result<Response<Project>>;

    /// With `enable_undo`, the project goes to the recycle bin instead of being purged.
    async fn delete(&self, project_key_or_id: &str, enable_undo: bool) -> Result<Response<()>>;

    async fn archive(&self, project_key_or_id: &str) -> Result<Response<()>>;

    async fn restore(&self, project_key_or_id: &str) -> Result<Response<Project>>;

    async fn statuses(
        &self,
        project_key_or_id: &str,
    ) -> Result<Response<Vec<ProjectIssueTypeStatuses>>>;
}

#[derive(Debug, Clone)]
pub struct ProjectService {
    client: AtlassianClient,
}

impl ProjectService {
    pub fn new(client: AtlassianClient) -> Self {
        Self { client }
    }
}

fn project_path(project_key_or_id: &str) -> Result<String> {
    require(project_key_or_id, Required::ProjectKeyOrId)?;
    Ok(format!("rest/api/3/project/{}", segment(project_key_or_id)))
}

#[async_trait]
impl ProjectApi for ProjectService {
    async fn create(&self, payload: &ProjectPayload) -> Result<Response<NewProject>> {
        if payload.key.is_empty() || payload.name.is_empty() {
            return Err(AtlassianError::InvalidParameter {
                name: "project payload",
                reason: "key and name are required".to_string(),
            });
        }

        let request = self
            .client
            .build(Method::Post, "rest/api/3/project", None, Some(payload))?;
        self.client.call(&request).await
    }

    async fn search(
        &self,
        options: &ProjectSearchOptions,
        start_at: u32,
        max_results: u32,
    ) -> Result<Response<Page<Project>>> {
        let mut params = Query::new();
        params
            .push("startAt", start_at)
            .push("maxResults", max_results)
            .push_opt("orderBy", options.order_by.as_deref())
            .push_each("id", &options.ids)
            .push_each("keys", &options.keys)
            .push_opt("query", options.query.as_deref())
            .push_joined("typeKey", &options.type_keys)
            .push_opt("categoryId", options.category_id)
            .push_opt("action", options.action.as_deref())
            .push_joined("expand", &options.expand)
            .push_each("status", &options.status);

        let endpoint = params.finish("rest/api/3/project/search");
        let request = self.client.build_empty(Method::Get, &endpoint)?;
        self.client.call(&request).await
    }

    async fn get(&self, project_key_or_id: &str, expand: &[String]) -> Result<Response<Project>> {
        let path = project_path(project_key_or_id)?;

        let mut params = Query::new();
        params.push_joined("expand", expand);

        let request = self.client.build_empty(Method::Get, &params.finish(&path))?;
        self.client.call(&request).await
    }

    async fn update(
        &self,
        project_key_or_id: &str,
        payload: &ProjectUpdatePayload,
    ) -> Result<Response<Project>> {
        let path = project_path(project_key_or_id)?;
        let request = self.client.build(Method::Put, &path, None, Some(payload))?;
        self.client.call(&request).await
    }

    async fn delete(&self, project_key_or_id: &str, enable_undo: bool) -> Result<Response<()>> {
        let path = project_path(project_key_or_id)?;

        let mut params = Query::new();
        params.push("enableUndo", enable_undo);

        let request = self
            .client
            .build_empty(Method::Delete, &params.finish(&path))?;
        self.client.call_empty(&request).await
    }

    async fn archive(&self, project_key_or_id: &str) -> Result<Response<()>> {
        let path = project_path(project_key_or_id)?;
        let request = self
            .client
            .build_empty(Method::Post, &format!("{path}/archive"))?;
        self.client.call_empty(&request).await
    }

    async fn restore(&self, project_key_or_id: &str) -> Result<Response<Project>> {
        let path = project_path(project_key_or_id)?;
        let request = self
            .client
            .build_empty(Method::Post, &format!("{path}/restore"))?;
        self.client.call(&request).await
    }

    async fn statuses(
        &self,
        project_key_or_id: &str,
    ) -> Result<Response<Vec<ProjectIssueTypeStatuses>>> {
        let path = project_path(project_key_or_id)?;
        let request = self
            .client
            .build_empty(Method::Get, &format!("{path}/statuses"))?;
        self.client.call(&request).await
    }
}

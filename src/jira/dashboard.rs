//! Jira dashboards.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{JiraUser, SharePermission};
use crate::client::AtlassianClient;
use crate::endpoint::{segment, Query};
use crate::error::{require, AtlassianError, Required, Result};
use crate::pagination::Page;
use crate::request::{Method, Response};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_favourite: bool,
    #[serde(default)]
    pub owner: Option<JiraUser>,
    #[serde(default)]
    pub popularity: Option<i64>,
    #[serde(default)]
    pub rank: Option<i64>,
    #[serde(rename = "self", default)]
    pub self_link: Option<String>,
    #[serde(default)]
    pub view: Option<String>,
    #[serde(default)]
    pub share_permissions: Vec<SharePermission>,
    #[serde(default)]
    pub edit_permissions: Vec<SharePermission>,
}

/// The legacy `GET rest/api/3/dashboard` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPage {
    #[serde(default)]
    pub start_at: u32,
    #[serde(default)]
    pub max_results: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub prev: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub dashboards: Vec<Dashboard>,
}

/// Payload for creating, copying and updating a dashboard.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayload {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub share_permissions: Vec<SharePermission>,
    #[serde(default)]
    pub edit_permissions: Vec<SharePermission>,
}

/// Filters for `GET rest/api/3/dashboard/search`.
#[derive(Debug, Clone, Default)]
pub struct DashboardSearchOptions {
    pub dashboard_name: Option<String>,
    pub owner_account_id: Option<String>,
    pub group_permission_name: Option<String>,
    pub group_id: Option<String>,
    pub project_id: Option<i64>,
    pub order_by: Option<String>,
    /// `active`, `archived` or `deleted`.
    pub status: Option<String>,
    pub expand: Vec<String>,
}

/// Dashboard operations.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// `filter` is `favourite` or `my`; empty lists everything.
    async fn gets(&self, start_at: u32, max_results: u32, filter: &str)
        -> Result<Response<DashboardPage>>;

    async fn create(&self, payload: &DashboardPayload) -> Result<Response<Dashboard>>;

    async fn search(
        &self,
        options: &DashboardSearchOptions,
        start_at: u32,
        max_results: u32,
    ) -> Result<Response<Page<Dashboard>>>;

    async fn get(&self, dashboard_id: &str) -> Result<Response<Dashboard>>;

    async fn delete(&self, dashboard_id: &str) -> Result<Response<()>>;

    async fn copy(&self, dashboard_id: &str, payload: &DashboardPayload)
        -> Result<Response<Dashboard>>;

    async fn update(
        &self,
        dashboard_id: &str,
        payload: &DashboardPayload,
    ) -> Result<Response<Dashboard>>;
}

#[derive(Debug, Clone)]
pub struct DashboardService {
    client: AtlassianClient,
}

impl DashboardService {
    pub fn new(client: AtlassianClient) -> Self {
        Self { client }
    }
}

fn dashboard_path(dashboard_id: &str) -> Result<String> {
    require(dashboard_id, Required::DashboardId)?;
    Ok(format!("rest/api/3/dashboard/{}", segment(dashboard_id)))
}

fn validate(payload: &DashboardPayload) -> Result<()> {
    if payload.name.trim().is_empty() {
        return Err(AtlassianError::InvalidParameter {
            name: "dashboard payload",
            reason: "name is required".to_string(),
        });
    }
    Ok(())
}

#[async_trait]
impl DashboardApi for DashboardService {
    async fn gets(
        &self,
        start_at: u32,
        max_results: u32,
        filter: &str,
    ) -> Result<Response<DashboardPage>> {
        let mut params = Query::new();
        params
            .push("startAt", start_at)
            .push("maxResults", max_results)
            .push_str("filter", filter);

        let endpoint = params.finish("rest/api/3/dashboard");
        let request = self.client.build_empty(Method::Get, &endpoint)?;
        self.client.call(&request).await
    }

    async fn create(&self, payload: &DashboardPayload) -> Result<Response<Dashboard>> {
        validate(payload)?;
        let request = self
            .client
            .build(Method::Post, "rest/api/3/dashboard", None, Some(payload))?;
        self.client.call(&request).await
    }

    async fn search(
        &self,
        options: &DashboardSearchOptions,
        start_at: u32,
        max_results: u32,
    ) -> Result<Response<Page<Dashboard>>> {
        let mut params = Query::new();
        params
            .push("startAt", start_at)
            .push("maxResults", max_results)
            .push_opt("dashboardName", options.dashboard_name.as_deref())
            .push_opt("accountId", options.owner_account_id.as_deref())
            .push_opt("groupname", options.group_permission_name.as_deref())
            .push_opt("groupId", options.group_id.as_deref())
            .push_opt("projectId", options.project_id)
            .push_opt("orderBy", options.order_by.as_deref())
            .push_opt("status", options.status.as_deref())
            .push_joined("expand", &options.expand);

        let endpoint = params.finish("rest/api/3/dashboard/search");
        let request = self.client.build_empty(Method::Get, &endpoint)?;
        self.client.call(&request).await
    }

    async fn get(&self, dashboard_id: &str) -> Result<Response<Dashboard>> {
        let path = dashboard_path(dashboard_id)?;
        let request = self.client.build_empty(Method::Get, &path)?;
        self.client.call(&request).await
    }

    async fn delete(&self, dashboard_id: &str) -> Result<Response<()>> {
        let path = dashboard_path(dashboard_id)?;
        let request = self.client.build_empty(Method::Delete, &path)?;
        self.client.call_empty(&request).await
    }

    async fn copy(
        &self,
        dashboard_id: &str,
        payload: &DashboardPayload,
    ) -> Result<Response<Dashboard>> {
        let path = dashboard_path(dashboard_id)?;
        validate(payload)?;
        let request = self
            .client
            .build(Method::Post, &format!("{path}/copy"), None, Some(payload))?;
        self.client.call(&request).await
    }

    async fn update(
        &self,
        dashboard_id: &str,
        payload: &DashboardPayload,
    ) -> Result<Response<Dashboard>> {
        let path = dashboard_path(dashboard_id)?;
        validate(payload)?;
        let request = self.client.build(Method::Put, &path, None, Some(payload))?;
        self.client.call(&request).await
    }
}

//! Workspace webhook subscriptions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::AtlassianClient;
use crate::endpoint::segment;
use crate::error::{require, AtlassianError, Required, Result};
use crate::pagination::BitbucketPage;
use crate::request::{Method, Response};

/// Payload for creating or updating a webhook.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub description: Option<String>,
    pub url: Option<String>,
    pub active: Option<bool>,
    /// Event keys such as `repo:push` or `pullrequest:created`.
    #[serde(default)]
    pub events: Vec<String>,
}

/// A webhook subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookSubscription {
    pub uuid: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subject_type: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(default)]
    pub secret_set: bool,
}

/// Webhook operations on a workspace.
#[async_trait]
pub trait WorkspaceHookApi: Send + Sync {
    async fn gets(&self, workspace: &str) -> Result<Response<BitbucketPage<WebhookSubscription>>>;

    async fn create(
        &self,
        workspace: &str,
        payload: &WebhookPayload,
    ) -> Result<Response<WebhookSubscription>>;

    async fn get(&self, workspace: &str, webhook_id: &str) -> Result<Response<WebhookSubscription>>;

    async fn update(
        &self,
        workspace: &str,
        webhook_id: &str,
        payload: &WebhookPayload,
    ) -> Result<Response<WebhookSubscription>>;

    async fn delete(&self, workspace: &str, webhook_id: &str) -> Result<Response<()>>;
}

#[derive(Debug, Clone)]
pub struct WorkspaceHookService {
    client: AtlassianClient,
}

impl WorkspaceHookService {
    pub fn new(client: AtlassianClient) -> Self {
        Self { client }
    }

    fn hook_path(workspace: &str, webhook_id: &str) -> Result<String> {
        require(workspace, Required::Workspace)?;
        require(webhook_id, Required::Webhook)?;
        Ok(format!(
            "2.0/workspaces/{}/hooks/{}",
            segment(workspace),
            segment(webhook_id)
        ))
    }
}

fn validate(payload: &WebhookPayload) -> Result<()> {
    if payload.url.as_deref().map_or(true, str::is_empty) {
        return Err(AtlassianError::InvalidParameter {
            name: "url",
            reason: "webhook url is required".to_string(),
        });
    }
    if payload.events.is_empty() {
        return Err(AtlassianError::InvalidParameter {
            name: "events",
            reason: "at least one event is required".to_string(),
        });
    }
    Ok(())
}

#[async_trait]
impl WorkspaceHookApi for WorkspaceHookService {
    async fn gets(&self, workspace: &str) -> Result<Response<BitbucketPage<WebhookSubscription>>> {
        require(workspace, Required::Workspace)?;

        let endpoint = format!("2.0/workspaces/{}/hooks", segment(workspace));
        let request = self.client.build_empty(Method::Get, &endpoint)?;
        self.client.call(&request).await
    }

    async fn create(
        &self,
        workspace: &str,
        payload: &WebhookPayload,
    ) -> Result<Response<WebhookSubscription>> {
        require(workspace, Required::Workspace)?;
        validate(payload)?;

        let endpoint = format!("2.0/workspaces/{}/hooks", segment(workspace));
        let request = self
            .client
            .build(Method::Post, &endpoint, None, Some(payload))?;
        self.client.call(&request).await
    }

    async fn get(
        &self,
        workspace: &str,
        webhook_id: &str,
    ) -> Result<Response<WebhookSubscription>> {
        let endpoint = Self::hook_path(workspace, webhook_id)?;
        let request = self.client.build_empty(Method::Get, &endpoint)?;
        self.client.call(&request).await
    }

    async fn update(
        &self,
        workspace: &str,
        webhook_id: &str,
        payload: &WebhookPayload,
    ) -> Result<Response<WebhookSubscription>> {
        let endpoint = Self::hook_path(workspace, webhook_id)?;
        validate(payload)?;

        let request = self
            .client
            .build(Method::Put, &endpoint, None, Some(payload))?;
        self.client.call(&request).await
    }

    async fn delete(&self, workspace: &str, webhook_id: &str) -> Result<Response<()>> {
        let endpoint = Self::hook_path(workspace, webhook_id)?;
        let request = self.client.build_empty(Method::Delete, &endpoint)?;
        self.client.call_empty(&request).await
    }
}

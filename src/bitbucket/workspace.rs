//! Bitbucket workspaces, their members, projects and permissions.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BitbucketUser, Link};
use crate::client::AtlassianClient;
use crate::endpoint::{segment, Query};
use crate::error::{require, Required, Result};
use crate::pagination::BitbucketPage;
use crate::request::{Method, Response};

/// A Bitbucket Cloud workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub uuid: Option<String>,
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub links: HashMap<String, Link>,
}

/// A reference to a workspace embedded in other resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceRef {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub uuid: Option<String>,
}

/// A user's membership in a workspace, optionally with its permission level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceMembership {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// `owner`, `collaborator` or `member`; only present on permission listings.
    #[serde(default)]
    pub permission: Option<String>,
    #[serde(default)]
    pub user: Option<BitbucketUser>,
    #[serde(default)]
    pub workspace: Option<WorkspaceRef>,
}

/// A project inside a workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitbucketProject {
    pub key: String,
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub has_publicly_visible_repos: bool,
    #[serde(default)]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_on: Option<DateTime<Utc>>,
}

/// A repository reference inside a permission entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryRef {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub uuid: Option<String>,
}

/// A user's permission on one repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryPermission {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// `admin`, `write` or `read`.
    pub permission: String,
    #[serde(default)]
    pub user: Option<BitbucketUser>,
    #[serde(default)]
    pub repository: Option<RepositoryRef>,
}

/// Workspace operations.
#[async_trait]
pub trait WorkspaceApi: Send + Sync {
    /// `GET 2.0/workspaces/{workspace}`
    async fn get(&self, workspace: &str) -> Result<Response<Workspace>>;

    /// `GET 2.0/workspaces/{workspace}/members`
    async fn members(&self, workspace: &str)
        -> Result<Response<BitbucketPage<WorkspaceMembership>>>;

    /// `GET 2.0/workspaces/{workspace}/members/{member}`
    async fn membership(&self, workspace: &str, member_id: &str)
        -> Result<Response<WorkspaceMembership>>;

    /// `GET 2.0/workspaces/{workspace}/projects`
    async fn projects(&self, workspace: &str) -> Result<Response<BitbucketPage<BitbucketProject>>>;

    /// `GET 2.0/workspaces/{workspace}/permissions?q=...`
    ///
    /// `query` is a Bitbucket filter expression such as `permission="owner"`.
    async fn permissions(
        &self,
        workspace: &str,
        query: &str,
    ) -> Result<Response<BitbucketPage<WorkspaceMembership>>>;

    /// `GET 2.0/workspaces/{workspace}/permissions/repositories?q=...&sort=...`
    async fn repository_permissions(
        &self,
        workspace: &str,
        query: &str,
        sort: &str,
    ) -> Result<Response<BitbucketPage<RepositoryPermission>>>;
}

/// [`WorkspaceApi`] over an [`AtlassianClient`].
#[derive(Debug, Clone)]
pub struct WorkspaceService {
    client: AtlassianClient,
}

impl WorkspaceService {
    pub fn new(client: AtlassianClient) -> Self {
        Self { client }
    }

    /// Webhook subscriptions on workspaces.
    pub fn hooks(&self) -> super::WorkspaceHookService {
        super::WorkspaceHookService::new(self.client.clone())
    }
}

#[async_trait]
impl WorkspaceApi for WorkspaceService {
    async fn get(&self, workspace: &str) -> Result<Response<Workspace>> {
        require(workspace, Required::Workspace)?;

        let endpoint = format!("2.0/workspaces/{}", segment(workspace));
        let request = self.client.build_empty(Method::Get, &endpoint)?;
        self.client.call(&request).await
    }

    async fn members(
        &self,
        workspace: &str,
    ) -> Result<Response<BitbucketPage<WorkspaceMembership>>> {
        require(workspace, Required::Workspace)?;

        let endpoint = format!("2.0/workspaces/{}/members", segment(workspace));
        let request = self.client.build_empty(Method::Get, &endpoint)?;
        self.client.call(&request).await
    }

    async fn membership(
        &self,
        workspace: &str,
        member_id: &str,
    ) -> Result<Response<WorkspaceMembership>> {
        require(workspace, Required::Workspace)?;
        require(member_id, Required::Member)?;

        let endpoint = format!(
            "2.0/workspaces/{}/members/{}",
            segment(workspace),
            segment(member_id)
        );
        let request = self.client.build_empty(Method::Get, &endpoint)?;
        self.client.call(&request).await
    }

    async fn projects(&self, workspace: &str) -> Result<Response<BitbucketPage<BitbucketProject>>> {
        require(workspace, Required::Workspace)?;

        let endpoint = format!("2.0/workspaces/{}/projects", segment(workspace));
        let request = self.client.build_empty(Method::Get, &endpoint)?;
        self.client.call(&request).await
    }

    async fn permissions(
        &self,
        workspace: &str,
        query: &str,
    ) -> Result<Response<BitbucketPage<WorkspaceMembership>>> {
        require(workspace, Required::Workspace)?;

        let mut params = Query::new();
        params.push_str("q", query);
        let endpoint =
            params.finish(&format!("2.0/workspaces/{}/permissions", segment(workspace)));

        let request = self.client.build_empty(Method::Get, &endpoint)?;
        self.client.call(&request).await
    }

    async fn repository_permissions(
        &self,
        workspace: &str,
        query: &str,
        sort: &str,
    ) -> Result<Response<BitbucketPage<RepositoryPermission>>> {
        require(workspace, Required::Workspace)?;

        let mut params = Query::new();
        params.push_str("q", query).push_str("sort", sort);
        let endpoint = params.finish(&format!(
            "2.0/workspaces/{}/permissions/repositories",
            segment(workspace)
        ));

        let request = self.client.build_empty(Method::Get, &endpoint)?;
        self.client.call(&request).await
    }
}

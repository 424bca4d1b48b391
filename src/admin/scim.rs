//! SCIM 2.0 user provisioning for an identity-provider directory.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::AtlassianClient;
use crate::endpoint::{segment, Query};
use crate::error::{require, AtlassianError, Required, Result};
use crate::request::{Method, Response};

pub const SCIM_USER_SCHEMA: &str = "urn:ietf:params:scim:schemas:core:2.0:User";
pub const SCIM_ENTERPRISE_USER_SCHEMA: &str =
    "urn:ietf:params:scim:schemas:extension:enterprise:2.0:User";
pub const SCIM_PATCH_SCHEMA: &str = "urn:ietf:params:scim:api:messages:2.0:PatchOp";

/// A SCIM user. Used both as payload and as response.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimUser {
    #[serde(default)]
    pub schemas: Vec<String>,
    pub id: Option<String>,
    pub external_id: Option<String>,
    pub user_name: String,
    #[serde(default)]
    pub emails: Vec<ScimEmail>,
    pub name: Option<ScimName>,
    pub display_name: Option<String>,
    pub nick_name: Option<String>,
    pub title: Option<String>,
    pub preferred_language: Option<String>,
    pub department: Option<String>,
    pub organization: Option<String>,
    pub timezone: Option<String>,
    #[serde(default)]
    pub phone_numbers: Vec<ScimPhoneNumber>,
    pub active: Option<bool>,
    pub meta: Option<ScimMeta>,
}

impl ScimUser {
    /// A user payload carrying the core schema.
    pub fn new(user_name: &str) -> Self {
        Self {
            schemas: vec![SCIM_USER_SCHEMA.to_string()],
            user_name: user_name.to_string(),
            ..Default::default()
        }
    }

    pub fn primary_email(&self) -> Option<&str> {
        self.emails
            .iter()
            .find(|e| e.primary)
            .or_else(|| self.emails.first())
            .map(|e| e.value.as_str())
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScimEmail {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub primary: bool,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimName {
    pub formatted: Option<String>,
    pub family_name: Option<String>,
    pub given_name: Option<String>,
    pub middle_name: Option<String>,
    pub honorific_prefix: Option<String>,
    pub honorific_suffix: Option<String>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScimPhoneNumber {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub primary: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimMeta {
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

/// A SCIM list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScimPage<T> {
    #[serde(default)]
    pub schemas: Vec<String>,
    #[serde(default)]
    pub total_results: u64,
    /// 1-based index of the first resource.
    #[serde(default)]
    pub start_index: u64,
    #[serde(default)]
    pub items_per_page: u64,
    #[serde(rename = "Resources", default = "Vec::new")]
    pub resources: Vec<T>,
}

impl<T> ScimPage<T> {
    pub fn has_more(&self) -> bool {
        let seen = self.start_index.saturating_sub(1) + self.resources.len() as u64;
        seen < self.total_results
    }
}

/// Attribute selection shared by list and get.
#[derive(Debug, Clone, Default)]
pub struct ScimUserQuery {
    pub attributes: Vec<String>,
    pub excluded_attributes: Vec<String>,
    /// SCIM filter such as `userName eq "ed@example.com"`. List only.
    pub filter: Option<String>,
}

/// One operation in a SCIM PATCH request.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScimPatchOperation {
    /// `add`, `replace` or `remove`.
    pub op: String,
    pub path: Option<String>,
    pub value: Option<Value>,
}

impl ScimPatchOperation {
    pub fn replace(path: &str, value: Value) -> Self {
        Self {
            op: "replace".to_string(),
            path: Some(path.to_string()),
            value: Some(value),
        }
    }

    pub fn add(path: &str, value: Value) -> Self {
        Self {
            op: "add".to_string(),
            path: Some(path.to_string()),
            value: Some(value),
        }
    }

    pub fn remove(path: &str) -> Self {
        Self {
            op: "remove".to_string(),
            path: Some(path.to_string()),
            value: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct PatchPayload<'a> {
    schemas: [&'static str; 1],
    #[serde(rename = "Operations")]
    operations: &'a [ScimPatchOperation],
}

/// SCIM user operations.
#[async_trait]
pub trait ScimUserApi: Send + Sync {
    async fn create(
        &self,
        directory_id: &str,
        payload: &ScimUser,
        query: &ScimUserQuery,
    ) -> Result<Response<ScimUser>>;

    async fn gets(
        &self,
        directory_id: &str,
        query: &ScimUserQuery,
        start_index: u32,
        count: u32,
    ) -> Result<Response<ScimPage<ScimUser>>>;

    async fn get(
        &self,
        directory_id: &str,
        user_id: &str,
        query: &ScimUserQuery,
    ) -> Result<Response<ScimUser>>;

    /// Deactivate the user. The account stays, but loses product access.
    async fn deactivate(&self, directory_id: &str, user_id: &str) -> Result<Response<()>>;

    /// Replace the user's attributes.
    async fn update(
        &self,
        directory_id: &str,
        user_id: &str,
        payload: &ScimUser,
        query: &ScimUserQuery,
    ) -> Result<Response<ScimUser>>;

    async fn patch(
        &self,
        directory_id: &str,
        user_id: &str,
        operations: &[ScimPatchOperation],
        query: &ScimUserQuery,
    ) -> Result<Response<ScimUser>>;
}

#[derive(Debug, Clone)]
pub struct ScimUserService {
    client: AtlassianClient,
}

impl ScimUserService {
    pub fn new(client: AtlassianClient) -> Self {
        Self { client }
    }
}

fn users_path(directory_id: &str) -> Result<String> {
    require(directory_id, Required::Directory)?;
    Ok(format!("scim/directory/{}/Users", segment(directory_id)))
}

fn user_path(directory_id: &str, user_id: &str) -> Result<String> {
    let base = users_path(directory_id)?;
    require(user_id, Required::UserId)?;
    Ok(format!("{base}/{}", segment(user_id)))
}

fn attributes(query: &ScimUserQuery) -> Query {
    let mut params = Query::new();
    params
        .push_joined("attributes", &query.attributes)
        .push_joined("excludedAttributes", &query.excluded_attributes);
    params
}

fn validate(payload: &ScimUser) -> Result<()> {
    if payload.user_name.trim().is_empty() {
        return Err(AtlassianError::InvalidParameter {
            name: "userName",
            reason: "SCIM users need a userName".to_string(),
        });
    }
    Ok(())
}

#[async_trait]
impl ScimUserApi for ScimUserService {
    async fn create(
        &self,
        directory_id: &str,
        payload: &ScimUser,
        query: &ScimUserQuery,
    ) -> Result<Response<ScimUser>> {
        let path = users_path(directory_id)?;
        validate(payload)?;

        let endpoint = attributes(query).finish(&path);
        let request = self
            .client
            .build(Method::Post, &endpoint, None, Some(payload))?;
        self.client.call(&request).await
    }

    async fn gets(
        &self,
        directory_id: &str,
        query: &ScimUserQuery,
        start_index: u32,
        count: u32,
    ) -> Result<Response<ScimPage<ScimUser>>> {
        let path = users_path(directory_id)?;

        let mut params = attributes(query);
        params
            .push_opt("filter", query.filter.as_deref())
            .push("startIndex", start_index)
            .push("count", count);

        let request = self
            .client
            .build_empty(Method::Get, &params.finish(&path))?;
        self.client.call(&request).await
    }

    async fn get(
        &self,
        directory_id: &str,
        user_id: &str,
        query: &ScimUserQuery,
    ) -> Result<Response<ScimUser>> {
        let path = user_path(directory_id, user_id)?;
        let request = self
            .client
            .build_empty(Method::Get, &attributes(query).finish(&path))?;
        self.client.call(&request).await
    }

    async fn deactivate(&self, directory_id: &str, user_id: &str) -> Result<Response<()>> {
        let path = user_path(directory_id, user_id)?;
        let request = self.client.build_empty(Method::Delete, &path)?;
        self.client.call_empty(&request).await
    }

    async fn update(
        &self,
        directory_id: &str,
        user_id: &str,
        payload: &ScimUser,
        query: &ScimUserQuery,
    ) -> Result<Response<ScimUser>> {
        let path = user_path(directory_id, user_id)?;
        validate(payload)?;

        let endpoint = attributes(query).finish(&path);
        let request = self
            .client
            .build(Method::Put, &endpoint, None, Some(payload))?;
        self.client.call(&request).await
    }

    async fn patch(
        &self,
        directory_id: &str,
        user_id: &str,
        operations: &[ScimPatchOperation],
        query: &ScimUserQuery,
    ) -> Result<Response<ScimUser>> {
        let path = user_path(directory_id, user_id)?;
        if operations.is_empty() {
            return Err(AtlassianError::Missing(Required::Payload));
        }

        let payload = PatchPayload {
            schemas: [SCIM_PATCH_SCHEMA],
            operations,
        };
        let endpoint = attributes(query).finish(&path);
        let request = self
            .client
            .build(Method::Patch, &endpoint, None, Some(&payload))?;
        self.client.call(&request).await
    }
}

//! Jira issue fields, system and custom.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::TaskRef;
use crate::client::AtlassianClient;
use crate::endpoint::{segment, Query};
use crate::error::{require, AtlassianError, Required, Result};
use crate::pagination::Page;
use crate::request::{Method, Response};

/// An issue field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueField {
    pub id: String,
    #[serde(default)]
    pub key: Option<String>,
    pub name: String,
    #[serde(default)]
    pub custom: bool,
    #[serde(default)]
    pub orderable: bool,
    #[serde(default)]
    pub navigable: bool,
    #[serde(default)]
    pub searchable: bool,
    #[serde(default)]
    pub clause_names: Vec<String>,
    #[serde(default)]
    pub schema: Option<FieldSchema>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Data type of a field's values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub items: Option<String>,
    #[serde(default)]
    pub system: Option<String>,
    #[serde(default)]
    pub custom: Option<String>,
    #[serde(default)]
    pub custom_id: Option<i64>,
}

/// Payload for creating a custom field.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldPayload {
    pub name: String,
    pub description: Option<String>,
    /// Field type key, e.g. `com.atlassian.jira.plugin.system.customfieldtypes:float`.
    #[serde(rename = "type")]
    pub field_type: String,
    pub searcher_key: Option<String>,
}

/// Filters for `GET rest/api/3/field/search`.
#[derive(Debug, Clone, Default)]
pub struct FieldSearchOptions {
    /// `custom` or `system`.
    pub types: Vec<String>,
    pub ids: Vec<String>,
    pub query: Option<String>,
    /// `contextsCount`, `lastUsed`, `name` or `screensCount`, optionally prefixed with `-`/`+`.
    pub order_by: Option<String>,
    pub expand: Vec<String>,
}

/// Issue field operations.
#[async_trait]
pub trait IssueFieldApi: Send + Sync {
    /// Every system and custom field visible to the caller.
    async fn gets(&self) -> Result<Response<Vec<IssueField>>>;

    async fn create(&self, payload: &CustomFieldPayload) -> Result<Response<IssueField>>;

    async fn search(
        &self,
        options: &FieldSearchOptions,
        start_at: u32,
        max_results: u32,
    ) -> Result<Response<Page<IssueField>>>;

    /// Delete a custom field. Deletion runs asynchronously on the server.
    async fn delete(&self, field_id: &str) -> Result<Response<TaskRef>>;

    async fn trash(&self, field_id: &str) -> Result<Response<()>>;

    async fn restore(&self, field_id: &str) -> Result<Response<()>>;
}

#[derive(Debug, Clone)]
pub struct IssueFieldService {
    client: AtlassianClient,
}

impl IssueFieldService {
    pub fn new(client: AtlassianClient) -> Self {
        Self { client }
    }
}

fn field_path(field_id: &str) -> Result<String> {
    require(field_id, Required::FieldId)?;
    Ok(format!("rest/api/3/field/{}", segment(field_id)))
}

#[async_trait]
impl IssueFieldApi for IssueFieldService {
    async fn gets(&self) -> Result<Response<Vec<IssueField>>> {
        let request = self.client.build_empty(Method::Get, "rest/api/3/field")?;
        self.client.call(&request).await
    }

    async fn create(&self, payload: &CustomFieldPayload) -> Result<Response<IssueField>> {
        if payload.name.is_empty() || payload.field_type.is_empty() {
            return Err(AtlassianError::InvalidParameter {
                name: "custom field payload",
                reason: "name and type are required".to_string(),
            });
        }

        let request = self
            .client
            .build(Method::Post, "rest/api/3/field", None, Some(payload))?;
        self.client.call(&request).await
    }

    async fn search(
        &self,
        options: &FieldSearchOptions,
        start_at: u32,
        max_results: u32,
    ) -> Result<Response<Page<IssueField>>> {
        let mut params = Query::new();
        params
            .push("startAt", start_at)
            .push("maxResults", max_results)
            .push_joined("type", &options.types)
            .push_each("id", &options.ids)
            .push_opt("query", options.query.as_deref())
            .push_opt("orderBy", options.order_by.as_deref())
            .push_joined("expand", &options.expand);

        let endpoint = params.finish("rest/api/3/field/search");
        let request = self.client.build_empty(Method::Get, &endpoint)?;
        self.client.call(&request).await
    }

    async fn delete(&self, field_id: &str) -> Result<Response<TaskRef>> {
        let path = field_path(field_id)?;
        let request = self.client.build_empty(Method::Delete, &path)?;
        self.client.call(&request).await
    }

    async fn trash(&self, field_id: &str) -> Result<Response<()>> {
        let path = field_path(field_id)?;
        let request = self
            .client
            .build_empty(Method::Post, &format!("{path}/trash"))?;
        self.client.call_empty(&request).await
    }

    async fn restore(&self, field_id: &str) -> Result<Response<()>> {
        let path = field_path(field_id)?;
        let request = self
            .client
            .build_empty(Method::Post, &format!("{path}/restore"))?;
        self.client.call_empty(&request).await
    }
}

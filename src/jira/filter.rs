//! Jira saved filters.

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
pub struct Filter {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub jql: Option<String>,
    #[serde(default)]
    pub owner: Option<JiraUser>,
    #[serde(default)]
    pub favourite: bool,
    #[serde(default)]
    pub favourited_count: Option<i64>,
    #[serde(rename = "self", default)]
    pub self_link: Option<String>,
    #[serde(default)]
    pub search_url: Option<String>,
    #[serde(default)]
    pub view_url: Option<String>,
    #[serde(default)]
    pub share_permissions: Vec<SharePermission>,
    #[serde(default)]
    pub edit_permissions: Vec<SharePermission>,
}

/// Payload for creating and updating a filter.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPayload {
    pub name: String,
    pub description: Option<String>,
    pub jql: Option<String>,
    pub favourite: Option<bool>,
    pub share_permissions: Option<Vec<SharePermission>>,
    pub edit_permissions: Option<Vec<SharePermission>>,
}

/// Filters for `GET rest/api/3/filter/search`.
#[derive(Debug, Clone, Default)]
pub struct FilterSearchOptions {
    pub name: Option<String>,
    pub owner_account_id: Option<String>,
    pub group_name: Option<String>,
    pub group_id: Option<String>,
    pub project_id: Option<i64>,
    pub ids: Vec<i64>,
    pub order_by: Option<String>,
    pub expand: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OwnerPayload<'a> {
    account_id: &'a str,
}

/// Filter operations.
#[async_trait]
pub trait FilterApi: Send + Sync {
    async fn create(&self, payload: &FilterPayload) -> Result<Response<Filter>>;

    /// Filters the caller has starred.
    async fn favorite(&self) -> Result<Response<Vec<Filter>>>;

    /// Filters owned by the caller, optionally with their favourites.
    async fn my(
        &self,
        expand: &[String],
        include_favourites: bool,
    ) -> Result<Response<Vec<Filter>>>;

    async fn search(
        &self,
        options: &FilterSearchOptions,
        start_at: u32,
        max_results: u32,
    ) -> Result<Response<Page<Filter>>>;

    async fn get(&self, filter_id: &str, expand: &[String]) -> Result<Response<Filter>>;

    async fn update(&self, filter_id: &str, payload: &FilterPayload) -> Result<Response<Filter>>;

    async fn delete(&self, filter_id: &str) -> Result<Response<()>>;

    async fn change_owner(&self, filter_id: &str, account_id: &str) -> Result<Response<()>>;
}

#[derive(Debug, Clone)]
pub struct FilterService {
    client: AtlassianClient,
}

impl FilterService {
    pub fn new(client: AtlassianClient) -> Self {
        Self { client }
    }
}

fn filter_path(filter_id: &str) -> Result<String> {
    require(filter_id, Required::FilterId)?;
    Ok(format!("rest/api/3/filter/{}", segment(filter_id)))
}

fn validate(payload: &FilterPayload) -> Result<()> {
    if payload.name.trim().is_empty() {
        return Err(AtlassianError::InvalidParameter {
            name: "filter payload",
            reason: "name is required".to_string(),
        });
    }
    Ok(())
}

#[async_trait]
impl FilterApi for FilterService {
    async fn create(&self, payload: &FilterPayload) -> Result<Response<Filter>> {
        validate(payload)?;
        let request = self
            .client
            .build(Method::Post, "rest/api/3/filter", None, Some(payload))?;
        self.client.call(&request).await
    }

    async fn favorite(&self) -> Result<Response<Vec<Filter>>> {
        let request = self
            .client
            .build_empty(Method::Get, "rest/api/3/filter/favourite")?;
        self.client.call(&request).await
    }

    async fn my(
        &self,
        expand: &[String],
        include_favourites: bool,
    ) -> Result<Response<Vec<Filter>>> {
        let mut params = Query::new();
        params
            .push_joined("expand", expand)
            .push("includeFavourites", include_favourites);

        let endpoint = params.finish("rest/api/3/filter/my");
        let request = self.client.build_empty(Method::Get, &endpoint)?;
        self.client.call(&request).await
    }

    async fn search(
        &self,
        options: &FilterSearchOptions,
        start_at: u32,
        max_results: u32,
    ) -> Result<Response<Page<Filter>>> {
        let mut params = Query::new();
        params
            .push("startAt", start_at)
            .push("maxResults", max_results)
            .push_opt("filterName", options.name.as_deref())
            .push_opt("accountId", options.owner_account_id.as_deref())
            .push_opt("groupname", options.group_name.as_deref())
            .push_opt("groupId", options.group_id.as_deref())
            .push_opt("projectId", options.project_id)
            .push_each("id", &options.ids)
            .push_opt("orderBy", options.order_by.as_deref())
            .push_joined("expand", &options.expand);

        let endpoint = params.finish("rest/api/3/filter/search");
        let request = self.client.build_empty(Method::Get, &endpoint)?;
        self.client.call(&request).await
    }

    async fn get(&self, filter_id: &str, expand: &[String]) -> Result<Response<Filter>> {
        let path = filter_path(filter_id)?;

        let mut params = Query::new();
        params.push_joined("expand", expand);

        let request = self.client.build_empty(Method::Get, &params.finish(&path))?;
        self.client.call(&request).await
    }

    async fn update(&self, filter_id: &str, payload: &FilterPayload) -> Result<Response<Filter>> {
        let path = filter_path(filter_id)?;
        validate(payload)?;
        let request = self.client.build(Method::Put, &path, None, Some(payload))?;
        self.client.call(&request).await
    }

    async fn delete(&self, filter_id: &str) -> Result<Response<()>> {
        let path = filter_path(filter_id)?;
        let request = self.client.build_empty(Method::Delete, &path)?;
        self.client.call_empty(&request).await
    }

    async fn change_owner(&self, filter_id: &str, account_id: &str) -> Result<Response<()>> {
        let path = filter_path(filter_id)?;
        require(account_id, Required::AccountId)?;

        let payload = OwnerPayload { account_id };
        let request = self
            .client
            .build(Method::Put, &format!("{path}/owner"), None, Some(&payload))?;
        self.client.call_empty(&request).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::testing::FakeConnector;

    fn service(connector: FakeConnector) -> FilterService {
        let client = AtlassianClient::with_connector(
            "https://example.atlassian.net",
            Arc::new(connector),
        )
        .unwrap();
        FilterService::new(client)
    }

    #[tokio::test]
    async fn test_create_serializes_jql() {
        let connector = FakeConnector::respond(
            200,
            r#"{"id": "10000", "name": "Open bugs", "jql": "type = Bug AND resolution is EMPTY", "favourite": true}"#,
        );
        let payload = FilterPayload {
            name: "Open bugs".to_string(),
            jql: Some("type = Bug AND resolution is EMPTY".to_string()),
            favourite: Some(true),
            ..Default::default()
        };

        let response = service(connector.clone()).create(&payload).await.unwrap();

        assert!(response.data.favourite);
        let sent = &connector.sent()[0];
        let body: serde_json::Value =
            serde_json::from_slice(sent.body().unwrap().as_bytes().unwrap()).unwrap();
        assert_eq!(body["jql"], "type = Bug AND resolution is EMPTY");
        assert!(body.get("sharePermissions").is_none());
    }

    #[tokio::test]
    async fn test_my_query() {
        let connector = FakeConnector::respond(200, "[]");
        service(connector.clone())
            .my(&["sharedUsers".to_string()], true)
            .await
            .unwrap();
        assert_eq!(
            connector.sent()[0].endpoint(),
            "rest/api/3/filter/my?expand=sharedUsers&includeFavourites=true"
        );
    }

    #[tokio::test]
    async fn test_change_owner_body() {
        let connector = FakeConnector::default();
        service(connector.clone())
            .change_owner("10000", "5b10a2844c20165700ede21g")
            .await
            .unwrap();

        let sent = &connector.sent()[0];
        assert_eq!(sent.method(), Method::Put);
        assert_eq!(sent.endpoint(), "rest/api/3/filter/10000/owner");
        assert_eq!(
            sent.body().unwrap().as_bytes().unwrap(),
            br#"{"accountId":"5b10a2844c20165700ede21g"}"#
        );
    }

    #[tokio::test]
    async fn test_change_owner_requires_account() {
        let connector = FakeConnector::default();
        let err = service(connector.clone())
            .change_owner("10000", "")
            .await
            .unwrap_err();
        assert!(matches!(err, AtlassianError::Missing(Required::AccountId)));
        assert!(connector.sent().is_empty());
    }
}

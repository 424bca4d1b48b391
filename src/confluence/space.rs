//! Confluence spaces.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::ContentPage;
use crate::client::AtlassianClient;
use crate::endpoint::{segment, Query};
use crate::error::{require, AtlassianError, Required, Result};
use crate::request::{Method, Response};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    pub id: i64,
    pub key: String,
    pub name: String,
    /// `global` or `personal`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// `current` or `archived`.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: Option<SpaceDescription>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpaceDescription {
    #[serde(default)]
    pub plain: Option<DescriptionValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptionValue {
    pub value: String,
    #[serde(default = "plain_representation")]
    pub representation: String,
}

fn plain_representation() -> String {
    "plain".to_string()
}

impl SpaceDescription {
    pub fn plain(value: &str) -> Self {
        Self {
            plain: Some(DescriptionValue {
                value: value.to_string(),
                representation: plain_representation(),
            }),
        }
    }
}

/// Payload for creating a space.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpacePayload {
    pub key: String,
    pub name: String,
    pub description: Option<SpaceDescription>,
}

/// Payload for updating a space.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpaceUpdatePayload {
    pub name: Option<String>,
    pub description: Option<SpaceDescription>,
    pub homepage: Option<HomepageRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomepageRef {
    pub id: String,
}

/// Filters for `GET wiki/rest/api/space`.
#[derive(Debug, Clone, Default)]
pub struct SpaceListOptions {
    pub space_keys: Vec<String>,
    pub space_ids: Vec<i64>,
    /// `global` or `personal`.
    pub space_type: Option<String>,
    /// `current` or `archived`.
    pub status: Option<String>,
    pub labels: Vec<String>,
    pub favourite: Option<bool>,
    pub expand: Vec<String>,
}

/// Handle on a server-side task started by a space deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongTask {
    pub id: String,
    #[serde(default)]
    pub links: Option<LongTaskLinks>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongTaskLinks {
    #[serde(default)]
    pub status: Option<String>,
}

/// Space operations.
#[async_trait]
pub trait SpaceApi: Send + Sync {
    async fn gets(
        &self,
        options: &SpaceListOptions,
        start: u32,
        limit: u32,
    ) -> Result<Response<ContentPage<Space>>>;

    async fn create(&self, payload: &SpacePayload) -> Result<Response<Space>>;

    async fn get(&self, space_key: &str, expand: &[String]) -> Result<Response<Space>>;

    async fn update(
        &self,
        space_key: &str,
        payload: &SpaceUpdatePayload,
    ) -> Result<Response<Space>>;

    async fn delete(&self, space_key: &str) -> Result<Response<LongTask>>;
}

#[derive(Debug, Clone)]
pub struct SpaceService {
    client: AtlassianClient,
}

impl SpaceService {
    pub fn new(client: AtlassianClient) -> Self {
        Self { client }
    }
}

fn space_path(space_key: &str) -> Result<String> {
    require(space_key, Required::SpaceKey)?;
    Ok(format!("wiki/rest/api/space/{}", segment(space_key)))
}

#[async_trait]
impl SpaceApi for SpaceService {
    async fn gets(
        &self,
        options: &SpaceListOptions,
        start: u32,
        limit: u32,
    ) -> Result<Response<ContentPage<Space>>> {
        let mut params = Query::new();
        params
            .push("start", start)
            .push("limit", limit)
            .push_each("spaceKey", &options.space_keys)
            .push_each("spaceId", &options.space_ids)
            .push_opt("type", options.space_type.as_deref())
            .push_opt("status", options.status.as_deref())
            .push_joined("label", &options.labels)
            .push_opt("favourite", options.favourite)
            .push_joined("expand", &options.expand);

        let endpoint = params.finish("wiki/rest/api/space");
        let request = self.client.build_empty(Method::Get, &endpoint)?;
        self.client.call(&request).await
    }

    async fn create(&self, payload: &SpacePayload) -> Result<Response<Space>> {
        if payload.key.is_empty() || payload.name.is_empty() {
            return Err(AtlassianError::InvalidParameter {
                name: "space payload",
                reason: "key and name are required".to_string(),
            });
        }

        let request = self
            .client
            .build(Method::Post, "wiki/rest/api/space", None, Some(payload))?;
        self.client.call(&request).await
    }

    async fn get(&self, space_key: &str, expand: &[String]) -> Result<Response<Space>> {
        let path = space_path(space_key)?;

        let mut params = Query::new();
        params.push_joined("expand", expand);

        let request = self.client.build_empty(Method::Get, &params.finish(&path))?;
        self.client.call(&request).await
    }

    async fn update(
        &self,
        space_key: &str,
        payload: &SpaceUpdatePayload,
    ) -> Result<Response<Space>> {
        let path = space_path(space_key)?;
        let request = self.client.build(Method::Put, &path, None, Some(payload))?;
        self.client.call(&request).await
    }

    async fn delete(&self, space_key: &str) -> Result<Response<LongTask>> {
        let path = space_path(space_key)?;
        let request = self.client.build_empty(Method::Delete, &path)?;
        self.client.call(&request).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::testing::FakeConnector;

    fn service(connector: FakeConnector) -> SpaceService {
        let client = AtlassianClient::with_connector(
            "https://example.atlassian.net",
            Arc::new(connector),
        )
        .unwrap();
        SpaceService::new(client)
    }

    #[tokio::test]
    async fn test_gets_decodes_content_page() {
        let connector = FakeConnector::respond(
            200,
            r#"{
                "results": [{"id": 196611, "key": "DUMMY", "name": "Dummy Space", "type": "global", "status": "current"}],
                "start": 0, "limit": 25, "size": 1,
                "_links": {"base": "https://example.atlassian.net/wiki", "next": "/rest/api/space?start=25"}
            }"#,
        );
        let options = SpaceListOptions {
            space_keys: vec!["DUMMY".to_string()],
            ..Default::default()
        };

        let response = service(connector.clone())
            .gets(&options, 0, 25)
            .await
            .unwrap();

        assert_eq!(response.data.results[0].key, "DUMMY");
        assert!(response.data.has_more());
        assert_eq!(
            connector.sent()[0].endpoint(),
            "wiki/rest/api/space?start=0&limit=25&spaceKey=DUMMY"
        );
    }

    #[tokio::test]
    async fn test_create_serializes_description() {
        let connector = FakeConnector::respond(200, r#"{"id": 1, "key": "DOC", "name": "Docs"}"#);
        let payload = SpacePayload {
            key: "DOC".to_string(),
            name: "Docs".to_string(),
            description: Some(SpaceDescription::plain("Team documentation")),
        };

        service(connector.clone()).create(&payload).await.unwrap();

        let body: serde_json::Value = serde_json::from_slice(
            connector.sent()[0].body().unwrap().as_bytes().unwrap(),
        )
        .unwrap();
        assert_eq!(body["description"]["plain"]["value"], "Team documentation");
        assert_eq!(body["description"]["plain"]["representation"], "plain");
    }

    #[tokio::test]
    async fn test_delete_requires_key() {
        let connector = FakeConnector::default();
        let err = service(connector.clone()).delete("").await.unwrap_err();
        assert!(matches!(err, AtlassianError::Missing(Required::SpaceKey)));
        assert!(connector.sent().is_empty());
    }
}

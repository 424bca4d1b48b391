//! Issue attachments.
//!
//! Uploads are the one place where the executor sends a multipart body
//! instead of JSON. Jira rejects them without `X-Atlassian-Token: no-check`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::JiraUser;
use crate::client::AtlassianClient;
use crate::endpoint::segment;
use crate::error::{require, Required, Result};
use crate::request::{FilePart, Method, Response};

/// Attachment upload settings for the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentSettings {
    pub enabled: bool,
    /// Maximum upload size in bytes.
    #[serde(default)]
    pub upload_limit: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    pub filename: String,
    #[serde(rename = "self", default)]
    pub self_link: Option<String>,
    #[serde(default)]
    pub author: Option<JiraUser>,
    /// Jira timestamps use `+0000` offsets, so they are kept verbatim.
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Attachment operations.
#[async_trait]
pub trait AttachmentApi: Send + Sync {
    async fn settings(&self) -> Result<Response<AttachmentSettings>>;

    async fn metadata(&self, attachment_id: &str) -> Result<Response<Attachment>>;

    async fn delete(&self, attachment_id: &str) -> Result<Response<()>>;

    /// Upload one file to an issue.
    async fn add(
        &self,
        issue_key_or_id: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<Response<Vec<Attachment>>>;
}

#[derive(Debug, Clone)]
pub struct AttachmentService {
    client: AtlassianClient,
}

impl AttachmentService {
    pub fn new(client: AtlassianClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AttachmentApi for AttachmentService {
    async fn settings(&self) -> Result<Response<AttachmentSettings>> {
        let request = self
            .client
            .build_empty(Method::Get, "rest/api/3/attachment/meta")?;
        self.client.call(&request).await
    }

    async fn metadata(&self, attachment_id: &str) -> Result<Response<Attachment>> {
        require(attachment_id, Required::AttachmentId)?;

        let endpoint = format!("rest/api/3/attachment/{}", segment(attachment_id));
        let request = self.client.build_empty(Method::Get, &endpoint)?;
        self.client.call(&request).await
    }

    async fn delete(&self, attachment_id: &str) -> Result<Response<()>> {
        require(attachment_id, Required::AttachmentId)?;

        let endpoint = format!("rest/api/3/attachment/{}", segment(attachment_id));
        let request = self.client.build_empty(Method::Delete, &endpoint)?;
        self.client.call_empty(&request).await
    }

    async fn add(
        &self,
        issue_key_or_id: &str,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<Response<Vec<Attachment>>> {
        require(issue_key_or_id, Required::IssueKeyOrId)?;
        require(file_name, Required::FileName)?;

        let endpoint = format!(
            "rest/api/3/issue/{}/attachments",
            segment(issue_key_or_id)
        );
        let request = self
            .client
            .build_multipart(
                Method::Post,
                &endpoint,
                vec![FilePart::new("file", file_name, content)],
            )?
            .with_header("x-atlassian-token", "no-check");
        self.client.call(&request).await
    }
}

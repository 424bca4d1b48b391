//! Connector double for unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;

use crate::connector::Connector;
use crate::error::{AtlassianError, Result};
use crate::request::{RequestDescriptor, ResponseDescriptor};

#[derive(Debug, Clone, Default)]
enum Reply {
    #[default]
    Empty,
    Body(u16, String),
    Fail(String),
}

/// Records every request and answers with a canned reply.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeConnector {
    reply: Reply,
    sent: Arc<Mutex<Vec<RequestDescriptor>>>,
}

impl FakeConnector {
    pub(crate) fn respond(status: u16, body: &str) -> Self {
        Self {
            reply: Reply::Body(status, body.to_string()),
            ..Default::default()
        }
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self {
            reply: Reply::Fail(message.to_string()),
            ..Default::default()
        }
    }

    pub(crate) fn sent(&self) -> Vec<RequestDescriptor> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Connector for FakeConnector {
    async fn send(&self, request: &RequestDescriptor) -> Result<ResponseDescriptor> {
        self.sent.lock().unwrap().push(request.clone());

        let (status, body) = match &self.reply {
            Reply::Empty => (204, String::new()),
            Reply::Body(status, body) => (*status, body.clone()),
            Reply::Fail(message) => {
                return Err(AtlassianError::Transport(message.clone().into()));
            }
        };

        Ok(ResponseDescriptor {
            status: StatusCode::from_u16(status).unwrap(),
            method: request.method(),
            endpoint: request.url().clone(),
            headers: HeaderMap::new(),
            body: body.into_bytes(),
        })
    }
}

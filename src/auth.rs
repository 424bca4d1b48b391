//! Authentication state consulted when a request is finalized.
//!
//! Holds a bearer token, basic credentials (account email + API token) and
//! the user agent. Bearer wins when both are set.

use std::env;
use std::fmt;

use crate::error::{AtlassianError, Result};

/// Credentials and identity headers for Atlassian requests.
#[derive(Clone, Default)]
pub struct Authentication {
    mail: Option<String>,
    token: Option<String>,
    bearer: Option<String>,
    user_agent: Option<String>,
}

impl fmt::Debug for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authentication")
            .field("mail", &self.mail)
            .field("has_basic", &self.has_basic_auth())
            .field("has_bearer", &self.has_bearer())
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Authentication {
    pub fn new() -> Self {
        Self::default()
    }

    /// Basic authentication with an account email and API token.
    pub fn basic(mail: &str, token: &str) -> Self {
        let mut auth = Self::default();
        auth.set_basic_auth(mail, token);
        auth
    }

    /// Bearer (OAuth 2.0 / admin API key) authentication.
    pub fn bearer(token: &str) -> Self {
        let mut auth = Self::default();
        auth.set_bearer_token(token);
        auth
    }

    /// Load credentials from the environment.
    ///
    /// `ATLASSIAN_BEARER_TOKEN` is used when set, otherwise both
    /// `ATLASSIAN_EMAIL` and `ATLASSIAN_API_TOKEN` must be present.
    /// `ATLASSIAN_USER_AGENT` is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if no complete set of credentials is found.
    pub fn from_env() -> Result<Self> {
        let mut auth = Self::new();

        if let Ok(bearer) = env::var("ATLASSIAN_BEARER_TOKEN") {
            auth.set_bearer_token(&bearer);
        } else {
            match (env::var("ATLASSIAN_EMAIL"), env::var("ATLASSIAN_API_TOKEN")) {
                (Ok(mail), Ok(token)) => auth.set_basic_auth(&mail, &token),
                _ => {
                    return Err(AtlassianError::ConfigMissing(
                        "set ATLASSIAN_BEARER_TOKEN or both ATLASSIAN_EMAIL and ATLASSIAN_API_TOKEN"
                            .to_string(),
                    ))
                }
            }
        }

        if let Ok(agent) = env::var("ATLASSIAN_USER_AGENT") {
            auth.set_user_agent(&agent);
        }

        Ok(auth)
    }

    pub fn set_basic_auth(&mut self, mail: &str, token: &str) {
        self.mail = Some(mail.to_string());
        self.token = Some(token.to_string());
    }

    pub fn set_bearer_token(&mut self, token: &str) {
        self.bearer = Some(token.to_string());
    }

    pub fn set_user_agent(&mut self, user_agent: &str) {
        self.user_agent = Some(user_agent.to_string());
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.set_user_agent(user_agent);
        self
    }

    pub fn mail(&self) -> Option<&str> {
        self.mail.as_deref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer.as_deref()
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    pub fn has_basic_auth(&self) -> bool {
        self.mail.is_some() && self.token.is_some()
    }

    pub fn has_bearer(&self) -> bool {
        self.bearer.is_some()
    }

    pub fn has_user_agent(&self) -> bool {
        self.user_agent.is_some()
    }

    /// Apply the credentials to an outgoing request.
    pub(crate) fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = match self.user_agent.as_deref() {
            Some(agent) => request.header(reqwest::header::USER_AGENT, agent),
            None => request,
        };

        if let Some(bearer) = self.bearer.as_deref() {
            return request.bearer_auth(bearer);
        }

        match (self.mail.as_deref(), self.token.as_deref()) {
            (Some(mail), Some(token)) => request.basic_auth(mail, Some(token)),
            _ => request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_secrets() {
        let auth = Authentication::basic("dev@example.com", "secret-token");
        let debug = format!("{:?}", auth);
        assert!(debug.contains("dev@example.com"));
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn test_setters_and_getters() {
        let mut auth = Authentication::new();
        assert!(!auth.has_basic_auth());
        auth.set_basic_auth("dev@example.com", "t");
        auth.set_user_agent("agent/1.0");
        assert!(auth.has_basic_auth());
        assert_eq!(auth.mail(), Some("dev@example.com"));
        assert_eq!(auth.token(), Some("t"));
        assert_eq!(auth.user_agent(), Some("agent/1.0"));
        assert!(!auth.has_bearer());
    }

    #[test]
    fn test_bearer_takes_precedence() {
        let mut auth = Authentication::basic("dev@example.com", "t");
        auth.set_bearer_token("abc");
        let request = auth
            .apply(reqwest::Client::new().get("https://example.com"))
            .build()
            .unwrap();
        let header = request
            .headers()
            .get(reqwest::header::AUTHORIZATION)
            .unwrap();
        assert_eq!(header, "Bearer abc");
    }
}

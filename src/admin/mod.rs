//! Atlassian organization administration services.
//!
//! Served from `https://api.atlassian.com/`; build the client with
//! [`AtlassianClient::admin`](crate::AtlassianClient::admin) and a bearer
//! directory API key.

mod scim;

pub use scim::*;

//! Confluence Cloud services (`wiki/rest/api/...`), relative to the site URL.

mod space;

pub use space::*;

use serde::{Deserialize, Serialize};

/// A Confluence paginated result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentPage<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(rename = "_links", default)]
    pub links: Option<PageLinks>,
}

impl<T> ContentPage<T> {
    /// Confluence adds a `next` link while results remain.
    pub fn has_more(&self) -> bool {
        self.links
            .as_ref()
            .is_some_and(|links| links.next.is_some())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.results.iter()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(rename = "self", default)]
    pub self_link: Option<String>,
}

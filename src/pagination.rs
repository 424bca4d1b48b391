//! Page shapes returned by the Atlassian APIs.
//!
//! Each product paginates differently: Jira uses `startAt`/`maxResults`,
//! Bitbucket uses numbered pages with a `next` link, Confluence uses
//! `start`/`limit` and SCIM uses `startIndex`/`itemsPerPage`. These types
//! only carry the data; callers decide whether to fetch the next page.

use serde::{Deserialize, Serialize};

/// A Jira "page bean".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
    #[serde(default)]
    pub start_at: u32,
    #[serde(default)]
    pub max_results: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_last: Option<bool>,
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
}

impl<T> Page<T> {
    /// Whether the server reports more results after this page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        if let Some(is_last) = self.is_last {
            return !is_last;
        }
        match self.total {
            Some(total) => u64::from(self.start_at) + (self.values.len() as u64) < total,
            None => self.max_results > 0 && self.values.len() >= self.max_results as usize,
        }
    }

    /// `startAt` for the following page.
    #[must_use]
    pub fn next_start_at(&self) -> u32 {
        let read = u32::try_from(self.values.len()).unwrap_or(u32::MAX);
        self.start_at.saturating_add(read)
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            self_link: self.self_link,
            next_page: self.next_page,
            start_at: self.start_at,
            max_results: self.max_results,
            total: self.total,
            is_last: self.is_last,
            values: self.values.into_iter().map(f).collect(),
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// A Bitbucket Cloud paginated collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BitbucketPage<T> {
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub pagelen: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
}

impl<T> BitbucketPage<T> {
    /// Bitbucket signals more data with a `next` link.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<T> IntoIterator for BitbucketPage<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Atlassian API server.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::admin::ScimUser;
use crate::bitbucket::{Workspace, WorkspaceMembership};
use crate::jira::{Filter, FilterPayload, IssueField, Project};

/// Shared state for the mock server.
///
/// Wrapped in `Arc<RwLock<_>>` for concurrent access from handlers.
#[derive(Debug, Default)]
pub struct MockState {
    /// Bitbucket workspaces indexed by slug.
    pub workspaces: HashMap<String, Workspace>,

    /// Workspace memberships (with permission) indexed by workspace slug.
    pub members: HashMap<String, Vec<WorkspaceMembership>>,

    /// Jira projects indexed by key.
    pub projects: BTreeMap<String, Project>,

    /// Jira issue fields, in listing order.
    pub fields: Vec<IssueField>,

    /// Jira filters indexed by ID.
    pub filters: BTreeMap<u64, Filter>,

    /// SCIM users indexed by directory ID, then user ID.
    pub users: HashMap<String, BTreeMap<String, ScimUser>>,

    /// If set, requests must carry `Authorization: Bearer <token>`.
    pub required_token: Option<String>,

    next_id: u64,
}

impl MockState {
    pub fn new() -> Self {
        Self {
            next_id: 10000,
            ..Default::default()
        }
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    pub fn with_workspace(mut self, workspace: Workspace) -> Self {
        self.workspaces.insert(workspace.slug.clone(), workspace);
        self
    }

    pub fn with_member(mut self, workspace: &str, member: WorkspaceMembership) -> Self {
        self.members
            .entry(workspace.to_string())
            .or_default()
            .push(member);
        self
    }

    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.insert(project.key.clone(), project);
        self
    }

    pub fn with_field(mut self, field: IssueField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        if let Ok(id) = filter.id.parse::<u64>() {
            self.next_id = self.next_id.max(id + 1);
            self.filters.insert(id, filter);
        }
        self
    }

    pub fn with_user(mut self, directory: &str, user: ScimUser) -> Self {
        let id = user.id.clone().unwrap_or_else(|| user.user_name.clone());
        self.users
            .entry(directory.to_string())
            .or_default()
            .insert(id, user);
        self
    }

    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Look a project up by key or numeric ID.
    pub fn get_project(&self, key_or_id: &str) -> Option<&Project> {
        self.projects
            .get(key_or_id)
            .or_else(|| self.projects.values().find(|p| p.id == key_or_id))
    }

    /// Remove a project by key or numeric ID.
    pub fn delete_project(&mut self, key_or_id: &str) -> Option<Project> {
        let key = self.get_project(key_or_id)?.key.clone();
        self.projects.remove(&key)
    }

    /// Projects whose key or name contains `query`, case-insensitively.
    pub fn search_projects(&self, query: Option<&str>) -> Vec<&Project> {
        let query = query.map(str::to_lowercase);
        self.projects
            .values()
            .filter(|p| match query.as_deref() {
                Some(q) => p.key.to_lowercase().contains(q) || p.name.to_lowercase().contains(q),
                None => true,
            })
            .collect()
    }

    /// Fields filtered by `type` (`custom` / `system`) and name.
    pub fn search_fields(&self, types: &[String], query: Option<&str>) -> Vec<&IssueField> {
        let query = query.map(str::to_lowercase);
        self.fields
            .iter()
            .filter(|f| {
                types.is_empty()
                    || types.iter().any(|t| match t.as_str() {
                        "custom" => f.custom,
                        "system" => !f.custom,
                        _ => false,
                    })
            })
            .filter(|f| match query.as_deref() {
                Some(q) => f.name.to_lowercase().contains(q) || f.id.to_lowercase().contains(q),
                None => true,
            })
            .collect()
    }

    pub fn get_filter(&self, id: u64) -> Option<&Filter> {
        self.filters.get(&id)
    }

    pub fn search_filters(&self, name: Option<&str>) -> Vec<&Filter> {
        let name = name.map(str::to_lowercase);
        self.filters
            .values()
            .filter(|f| match name.as_deref() {
                Some(n) => f.name.to_lowercase().contains(n),
                None => true,
            })
            .collect()
    }

    /// Store a new filter and return it with its assigned ID.
    pub fn create_filter(&mut self, payload: FilterPayload) -> Filter {
        let id = self.next_id;
        self.next_id += 1;

        let filter = Filter {
            id: id.to_string(),
            name: payload.name,
            description: payload.description,
            jql: payload.jql,
            owner: None,
            favourite: payload.favourite.unwrap_or(false),
            favourited_count: None,
            self_link: None,
            search_url: None,
            view_url: None,
            share_permissions: payload.share_permissions.unwrap_or_default(),
            edit_permissions: payload.edit_permissions.unwrap_or_default(),
        };
        self.filters.insert(id, filter.clone());
        filter
    }

    /// Replace the editable parts of a filter.
    pub fn update_filter(&mut self, id: u64, payload: FilterPayload) -> Option<&Filter> {
        let filter = self.filters.get_mut(&id)?;
        filter.name = payload.name;
        if payload.description.is_some() {
            filter.description = payload.description;
        }
        if payload.jql.is_some() {
            filter.jql = payload.jql;
        }
        if let Some(favourite) = payload.favourite {
            filter.favourite = favourite;
        }
        Some(filter)
    }

    pub fn get_user(&self, directory: &str, id: &str) -> Option<&ScimUser> {
        self.users.get(directory)?.get(id)
    }

    /// Users in a directory, optionally matching `userName eq "<value>"`.
    pub fn list_users(&self, directory: &str, user_name: Option<&str>) -> Vec<&ScimUser> {
        self.users
            .get(directory)
            .map(|users| {
                users
                    .values()
                    .filter(|u| user_name.map(|n| u.user_name == n).unwrap_or(true))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Store a new user, assigning an ID. Returns `None` if the user name is taken.
    pub fn create_user(&mut self, directory: &str, mut user: ScimUser) -> Option<ScimUser> {
        let users = self.users.entry(directory.to_string()).or_default();
        if users.values().any(|u| u.user_name == user.user_name) {
            return None;
        }

        let id = format!("scim-{}", self.next_id);
        self.next_id += 1;
        user.id = Some(id.clone());
        user.active.get_or_insert(true);
        users.insert(id, user.clone());
        Some(user)
    }

    /// Replace a user, keeping its ID.
    pub fn replace_user(
        &mut self,
        directory: &str,
        id: &str,
        mut user: ScimUser,
    ) -> Option<&ScimUser> {
        let slot = self.users.get_mut(directory)?.get_mut(id)?;
        user.id = Some(id.to_string());
        *slot = user;
        Some(slot)
    }

    /// Mark a user inactive.
    pub fn deactivate_user(&mut self, directory: &str, id: &str) -> bool {
        match self.users.get_mut(directory).and_then(|u| u.get_mut(id)) {
            Some(user) => {
                user.active = Some(false);
                true
            }
            None => false,
        }
    }
}

//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use std::collections::HashMap;

use crate::admin::{ScimEmail, ScimMeta, ScimName, ScimUser, SCIM_USER_SCHEMA};
use crate::bitbucket::{BitbucketUser, Link, Workspace, WorkspaceMembership, WorkspaceRef};
use crate::jira::{FieldSchema, Filter, IssueField, JiraUser, Project};

/// Directory ID used by the default scenario's SCIM users.
pub const DEFAULT_DIRECTORY: &str = "dir-0001";

/// Collection of fixture factories for test data.
pub struct Fixtures;

/// The data served by [`MockServer::start`](super::MockServer::start).
pub struct DefaultScenario {
    pub workspaces: Vec<Workspace>,
    pub members: Vec<(String, WorkspaceMembership)>,
    pub projects: Vec<Project>,
    pub fields: Vec<IssueField>,
    pub filters: Vec<Filter>,
    pub users: Vec<(String, ScimUser)>,
}

impl Fixtures {
    // =========================================================================
    // Bitbucket Fixtures
    // =========================================================================

    pub fn workspace(slug: &str, name: &str) -> Workspace {
        let mut links = HashMap::new();
        links.insert(
            "html".to_string(),
            Link {
                href: format!("https://bitbucket.org/{slug}/"),
                name: None,
            },
        );

        Workspace {
            kind: Some("workspace".to_string()),
            uuid: Some(format!("{{{slug}-uuid}}")),
            slug: slug.to_string(),
            name: name.to_string(),
            is_private: true,
            created_on: None,
            updated_on: None,
            links,
        }
    }

    /// A membership with a permission level, as returned by the permissions listing.
    pub fn member(workspace: &str, display_name: &str, permission: &str) -> WorkspaceMembership {
        WorkspaceMembership {
            kind: Some("workspace_membership".to_string()),
            permission: Some(permission.to_string()),
            user: Some(BitbucketUser {
                kind: Some("user".to_string()),
                display_name: Some(display_name.to_string()),
                nickname: Some(display_name.to_lowercase().replace(' ', ".")),
                ..Default::default()
            }),
            workspace: Some(WorkspaceRef {
                slug: Some(workspace.to_string()),
                ..Default::default()
            }),
        }
    }

    // =========================================================================
    // Jira Fixtures
    // =========================================================================

    pub fn project(id: &str, key: &str, name: &str) -> Project {
        Project {
            id: id.to_string(),
            key: key.to_string(),
            name: name.to_string(),
            self_link: None,
            description: None,
            lead: None,
            project_type_key: Some("software".to_string()),
            simplified: Some(false),
            style: Some("classic".to_string()),
            is_private: Some(false),
            archived: None,
            deleted: None,
            project_category: None,
            url: None,
            assignee_type: None,
        }
    }

    /// A project with a lead.
    pub fn led_project(id: &str, key: &str, name: &str, lead: &str) -> Project {
        let mut project = Self::project(id, key, name);
        project.lead = Some(JiraUser {
            account_id: Some(format!("{}-id", lead.to_lowercase())),
            display_name: Some(lead.to_string()),
            active: Some(true),
            ..Default::default()
        });
        project
    }

    pub fn system_field(id: &str, name: &str, kind: &str) -> IssueField {
        IssueField {
            id: id.to_string(),
            key: Some(id.to_string()),
            name: name.to_string(),
            custom: false,
            orderable: true,
            navigable: true,
            searchable: true,
            clause_names: vec![id.to_string()],
            schema: Some(FieldSchema {
                kind: Some(kind.to_string()),
                system: Some(id.to_string()),
                ..Default::default()
            }),
            description: None,
        }
    }

    pub fn custom_field(custom_id: i64, name: &str, kind: &str) -> IssueField {
        let id = format!("customfield_{custom_id}");
        IssueField {
            id: id.clone(),
            key: Some(id.clone()),
            name: name.to_string(),
            custom: true,
            orderable: true,
            navigable: true,
            searchable: true,
            clause_names: vec![format!("cf[{custom_id}]"), name.to_string()],
            schema: Some(FieldSchema {
                kind: Some(kind.to_string()),
                custom_id: Some(custom_id),
                ..Default::default()
            }),
            description: None,
        }
    }

    pub fn filter(id: &str, name: &str, jql: &str) -> Filter {
        Filter {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            jql: Some(jql.to_string()),
            owner: None,
            favourite: false,
            favourited_count: Some(0),
            self_link: None,
            search_url: None,
            view_url: None,
            share_permissions: vec![],
            edit_permissions: vec![],
        }
    }

    // =========================================================================
    // SCIM Fixtures
    // =========================================================================

    pub fn scim_user(id: &str, email: &str) -> ScimUser {
        let given = email.split('@').next().unwrap_or(email);
        ScimUser {
            schemas: vec![SCIM_USER_SCHEMA.to_string()],
            id: Some(id.to_string()),
            user_name: email.to_string(),
            emails: vec![ScimEmail {
                value: email.to_string(),
                kind: Some("work".to_string()),
                primary: true,
            }],
            name: Some(ScimName {
                given_name: Some(given.to_string()),
                ..Default::default()
            }),
            display_name: Some(given.to_string()),
            active: Some(true),
            meta: Some(ScimMeta {
                resource_type: Some("User".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// One workspace, a few Jira resources and two SCIM users.
    pub fn default_scenario() -> DefaultScenario {
        let slug = "work-space-name-sample";

        DefaultScenario {
            workspaces: vec![Self::workspace(slug, "Sample Workspace")],
            members: vec![
                (slug.to_string(), Self::member(slug, "Ada Owner", "owner")),
                (slug.to_string(), Self::member(slug, "Bo Collaborator", "collaborator")),
                (slug.to_string(), Self::member(slug, "Cy Member", "member")),
            ],
            projects: vec![
                Self::led_project("10000", "KP", "Kitchen Porter", "Ada"),
                Self::project("10001", "OPS", "Operations"),
            ],
            fields: vec![
                Self::system_field("summary", "Summary", "string"),
                Self::system_field("assignee", "Assignee", "user"),
                Self::custom_field(10016, "Story point estimate", "number"),
            ],
            filters: vec![Self::filter(
                "10000",
                "My open issues",
                "assignee = currentUser() AND resolution = Unresolved",
            )],
            users: vec![
                (DEFAULT_DIRECTORY.to_string(), Self::scim_user("u-0001", "ada@example.com")),
                (DEFAULT_DIRECTORY.to_string(), Self::scim_user("u-0002", "bo@example.com")),
            ],
        }
    }
}

//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the atlassapi binary.

use clap::{Parser, Subcommand, ValueEnum};

/// Atlassian Cloud command-line interface.
#[derive(Parser, Debug)]
#[command(name = "atlassapi", about = "Atlassian Cloud API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log request spans to stderr.
    #[arg(long, short, global = true, default_value = "false")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single resource by key or ID.
    Get {
        /// The type of resource to get.
        entity: Entity,

        /// Workspace slug, project key, filter/dashboard ID, space key or SCIM user ID.
        id: String,

        /// SCIM directory ID (required for users).
        #[arg(long, env = "ATLASSIAN_DIRECTORY_ID")]
        directory: Option<String>,
    },

    /// List resources with optional filtering and pagination.
    List {
        /// The type of resource to list.
        entity: Entity,

        /// Offset of the first result (0-based; SCIM lists are shifted to 1-based).
        #[arg(long)]
        start: Option<u32>,

        /// Number of results per page.
        #[arg(long)]
        limit: Option<u32>,

        /// Free-text or filter query passed to the search endpoint.
        #[arg(long)]
        query: Option<String>,

        /// Bitbucket workspace (required for workspace members and permissions).
        #[arg(long)]
        workspace: Option<String>,

        /// SCIM directory ID (required for users).
        #[arg(long, env = "ATLASSIAN_DIRECTORY_ID")]
        directory: Option<String>,
    },
}

/// Resource types that can be operated on.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A Bitbucket workspace.
    #[value(alias = "workspaces")]
    Workspace,
    /// Bitbucket workspace permissions.
    #[value(alias = "permissions")]
    Permission,
    /// A Jira project.
    #[value(alias = "projects")]
    Project,
    /// A Jira issue field.
    #[value(alias = "fields")]
    Field,
    /// A Jira saved filter.
    #[value(alias = "filters")]
    Filter,
    /// A Jira dashboard.
    #[value(alias = "dashboards")]
    Dashboard,
    /// A Confluence space.
    #[value(alias = "spaces")]
    Space,
    /// A SCIM-provisioned user.
    #[value(alias = "users")]
    User,
}

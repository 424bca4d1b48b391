//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::admin::ScimUser;
use crate::bitbucket::Workspace;
use crate::confluence::Space;
use crate::jira::{Dashboard, Filter, IssueField, Project};

/// Trait for human-readable key-value output.
///
/// Implemented by resource types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn header(title: String) -> Vec<String> {
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

impl PrettyPrint for Workspace {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Workspace: {}", self.slug));
        lines.push(format!("Name:           {}", self.name));

        if let Some(ref uuid) = self.uuid {
            lines.push(format!("UUID:           {}", uuid));
        }

        lines.push(format!(
            "Visibility:     {}",
            if self.is_private { "private" } else { "public" }
        ));

        if let Some(ref created) = self.created_on {
            lines.push(format!("Created:        {}", created.format("%Y-%m-%d %H:%M:%S UTC")));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Project {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Project: {}", self.key));
        lines.push(format!("Name:           {}", self.name));
        lines.push(format!("ID:             {}", self.id));

        if let Some(ref kind) = self.project_type_key {
            lines.push(format!("Type:           {}", kind));
        }

        if let Some(name) = self.lead.as_ref().and_then(|l| l.display_name.as_deref()) {
            lines.push(format!("Lead:           {}", name));
        }

        if self.is_team_managed() {
            lines.push("Managed by:     team".to_string());
        }

        lines.join("\n")
    }
}

impl PrettyPrint for IssueField {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Field: {}", self.id));
        lines.push(format!("Name:           {}", self.name));
        lines.push(format!("Custom:         {}", if self.custom { "yes" } else { "no" }));

        if let Some(kind) = self.schema.as_ref().and_then(|s| s.kind.as_deref()) {
            lines.push(format!("Schema:         {}", kind));
        }

        if !self.clause_names.is_empty() {
            lines.push(format!("JQL:            {}", self.clause_names.join(", ")));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Filter {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Filter #{}", self.id));
        lines.push(format!("Name:           {}", self.name));

        if let Some(ref jql) = self.jql {
            lines.push(format!("JQL:            {}", jql));
        }

        if let Some(name) = self.owner.as_ref().and_then(|o| o.display_name.as_deref()) {
            lines.push(format!("Owner:          {}", name));
        }

        if self.favourite {
            lines.push("Favourite:      yes".to_string());
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Dashboard {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Dashboard #{}", self.id));
        lines.push(format!("Name:           {}", self.name));

        if let Some(ref description) = self.description {
            lines.push(format!("Description:    {}", description));
        }

        if let Some(ref view) = self.view {
            lines.push(format!("View:           {}", view));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Space {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Space: {}", self.key));
        lines.push(format!("Name:           {}", self.name));

        if let Some(ref kind) = self.kind {
            lines.push(format!("Type:           {}", kind));
        }

        if let Some(ref status) = self.status {
            lines.push(format!("Status:         {}", status));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for ScimUser {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("User: {}", self.user_name));

        if let Some(ref id) = self.id {
            lines.push(format!("ID:             {}", id));
        }

        if let Some(ref name) = self.display_name {
            lines.push(format!("Display name:   {}", name));
        }

        if let Some(email) = self.primary_email() {
            lines.push(format!("Email:          {}", email));
        }

        if let Some(active) = self.active {
            lines.push(format!("Active:         {}", if active { "yes" } else { "no" }));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_pretty_print_format() {
        let workspace: Workspace = serde_json::from_value(serde_json::json!({
            "slug": "work-space-name-sample",
            "name": "Sample",
            "is_private": true
        }))
        .unwrap();

        let output = workspace.pretty_print();
        assert!(output.starts_with("Workspace: work-space-name-sample"));
        assert!(output.contains("Visibility:     private"));
    }
}

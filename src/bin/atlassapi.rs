//! Atlassian Cloud CLI binary.
//!
//! A command-line interface for reading Jira, Confluence, Bitbucket and
//! SCIM resources through the atlassapi services.

use atlassapi::admin::{ScimUser, ScimUserApi, ScimUserQuery, ScimUserService};
use atlassapi::bitbucket::{WorkspaceApi, WorkspaceMembership, WorkspaceService};
use atlassapi::cli::{Cli, Command, Entity};
use atlassapi::confluence::{Space, SpaceApi, SpaceListOptions, SpaceService};
use atlassapi::jira::{
    Dashboard, DashboardApi, DashboardSearchOptions, DashboardService, FieldSearchOptions, Filter,
    FilterApi, FilterSearchOptions, FilterService, IssueField, IssueFieldApi, IssueFieldService,
    Project, ProjectApi, ProjectSearchOptions, ProjectService,
};
use atlassapi::{AtlassianClient, AtlassianError, Authentication, PrettyPrint, Required};
use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};

const DEFAULT_LIMIT: u32 = 50;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if let AtlassianError::ConfigMissing(_) = e {
                eprintln!("Hint: Set ATLASSIAN_SITE_URL and ATLASSIAN_EMAIL/ATLASSIAN_API_TOKEN");
            }
            if let Some(response) = e.response() {
                eprintln!("{}", response.text());
            }
            ExitCode::FAILURE
        }
    }
}

/// Pick the API host serving `entity`.
fn client_for(entity: &Entity) -> atlassapi::Result<AtlassianClient> {
    match entity {
        Entity::Workspace | Entity::Permission => {
            AtlassianClient::bitbucket(Authentication::from_env()?)
        }
        Entity::User => AtlassianClient::admin(Authentication::from_env()?),
        _ => AtlassianClient::from_env(),
    }
}

async fn run(cli: Cli) -> atlassapi::Result<()> {
    match cli.command {
        Command::Get {
            entity,
            id,
            directory,
        } => {
            let client = client_for(&entity)?;
            handle_get(client, entity, &id, directory.as_deref(), cli.json).await
        }
        Command::List {
            entity,
            start,
            limit,
            query,
            workspace,
            directory,
        } => {
            let client = client_for(&entity)?;
            let args = ListArgs {
                start: start.unwrap_or(0),
                limit: limit.unwrap_or(DEFAULT_LIMIT),
                query,
                workspace,
                directory,
            };
            handle_list(client, entity, args, cli.json).await
        }
    }
}

struct ListArgs {
    start: u32,
    limit: u32,
    query: Option<String>,
    workspace: Option<String>,
    directory: Option<String>,
}

async fn handle_get(
    client: AtlassianClient,
    entity: Entity,
    id: &str,
    directory: Option<&str>,
    json: bool,
) -> atlassapi::Result<()> {
    match entity {
        Entity::Workspace => {
            let workspace = WorkspaceService::new(client).get(id).await?;
            output_single(&workspace.data, json)?;
        }
        Entity::Project => {
            let project = ProjectService::new(client).get(id, &[]).await?;
            output_single(&project.data, json)?;
        }
        Entity::Filter => {
            let filter = FilterService::new(client).get(id, &[]).await?;
            output_single(&filter.data, json)?;
        }
        Entity::Dashboard => {
            let dashboard = DashboardService::new(client).get(id).await?;
            output_single(&dashboard.data, json)?;
        }
        Entity::Space => {
            let space = SpaceService::new(client).get(id, &[]).await?;
            output_single(&space.data, json)?;
        }
        Entity::User => {
            let directory = directory.ok_or(AtlassianError::Missing(Required::Directory))?;
            let user = ScimUserService::new(client)
                .get(directory, id, &ScimUserQuery::default())
                .await?;
            output_single(&user.data, json)?;
        }
        Entity::Field | Entity::Permission => {
            eprintln!("Hint: Use 'atlassapi list fields' or 'atlassapi list permissions --workspace <slug>'");
            return Err(AtlassianError::InvalidParameter {
                name: "entity",
                reason: "this resource can only be listed".to_string(),
            });
        }
    }
    Ok(())
}

async fn handle_list(
    client: AtlassianClient,
    entity: Entity,
    args: ListArgs,
    json: bool,
) -> atlassapi::Result<()> {
    match entity {
        Entity::Workspace | Entity::Permission => {
            let workspace = args
                .workspace
                .as_deref()
                .ok_or(AtlassianError::Missing(Required::Workspace))?;
            let service = WorkspaceService::new(client);
            let page = if entity == Entity::Permission {
                service
                    .permissions(workspace, args.query.as_deref().unwrap_or_default())
                    .await?
            } else {
                service.members(workspace).await?
            };
            output_rows(&page.data.values, json, MemberRow::from)?;
        }
        Entity::Project => {
            let options = ProjectSearchOptions {
                query: args.query,
                ..Default::default()
            };
            let page = ProjectService::new(client)
                .search(&options, args.start, args.limit)
                .await?;
            output_rows(&page.data.values, json, ProjectRow::from)?;
        }
        Entity::Field => {
            let fields = match args.query {
                Some(query) => {
                    let options = FieldSearchOptions {
                        query: Some(query),
                        ..Default::default()
                    };
                    IssueFieldService::new(client)
                        .search(&options, args.start, args.limit)
                        .await?
                        .data
                        .values
                }
                None => IssueFieldService::new(client).gets().await?.data,
            };
            output_rows(&fields, json, FieldRow::from)?;
        }
        Entity::Filter => {
            let options = FilterSearchOptions {
                name: args.query,
                ..Default::default()
            };
            let page = FilterService::new(client)
                .search(&options, args.start, args.limit)
                .await?;
            output_rows(&page.data.values, json, FilterRow::from)?;
        }
        Entity::Dashboard => {
            let options = DashboardSearchOptions {
                dashboard_name: args.query,
                ..Default::default()
            };
            let page = DashboardService::new(client)
                .search(&options, args.start, args.limit)
                .await?;
            output_rows(&page.data.values, json, DashboardRow::from)?;
        }
        Entity::Space => {
            let page = SpaceService::new(client)
                .gets(&SpaceListOptions::default(), args.start, args.limit)
                .await?;
            output_rows(&page.data.results, json, SpaceRow::from)?;
        }
        Entity::User => {
            let directory = args
                .directory
                .as_deref()
                .ok_or(AtlassianError::Missing(Required::Directory))?;
            let query = ScimUserQuery {
                filter: args.query,
                ..Default::default()
            };
            let page = ScimUserService::new(client)
                .gets(directory, &query, args.start + 1, args.limit)
                .await?;
            output_rows(&page.data.resources, json, UserRow::from)?;
        }
    }
    Ok(())
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> atlassapi::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(item).map_err(AtlassianError::EncodeError)?
        );
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_rows<'a, T, R, F>(items: &'a [T], json: bool, to_row: F) -> atlassapi::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&'a T) -> R,
{
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(items).map_err(AtlassianError::EncodeError)?
        );
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{} item(s)", items.len());
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct MemberRow {
    user: String,
    permission: String,
    workspace: String,
}

impl From<&WorkspaceMembership> for MemberRow {
    fn from(m: &WorkspaceMembership) -> Self {
        Self {
            user: m
                .user
                .as_ref()
                .and_then(|u| u.display_name.clone())
                .unwrap_or_default(),
            permission: m.permission.clone().unwrap_or_default(),
            workspace: m
                .workspace
                .as_ref()
                .and_then(|w| w.slug.clone())
                .unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct ProjectRow {
    key: String,
    name: String,
    #[tabled(rename = "type")]
    kind: String,
}

impl From<&Project> for ProjectRow {
    fn from(p: &Project) -> Self {
        Self {
            key: p.key.clone(),
            name: p.name.clone(),
            kind: p.project_type_key.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct FieldRow {
    id: String,
    name: String,
    custom: bool,
}

impl From<&IssueField> for FieldRow {
    fn from(f: &IssueField) -> Self {
        Self {
            id: f.id.clone(),
            name: f.name.clone(),
            custom: f.custom,
        }
    }
}

#[derive(Tabled)]
struct FilterRow {
    id: String,
    name: String,
    jql: String,
}

impl From<&Filter> for FilterRow {
    fn from(f: &Filter) -> Self {
        Self {
            id: f.id.clone(),
            name: f.name.clone(),
            jql: f.jql.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct DashboardRow {
    id: String,
    name: String,
    favourite: bool,
}

impl From<&Dashboard> for DashboardRow {
    fn from(d: &Dashboard) -> Self {
        Self {
            id: d.id.clone(),
            name: d.name.clone(),
            favourite: d.is_favourite,
        }
    }
}

#[derive(Tabled)]
struct SpaceRow {
    key: String,
    name: String,
    status: String,
}

impl From<&Space> for SpaceRow {
    fn from(s: &Space) -> Self {
        Self {
            key: s.key.clone(),
            name: s.name.clone(),
            status: s.status.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct UserRow {
    user_name: String,
    display_name: String,
    active: String,
}

impl From<&ScimUser> for UserRow {
    fn from(u: &ScimUser) -> Self {
        Self {
            user_name: u.user_name.clone(),
            display_name: u.display_name.clone().unwrap_or_default(),
            active: u.active.map(|a| a.to_string()).unwrap_or_default(),
        }
    }
}

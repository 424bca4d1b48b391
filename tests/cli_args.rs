//! CLI argument parsing tests.

use clap::Parser;
use atlassapi::cli::{Cli, Command, Entity};

#[test]
fn test_cli_parses_get_subcommand() {
    let cli = Cli::parse_from(["atlassapi", "get", "project", "KP"]);

    assert!(!cli.json);
    assert!(!cli.verbose);
    match cli.command {
        Command::Get { entity, id, .. } => {
            assert_eq!(entity, Entity::Project);
            assert_eq!(id, "KP");
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_parses_list_subcommand() {
    let cli = Cli::parse_from(["atlassapi", "list", "filters"]);

    match cli.command {
        Command::List { entity, .. } => assert_eq!(entity, Entity::Filter),
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_global_flags() {
    // before the subcommand
    let cli = Cli::parse_from(["atlassapi", "--json", "-v", "list", "projects"]);
    assert!(cli.json);
    assert!(cli.verbose);

    // after the subcommand
    let cli = Cli::parse_from(["atlassapi", "list", "projects", "--json", "--verbose"]);
    assert!(cli.json);
    assert!(cli.verbose);
}

#[test]
fn test_list_pagination_and_query_args() {
    let cli = Cli::parse_from([
        "atlassapi", "list", "projects", "--start", "50", "--limit", "25", "--query", "kitchen",
    ]);

    match cli.command {
        Command::List {
            start,
            limit,
            query,
            ..
        } => {
            assert_eq!(start, Some(50));
            assert_eq!(limit, Some(25));
            assert_eq!(query.as_deref(), Some("kitchen"));
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_list_permissions_needs_workspace_flag() {
    let cli = Cli::parse_from([
        "atlassapi",
        "list",
        "permissions",
        "--workspace",
        "work-space-name-sample",
        "--query",
        r#"permission="owner""#,
    ]);

    match cli.command {
        Command::List {
            entity, workspace, ..
        } => {
            assert_eq!(entity, Entity::Permission);
            assert_eq!(workspace.as_deref(), Some("work-space-name-sample"));
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_get_user_with_directory() {
    let cli = Cli::parse_from(["atlassapi", "get", "user", "u-1", "--directory", "dir-1"]);

    match cli.command {
        Command::Get {
            entity,
            id,
            directory,
        } => {
            assert_eq!(entity, Entity::User);
            assert_eq!(id, "u-1");
            assert_eq!(directory.as_deref(), Some("dir-1"));
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_entity_variants_and_aliases() {
    for (word, expected) in [
        ("workspace", Entity::Workspace),
        ("workspaces", Entity::Workspace),
        ("field", Entity::Field),
        ("dashboards", Entity::Dashboard),
        ("space", Entity::Space),
        ("users", Entity::User),
    ] {
        let cli = Cli::parse_from(["atlassapi", "list", word]);
        assert!(
            matches!(&cli.command, Command::List { entity, .. } if *entity == expected),
            "{word} should parse as {expected:?}"
        );
    }
}

#[test]
fn test_unknown_entity_is_rejected() {
    let result = Cli::try_parse_from(["atlassapi", "get", "repository", "x"]);
    assert!(result.is_err());
}

//! E2E tests using the mock Atlassian server.
//!
//! These tests exercise full workflows against the mock server,
//! testing realistic scenarios rather than individual endpoints.

#![cfg(feature = "test-server")]

use atlassapi::admin::{ScimPatchOperation, ScimUser, ScimUserApi, ScimUserQuery, ScimUserService};
use atlassapi::bitbucket::{WorkspaceApi, WorkspaceService};
use atlassapi::jira::{
    FieldSearchOptions, FilterApi, FilterPayload, FilterSearchOptions, FilterService,
    IssueFieldApi, IssueFieldService, ProjectApi, ProjectSearchOptions, ProjectService,
};
use atlassapi::mock_server::{Fixtures, MockServer, MockState, DEFAULT_DIRECTORY};
use atlassapi::{AtlassianClient, AtlassianError, Authentication};

fn client(server: &MockServer) -> AtlassianClient {
    AtlassianClient::new(server.url(), Authentication::basic("dev@example.com", "token")).unwrap()
}

// =============================================================================
// Server Lifecycle Tests
// =============================================================================

#[tokio::test]
async fn test_server_starts_on_random_port() {
    let server1 = MockServer::start().await;
    let server2 = MockServer::start().await;

    assert_ne!(server1.url(), server2.url());

    server1.shutdown().await;
    server2.shutdown().await;
}

#[tokio::test]
async fn test_server_shutdown_is_clean() {
    let server = MockServer::start().await;
    let url = server.url().to_string();

    server.shutdown().await;

    let result = reqwest::Client::new()
        .get(format!("{}/health", url))
        .send()
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_transport_failure_is_not_an_api_error() {
    let server = MockServer::start().await;
    let projects = ProjectService::new(client(&server));
    server.shutdown().await;

    let err = projects.get("KP", &[]).await.unwrap_err();

    assert!(err.is_transport());
    assert!(err.response().is_none());
}

// =============================================================================
// Bitbucket Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_workspace_and_permissions_workflow() {
    let server = MockServer::start().await;
    let workspaces = WorkspaceService::new(client(&server));

    let workspace = workspaces
        .get("work-space-name-sample")
        .await
        .expect("Failed to get workspace");
    assert_eq!(workspace.data.name, "Sample Workspace");
    assert_eq!(workspace.status(), 200);
    assert_eq!(workspace.response.endpoint.path(), "/2.0/workspaces/work-space-name-sample");

    let members = workspaces.members("work-space-name-sample").await.unwrap();
    assert_eq!(members.data.values.len(), 3);
    assert!(members.data.values.iter().all(|m| m.permission.is_none()));

    let owners = workspaces
        .permissions("work-space-name-sample", r#"permission="owner""#)
        .await
        .unwrap();
    assert_eq!(owners.data.values.len(), 1);
    assert_eq!(owners.data.values[0].permission.as_deref(), Some("owner"));
    assert!(!owners.data.has_more());

    server.shutdown().await;
}

#[tokio::test]
async fn test_unknown_workspace_carries_response() {
    let server = MockServer::start().await;
    let workspaces = WorkspaceService::new(client(&server));

    let err = workspaces.get("missing").await.unwrap_err();

    match err {
        AtlassianError::Api { response } => {
            assert_eq!(response.status, 404);
            assert!(response.text().contains("No workspace"));
        }
        other => panic!("Expected Api error, got {other:?}"),
    }

    server.shutdown().await;
}

// =============================================================================
// Jira Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_search_and_get_project_workflow() {
    let server = MockServer::start().await;
    let projects = ProjectService::new(client(&server));

    let page = projects
        .search(&ProjectSearchOptions::default(), 0, 50)
        .await
        .expect("Failed to search projects");
    assert_eq!(page.data.total, Some(2));
    assert!(!page.data.has_more());

    let first = &page.data.values[0];
    let project = projects.get(&first.key, &[]).await.unwrap();
    assert_eq!(project.data.id, first.id);

    let narrowed = projects
        .search(
            &ProjectSearchOptions {
                query: Some("kitchen".to_string()),
                ..Default::default()
            },
            0,
            50,
        )
        .await
        .unwrap();
    assert_eq!(narrowed.data.len(), 1);
    assert_eq!(narrowed.data.values[0].key, "KP");

    server.shutdown().await;
}

#[tokio::test]
async fn test_project_search_pages() {
    let mut state = MockState::new();
    for n in 0..5 {
        state = state.with_project(Fixtures::project(&n.to_string(), &format!("P{n}"), "Project"));
    }
    let server = MockServer::with_state(state).await;
    let projects = ProjectService::new(client(&server));

    let first = projects
        .search(&ProjectSearchOptions::default(), 0, 2)
        .await
        .unwrap();
    assert!(first.data.has_more());
    assert_eq!(first.data.next_start_at(), 2);

    let last = projects
        .search(&ProjectSearchOptions::default(), 4, 2)
        .await
        .unwrap();
    assert_eq!(last.data.len(), 1);
    assert!(!last.data.has_more());

    server.shutdown().await;
}

#[tokio::test]
async fn test_delete_project_workflow() {
    let server = MockServer::start().await;
    let projects = ProjectService::new(client(&server));

    let deleted = projects.delete("OPS", false).await.unwrap();
    assert_eq!(deleted.status(), 204);

    let err = projects.get("OPS", &[]).await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));

    server.shutdown().await;
}

#[tokio::test]
async fn test_field_listing_and_search() {
    let server = MockServer::start().await;
    let fields = IssueFieldService::new(client(&server));

    let all = fields.gets().await.unwrap();
    assert_eq!(all.data.len(), 3);

    let custom = fields
        .search(
            &FieldSearchOptions {
                types: vec!["custom".to_string()],
                ..Default::default()
            },
            0,
            50,
        )
        .await
        .unwrap();
    assert_eq!(custom.data.len(), 1);
    assert_eq!(custom.data.values[0].id, "customfield_10016");

    server.shutdown().await;
}

#[tokio::test]
async fn test_filter_lifecycle() {
    let server = MockServer::start().await;
    let filters = FilterService::new(client(&server));

    let created = filters
        .create(&FilterPayload {
            name: "Blocked work".to_string(),
            jql: Some("status = Blocked".to_string()),
            favourite: Some(true),
            ..Default::default()
        })
        .await
        .expect("Failed to create filter");
    let id = created.data.id.clone();
    assert!(created.data.favourite);

    let updated = filters
        .update(
            &id,
            &FilterPayload {
                name: "Blocked work (team)".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.data.name, "Blocked work (team)");
    assert_eq!(updated.data.jql.as_deref(), Some("status = Blocked"));

    let found = filters
        .search(
            &FilterSearchOptions {
                name: Some("blocked".to_string()),
                ..Default::default()
            },
            0,
            50,
        )
        .await
        .unwrap();
    assert_eq!(found.data.len(), 1);

    filters.delete(&id).await.unwrap();
    let err = filters.get(&id, &[]).await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));

    server.shutdown().await;
}

// =============================================================================
// SCIM Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_scim_user_lifecycle() {
    let server = MockServer::start().await;
    let users = ScimUserService::new(client(&server));
    let query = ScimUserQuery::default();

    let mut payload = ScimUser::new("cy@example.com");
    payload.display_name = Some("Cy".to_string());
    let created = users
        .create(DEFAULT_DIRECTORY, &payload, &query)
        .await
        .expect("Failed to create user");
    assert_eq!(created.status(), 201);
    let id = created.data.id.clone().unwrap();

    let listed = users
        .gets(
            DEFAULT_DIRECTORY,
            &ScimUserQuery {
                filter: Some(r#"userName eq "cy@example.com""#.to_string()),
                ..Default::default()
            },
            1,
            100,
        )
        .await
        .unwrap();
    assert_eq!(listed.data.total_results, 1);
    assert_eq!(listed.data.resources[0].id.as_deref(), Some(id.as_str()));

    users.deactivate(DEFAULT_DIRECTORY, &id).await.unwrap();
    let fetched = users.get(DEFAULT_DIRECTORY, &id, &query).await.unwrap();
    assert_eq!(fetched.data.active, Some(false));

    server.shutdown().await;
}

#[tokio::test]
async fn test_scim_duplicate_user_conflicts() {
    let server = MockServer::start().await;
    let users = ScimUserService::new(client(&server));

    let err = users
        .create(
            DEFAULT_DIRECTORY,
            &ScimUser::new("ada@example.com"),
            &ScimUserQuery::default(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(409));

    server.shutdown().await;
}

#[tokio::test]
async fn test_scim_patch_is_not_served() {
    let server = MockServer::start().await;
    let users = ScimUserService::new(client(&server));

    let err = users
        .patch(
            DEFAULT_DIRECTORY,
            "u-0001",
            &[ScimPatchOperation::replace("active", serde_json::json!(false))],
            &ScimUserQuery::default(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(405));

    server.shutdown().await;
}

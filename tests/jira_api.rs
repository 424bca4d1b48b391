//! Jira service tests.
//!
//! Uses wiremock to mock a Jira Cloud site.

use atlassapi::jira::{
    AttachmentApi, AttachmentService, DashboardApi, DashboardPayload, DashboardService,
    FieldSearchOptions, FilterApi, FilterService, IssueFieldApi, IssueFieldService, ProjectApi,
    ProjectPayload, ProjectSearchOptions, ProjectService,
};
use atlassapi::{AtlassianClient, AtlassianError, Authentication, Required};
use wiremock::matchers::{any, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> AtlassianClient {
    AtlassianClient::new(&server.uri(), Authentication::basic("dev@example.com", "api-token"))
        .unwrap()
}

#[tokio::test]
async fn test_get_project_with_expand() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/api/3/project/KP"))
        .and(query_param("expand", "description,lead"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "10000",
            "key": "KP",
            "name": "Kitchen Porter",
            "projectTypeKey": "software",
            "simplified": true,
            "style": "next-gen",
            "lead": { "accountId": "5b10a2844c20165700ede21g", "displayName": "Mia Krystof" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let project = ProjectService::new(client(&mock_server))
        .get("KP", &["description".to_string(), "lead".to_string()])
        .await
        .unwrap();

    assert_eq!(project.data.name, "Kitchen Porter");
    assert!(project.data.is_team_managed());
    assert_eq!(
        project.data.lead.unwrap().display_name.as_deref(),
        Some("Mia Krystof")
    );
}

#[tokio::test]
async fn test_search_projects_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/api/3/project/search"))
        .and(query_param("startAt", "0"))
        .and(query_param("maxResults", "2"))
        .and(query_param("query", "kitchen"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "startAt": 0,
            "maxResults": 2,
            "total": 3,
            "isLast": false,
            "values": [
                { "id": "10000", "key": "KP", "name": "Kitchen Porter" },
                { "id": "10001", "key": "KD", "name": "Kitchen Duty" }
            ]
        })))
        .mount(&mock_server)
        .await;

    let options = ProjectSearchOptions {
        query: Some("kitchen".to_string()),
        ..Default::default()
    };
    let page = ProjectService::new(client(&mock_server))
        .search(&options, 0, 2)
        .await
        .unwrap();

    assert_eq!(page.data.len(), 2);
    assert!(page.data.has_more());
    assert_eq!(page.data.next_start_at(), 2);
}

#[tokio::test]
async fn test_create_project_validates_before_sending() {
    let mock_server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let projects = ProjectService::new(client(&mock_server));

    let err = projects
        .create(&ProjectPayload {
            key: String::new(),
            name: "Nameless".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = projects.archive("").await.unwrap_err();
    assert!(matches!(
        err,
        AtlassianError::Missing(Required::ProjectKeyOrId)
    ));
}

#[tokio::test]
async fn test_trash_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/api/3/field/customfield_10016/trash"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let trashed = IssueFieldService::new(client(&mock_server))
        .trash("customfield_10016")
        .await
        .unwrap();

    assert_eq!(trashed.status(), 204);
}

#[tokio::test]
async fn test_restore_field_with_empty_object_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/api/3/field/customfield_10016/restore"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let restored = IssueFieldService::new(client(&mock_server))
        .restore("customfield_10016")
        .await
        .unwrap();

    assert_eq!(restored.status(), 200);
    assert_eq!(restored.response.text(), "{}");
}

#[tokio::test]
async fn test_search_custom_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/api/3/field/search"))
        .and(query_param("type", "custom"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "startAt": 0,
            "maxResults": 50,
            "total": 1,
            "isLast": true,
            "values": [{
                "id": "customfield_10016",
                "name": "Story point estimate",
                "custom": true,
                "schema": { "type": "number", "customId": 10016 }
            }]
        })))
        .mount(&mock_server)
        .await;

    let options = FieldSearchOptions {
        types: vec!["custom".to_string()],
        ..Default::default()
    };
    let page = IssueFieldService::new(client(&mock_server))
        .search(&options, 0, 50)
        .await
        .unwrap();

    assert!(!page.data.has_more());
    let field = &page.data.values[0];
    assert!(field.custom);
    assert_eq!(field.schema.as_ref().unwrap().custom_id, Some(10016));
}

#[tokio::test]
async fn test_change_filter_owner() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/rest/api/3/filter/10000/owner"))
        .and(body_json(serde_json::json!({ "accountId": "0000-0000-0000-0000" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let changed = FilterService::new(client(&mock_server))
        .change_owner("10000", "0000-0000-0000-0000")
        .await
        .unwrap();

    assert_eq!(changed.status(), 204);
}

#[tokio::test]
async fn test_copy_dashboard() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/api/3/dashboard/10001/copy"))
        .and(body_json(serde_json::json!({
            "name": "Team board (copy)",
            "sharePermissions": [],
            "editPermissions": []
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "10002",
            "name": "Team board (copy)"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let payload = DashboardPayload {
        name: "Team board (copy)".to_string(),
        ..Default::default()
    };
    let copy = DashboardService::new(client(&mock_server))
        .copy("10001", &payload)
        .await
        .unwrap();

    assert_eq!(copy.data.id, "10002");
}

#[tokio::test]
async fn test_add_attachment_sends_multipart() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/api/3/issue/KP-7/attachments"))
        .and(header("x-atlassian-token", "no-check"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": "10010",
            "filename": "notes.txt",
            "size": 5,
            "mimeType": "text/plain",
            "created": "2024-03-01T10:00:00.000+0000"
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let attachments = AttachmentService::new(client(&mock_server))
        .add("KP-7", "notes.txt", b"notes".to_vec())
        .await
        .unwrap();

    assert_eq!(attachments.data.len(), 1);
    assert_eq!(attachments.data[0].filename, "notes.txt");
    assert_eq!(
        attachments.data[0].created.as_deref(),
        Some("2024-03-01T10:00:00.000+0000")
    );

    let received = mock_server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&received[0].body);
    assert!(body.contains(r#"name="file"; filename="notes.txt""#));
}

//! Tool handler tests
//!
//! Drives both tools end to end against a mock DevOps Center server.

use std::sync::Arc;

use devops_client::{TaskFetcher, TaskImporter};
use mcp_protocol::{GetJiraTasksRequest, ImportJiraTasksRequest, JiraBridgeHandler};
use mocks::{import_response, root_wrapped_tasks, sample_tasks, MockAuthResolver, TEST_JIRA_TOKEN};
use rmcp::{handler::server::tool::Parameters, model::CallToolResult, ServerHandler};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FETCH_PATH: &str =
    "/services/data/v65.0/connect/devops/projects/1Dp000/workitems/getFromJIRA/PROJ";
const IMPORT_PATH: &str =
    "/services/data/v65.0/connect/devops/projects/1Dp000/workitems/createFromJIRA";

fn handler_for(resolver: &MockAuthResolver) -> JiraBridgeHandler {
    let shared = Arc::new(resolver.clone());
    let client = reqwest::Client::new();
    JiraBridgeHandler::new(
        TaskFetcher::new(client.clone(), shared.clone()),
        TaskImporter::new(client, shared.clone(), shared),
    )
}

fn fetch_params(project_id: &str) -> Parameters<GetJiraTasksRequest> {
    Parameters(GetJiraTasksRequest {
        username: "jdoe".to_string(),
        project_id: project_id.to_string(),
        jira_project: "PROJ".to_string(),
    })
}

fn import_params(tasks: &[&str]) -> Parameters<ImportJiraTasksRequest> {
    Parameters(ImportJiraTasksRequest {
        username: "jdoe".to_string(),
        project_id: "1Dp000".to_string(),
        jira_project: "PROJ".to_string(),
        jira_tasks: tasks.iter().map(|t| t.to_string()).collect(),
    })
}

fn is_error(result: &CallToolResult) -> bool {
    serde_json::to_value(result).unwrap()["isError"] == json!(true)
}

fn text(result: &CallToolResult) -> String {
    let wire = serde_json::to_value(result).unwrap();
    wire["content"][0]["text"].as_str().unwrap().to_string()
}

fn json_text(result: &CallToolResult) -> Value {
    serde_json::from_str(&text(result)).unwrap()
}

#[tokio::test]
async fn test_get_jira_tasks_success() {
    let server = MockServer::start().await;
    let tasks = sample_tasks();
    Mock::given(method("GET"))
        .and(path(FETCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(root_wrapped_tasks(&tasks)))
        .mount(&server)
        .await;

    let handler = handler_for(&MockAuthResolver::new(server.uri()));
    let result = handler.get_jira_tasks(fetch_params("1Dp000")).await.unwrap();

    assert!(!is_error(&result));
    assert_eq!(json_text(&result), json!({ "tasks": tasks, "success": true }));
}

#[tokio::test]
async fn test_get_jira_tasks_remote_error_is_flagged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FETCH_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!([{
            "errorCode": "INVALID_SESSION_ID",
            "message": "Session expired or invalid"
        }])))
        .mount(&server)
        .await;

    let handler = handler_for(&MockAuthResolver::new(server.uri()));
    let result = handler.get_jira_tasks(fetch_params("1Dp000")).await.unwrap();

    assert!(is_error(&result));
    let body = json_text(&result);
    assert_eq!(body["error"]["status"], 401);
    assert_eq!(body["error"]["details"][0]["errorCode"], "INVALID_SESSION_ID");
    assert!(body.get("tasks").is_none());
}

#[tokio::test]
async fn test_get_jira_tasks_missing_token_becomes_text_error() {
    let handler = handler_for(&MockAuthResolver::without_token("http://127.0.0.1:9"));
    let result = handler.get_jira_tasks(fetch_params("1Dp000")).await.unwrap();

    assert!(is_error(&result));
    assert!(text(&result).starts_with("Error: No access token"));
}

#[tokio::test]
async fn test_get_jira_tasks_rejects_blank_project() {
    let resolver = MockAuthResolver::new("http://127.0.0.1:9");
    let handler = handler_for(&resolver);

    let err = handler.get_jira_tasks(fetch_params("  ")).await.unwrap_err();
    assert!(err.message.contains("projectId"));
    assert!(resolver.call_history().is_empty());
}

#[tokio::test]
async fn test_import_jira_tasks_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(IMPORT_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(import_response(&["0Hb1"], &[], "ok", true)),
        )
        .mount(&server)
        .await;

    let handler = handler_for(&MockAuthResolver::new(server.uri()));
    let result = handler.import_jira_tasks(import_params(&["10000"])).await.unwrap();

    assert!(!is_error(&result));
    assert_eq!(
        json_text(&result),
        json!({
            "createdWorkItemIds": ["0Hb1"],
            "failedJiraTasks": [],
            "success": true,
            "message": "ok"
        })
    );
}

#[tokio::test]
async fn test_import_jira_tasks_failure_hides_jira_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(IMPORT_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let handler = handler_for(&MockAuthResolver::new(server.uri()));
    let result = handler.import_jira_tasks(import_params(&["10000"])).await.unwrap();

    assert!(is_error(&result));
    let rendered = text(&result);
    assert!(!rendered.contains(TEST_JIRA_TOKEN));
    assert_eq!(json_text(&result)["error"]["requestBody"]["jiraTasks"], json!(["10000"]));
}

#[tokio::test]
async fn test_import_jira_tasks_requires_tasks() {
    let handler = handler_for(&MockAuthResolver::new("http://127.0.0.1:9"));

    let err = handler.import_jira_tasks(import_params(&[])).await.unwrap_err();
    assert!(err.message.contains("jiraTasks"));

    let err = handler.import_jira_tasks(import_params(&["10000", ""])).await.unwrap_err();
    assert!(err.message.contains("index 1"));
}

#[tokio::test]
async fn test_import_jira_tasks_rejects_blank_username() {
    let handler = handler_for(&MockAuthResolver::new("http://127.0.0.1:9"));
    let mut params = import_params(&["10000"]);
    params.0.username = String::new();

    let err = handler.import_jira_tasks(params).await.unwrap_err();
    assert!(err.message.contains("username"));
}

#[test]
fn test_server_info_and_tools() {
    let handler = handler_for(&MockAuthResolver::new("http://127.0.0.1:9"));

    let info = handler.get_info();
    assert!(info.capabilities.tools.is_some());
    assert!(info.instructions.unwrap().contains("get_jira_tasks"));

    assert_eq!(handler.tool_names(), vec!["get_jira_tasks", "import_jira_tasks"]);
}

#[test]
fn test_request_wire_names() {
    let request: ImportJiraTasksRequest = serde_json::from_value(json!({
        "username": "jdoe",
        "projectId": "1Dp000",
        "jiraProject": "PROJ",
        "jiraTasks": ["10000"]
    }))
    .unwrap();
    assert_eq!(request.project_id, "1Dp000");
    assert_eq!(request.jira_tasks, vec!["10000"]);
}

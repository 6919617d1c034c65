//! Server wiring tests
//!
//! Builds the handler from configuration exactly as the binary does and
//! drives it against a mock DevOps Center instance.

use mcp_protocol::{GetJiraTasksRequest, ImportJiraTasksRequest};
use mcp_server::{create_handler, create_http_client, Config};
use mocks::{import_response, sample_tasks, top_level_tasks};
use rmcp::handler::server::tool::Parameters;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(instance_url: &str) -> Config {
    let mut config = Config::default();
    config.devops.instance_url = Some(instance_url.to_string());
    config.devops.access_token = Some("00Dserver".to_string());
    config.jira.url = Some("https://acme.atlassian.net".to_string());
    config.jira.token = Some("jira-server-token".to_string());
    config
}

fn wire(result: &rmcp::model::CallToolResult) -> Value {
    serde_json::to_value(result).unwrap()
}

#[tokio::test]
async fn test_fetch_uses_configured_connection() {
    let server = MockServer::start().await;
    let tasks = sample_tasks();
    Mock::given(method("GET"))
        .and(path(
            "/services/data/v65.0/connect/devops/projects/1Dp000/workitems/getFromJIRA/PROJ",
        ))
        .and(header("authorization", "Bearer 00Dserver"))
        .respond_with(ResponseTemplate::new(200).set_body_json(top_level_tasks(&tasks)))
        .expect(1)
        .mount(&server)
        .await;

    let handler = create_handler(&config_for(&server.uri()), create_http_client().unwrap());
    let result = handler
        .get_jira_tasks(Parameters(GetJiraTasksRequest {
            username: "anyone".to_string(),
            project_id: "1Dp000".to_string(),
            jira_project: "PROJ".to_string(),
        }))
        .await
        .unwrap();

    let text = wire(&result)["content"][0]["text"].as_str().unwrap().to_string();
    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body, json!({ "tasks": tasks, "success": true }));
}

#[tokio::test]
async fn test_import_sends_configured_jira_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(
            "/services/data/v65.0/connect/devops/projects/1Dp000/workitems/createFromJIRA",
        ))
        .and(body_json(json!({
            "jiraNamedCredential": "JiraNamedCredential",
            "jiraProject": "PROJ",
            "jiraTasks": ["10000"],
            "jiraURL": "https://acme.atlassian.net",
            "jiraToken": "jira-server-token"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(import_response(&["0Hb1"], &[], "done", false)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let handler = create_handler(&config_for(&server.uri()), create_http_client().unwrap());
    let result = handler
        .import_jira_tasks(Parameters(ImportJiraTasksRequest {
            username: "anyone".to_string(),
            project_id: "1Dp000".to_string(),
            jira_project: "PROJ".to_string(),
            jira_tasks: vec!["10000".to_string()],
        }))
        .await
        .unwrap();

    assert_ne!(wire(&result)["isError"], json!(true));
}

#[tokio::test]
async fn test_import_without_jira_token_never_sends() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = config_for(&server.uri());
    config.jira.token = None;

    let handler = create_handler(&config, create_http_client().unwrap());
    let result = handler
        .import_jira_tasks(Parameters(ImportJiraTasksRequest {
            username: "anyone".to_string(),
            project_id: "1Dp000".to_string(),
            jira_project: "PROJ".to_string(),
            jira_tasks: vec!["10000".to_string()],
        }))
        .await
        .unwrap();

    let wire = wire(&result);
    assert_eq!(wire["isError"], json!(true));
    assert!(wire["content"][0]["text"]
        .as_str()
        .unwrap()
        .starts_with("Error: Authentication error: JIRA token"));
}

#[tokio::test]
async fn test_unconfigured_instance_is_reported() {
    let handler = create_handler(&Config::default(), create_http_client().unwrap());
    let result = handler
        .get_jira_tasks(Parameters(GetJiraTasksRequest {
            username: "anyone".to_string(),
            project_id: "1Dp000".to_string(),
            jira_project: "PROJ".to_string(),
        }))
        .await
        .unwrap();

    let wire = wire(&result);
    assert_eq!(wire["isError"], json!(true));
    assert!(wire["content"][0]["text"]
        .as_str()
        .unwrap()
        .starts_with("Error: No access token"));
}

//! Integration tests for the MCP tools against mocked Obsidian services.
//!
//! Tools never fail the MCP call for a remote problem: they return a result
//! flagged `is_error` with a message naming the failure.

use obsidian_mcp_server::core::ObsidianConfig;
use obsidian_mcp_server::domains::tools::definitions::common::first_text;
use obsidian_mcp_server::domains::tools::definitions::notes::{
    GetActiveNoteParams, GetActiveNoteTool, GetFileParams, GetFileTool, GetStatusParams,
    GetStatusTool, UpdateFileParams, UpdateFileTool,
};
use obsidian_mcp_server::domains::tools::definitions::search::{
    FindMatchingFileParams, FindMatchingFileTool, OmniSearchParams, OmniSearchTool, SearchParams,
    SearchTool,
};
use obsidian_mcp_server::domains::vault::ObsidianClient;
use obsidian_mcp_server::domains::vault::models::DATAVIEW_DQL_MIME;
use serde_json::json;
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> ObsidianClient {
    let config = ObsidianConfig::new("test-api-key", &server.uri(), &server.uri());
    ObsidianClient::new(&config).unwrap()
}

fn find_params(keyword: &str) -> FindMatchingFileParams {
    serde_json::from_value(json!({
        "query": "TABLE FROM \"inbox\"",
        "match_keyword": keyword
    }))
    .unwrap()
}

#[tokio::test]
async fn test_get_status_failure_names_status_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let result = GetStatusTool::execute(&GetStatusParams {}, &test_client(&mock_server)).await;
    assert_eq!(result.is_error, Some(true));
    let text = first_text(&result).unwrap();
    assert!(text.starts_with("Failed to get status"));
    assert!(text.contains("401"));
}

#[tokio::test]
async fn test_get_active_note_failure_names_status_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/active"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let params = GetActiveNoteParams::default();
    let result = GetActiveNoteTool::execute(&params, &test_client(&mock_server)).await;
    assert_eq!(result.is_error, Some(true));
    assert!(first_text(&result).unwrap().contains("404"));
}

#[tokio::test]
async fn test_get_file_markdown_has_no_metadata() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vault/notes/plain.md"))
        .respond_with(ResponseTemplate::new(200).set_body_string("just text"))
        .mount(&mock_server)
        .await;

    let params: GetFileParams =
        serde_json::from_value(json!({ "filename": "notes/plain.md" })).unwrap();
    let result = GetFileTool::execute(&params, &test_client(&mock_server)).await;
    assert_eq!(result.is_error, Some(false));
    assert_eq!(first_text(&result), Some("just text"));
    assert!(result.structured_content.is_none());
}

#[tokio::test]
async fn test_get_file_json_returns_structured_note() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vault/notes/meta.md"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": "body",
            "frontmatter": { "status": "draft" },
            "tags": ["wip"]
        })))
        .mount(&mock_server)
        .await;

    let params: GetFileParams =
        serde_json::from_value(json!({ "filename": "notes/meta.md", "as_json": true })).unwrap();
    let result = GetFileTool::execute(&params, &test_client(&mock_server)).await;
    let structured = result.structured_content.unwrap();
    assert_eq!(structured["frontmatter"]["status"], "draft");
}

#[tokio::test]
async fn test_get_file_missing_names_status_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vault/x.md"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let params: GetFileParams = serde_json::from_value(json!({ "filename": "x.md" })).unwrap();
    let result = GetFileTool::execute(&params, &test_client(&mock_server)).await;
    assert_eq!(result.is_error, Some(true));
    let text = first_text(&result).unwrap();
    assert!(text.starts_with("Failed to retrieve file 'x.md'"));
    assert!(text.contains("404"));
}

#[tokio::test]
async fn test_update_file_overwrites_on_each_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/vault/inbox/todo.md"))
        .and(body_string("first"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/vault/inbox/todo.md"))
        .and(body_string("second"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    for content in ["first", "second"] {
        let params = UpdateFileParams {
            filename: "inbox/todo.md".to_string(),
            content: content.to_string(),
        };
        let result = UpdateFileTool::execute(&params, &client).await;
        assert_eq!(result.is_error, Some(false));
        assert_eq!(
            first_text(&result),
            Some("File 'inbox/todo.md' updated successfully.")
        );
    }
}

#[tokio::test]
async fn test_update_file_failure_is_flagged() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/vault/locked.md"))
        .respond_with(ResponseTemplate::new(405))
        .mount(&mock_server)
        .await;

    let params = UpdateFileParams {
        filename: "locked.md".to_string(),
        content: "x".to_string(),
    };
    let result = UpdateFileTool::execute(&params, &test_client(&mock_server)).await;
    assert_eq!(result.is_error, Some(true));
    assert!(first_text(&result).unwrap().contains("405"));
}

#[tokio::test]
async fn test_omni_search_failure_names_status_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let params = OmniSearchParams {
        q: "#prompts".to_string(),
    };
    let result = OmniSearchTool::execute(&params, &test_client(&mock_server)).await;
    assert_eq!(result.is_error, Some(true));
    let text = first_text(&result).unwrap();
    assert!(text.starts_with("Failed to perform Omni Search"));
    assert!(text.contains("500"));
}

#[tokio::test]
async fn test_search_rejects_unknown_content_type_without_calling_out() {
    let mock_server = MockServer::start().await;

    let params = SearchParams {
        query: "TABLE".to_string(),
        content_type: "text/plain".to_string(),
    };
    let result = SearchTool::execute(&params, &test_client(&mock_server)).await;
    assert_eq!(result.is_error, Some(true));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_failure_names_status_code() {
    for status in [400u16, 503] {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&mock_server)
            .await;

        let params = SearchParams {
            query: "TABLE FROM \"inbox\"".to_string(),
            content_type: DATAVIEW_DQL_MIME.to_string(),
        };
        let result = SearchTool::execute(&params, &test_client(&mock_server)).await;
        assert_eq!(result.is_error, Some(true));
        let text = first_text(&result).unwrap();
        assert!(text.starts_with("Failed to perform search"));
        assert!(text.contains(&status.to_string()));
    }
}

#[tokio::test]
async fn test_search_returns_rows() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "filename": "inbox/hooks.md", "result": { "rating": 5 } }
        ])))
        .mount(&mock_server)
        .await;

    let params = SearchParams {
        query: "TABLE rating FROM \"inbox\"".to_string(),
        content_type: DATAVIEW_DQL_MIME.to_string(),
    };
    let result = SearchTool::execute(&params, &test_client(&mock_server)).await;
    assert_eq!(result.is_error, Some(false));
    assert!(first_text(&result).unwrap().contains("inbox/hooks.md"));
}

#[tokio::test]
async fn test_find_matching_skips_failed_fetch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "filename": "inbox/a.md", "result": {} },
            { "filename": "inbox/b.md", "result": {} }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vault/inbox/a.md"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/vault/inbox/b.md"))
        .respond_with(ResponseTemplate::new(200).set_body_string("useEffect cleanup"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result =
        FindMatchingFileTool::execute(&find_params("useEffect"), &test_client(&mock_server)).await;
    assert_eq!(result.is_error, Some(false));
    let structured = result.structured_content.unwrap();
    assert_eq!(structured["status"], "found");
    assert_eq!(structured["filename"], "inbox/b.md");
    assert_eq!(structured["content"], "useEffect cleanup");
}

#[tokio::test]
async fn test_find_matching_reads_each_candidate_once_when_nothing_matches() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "filename": "one.md" },
            { "filename": "two.md" }
        ])))
        .mount(&mock_server)
        .await;
    for file in ["/vault/one.md", "/vault/two.md"] {
        Mock::given(method("GET"))
            .and(path(file))
            .respond_with(ResponseTemplate::new(200).set_body_string("unrelated"))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let result =
        FindMatchingFileTool::execute(&find_params("useEffect"), &test_client(&mock_server)).await;
    assert_eq!(result.is_error, Some(false));
    let structured = result.structured_content.unwrap();
    assert_eq!(structured["status"], "no_match");
    assert_eq!(structured["scanned"], 2);
}

#[tokio::test]
async fn test_find_matching_reports_failed_search() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&mock_server)
        .await;

    let result =
        FindMatchingFileTool::execute(&find_params("x"), &test_client(&mock_server)).await;
    assert_eq!(result.is_error, Some(true));
    assert!(first_text(&result).unwrap().contains("400"));
}

//! Common utilities shared across the vault tools.
//!
//! Result builders, argument parsing and the JSON rendering used by every
//! tool, so the success and failure shapes stay uniform.

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content, JsonObject, RawContent},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::domains::tools::ToolError;
use crate::domains::vault::{ApiError, NoteContent};

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Create an error result for a failed call to the Obsidian services.
pub fn api_error_result(context: &str, error: &ApiError) -> CallToolResult {
    error_result(&format!("{}: {}", context, error))
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Create a success result rendering `data` as pretty-printed JSON.
///
/// JSON objects are also attached as structured content.
pub fn json_result(data: Value) -> CallToolResult {
    let mut result = success_result(pretty_json(&data));
    if data.is_object() {
        result.structured_content = Some(data);
    }
    result
}

/// Create a success result for a note body.
pub fn note_result(content: NoteContent) -> CallToolResult {
    match content {
        NoteContent::Markdown(text) => success_result(text),
        NoteContent::Json(value) => json_result(value),
    }
}

/// Pretty-print JSON without escaping non-ASCII text.
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Deserialize tool arguments delivered by rmcp.
pub fn parse_arguments<P: DeserializeOwned>(arguments: Option<JsonObject>) -> Result<P, McpError> {
    let arguments = Value::Object(arguments.unwrap_or_default());
    serde_json::from_value(arguments).map_err(|e| {
        McpError::invalid_params(ToolError::invalid_arguments(e.to_string()).to_string(), None)
    })
}

/// Deserialize tool arguments delivered over the HTTP transport.
#[cfg(feature = "http")]
pub fn parse_http_arguments<P: DeserializeOwned>(arguments: Value) -> Result<P, String> {
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(arguments)
        .map_err(|e| ToolError::invalid_arguments(e.to_string()).to_string())
}

/// Render a tool result as the JSON body of an HTTP `tools/call` response.
#[cfg(feature = "http")]
pub fn http_response(result: CallToolResult) -> Value {
    let mut body = serde_json::json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false)
    });
    if let Some(structured) = result.structured_content {
        body["structuredContent"] = structured;
    }
    body
}

/// Text of the first content item, for logging and tests.
pub fn first_text(result: &CallToolResult) -> Option<&str> {
    result
        .content
        .first()
        .and_then(|c| match &c.raw {
            RawContent::Text(text) => Some(text.text.as_str()),
            _ => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_result_is_flagged() {
        let result = error_result("boom");
        assert_eq!(result.is_error, Some(true));
        assert_eq!(first_text(&result), Some("boom"));
    }

    #[test]
    fn test_api_error_result_keeps_status_code() {
        let result = api_error_result("Failed to get status", &ApiError::status(503, "GET /"));
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            first_text(&result),
            Some("Failed to get status: Received status code 503 from GET /")
        );
    }

    #[test]
    fn test_json_result_attaches_objects_only() {
        let object = json_result(json!({ "ok": true }));
        assert_eq!(object.structured_content, Some(json!({ "ok": true })));

        let list = json_result(json!([1, 2]));
        assert!(list.structured_content.is_none());
        assert_eq!(list.is_error, Some(false));
    }

    #[test]
    fn test_pretty_json_keeps_unicode() {
        let text = pretty_json(&json!({ "title": "メモ" }));
        assert!(text.contains("メモ"));
        assert!(text.contains('\n'));
    }

    #[test]
    fn test_parse_arguments_reports_missing_field() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code)]
        struct Params {
            filename: String,
        }
        let err = parse_arguments::<Params>(None).unwrap_err();
        assert!(err.message.contains("filename"));
    }
}

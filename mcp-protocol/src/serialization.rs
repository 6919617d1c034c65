//! Serialization utilities for tool results
//!
//! Bridge results become pretty-printed JSON text content. A result that
//! carries an `ErrorDetail` is returned with the tool error flag set.

use bridge_core::{FetchResult, ImportResult};
use rmcp::{
    model::{CallToolResult, Content},
    ErrorData,
};
use serde::Serialize;

use crate::error::serialization_error;

/// Render a fetch result for the agent
pub fn fetch_result_to_tool_result(result: &FetchResult) -> Result<CallToolResult, ErrorData> {
    to_tool_result(result, result.is_success())
}

/// Render an import result for the agent
pub fn import_result_to_tool_result(result: &ImportResult) -> Result<CallToolResult, ErrorData> {
    to_tool_result(result, result.is_completed())
}

fn to_tool_result<T: Serialize>(value: &T, success: bool) -> Result<CallToolResult, ErrorData> {
    let text = serde_json::to_string_pretty(value).map_err(|e| serialization_error(&e))?;
    let content = vec![Content::text(text)];
    if success {
        Ok(CallToolResult::success(content))
    } else {
        Ok(CallToolResult::error(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_core::ErrorDetail;
    use serde_json::{json, Value};

    fn text_of(result: &CallToolResult) -> Value {
        let wire = serde_json::to_value(result).unwrap();
        serde_json::from_str(wire["content"][0]["text"].as_str().unwrap()).unwrap()
    }

    #[test]
    fn test_fetch_success_is_not_flagged() {
        let result = fetch_result_to_tool_result(&FetchResult::fetched(vec![json!({"id": "1"})]))
            .unwrap();
        assert_ne!(serde_json::to_value(&result).unwrap()["isError"], true);
        assert_eq!(text_of(&result), json!({"tasks": [{"id": "1"}], "success": true}));
    }

    #[test]
    fn test_fetch_error_is_flagged() {
        let detail = ErrorDetail::new("Request failed with status code 500", "https://x/y")
            .with_status(500, Some("Internal Server Error".to_string()));
        let result = fetch_result_to_tool_result(&FetchResult::failed(detail)).unwrap();

        assert_eq!(serde_json::to_value(&result).unwrap()["isError"], true);
        assert_eq!(text_of(&result)["error"]["status"], 500);
    }
}

//! Error handling for the tool boundary
//!
//! Maps bridge faults to MCP results. Input problems become JSON-RPC
//! `invalid_params` errors; every other fault becomes a textual tool error so
//! nothing raised by the bridge escapes the boundary.

use bridge_core::BridgeError;
use rmcp::{
    model::{CallToolResult, Content},
    ErrorData,
};

/// Convert a validation failure to a JSON-RPC error
pub fn invalid_params(err: &BridgeError) -> ErrorData {
    ErrorData::invalid_params(err.to_string(), None)
}

/// Convert a fault that stopped the call before it was sent to a tool error result
pub fn fault_result(err: &BridgeError) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!("Error: {err}"))])
}

/// Serialization failures are the only internal error the boundary reports
pub fn serialization_error(err: &serde_json::Error) -> ErrorData {
    ErrorData::internal_error(format!("Serialization error: {err}"), None)
}

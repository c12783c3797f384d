use order_ledger::LedgerError;
use order_protocol::ErrorEnvelope;
use rmcp::model::{CallToolResult, Content};
use serde_json::json;

use super::order_tools::DispatchError;

pub(crate) fn envelope_for(error: &DispatchError) -> ErrorEnvelope {
    let envelope = ErrorEnvelope::new(error.code(), error.to_string());
    match error {
        DispatchError::Session(LedgerError::SessionNotFound(_)) => {
            envelope.with_hint("Reconnect to start a new order session.")
        }
        DispatchError::InvalidArguments { tool, .. } => {
            let mut envelope = envelope;
            envelope.details = Some(json!({ "tool": tool }));
            envelope
        }
        _ => envelope,
    }
}

pub(crate) fn tool_error_envelope(error: ErrorEnvelope) -> CallToolResult {
    let mut text = format!("error: {}\n{}", error.code, error.message);
    if let Some(hint) = error.hint.as_deref().filter(|hint| !hint.trim().is_empty()) {
        text.push_str(&format!("\nhint: {hint}"));
    }

    let mut result = CallToolResult::error(vec![Content::text(text)]);
    result.structured_content = Some(json!({ "error": error }));
    result
}

pub(crate) fn dispatch_error(error: DispatchError) -> CallToolResult {
    log::warn!("Tool call failed: {error}");
    tool_error_envelope(envelope_for(&error))
}

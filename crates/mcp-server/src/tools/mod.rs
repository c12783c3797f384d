//! Order assistant tools and their MCP surface.

mod order_tools;
mod service;
mod tool_error;

pub use order_tools::{DispatchError, OrderTools, Result, ToolCall, Turn};
pub use service::OrderAssistantService;

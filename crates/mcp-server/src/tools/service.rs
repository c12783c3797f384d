use order_ledger::SessionId;
use order_protocol::{GetOrderRequest, SearchRequest, UpdateOrderRequest};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde_json::json;

use super::order_tools::{OrderTools, ToolCall, Turn};
use super::tool_error::dispatch_error;

const INSTRUCTIONS: &str = "Order assistant tools for a coffee and bakery menu. Use 'search' to look up menu items, 'update_order' to add or remove items from the customer's order, and 'get_order' to read the current order with totals.";

/// MCP service for one client connection; owns exactly one order session.
#[derive(Clone)]
pub struct OrderAssistantService {
    tools: OrderTools,
    session: SessionId,
    tool_router: ToolRouter<Self>,
}

impl OrderAssistantService {
    /// Opens a fresh order session for a new connection.
    pub async fn connect(tools: OrderTools) -> Self {
        let session = tools.store().create_session().await;
        Self {
            tools,
            session,
            tool_router: Self::tool_router(),
        }
    }

    /// Drops the connection's session. Safe to call more than once.
    pub async fn disconnect(&self) {
        self.tools.store().delete_session(&self.session).await;
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session
    }

    /// Runs one call as a round trip and wraps the result for the bridge.
    async fn finish(&self, call: ToolCall) -> Result<CallToolResult, McpError> {
        let Turn {
            output,
            identifiers,
        } = match self.tools.turn(call, &self.session).await {
            Ok(turn) => turn,
            Err(err) => return Ok(dispatch_error(err)),
        };

        let mut result = CallToolResult::success(vec![Content::text(output.payload)]);
        result.structured_content = Some(json!({
            "destination": output.destination,
            "session_token": identifiers.session_token,
            "round_trip_index": identifiers.round_trip_index,
            "round_trip_token": identifiers.round_trip_token,
        }));
        Ok(result)
    }
}

#[tool_router]
impl OrderAssistantService {
    #[tool(
        description = "Search the menu knowledge base. Returns up to five matching items with id, name, category, description and sizes."
    )]
    pub async fn search(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.finish(ToolCall::Search(request)).await
    }

    #[tool(
        description = "Add or remove an item in the customer's order. Fields: action ('add' or 'remove'), item_name, size, quantity (>= 1), price (unit price, required for add). Returns the updated order summary."
    )]
    pub async fn update_order(
        &self,
        Parameters(request): Parameters<UpdateOrderRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.finish(ToolCall::UpdateOrder(request)).await
    }

    #[tool(description = "Return the current order: items, subtotal, tax and final total.")]
    pub async fn get_order(
        &self,
        Parameters(_request): Parameters<GetOrderRequest>,
    ) -> Result<CallToolResult, McpError> {
        self.finish(ToolCall::GetOrder).await
    }
}

#[tool_handler]
impl ServerHandler for OrderAssistantService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }
}

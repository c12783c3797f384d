use std::sync::Arc;

use order_ledger::{LedgerError, Session, SessionId, SessionIdentifiers, SessionStore};
use order_menu::{ExtrasDecision, ExtrasPolicy};
use order_protocol::{OrderAction, SearchRequest, ToolOutput, UpdateOrderRequest};
use order_search::MenuSearch;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DispatchError>;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    Session(#[from] LedgerError),

    #[error("Invalid arguments for '{tool}': {message}")]
    InvalidArguments { tool: &'static str, message: String },

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Failed to serialize order summary: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl DispatchError {
    pub fn code(&self) -> &'static str {
        match self {
            DispatchError::Session(LedgerError::SessionNotFound(_)) => "session_not_found",
            DispatchError::Session(LedgerError::InvalidQuantity)
            | DispatchError::Session(LedgerError::InvalidPrice(_))
            | DispatchError::InvalidArguments { .. } => "invalid_request",
            DispatchError::UnknownTool(_) => "unknown_tool",
            DispatchError::Serialize(_) => "internal",
        }
    }
}

/// A parsed tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    Search(SearchRequest),
    UpdateOrder(UpdateOrderRequest),
    GetOrder,
}

impl ToolCall {
    pub fn parse(tool: &str, args: serde_json::Value) -> Result<Self> {
        match tool {
            "search" => Ok(ToolCall::Search(parse_args("search", args)?)),
            "update_order" => Ok(ToolCall::UpdateOrder(parse_args("update_order", args)?)),
            "get_order" => Ok(ToolCall::GetOrder),
            other => Err(DispatchError::UnknownTool(other.to_string())),
        }
    }
}

/// Output of one tool call plus the round trip it closed.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub output: ToolOutput,
    pub identifiers: SessionIdentifiers,
}

/// The three tools the conversation bridge can call.
///
/// Order tools hold the session's lock for the whole call, so concurrent calls on one
/// session apply one after another while other sessions proceed independently.
#[derive(Clone)]
pub struct OrderTools {
    store: Arc<SessionStore>,
    extras: ExtrasPolicy,
    search: MenuSearch,
}

impl OrderTools {
    pub const TOOL_NAMES: [&'static str; 3] = ["search", "update_order", "get_order"];

    pub fn new(store: Arc<SessionStore>, extras: ExtrasPolicy, search: MenuSearch) -> Self {
        Self {
            store,
            extras,
            search,
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Adds or removes a line. Extras without an eligible base are refused with an
    /// apology for the model only; every applied change goes to the client as well.
    pub async fn update_order(
        &self,
        request: UpdateOrderRequest,
        session_id: &SessionId,
    ) -> Result<ToolOutput> {
        let quantity = validate_update(&request)?;
        let mut session = self.store.lock(session_id).await?;
        self.apply_update(request, quantity, &mut session)
    }

    /// Current order for the model; the UI already saw it through `update_order`.
    pub async fn get_order(&self, session_id: &SessionId) -> Result<ToolOutput> {
        let session = self.store.lock(session_id).await?;
        order_output(&session)
    }

    pub async fn search(&self, request: SearchRequest) -> ToolOutput {
        ToolOutput::server_only(self.search.search(&request.query).await)
    }

    /// Entry point for bridges that address tools by name with raw JSON arguments.
    pub async fn call(
        &self,
        tool: &str,
        args: serde_json::Value,
        session_id: &SessionId,
    ) -> Result<ToolOutput> {
        match ToolCall::parse(tool, args)? {
            ToolCall::Search(request) => Ok(self.search(request).await),
            ToolCall::UpdateOrder(request) => self.update_order(request, session_id).await,
            ToolCall::GetOrder => self.get_order(session_id).await,
        }
    }

    /// Runs one call and advances the session's round trip under the same lock, so the
    /// returned token always matches the order state the call produced. Failed calls
    /// leave the round trip where it was.
    pub async fn turn(&self, call: ToolCall, session_id: &SessionId) -> Result<Turn> {
        let mut session = self.store.lock(session_id).await?;
        let output = match call {
            ToolCall::Search(request) => self.search(request).await,
            ToolCall::UpdateOrder(request) => {
                let quantity = validate_update(&request)?;
                self.apply_update(request, quantity, &mut session)?
            }
            ToolCall::GetOrder => order_output(&session)?,
        };
        let identifiers = session.advance_round_trip();
        Ok(Turn {
            output,
            identifiers,
        })
    }

    fn apply_update(
        &self,
        request: UpdateOrderRequest,
        quantity: u32,
        session: &mut Session,
    ) -> Result<ToolOutput> {
        let session_id = session.id().clone();
        log::info!("Updating order for session {session_id} with payload {request:?}");

        if request.action == OrderAction::Add && ExtrasPolicy::is_extra(&request.item_name) {
            let items = session.ledger().lines().iter().map(|line| line.item.as_str());
            if let ExtrasDecision::Deny(reason) = self.extras.evaluate(items, &request.item_name) {
                log::info!("Blocked extra '{}' for session {session_id}", request.item_name);
                return Ok(ToolOutput::server_only(reason.apology()));
            }
        }

        session.apply(
            request.action,
            &request.item_name,
            &request.size,
            quantity,
            request.unit_price(),
        )?;

        let payload = serde_json::to_string(session.summary())?;
        log::debug!("Session {session_id} order summary after update: {payload}");
        Ok(ToolOutput::client_visible(payload))
    }
}

fn order_output(session: &Session) -> Result<ToolOutput> {
    log::info!("Retrieving order summary for session {}", session.id());
    Ok(ToolOutput::server_only(serde_json::to_string(session.summary())?))
}

/// Quantity must be a positive integer; price must be a finite non-negative number.
fn validate_update(request: &UpdateOrderRequest) -> Result<u32> {
    let invalid = |message: String| DispatchError::InvalidArguments {
        tool: "update_order",
        message,
    };

    let quantity = u32::try_from(request.quantity)
        .ok()
        .filter(|quantity| *quantity >= 1)
        .ok_or_else(|| {
            invalid(format!(
                "quantity must be a positive integer, got {}",
                request.quantity
            ))
        })?;

    let price = request.unit_price();
    if !price.is_finite() || price < 0.0 {
        return Err(invalid(format!("price must be a non-negative number, got {price}")));
    }
    Ok(quantity)
}

fn parse_args<T: DeserializeOwned>(tool: &'static str, args: serde_json::Value) -> Result<T> {
    serde_json::from_value(args).map_err(|err| DispatchError::InvalidArguments {
        tool,
        message: err.to_string(),
    })
}

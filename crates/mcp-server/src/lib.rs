//! Order Assistant MCP Server
//!
//! Exposes the order assistant tools to a conversation bridge over MCP (stdio).
//!
//! ## Tools
//!
//! - `search` - Menu knowledge search (server only)
//! - `update_order` - Add or remove order lines (client visible once applied)
//! - `get_order` - Current order with totals (server only)
//!
//! Every successful result carries its routing tag and the session's round trip token in
//! `structuredContent`.
//!
//! ## Usage
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "order-assistant": {
//!       "command": "order-mcp",
//!       "env": { "ORDER_MENU_PATH": "data/menuItems.json" }
//!     }
//!   }
//! }
//! ```

use std::sync::Arc;

use anyhow::Result;
use order_ledger::SessionStore;
use order_menu::{CatalogIndex, ExtrasPolicy, MenuCategories, MenuDocument};
use order_search::{CatalogSearchBackend, MenuSearch};
use rmcp::transport::stdio;
use rmcp::ServiceExt;

pub mod config;
pub mod tools;

pub use config::OrderConfig;
pub use tools::{DispatchError, OrderAssistantService, OrderTools, ToolCall, Turn};

/// Builds the shared tool set: one session store, one catalog, one search backend.
pub fn build_tools(config: &OrderConfig) -> OrderTools {
    let document = MenuDocument::load_or_default(&config.menu_path);
    let categories = MenuCategories::with_catalog(CatalogIndex::from_document(&document));
    let backend = CatalogSearchBackend::from_document(&document);
    log::debug!("Menu search serves {} catalog entries", backend.len());

    OrderTools::new(
        Arc::new(SessionStore::new()),
        ExtrasPolicy::new(Arc::new(categories)),
        MenuSearch::new(Arc::new(backend), config.search.clone()),
    )
}

pub async fn main_entry() -> Result<()> {
    // stdout carries the MCP protocol.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    log::info!("Starting order assistant MCP server");

    let config = OrderConfig::from_env();
    let service = OrderAssistantService::connect(build_tools(&config)).await;
    let server = service.clone().serve(stdio()).await?;

    let outcome = server.waiting().await;
    service.disconnect().await;
    outcome?;

    log::info!("Order assistant MCP server stopped");
    Ok(())
}

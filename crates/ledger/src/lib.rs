//! # Order Ledger
//!
//! Per-conversation order state for the order assistant.
//!
//! ## Layout
//!
//! ```text
//! SessionStore
//!     │
//!     └──> Session (one lock per session)
//!            ├─> OrderLedger   lines keyed by (item, raw size) + cached summary
//!            └─> RoundTrip     session token + monotonic turn index
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use order_ledger::SessionStore;
//! use order_protocol::OrderAction;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = SessionStore::new();
//!     let id = store.create_session().await;
//!
//!     let mut session = store.lock(&id).await?;
//!     session.apply(OrderAction::Add, "Glazed Donut", "standard", 2, 1.49)?;
//!     println!("total due: {:.2}", session.summary().final_total);
//!     Ok(())
//! }
//! ```

mod error;
mod label;
mod ledger;
mod round_trip;
mod session;
mod store;

pub use error::{LedgerError, Result};
pub use label::display_label;
pub use ledger::{LedgerChange, OrderLedger};
pub use round_trip::{format_round_trip_token, RoundTrip, SessionIdentifiers};
pub use session::{Session, SessionId};
pub use store::{SessionGuard, SessionStore};

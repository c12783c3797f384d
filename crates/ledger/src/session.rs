use std::fmt;

use order_protocol::{OrderAction, OrderSummary};
use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;
use crate::ledger::{LedgerChange, OrderLedger};
use crate::round_trip::{RoundTrip, SessionIdentifiers};

/// Opaque identifier the bridge uses to address a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One conversation's order plus its resumption state.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    ledger: OrderLedger,
    round_trip: RoundTrip,
}

impl Session {
    pub(crate) fn new(id: SessionId) -> Self {
        Self {
            id,
            ledger: OrderLedger::new(),
            round_trip: RoundTrip::new(Uuid::new_v4().to_string()),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn ledger(&self) -> &OrderLedger {
        &self.ledger
    }

    pub fn summary(&self) -> &OrderSummary {
        let summary = self.ledger.summary();
        log::debug!("Order summary retrieved for session {}", self.id);
        summary
    }

    pub fn apply(
        &mut self,
        action: OrderAction,
        item_name: &str,
        size: &str,
        quantity: u32,
        unit_price: f64,
    ) -> Result<LedgerChange> {
        let change = self
            .ledger
            .apply(action, item_name, size, quantity, unit_price)?;
        let display = crate::label::display_label(item_name, size);
        match change {
            LedgerChange::Added => log::info!("Added {display} to session {}", self.id),
            LedgerChange::Incremented { .. } => {
                log::info!("Updated quantity for {display} in session {}", self.id)
            }
            LedgerChange::Decremented { .. } => {
                log::info!("Decreased quantity for {display} in session {}", self.id)
            }
            LedgerChange::Removed => log::info!("Removed {display} from session {}", self.id),
            LedgerChange::Unchanged => {
                log::debug!("Nothing to remove for {display} in session {}", self.id)
            }
        }
        let summary = self.ledger.summary();
        log::debug!(
            "Order summary updated for session {}: {} lines, total {:.2}",
            self.id,
            summary.items.len(),
            summary.final_total
        );
        Ok(change)
    }

    pub fn identifiers(&self) -> SessionIdentifiers {
        self.round_trip.identifiers()
    }

    pub fn advance_round_trip(&mut self) -> SessionIdentifiers {
        let index = self.round_trip.advance();
        log::info!("Round trip {index} recorded for session {}", self.id);
        self.round_trip.identifiers()
    }
}

use order_protocol::{OrderAction, OrderLine, OrderSummary};

use crate::error::{LedgerError, Result};
use crate::label::display_label;

/// What a single [`OrderLedger::apply`] call did to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerChange {
    Added,
    Incremented { quantity: u32 },
    Decremented { quantity: u32 },
    Removed,
    /// `remove` for a line that is not in the order.
    Unchanged,
}

/// Ordered set of order lines plus the summary derived from them.
///
/// Lines are keyed by `(item, size)` using the raw strings. The summary is rebuilt after
/// every mutation, so [`OrderLedger::summary`] is always consistent with the lines.
#[derive(Debug, Clone, Default)]
pub struct OrderLedger {
    summary: OrderSummary,
}

impl OrderLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.summary.items
    }

    pub fn len(&self) -> usize {
        self.summary.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.summary.items.is_empty()
    }

    pub fn summary(&self) -> &OrderSummary {
        &self.summary
    }

    fn position(&self, item_name: &str, size: &str) -> Option<usize> {
        self.summary
            .items
            .iter()
            .position(|line| line.item == item_name && line.size == size)
    }

    /// Adds or removes `quantity` units of `(item_name, size)`.
    ///
    /// `unit_price` is only used when a new line is created; an existing line keeps the
    /// price it was first added with. Negative or non-finite prices are rejected.
    pub fn apply(
        &mut self,
        action: OrderAction,
        item_name: &str,
        size: &str,
        quantity: u32,
        unit_price: f64,
    ) -> Result<LedgerChange> {
        if quantity == 0 {
            return Err(LedgerError::InvalidQuantity);
        }
        if !unit_price.is_finite() || unit_price < 0.0 {
            return Err(LedgerError::InvalidPrice(unit_price));
        }

        let existing = self.position(item_name, size);
        let items = &mut self.summary.items;
        let change = match (action, existing) {
            (OrderAction::Add, Some(idx)) => {
                let line = &mut items[idx];
                line.quantity = line.quantity.saturating_add(quantity);
                LedgerChange::Incremented {
                    quantity: line.quantity,
                }
            }
            (OrderAction::Add, None) => {
                items.push(OrderLine {
                    item: item_name.to_string(),
                    size: size.to_string(),
                    quantity,
                    price: unit_price,
                    display: display_label(item_name, size),
                });
                LedgerChange::Added
            }
            (OrderAction::Remove, Some(idx)) if items[idx].quantity > quantity => {
                let line = &mut items[idx];
                line.quantity -= quantity;
                LedgerChange::Decremented {
                    quantity: line.quantity,
                }
            }
            (OrderAction::Remove, Some(idx)) => {
                items.remove(idx);
                LedgerChange::Removed
            }
            (OrderAction::Remove, None) => LedgerChange::Unchanged,
        };

        self.recompute();
        Ok(change)
    }

    fn recompute(&mut self) {
        let items = std::mem::take(&mut self.summary.items);
        self.summary = OrderSummary::from_items(items);
    }
}

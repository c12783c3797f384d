use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub mod tool_args;

pub use tool_args::{GetOrderRequest, OrderAction, SearchRequest, UpdateOrderRequest};

/// Fixed sales tax rate applied to every order subtotal.
pub const TAX_RATE: f64 = 0.08;

/// Where the bridge should route a tool result.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ToolDestination {
    /// Fed into the model's context only.
    ServerOnly,
    /// Fed into the model's context and forwarded to the connected UI.
    ClientVisible,
}

impl ToolDestination {
    pub fn as_str(self) -> &'static str {
        match self {
            ToolDestination::ServerOnly => "server_only",
            ToolDestination::ClientVisible => "client_visible",
        }
    }
}

/// Payload plus routing tag, as handed back to the bridge.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct ToolOutput {
    pub payload: String,
    pub destination: ToolDestination,
}

impl ToolOutput {
    pub fn server_only(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            destination: ToolDestination::ServerOnly,
        }
    }

    pub fn client_visible(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            destination: ToolDestination::ClientVisible,
        }
    }
}

/// One line of an order as it appears on the wire.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct OrderLine {
    pub item: String,
    /// Raw size string as supplied by the caller (identity is matched on this).
    pub size: String,
    pub quantity: u32,
    /// Unit price, fixed when the line was first added.
    pub price: f64,
    pub display: String,
}

impl OrderLine {
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

/// Order summary payload: `{"items": [...], "total", "tax", "finalTotal"}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema, Default)]
pub struct OrderSummary {
    pub items: Vec<OrderLine>,
    pub total: f64,
    pub tax: f64,
    #[serde(rename = "finalTotal")]
    pub final_total: f64,
}

impl OrderSummary {
    /// Builds a summary whose money fields are derived from `items`.
    pub fn from_items(items: Vec<OrderLine>) -> Self {
        let total: f64 = items.iter().map(OrderLine::line_total).sum();
        let tax = total * TAX_RATE;
        Self {
            items,
            total,
            tax,
            final_total: total + tax,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
    pub hint: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn line(item: &str, quantity: u32, price: f64) -> OrderLine {
        OrderLine {
            item: item.to_string(),
            size: "standard".to_string(),
            quantity,
            price,
            display: item.to_string(),
        }
    }

    #[test]
    fn summary_serializes_with_wire_field_names() {
        let summary = OrderSummary::from_items(vec![line("Glazed Donut", 2, 1.5)]);
        let value = serde_json::to_value(&summary).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "items": [{
                    "item": "Glazed Donut",
                    "size": "standard",
                    "quantity": 2,
                    "price": 1.5,
                    "display": "Glazed Donut",
                }],
                "total": 3.0,
                "tax": 0.24,
                "finalTotal": 3.24,
            })
        );
    }

    #[test]
    fn empty_summary_is_all_zero() {
        let summary = OrderSummary::from_items(Vec::new());
        assert_eq!(summary, OrderSummary::default());
    }

    #[test]
    fn destination_uses_snake_case_names() {
        let raw = serde_json::to_string(&ToolDestination::ClientVisible).unwrap();
        assert_eq!(raw, "\"client_visible\"");
        assert_eq!(ToolDestination::ServerOnly.as_str(), "server_only");
    }
}

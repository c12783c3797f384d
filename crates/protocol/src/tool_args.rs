use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderAction {
    Add,
    Remove,
}

impl OrderAction {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderAction::Add => "add",
            OrderAction::Remove => "remove",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateOrderRequest {
    /// Action to perform: 'add' or 'remove'.
    #[schemars(description = "Action to perform: 'add' or 'remove'.")]
    pub action: OrderAction,

    /// Name of the item to update.
    #[schemars(description = "Name of the item to update, e.g., 'Cappuccino'.")]
    pub item_name: String,

    /// Size of the item to update.
    #[schemars(description = "Size of the item to update, e.g., 'Large'.")]
    pub size: String,

    /// Number of items to add or remove.
    #[schemars(
        description = "Quantity of the item to update. Represents the number of items."
    )]
    pub quantity: i64,

    /// Unit price; only meaningful for 'add'.
    #[schemars(
        description = "Price of a single item to add. Required only for 'add' action. Note: This is the price per individual item, not the total price for the quantity."
    )]
    #[serde(default)]
    pub price: Option<f64>,
}

impl UpdateOrderRequest {
    pub fn unit_price(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema, Default)]
pub struct GetOrderRequest {}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SearchRequest {
    /// Search query
    #[schemars(description = "Search query")]
    pub query: String,
}

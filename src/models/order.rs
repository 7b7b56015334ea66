use serde::{Deserialize, Serialize};

use super::Entity;

/// A customer order for a single item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_item: String,
    pub price: f64,
}

impl Entity for Order {
    const RESOURCE: &'static str = "orders";
    const NAME_FIELD: &'static str = "order_item";
    const LABEL: &'static str = "order item";
    const NAME_HELP: &'static str = "kindly provide an order item";

    fn from_parts(name: String, price: f64) -> Self {
        Self {
            order_item: name,
            price,
        }
    }

    fn name(&self) -> &str {
        &self.order_item
    }

    fn price(&self) -> f64 {
        self.price
    }
}

use serde::{Deserialize, Serialize};

use super::Entity;

/// A meal the kitchen can prepare
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub meal_item: String,
    pub price: f64,
}

impl Entity for Meal {
    const RESOURCE: &'static str = "meals";
    const NAME_FIELD: &'static str = "meal_item";
    const LABEL: &'static str = "meal item";
    const NAME_HELP: &'static str = "kindly provide a meal item";

    fn from_parts(name: String, price: f64) -> Self {
        Self {
            meal_item: name,
            price,
        }
    }

    fn name(&self) -> &str {
        &self.meal_item
    }

    fn price(&self) -> f64 {
        self.price
    }
}

use serde::{Deserialize, Serialize};

use super::Entity;

/// An option offered on the menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuOption {
    pub menu_option: String,
    pub price: f64,
}

impl Entity for MenuOption {
    const RESOURCE: &'static str = "menu";
    const NAME_FIELD: &'static str = "menu_option";
    const LABEL: &'static str = "menu option";
    const NAME_HELP: &'static str = "kindly provide a menu option";

    fn from_parts(name: String, price: f64) -> Self {
        Self {
            menu_option: name,
            price,
        }
    }

    fn name(&self) -> &str {
        &self.menu_option
    }

    fn price(&self) -> f64 {
        self.price
    }
}

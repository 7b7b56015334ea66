// Re-export all model types
pub use self::entity::*;
pub use self::errors::*;
pub use self::meal::*;
pub use self::menu::*;
pub use self::order::*;
pub use self::validation::*;

mod entity;
mod errors;
mod meal;
mod menu;
mod order;
mod validation;

pub mod api;
pub mod entity;
pub mod fields;
pub mod health;
pub mod metrics;
pub mod middleware;

pub use api::*;
pub use entity::*;
pub use fields::*;
pub use health::*;
pub use metrics::*;
pub use middleware::*;

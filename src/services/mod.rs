// Services module - business logic layer

pub mod clock;
pub mod entity_service;

pub use clock::{Clock, FixedClock, OrderingWindow, SystemClock};
pub use entity_service::{EntityService, OrderService};

// Repositories module - data access layer

pub mod entity_store;

pub use entity_store::{EntityRepository, InMemoryEntityStore, InsertOutcome};

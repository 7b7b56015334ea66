use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::models::{Entity, Record};

/// Outcome of a guarded insert
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome<E> {
    Created(Record<E>),
    Duplicate,
}

/// Storage abstraction for one entity collection
#[async_trait]
pub trait EntityRepository<E: Entity>: Send + Sync {
    /// Snapshot of every entry keyed by id
    async fn list(&self) -> BTreeMap<u64, E>;

    async fn find(&self, id: u64) -> Option<Record<E>>;

    /// Insert unless an entry with the same name exists. The name check and
    /// the insert happen under one lock.
    async fn insert_unique(&self, entity: E) -> InsertOutcome<E>;

    /// Overwrite an existing entry, returning the stored record
    async fn replace(&self, id: u64, entity: E) -> Option<Record<E>>;

    async fn remove(&self, id: u64) -> Option<Record<E>>;

    async fn len(&self) -> usize;
}

struct StoreState<E> {
    entries: BTreeMap<u64, E>,
    next_id: u64,
}

/// In-process store: an id-keyed map plus a counter that never goes back,
/// so ids are not reused after deletion.
pub struct InMemoryEntityStore<E> {
    state: RwLock<StoreState<E>>,
}

impl<E: Entity> InMemoryEntityStore<E> {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                entries: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl<E: Entity> Default for InMemoryEntityStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> EntityRepository<E> for InMemoryEntityStore<E> {
    async fn list(&self) -> BTreeMap<u64, E> {
        self.state.read().await.entries.clone()
    }

    async fn find(&self, id: u64) -> Option<Record<E>> {
        let state = self.state.read().await;
        state
            .entries
            .get(&id)
            .map(|entity| Record::new(id, entity.clone()))
    }

    #[instrument(skip(self, entity), fields(resource = E::RESOURCE, name = %entity.name()))]
    async fn insert_unique(&self, entity: E) -> InsertOutcome<E> {
        let mut state = self.state.write().await;

        if state
            .entries
            .values()
            .any(|existing| existing.name() == entity.name())
        {
            debug!("Name already present, skipping insert");
            return InsertOutcome::Duplicate;
        }

        let id = state.next_id;
        state.next_id += 1;
        state.entries.insert(id, entity.clone());

        debug!(id, "Inserted entry");
        InsertOutcome::Created(Record::new(id, entity))
    }

    async fn replace(&self, id: u64, entity: E) -> Option<Record<E>> {
        let mut state = self.state.write().await;
        let slot = state.entries.get_mut(&id)?;
        *slot = entity.clone();
        Some(Record::new(id, entity))
    }

    async fn remove(&self, id: u64) -> Option<Record<E>> {
        let mut state = self.state.write().await;
        state
            .entries
            .remove(&id)
            .map(|entity| Record::new(id, entity))
    }

    async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }
}

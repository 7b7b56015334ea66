use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::models::{
    parse_entity, Entity, Order, OrderAction, Record, RequestFields, ServiceError, ServiceResult,
};
use crate::repositories::{EntityRepository, InsertOutcome};

use super::OrderingWindow;

/// CRUD operations over one entity collection.
///
/// When an ordering window is attached, create and update are refused once
/// the window has closed. Reads and deletes are never gated.
pub struct EntityService<E: Entity> {
    repository: Arc<dyn EntityRepository<E>>,
    window: Option<OrderingWindow>,
}

/// Orders are the only gated collection
pub type OrderService = EntityService<Order>;

impl<E: Entity> EntityService<E> {
    pub fn new(repository: Arc<dyn EntityRepository<E>>) -> Self {
        Self {
            repository,
            window: None,
        }
    }

    pub fn with_ordering_window(
        repository: Arc<dyn EntityRepository<E>>,
        window: OrderingWindow,
    ) -> Self {
        Self {
            repository,
            window: Some(window),
        }
    }

    #[instrument(skip(self), fields(resource = E::RESOURCE))]
    pub async fn list(&self) -> BTreeMap<u64, E> {
        let entries = self.repository.list().await;
        info!("Listed {} entries", entries.len());
        entries
    }

    #[instrument(skip(self), fields(resource = E::RESOURCE))]
    pub async fn get(&self, id: u64) -> ServiceResult<Record<E>> {
        self.repository
            .find(id)
            .await
            .ok_or(ServiceError::NotFound { label: E::LABEL })
    }

    /// Validate the submitted fields and insert a new entry
    #[instrument(skip(self, input), fields(resource = E::RESOURCE))]
    pub async fn create(&self, input: &RequestFields) -> ServiceResult<Record<E>> {
        let entity: E = parse_entity(input)?;
        self.ensure_open(OrderAction::Make)?;

        match self.repository.insert_unique(entity).await {
            InsertOutcome::Created(record) => {
                info!(id = record.id, "Created entry");
                Ok(record)
            }
            InsertOutcome::Duplicate => {
                warn!("Entry with the same name already exists");
                Err(ServiceError::DuplicateName { label: E::LABEL })
            }
        }
    }

    /// Validate the submitted fields and overwrite an existing entry
    #[instrument(skip(self, input), fields(resource = E::RESOURCE))]
    pub async fn update(&self, id: u64, input: &RequestFields) -> ServiceResult<Record<E>> {
        let entity: E = parse_entity(input)?;
        self.ensure_open(OrderAction::Modify)?;

        let record = self
            .repository
            .replace(id, entity)
            .await
            .ok_or(ServiceError::NotFound { label: E::LABEL })?;

        info!("Updated entry");
        Ok(record)
    }

    #[instrument(skip(self), fields(resource = E::RESOURCE))]
    pub async fn delete(&self, id: u64) -> ServiceResult<Record<E>> {
        let record = self
            .repository
            .remove(id)
            .await
            .ok_or(ServiceError::NotFound { label: E::LABEL })?;

        info!("Deleted entry");
        Ok(record)
    }

    pub async fn len(&self) -> usize {
        self.repository.len().await
    }

    fn ensure_open(&self, action: OrderAction) -> ServiceResult<()> {
        match &self.window {
            Some(window) => window.ensure_open(action).inspect_err(|_| {
                warn!(closing = %window.closing(), "Refusing order change past closing");
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Meal, MenuOption};
    use crate::repositories::InMemoryEntityStore;
    use crate::services::FixedClock;
    use chrono::NaiveTime;
    use serde_json::{json, Value};

    fn fields(value: Value) -> RequestFields {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    fn service<E: Entity>() -> EntityService<E> {
        EntityService::<E>::new(Arc::new(InMemoryEntityStore::<E>::new()))
    }

    fn order_service(now_hour: u32) -> OrderService {
        let closing = NaiveTime::from_hms_opt(22, 0, 0).unwrap();
        let now = NaiveTime::from_hms_opt(now_hour, 0, 0).unwrap();
        OrderService::with_ordering_window(
            Arc::new(InMemoryEntityStore::<Order>::new()),
            OrderingWindow::new(closing, Arc::new(FixedClock(now))),
        )
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let meals = service::<Meal>();

        let created = meals
            .create(&fields(json!({"meal_item": "Pilau", "price": 150})))
            .await
            .unwrap();
        let fetched = meals.get(created.id).await.unwrap();

        assert_eq!(created, fetched);
        assert_eq!(fetched.entity.meal_item, "Pilau");
    }

    #[tokio::test]
    async fn test_duplicate_create_is_reported() {
        let menu = service::<MenuOption>();
        let body = fields(json!({"menu_option": "Ugali & Mboga", "price": 50}));
        menu.create(&body).await.unwrap();

        let err = menu.create(&body).await.unwrap_err();

        assert_eq!(err, ServiceError::DuplicateName { label: "menu option" });
        assert_eq!(menu.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_does_not_check_duplicates() {
        let meals = service::<Meal>();
        meals
            .create(&fields(json!({"meal_item": "Pilau", "price": 150})))
            .await
            .unwrap();
        let second = meals
            .create(&fields(json!({"meal_item": "Githeri", "price": 90})))
            .await
            .unwrap();

        let updated = meals
            .update(second.id, &fields(json!({"meal_item": "Pilau", "price": 95})))
            .await
            .unwrap();

        assert_eq!(updated.entity.meal_item, "Pilau");
        assert_eq!(meals.get(second.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() {
        let meals = service::<Meal>();
        let not_found = ServiceError::NotFound { label: "meal item" };

        assert_eq!(meals.get(4).await.unwrap_err(), not_found);
        assert_eq!(
            meals
                .update(4, &fields(json!({"meal_item": "Pilau", "price": 1})))
                .await
                .unwrap_err(),
            not_found
        );
        assert_eq!(meals.delete(4).await.unwrap_err(), not_found);
        assert_eq!(meals.len().await, 0);
    }

    #[tokio::test]
    async fn test_validation_runs_before_lookup() {
        let meals = service::<Meal>();

        let err = meals.update(4, &fields(json!({"meal_item": "Pilau"}))).await.unwrap_err();

        assert!(matches!(err, ServiceError::Validation { ref field, .. } if field == "price"));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let meals = service::<Meal>();
        let created = meals
            .create(&fields(json!({"meal_item": "Pilau", "price": 150})))
            .await
            .unwrap();

        meals.delete(created.id).await.unwrap();

        assert!(matches!(
            meals.get(created.id).await,
            Err(ServiceError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_orders_accepted_before_closing() {
        let orders = order_service(10);

        let created = orders
            .create(&fields(json!({"order_item": "Chips", "price": 80})))
            .await
            .unwrap();

        assert_eq!(created.id, 1);
    }

    #[tokio::test]
    async fn test_orders_refused_past_closing() {
        let orders = order_service(22);

        let err = orders
            .create(&fields(json!({"order_item": "Chips", "price": 80})))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ServiceError::PastClosing {
                action: OrderAction::Make,
                closing: "10PM".to_string(),
            }
        );
        assert_eq!(orders.len().await, 0);
    }

    #[tokio::test]
    async fn test_order_modification_refused_past_closing() {
        let orders = order_service(23);

        let err = orders
            .update(1, &fields(json!({"order_item": "Chips", "price": 80})))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::PastClosing {
                action: OrderAction::Modify,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_order_validation_runs_before_closing_check() {
        let orders = order_service(23);

        let err = orders
            .create(&fields(json!({"order_item": "Chips"})))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation { ref field, .. } if field == "price"));

        let err = orders
            .update(1, &fields(json!({"order_item": " ", "price": 80})))
            .await
            .unwrap_err();
        assert!(
            matches!(err, ServiceError::Validation { ref field, .. } if field == "order_item")
        );
    }

    #[tokio::test]
    async fn test_order_delete_allowed_past_closing() {
        let orders = order_service(23);

        let err = orders.delete(1).await.unwrap_err();

        assert_eq!(err, ServiceError::NotFound { label: "order item" });
    }
}

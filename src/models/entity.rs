use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt::Debug;

/// Shape shared by every resource the API stores: a named item with a price.
///
/// The associated constants drive routing, validation and the wording of
/// every message returned for the resource.
pub trait Entity:
    Debug + Clone + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Resource segment in URLs and metric labels, e.g. `meals`.
    const RESOURCE: &'static str;
    /// Request/response field holding the entity's name, e.g. `meal_item`.
    const NAME_FIELD: &'static str;
    /// Human label used in messages, e.g. `meal item`.
    const LABEL: &'static str;
    /// Help text returned when the name field is missing or blank.
    const NAME_HELP: &'static str;

    fn from_parts(name: String, price: f64) -> Self;

    fn name(&self) -> &str;

    fn price(&self) -> f64;
}

/// An entity together with the id the store assigned to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<E> {
    pub id: u64,
    #[serde(flatten)]
    pub entity: E,
}

impl<E: Entity> Record<E> {
    pub fn new(id: u64, entity: E) -> Self {
        Self { id, entity }
    }
}

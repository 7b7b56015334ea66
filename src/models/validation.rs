use serde_json::{Map, Value};

use super::{Entity, ServiceError, ServiceResult};

pub const PRICE_FIELD: &str = "price";
pub const PRICE_HELP: &str = "kindly provide a price(should be a valid number)";

/// Fields submitted with a create or update request, from either a JSON
/// object or a url-encoded form (form values arrive as strings).
pub type RequestFields = Map<String, Value>;

/// Build an entity from submitted fields.
///
/// The name field is checked before the price and only the first failure is
/// reported.
pub fn parse_entity<E: Entity>(fields: &RequestFields) -> ServiceResult<E> {
    let name = validate_name(fields.get(E::NAME_FIELD))
        .ok_or_else(|| ServiceError::validation(E::NAME_FIELD, E::NAME_HELP))?;
    let price = validate_price(fields.get(PRICE_FIELD))
        .ok_or_else(|| ServiceError::validation(PRICE_FIELD, PRICE_HELP))?;

    Ok(E::from_parts(name, price))
}

/// A name must be a string holding at least one non-whitespace character.
/// The value is kept as submitted.
pub fn validate_name(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(name)) if name.chars().any(|c| !c.is_whitespace()) => {
            Some(name.clone())
        }
        _ => None,
    }
}

/// A price is a JSON number or a string that parses as a finite float.
pub fn validate_price(value: Option<&Value>) -> Option<f64> {
    let price = match value? {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    price.is_finite().then_some(price)
}

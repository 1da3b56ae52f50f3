//! Database models for stored documents.

use diesel::prelude::*;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use unistock_core::errors::{Result, ValidationError};

/// Key the document body may carry that is never returned to callers.
const INTERNAL_ID_KEY: &str = "_id";

/// Insertable document; indexed columns are lifted out of the body.
#[derive(Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::documents)]
#[diesel(treat_none_as_default_value = false)]
pub struct NewDocumentDB {
    pub collection: String,
    pub code: String,
    pub source: Option<String>,
    pub trade_date: Option<String>,
    pub body: String,
}

fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl NewDocumentDB {
    /// Build a row from a JSON object. The object must carry a `code`.
    pub fn from_value(collection: &str, document: Value) -> Result<Self> {
        let Value::Object(mut object) = document else {
            return Err(ValidationError::InvalidInput(format!(
                "document for '{}' is not a JSON object",
                collection
            ))
            .into());
        };
        object.remove(INTERNAL_ID_KEY);

        let code = text_field(&object, "code").ok_or_else(|| {
            ValidationError::InvalidInput(format!("document for '{}' has no code", collection))
        })?;
        object.insert("code".to_string(), Value::String(code.clone()));

        Ok(Self {
            collection: collection.to_string(),
            code,
            source: text_field(&object, "source"),
            trade_date: text_field(&object, "trade_date"),
            body: serde_json::to_string(&Value::Object(object))?,
        })
    }
}

/// Decode a stored body, dropping the internal id.
pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    let mut value: Value = serde_json::from_str(body)?;
    if let Value::Object(object) = &mut value {
        object.remove(INTERNAL_ID_KEY);
    }
    Ok(serde_json::from_value(value)?)
}

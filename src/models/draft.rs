//! Untyped form data as submitted by an add/edit form.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{ShoeInput, ShoeRecord};

/// Raw key/value form data, not yet validated.
///
/// Values stay as JSON so numeric fields can arrive either as numbers or as the strings a
/// text input produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShoeDraft {
    fields: Map<String, Value>,
}

impl ShoeDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// Build from a JSON object. Returns `None` for any other JSON type.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<&ShoeInput> for ShoeDraft {
    fn from(input: &ShoeInput) -> Self {
        let draft = Self::new()
            .set("name", input.name.clone())
            .set("brand", input.brand.clone())
            .set("price", input.price.to_string())
            .set("size", input.size.to_string())
            .set("color", input.color.clone())
            .set("inStock", input.in_stock);

        match &input.photo_url {
            Some(url) => draft.set("photoUrl", url.clone()),
            None => draft,
        }
    }
}

/// Prefill for an edit form.
impl From<&ShoeRecord> for ShoeDraft {
    fn from(record: &ShoeRecord) -> Self {
        Self::from(&record.input())
    }
}

use aws_sdk_dynamodb::types::AttributeValue;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::HashMap;

use crate::store::StoreError;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub(crate) struct Item {
    pub(crate) id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) price: Option<Number>,
}

/// Body of a price-only partial update.
#[derive(Debug, Deserialize)]
pub(crate) struct PricePatch {
    pub(crate) price: Number,
}

/// An attribute that is absent or explicitly `NULL` counts as unset.
fn optional<'a>(attrs: &'a HashMap<String, AttributeValue>, name: &str) -> Option<&'a AttributeValue> {
    attrs.get(name).filter(|value| !value.is_null())
}

impl Item {
    pub(crate) fn into_attributes(self) -> HashMap<String, AttributeValue> {
        let mut attrs = HashMap::new();
        attrs.insert("id".to_string(), AttributeValue::S(self.id));
        if let Some(name) = self.name {
            attrs.insert("name".to_string(), AttributeValue::S(name));
        }
        if let Some(price) = self.price {
            attrs.insert("price".to_string(), AttributeValue::N(price.to_string()));
        }
        attrs
    }

    pub(crate) fn from_attributes(attrs: &HashMap<String, AttributeValue>) -> Result<Self, StoreError> {
        let id = attrs
            .get("id")
            .and_then(|v| v.as_s().ok())
            .cloned()
            .ok_or_else(|| StoreError::MalformedItem("missing id".to_string()))?;

        let name = match optional(attrs, "name") {
            Some(value) => Some(
                value
                    .as_s()
                    .map_err(|_| StoreError::MalformedItem(format!("item {} has a non-string name", id)))?
                    .clone(),
            ),
            None => None,
        };

        let price = match optional(attrs, "price") {
            Some(value) => {
                let n = value.as_n().map_err(|_| {
                    StoreError::MalformedItem(format!("item {} has a non-numeric price", id))
                })?;
                Some(n.parse::<Number>().map_err(|_| {
                    StoreError::MalformedItem(format!("item {} has a non-numeric price {:?}", id, n))
                })?)
            }
            None => None,
        };

        Ok(Item { id, name, price })
    }
}

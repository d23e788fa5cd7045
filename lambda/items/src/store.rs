use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use serde_json::Number;
use thiserror::Error;

use crate::item::Item;

pub(crate) type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    /// The table rejected the call or could not be reached.
    #[error("{0}")]
    Backend(String),

    /// A stored item could not be read back as an `Item`.
    #[error("Malformed item: {0}")]
    MalformedItem(String),
}

/// Keeps the service's own message for the caller; the raw response only goes to the log.
fn backend<E, R>(err: SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    tracing::warn!(error = %DisplayErrorContext(&err), "dynamodb request failed");

    let message = match err.message() {
        Some(message) => message.to_string(),
        None => error_chain(&err),
    };
    StoreError::Backend(message)
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Single-table key-value access, keyed by `id`.
#[trait_variant::make(ItemStore: Send)]
pub(crate) trait LocalItemStore {
    async fn get(&self, id: &str) -> StoreResult<Option<Item>>;

    /// Writes the whole item, replacing any existing one with the same id.
    async fn put(&self, item: Item) -> StoreResult<()>;

    async fn delete(&self, id: &str) -> StoreResult<()>;

    /// Sets `price` only and returns the full item as stored afterwards.
    async fn update_price(&self, id: &str, price: Number) -> StoreResult<Item>;

    /// Every item in the table, from a single unpaginated scan.
    async fn scan(&self) -> StoreResult<Vec<Item>>;
}

pub(crate) struct DynamoItemStore {
    client: Client,
    table: String,
}

impl DynamoItemStore {
    pub(crate) fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    fn key(id: &str) -> AttributeValue {
        AttributeValue::S(id.to_string())
    }
}

impl ItemStore for DynamoItemStore {
    async fn get(&self, id: &str) -> StoreResult<Option<Item>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table)
            .key("id", Self::key(id))
            .send()
            .await
            .map_err(backend)?;

        result.item.as_ref().map(Item::from_attributes).transpose()
    }

    async fn put(&self, item: Item) -> StoreResult<()> {
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(item.into_attributes()))
            .send()
            .await
            .map_err(backend)?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.client
            .delete_item()
            .table_name(&self.table)
            .key("id", Self::key(id))
            .send()
            .await
            .map_err(backend)?;

        Ok(())
    }

    async fn update_price(&self, id: &str, price: Number) -> StoreResult<Item> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table)
            .key("id", Self::key(id))
            .update_expression("SET price = :p")
            .expression_attribute_values(":p", AttributeValue::N(price.to_string()))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(backend)?;

        let attributes = result
            .attributes
            .ok_or_else(|| StoreError::MalformedItem(format!("no attributes returned for item {}", id)))?;
        Item::from_attributes(&attributes)
    }

    async fn scan(&self) -> StoreResult<Vec<Item>> {
        let result = self
            .client
            .scan()
            .table_name(&self.table)
            .send()
            .await
            .map_err(backend)?;

        result
            .items
            .unwrap_or_default()
            .iter()
            .map(Item::from_attributes)
            .collect()
    }
}

//! In-process `ItemStore` doubles for handler tests.

use serde_json::Number;
use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::item::Item;
use crate::store::{ItemStore, StoreError, StoreResult};

#[derive(Default)]
pub(crate) struct MemoryItemStore {
    items: Mutex<BTreeMap<String, Item>>,
}

impl MemoryItemStore {
    pub(crate) fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }
}

impl ItemStore for MemoryItemStore {
    async fn get(&self, id: &str) -> StoreResult<Option<Item>> {
        Ok(self.items.lock().unwrap().get(id).cloned())
    }

    async fn put(&self, item: Item) -> StoreResult<()> {
        self.items.lock().unwrap().insert(item.id.clone(), item);
        Ok(())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.items.lock().unwrap().remove(id);
        Ok(())
    }

    async fn update_price(&self, id: &str, price: Number) -> StoreResult<Item> {
        let mut items = self.items.lock().unwrap();
        // UpdateItem creates the item when the key is absent.
        let item = items.entry(id.to_string()).or_insert_with(|| Item {
            id: id.to_string(),
            name: None,
            price: None,
        });
        item.price = Some(price);
        Ok(item.clone())
    }

    async fn scan(&self) -> StoreResult<Vec<Item>> {
        Ok(self.items.lock().unwrap().values().cloned().collect())
    }
}

/// Fails every call the way an unreachable table would.
pub(crate) struct FailingItemStore;

impl FailingItemStore {
    fn fail<T>() -> StoreResult<T> {
        Err(StoreError::Backend("Requested resource not found".to_string()))
    }
}

impl ItemStore for FailingItemStore {
    async fn get(&self, _id: &str) -> StoreResult<Option<Item>> {
        Self::fail()
    }

    async fn put(&self, _item: Item) -> StoreResult<()> {
        Self::fail()
    }

    async fn delete(&self, _id: &str) -> StoreResult<()> {
        Self::fail()
    }

    async fn update_price(&self, _id: &str, _price: Number) -> StoreResult<Item> {
        Self::fail()
    }

    async fn scan(&self) -> StoreResult<Vec<Item>> {
        Self::fail()
    }
}

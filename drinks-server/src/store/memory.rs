use super::{StoreBackend, StoreError};
use crate::models::{Drink, Ingredient};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory drink store keyed by id.
///
/// A BTreeMap keeps iteration in id order, which doubles as creation
/// order since ids are assigned monotonically. Recipe replacement and
/// deletion happen under the write guard, so readers never observe a
/// drink with a partially replaced recipe.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<BTreeMap<i64, Drink>>>,
    next_id: Arc<AtomicI64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

#[async_trait]
impl StoreBackend for MemoryStore {
    async fn list(&self) -> Vec<Drink> {
        self.records.read().await.values().cloned().collect()
    }

    async fn create(&self, title: String, recipe: Vec<Ingredient>) -> Drink {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let drink = Drink { id, title, recipe };
        self.records.write().await.insert(id, drink.clone());
        drink
    }

    async fn replace(
        &self,
        id: i64,
        title: Option<String>,
        recipe: Option<Vec<Ingredient>>,
    ) -> Result<(Drink, Drink), StoreError> {
        let mut records = self.records.write().await;
        let drink = records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        let old = drink.clone();

        if let Some(title) = title {
            drink.title = title;
        }
        if let Some(recipe) = recipe {
            // Wholesale swap; old ingredients do not survive
            drink.recipe = recipe;
        }

        Ok((old, drink.clone()))
    }

    async fn delete(&self, id: i64) -> Result<i64, StoreError> {
        self.records
            .write()
            .await
            .remove(&id)
            .map(|drink| drink.id)
            .ok_or(StoreError::NotFound(id))
    }
}

use crate::config::DrinksConfig;
use crate::models::{Drink, Ingredient};
use thiserror::Error;

pub mod memory;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No drink with id {0}")]
    NotFound(i64),
}

/// Store trait defining the interface for all record store implementations.
///
/// The store is an opaque key-indexed collection of drink records. Each
/// operation commits on its own; there are no multi-operation transactions.
/// Implementations must be thread-safe (Send + Sync) and cloneable to
/// support sharing across handlers.
#[async_trait::async_trait]
pub trait StoreBackend: Send + Sync {
    /// All drinks in creation (id) order
    async fn list(&self) -> Vec<Drink>;

    /// Insert a new drink and assign it an id
    async fn create(&self, title: String, recipe: Vec<Ingredient>) -> Drink;

    /// Update the title and/or replace the full recipe of an existing drink.
    ///
    /// A new recipe replaces all prior ingredients wholesale, never merging
    /// with them. Returns the drink as it was before and after the update.
    async fn replace(
        &self,
        id: i64,
        title: Option<String>,
        recipe: Option<Vec<Ingredient>>,
    ) -> Result<(Drink, Drink), StoreError>;

    /// Remove a drink and its ingredients, returning the deleted id
    async fn delete(&self, id: i64) -> Result<i64, StoreError>;
}

/// Store implementation that provides a uniform interface regardless of
/// backend. The concrete implementation is chosen at process start.
#[derive(Clone)]
pub enum Store {
    /// In-memory record store
    Memory(memory::MemoryStore),
}

#[async_trait::async_trait]
impl StoreBackend for Store {
    async fn list(&self) -> Vec<Drink> {
        match self {
            Self::Memory(store) => store.list().await,
        }
    }

    async fn create(&self, title: String, recipe: Vec<Ingredient>) -> Drink {
        match self {
            Self::Memory(store) => store.create(title, recipe).await,
        }
    }

    async fn replace(
        &self,
        id: i64,
        title: Option<String>,
        recipe: Option<Vec<Ingredient>>,
    ) -> Result<(Drink, Drink), StoreError> {
        match self {
            Self::Memory(store) => store.replace(id, title, recipe).await,
        }
    }

    async fn delete(&self, id: i64) -> Result<i64, StoreError> {
        match self {
            Self::Memory(store) => store.delete(id).await,
        }
    }
}

/// Factory function creating the store implementation for this process.
pub fn create_store(_config: &DrinksConfig) -> Store {
    Store::Memory(memory::MemoryStore::new())
}

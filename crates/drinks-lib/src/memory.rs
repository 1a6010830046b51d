//! In-process catalog store.
//!
//! Items are kept in insertion order, which plays the role of the document
//! store's natural order. Used for fixtures and handler tests.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::model::{DrinkRecord, ExpandedDrink, Ingredient};
use crate::page::Page;
use crate::store::CatalogStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    ingredients: RwLock<Vec<Ingredient>>,
    drinks: RwLock<Vec<DrinkRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an ingredient.
    pub fn insert_ingredient(&self, ingredient: Ingredient) {
        debug!(id = %ingredient.id, "inserting ingredient");
        write(&self.ingredients).push(ingredient);
    }

    /// Append a drink after checking its recipe invariant.
    pub fn insert_drink(&self, drink: DrinkRecord) -> Result<()> {
        drink.validate()?;
        debug!(id = %drink.id, lines = drink.ingredients.len(), "inserting drink");
        write(&self.drinks).push(drink);
        Ok(())
    }

    pub fn drink_count(&self) -> usize {
        read(&self.drinks).len()
    }

    pub fn ingredient_count(&self) -> usize {
        read(&self.ingredients).len()
    }
}

// Poisoning is ignored: writers only ever push whole items.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn find_drinks(&self, page: Page) -> Result<Vec<DrinkRecord>> {
        Ok(page.slice(read(&self.drinks).as_slice()).to_vec())
    }

    async fn find_drink_by_id(&self, id: &str) -> Result<Option<ExpandedDrink>> {
        let Some(drink) = read(&self.drinks).iter().find(|d| d.id == id).cloned() else {
            return Ok(None);
        };
        let ingredients = read(&self.ingredients);
        Ok(Some(drink.expand(|key| {
            ingredients.iter().find(|i| i.key == *key).cloned()
        })))
    }

    async fn find_ingredients(&self, page: Page) -> Result<Vec<Ingredient>> {
        Ok(page.slice(read(&self.ingredients).as_slice()).to_vec())
    }

    async fn find_ingredient_by_id(&self, id: &str) -> Result<Option<Ingredient>> {
        Ok(read(&self.ingredients).iter().find(|i| i.id == id).cloned())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn shutdown(&self) {}
}

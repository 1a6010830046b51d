//! Read-only access to the catalog collections.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{DrinkRecord, ExpandedDrink, Ingredient};
use crate::page::Page;

/// Typed accessors over the drink and ingredient collections.
///
/// Lookups match the slug `id`, never the storage key. Only
/// [`CatalogStore::find_drink_by_id`] resolves ingredient references; list
/// queries return them as stored.
#[async_trait]
pub trait CatalogStore: Send + Sync + std::fmt::Debug {
    /// Drinks in natural storage order, windowed by `page`.
    async fn find_drinks(&self, page: Page) -> Result<Vec<DrinkRecord>>;

    /// The drink with slug `id`, with its recipe joined against the ingredients.
    async fn find_drink_by_id(&self, id: &str) -> Result<Option<ExpandedDrink>>;

    /// Ingredients in natural storage order, windowed by `page`.
    async fn find_ingredients(&self, page: Page) -> Result<Vec<Ingredient>>;

    /// The ingredient with slug `id`.
    async fn find_ingredient_by_id(&self, id: &str) -> Result<Option<Ingredient>>;

    /// Round-trip to the store without touching any collection.
    async fn ping(&self) -> Result<()>;

    /// Release connections. Further calls may fail.
    async fn shutdown(&self);
}

//! drinks.wiki catalog library.
//!
//! This crate owns the catalog entities ([`Drink`], [`Ingredient`]), the
//! pagination window ([`Page`]) and read-only access to the document store via
//! the [`CatalogStore`] trait. Two stores are provided: [`MongoStore`] for
//! production and [`MemoryStore`] for fixtures and tests. HTTP concerns live
//! in the service crates.

#![deny(warnings)]

pub mod error;
pub mod memory;
pub mod model;
pub mod mongo;
pub mod page;
pub mod store;

pub use bson::oid::ObjectId;
pub use error::{Error, Result};
pub use memory::MemoryStore;
pub use model::{Drink, DrinkIngredient, DrinkRecord, ExpandedDrink, Ingredient, Timestamps};
pub use mongo::{MongoStore, DEFAULT_MONGO_URL};
pub use page::{Page, DEFAULT_LIMIT, MAX_LIMIT};
pub use store::CatalogStore;

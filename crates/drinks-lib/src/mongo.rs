//! MongoDB-backed catalog store.
//!
//! Collections and field names match the existing drinks.wiki dataset:
//!
//! | Collection    | Fields                                                        |
//! |---------------|---------------------------------------------------------------|
//! | `ingredients` | `_id`, `id`, `name`, `imageUrl`, `createdAt`, `updatedAt`     |
//! | `drinks`      | `_id`, `id`, `name`, `tags`, `ingredients[]`, `imageUrl`, ... |
//!
//! Each `drinks.ingredients[]` entry holds `ingredient` (an `ObjectId` into
//! `ingredients`), `amount` and `amountUnit`.

use std::collections::HashMap;

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, DateTime as BsonDateTime};
use futures::TryStreamExt;
use mongodb::{Client, Collection, Database, IndexModel};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::model::{Drink, DrinkIngredient, DrinkRecord, ExpandedDrink, Ingredient, Timestamps};
use crate::page::Page;
use crate::store::CatalogStore;

/// Connection string used when none is configured.
pub const DEFAULT_MONGO_URL: &str = "mongodb://localhost/drinks";

/// Database used when the connection string does not name one.
pub const DEFAULT_DATABASE: &str = "drinks";

pub const DRINKS_COLLECTION: &str = "drinks";
pub const INGREDIENTS_COLLECTION: &str = "ingredients";

/// Catalog store over a MongoDB database.
///
/// Cloning is cheap; clones share the driver's connection pool.
#[derive(Debug, Clone)]
pub struct MongoStore {
    client: Client,
    database: Database,
    drinks: Collection<DrinkDocument>,
    ingredients: Collection<IngredientDocument>,
}

impl MongoStore {
    /// Parse `url` and set up the driver's pool.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first query (or [`CatalogStore::ping`]) rather than here.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = Client::with_uri_str(url).await?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));
        info!(database = %database.name(), "document store client created");
        Ok(Self::from_database(client, database))
    }

    /// Wrap an existing client and database.
    pub fn from_database(client: Client, database: Database) -> Self {
        Self {
            drinks: database.collection(DRINKS_COLLECTION),
            ingredients: database.collection(INGREDIENTS_COLLECTION),
            client,
            database,
        }
    }

    pub fn database_name(&self) -> &str {
        self.database.name()
    }

    /// Declare the (non-unique) slug index on both collections.
    pub async fn ensure_indexes(&self) -> Result<()> {
        let index = || IndexModel::builder().keys(doc! { "id": 1 }).build();
        self.drinks.create_index(index()).await?;
        self.ingredients.create_index(index()).await?;
        debug!("slug indexes ensured");
        Ok(())
    }

    async fn ingredients_by_key(
        &self,
        keys: Vec<ObjectId>,
    ) -> Result<HashMap<ObjectId, Ingredient>> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }
        let found: Vec<IngredientDocument> = self
            .ingredients
            .find(doc! { "_id": { "$in": keys } })
            .await?
            .try_collect()
            .await?;
        Ok(found
            .into_iter()
            .map(Ingredient::from)
            .map(|ingredient| (ingredient.key, ingredient))
            .collect())
    }
}

#[async_trait]
impl CatalogStore for MongoStore {
    async fn find_drinks(&self, page: Page) -> Result<Vec<DrinkRecord>> {
        let docs: Vec<DrinkDocument> = self
            .drinks
            .find(doc! {})
            .skip(page.skip())
            .limit(i64::from(page.limit()))
            .await?
            .try_collect()
            .await?;
        Ok(docs.into_iter().map(DrinkRecord::from).collect())
    }

    async fn find_drink_by_id(&self, id: &str) -> Result<Option<ExpandedDrink>> {
        let Some(doc) = self.drinks.find_one(doc! { "id": id }).await? else {
            return Ok(None);
        };
        let record = DrinkRecord::from(doc);
        let resolved = self.ingredients_by_key(record.ingredient_keys()).await?;
        debug!(id, resolved = resolved.len(), "expanded drink ingredients");
        Ok(Some(record.expand(|key| resolved.get(key).cloned())))
    }

    async fn find_ingredients(&self, page: Page) -> Result<Vec<Ingredient>> {
        let docs: Vec<IngredientDocument> = self
            .ingredients
            .find(doc! {})
            .skip(page.skip())
            .limit(i64::from(page.limit()))
            .await?
            .try_collect()
            .await?;
        Ok(docs.into_iter().map(Ingredient::from).collect())
    }

    async fn find_ingredient_by_id(&self, id: &str) -> Result<Option<Ingredient>> {
        Ok(self
            .ingredients
            .find_one(doc! { "id": id })
            .await?
            .map(Ingredient::from))
    }

    async fn ping(&self) -> Result<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn shutdown(&self) {
        info!("shutting down document store client");
        self.client.clone().shutdown().await;
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IngredientDocument {
    #[serde(rename = "_id")]
    key: ObjectId,
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    image_url: Option<String>,
    created_at: Option<BsonDateTime>,
    updated_at: Option<BsonDateTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DrinkDocument {
    #[serde(rename = "_id")]
    key: ObjectId,
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    ingredients: Vec<DrinkIngredientDocument>,
    image_url: Option<String>,
    created_at: Option<BsonDateTime>,
    updated_at: Option<BsonDateTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DrinkIngredientDocument {
    ingredient: Option<ObjectId>,
    amount: Option<f64>,
    amount_unit: Option<String>,
}

fn timestamps(created_at: Option<BsonDateTime>, updated_at: Option<BsonDateTime>) -> Timestamps {
    Timestamps {
        created_at: created_at.map(BsonDateTime::to_chrono),
        updated_at: updated_at.map(BsonDateTime::to_chrono),
    }
}

impl From<IngredientDocument> for Ingredient {
    fn from(doc: IngredientDocument) -> Self {
        Self {
            key: doc.key,
            id: doc.id,
            name: doc.name,
            image_url: doc.image_url,
            timestamps: timestamps(doc.created_at, doc.updated_at),
        }
    }
}

impl From<DrinkDocument> for DrinkRecord {
    fn from(doc: DrinkDocument) -> Self {
        Drink {
            key: doc.key,
            id: doc.id,
            name: doc.name,
            tags: doc.tags,
            ingredients: doc
                .ingredients
                .into_iter()
                .map(|line| DrinkIngredient {
                    ingredient: line.ingredient,
                    amount: line.amount,
                    amount_unit: line.amount_unit,
                })
                .collect(),
            image_url: doc.image_url,
            timestamps: timestamps(doc.created_at, doc.updated_at),
        }
    }
}

//! Catalog entities.
//!
//! Entities are storage-agnostic: [`crate::mongo`] decodes documents into
//! these types and [`crate::memory`] stores them directly. A [`Drink`] is
//! generic over how its ingredient references are represented so that the
//! unexpanded list form and the expanded detail form are distinct types.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

/// Creation and update instants maintained by the storage layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timestamps {
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A component of one or more drinks.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    /// Storage-assigned primary key.
    pub key: ObjectId,
    /// Externally-assigned slug, e.g. `blue-curacau`.
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub timestamps: Timestamps,
}

impl Ingredient {
    /// Create an ingredient with a fresh storage key and no timestamps.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: ObjectId::new(),
            id: id.into(),
            name: name.into(),
            image_url: None,
            timestamps: Timestamps::default(),
        }
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

/// One line of a drink's recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct DrinkIngredient<R> {
    pub ingredient: R,
    /// Quantity of `amount_unit`; never negative.
    pub amount: Option<f64>,
    pub amount_unit: Option<String>,
}

impl<R> DrinkIngredient<R> {
    /// Replace the ingredient reference, keeping amount and unit.
    pub fn map_ingredient<T>(self, f: impl FnOnce(R) -> T) -> DrinkIngredient<T> {
        DrinkIngredient {
            ingredient: f(self.ingredient),
            amount: self.amount,
            amount_unit: self.amount_unit,
        }
    }
}

/// A cocktail and its recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct Drink<R> {
    /// Storage-assigned primary key.
    pub key: ObjectId,
    /// Externally-assigned slug, e.g. `blue-kamikaze`.
    pub id: String,
    pub name: String,
    pub tags: Vec<String>,
    pub ingredients: Vec<DrinkIngredient<R>>,
    pub image_url: Option<String>,
    pub timestamps: Timestamps,
}

/// A drink whose ingredient references have not been resolved.
pub type DrinkRecord = Drink<Option<ObjectId>>;

/// A drink whose ingredient references have been joined against the
/// ingredient collection. Dangling references resolve to `None`.
pub type ExpandedDrink = Drink<Option<Ingredient>>;

impl DrinkRecord {
    /// Create a drink with a fresh storage key and an empty recipe.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: ObjectId::new(),
            id: id.into(),
            name: name.into(),
            tags: Vec::new(),
            ingredients: Vec::new(),
            image_url: None,
            timestamps: Timestamps::default(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Append a recipe line referencing `ingredient` by storage key.
    pub fn with_ingredient(
        mut self,
        ingredient: &Ingredient,
        amount: f64,
        amount_unit: impl Into<String>,
    ) -> Self {
        self.ingredients.push(DrinkIngredient {
            ingredient: Some(ingredient.key),
            amount: Some(amount),
            amount_unit: Some(amount_unit.into()),
        });
        self
    }

    /// Storage keys referenced by the recipe, in recipe order, without duplicates.
    pub fn ingredient_keys(&self) -> Vec<ObjectId> {
        let mut keys: Vec<ObjectId> = Vec::with_capacity(self.ingredients.len());
        for key in self.ingredients.iter().filter_map(|line| line.ingredient) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }

    /// Resolve every reference through `lookup`.
    pub fn expand(self, mut lookup: impl FnMut(&ObjectId) -> Option<Ingredient>) -> ExpandedDrink {
        Drink {
            key: self.key,
            id: self.id,
            name: self.name,
            tags: self.tags,
            ingredients: self
                .ingredients
                .into_iter()
                .map(|line| line.map_ingredient(|key| key.as_ref().and_then(&mut lookup)))
                .collect(),
            image_url: self.image_url,
            timestamps: self.timestamps,
        }
    }

    /// Check the recipe invariant: every present amount is a non-negative number.
    pub fn validate(&self) -> Result<()> {
        for line in &self.ingredients {
            if let Some(amount) = line.amount {
                if amount.is_nan() || amount < 0.0 {
                    return Err(Error::InvalidRecord {
                        message: format!(
                            "drink '{}' has ingredient amount {} (must be non-negative)",
                            self.id, amount
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}

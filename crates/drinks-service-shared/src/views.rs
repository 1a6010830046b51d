//! JSON projections of the catalog entities.
//!
//! `Ingredient` is the canonical ingredient shape used everywhere. Drinks have
//! one canonical field set, [`DrinkSummary`]; the detail view [`DrinkView`]
//! flattens the summary and adds the expanded recipe, so the two schemas never
//! drift apart. Storage keys and timestamps are not exposed.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use drinks_lib::{Drink, DrinkIngredient, ExpandedDrink, Ingredient};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = Ingredient)]
pub struct IngredientView {
    #[schema(example = "blue-curacau")]
    pub id: String,

    #[schema(example = "Blue Curaçau")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(format = "url")]
    pub image_url: Option<String>,
}

impl From<Ingredient> for IngredientView {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
            image_url: ingredient.image_url,
        }
    }
}

/// List projection of a drink: everything except the recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = Drinks)]
pub struct DrinkSummary {
    #[schema(example = "blue-kamikaze")]
    pub id: String,

    #[schema(example = "Blue Kamikaze")]
    pub name: String,

    #[schema(example = json!(["shot"]))]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(format = "url")]
    pub image_url: Option<String>,
}

impl<R> From<&Drink<R>> for DrinkSummary {
    fn from(drink: &Drink<R>) -> Self {
        Self {
            id: drink.id.clone(),
            name: drink.name.clone(),
            tags: drink.tags.clone(),
            image_url: drink.image_url.clone(),
        }
    }
}

/// One recipe line with its ingredient resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrinkIngredientView {
    /// `null` when the referenced ingredient no longer exists.
    pub ingredient: Option<IngredientView>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 1, minimum = 0)]
    pub amount: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "part")]
    pub amount_unit: Option<String>,
}

impl From<DrinkIngredient<Option<Ingredient>>> for DrinkIngredientView {
    fn from(line: DrinkIngredient<Option<Ingredient>>) -> Self {
        Self {
            ingredient: line.ingredient.map(IngredientView::from),
            amount: line.amount,
            amount_unit: line.amount_unit,
        }
    }
}

/// Detail projection of a drink, with the recipe expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(as = Drink)]
pub struct DrinkView {
    #[serde(flatten)]
    pub summary: DrinkSummary,

    pub ingredients: Vec<DrinkIngredientView>,
}

impl From<ExpandedDrink> for DrinkView {
    fn from(drink: ExpandedDrink) -> Self {
        let summary = DrinkSummary::from(&drink);
        Self {
            summary,
            ingredients: drink
                .ingredients
                .into_iter()
                .map(DrinkIngredientView::from)
                .collect(),
        }
    }
}

/// `GET /drinks` body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DrinksResponse {
    pub drinks: Vec<DrinkSummary>,
}

/// `GET /drinks/{id}` body. `drink` is `null` when nothing matched.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DrinkResponse {
    pub drink: Option<DrinkView>,
}

/// `GET /ingredients` body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IngredientsResponse {
    pub ingredients: Vec<IngredientView>,
}

/// `GET /ingredient/{id}` body. `ingredient` is `null` when nothing matched.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IngredientResponse {
    pub ingredient: Option<IngredientView>,
}

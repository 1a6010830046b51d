//! Test utilities for handler testing.
//!
//! Provides an in-memory catalog seeded with a handful of known drinks and
//! ingredients, so handler tests run without a document store.

use std::sync::Arc;

use drinks_lib::{DrinkRecord, Ingredient, MemoryStore};

use crate::state::AppState;

/// Known slugs in the fixture catalog.
pub mod fixture_slugs {
    pub const BLUE_CURACAU: &str = "blue-curacau";
    pub const VODKA: &str = "vodka";
    pub const LIME_JUICE: &str = "lime-juice";
    pub const TRIPLE_SEC: &str = "triple-sec";
    pub const ORANGE_JUICE: &str = "orange-juice";

    pub const BLUE_KAMIKAZE: &str = "blue-kamikaze";
    pub const KAMIKAZE: &str = "kamikaze";
    pub const SCREWDRIVER: &str = "screwdriver";
    /// References an ingredient that is not in the catalog.
    pub const GHOST_SOUR: &str = "ghost-sour";
}

/// Number of fixture ingredients.
pub const FIXTURE_INGREDIENTS: usize = 5;

/// Number of fixture drinks.
pub const FIXTURE_DRINKS: usize = 4;

/// Build a fresh fixture catalog. Insertion order is the natural order.
pub fn fixture_store() -> MemoryStore {
    use fixture_slugs::*;

    let store = MemoryStore::new();

    let blue_curacau = Ingredient::new(BLUE_CURACAU, "Blue Curaçau")
        .with_image_url("https://images.drinks.wiki/ingredients/blue-curacau.png");
    let vodka = Ingredient::new(VODKA, "Vodka");
    let lime = Ingredient::new(LIME_JUICE, "Lime Juice");
    let triple_sec = Ingredient::new(TRIPLE_SEC, "Triple Sec");
    let orange = Ingredient::new(ORANGE_JUICE, "Orange Juice");
    let missing = Ingredient::new("ghost", "Ghost");

    for ingredient in [&blue_curacau, &vodka, &lime, &triple_sec, &orange] {
        store.insert_ingredient(ingredient.clone());
    }

    let drinks = [
        DrinkRecord::new(BLUE_KAMIKAZE, "Blue Kamikaze")
            .with_tag("shot")
            .with_tag("blue")
            .with_ingredient(&vodka, 1.0, "part")
            .with_ingredient(&blue_curacau, 1.0, "part")
            .with_ingredient(&lime, 1.0, "part")
            .with_image_url("https://images.drinks.wiki/drinks/blue-kamikaze.png"),
        DrinkRecord::new(KAMIKAZE, "Kamikaze")
            .with_tag("shot")
            .with_ingredient(&vodka, 1.0, "part")
            .with_ingredient(&triple_sec, 1.0, "part")
            .with_ingredient(&lime, 1.0, "part"),
        DrinkRecord::new(SCREWDRIVER, "Screwdriver")
            .with_tag("long")
            .with_ingredient(&vodka, 5.0, "cl")
            .with_ingredient(&orange, 10.0, "cl"),
        DrinkRecord::new(GHOST_SOUR, "Ghost Sour")
            .with_ingredient(&missing, 2.0, "oz")
            .with_ingredient(&lime, 1.0, "oz"),
    ];
    for drink in drinks {
        store
            .insert_drink(drink)
            .unwrap_or_else(|e| panic!("fixture drink rejected: {}", e));
    }

    store
}

/// An [`AppState`] over a fresh fixture catalog.
pub fn test_state() -> AppState {
    AppState::from_store(Arc::new(fixture_store()))
}

/// Generate a unique request ID for testing.
pub fn test_request_id() -> String {
    format!("test-{}", uuid::Uuid::now_v7())
}

#[cfg(test)]
mod tests {
    use super::*;
    use drinks_lib::{CatalogStore, Page};

    #[test]
    fn test_fixture_counts() {
        let store = fixture_store();
        assert_eq!(store.ingredient_count(), FIXTURE_INGREDIENTS);
        assert_eq!(store.drink_count(), FIXTURE_DRINKS);
    }

    #[tokio::test]
    async fn test_fixture_ghost_sour_has_dangling_reference() {
        let state = test_state();
        let drink = state
            .store()
            .find_drink_by_id(fixture_slugs::GHOST_SOUR)
            .await
            .unwrap()
            .unwrap();
        assert!(drink.ingredients[0].ingredient.is_none());
        assert!(drink.ingredients[1].ingredient.is_some());
    }

    #[tokio::test]
    async fn test_fixture_natural_order() {
        let drinks = fixture_store().find_drinks(Page::default()).await.unwrap();
        let ids: Vec<_> = drinks.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                fixture_slugs::BLUE_KAMIKAZE,
                fixture_slugs::KAMIKAZE,
                fixture_slugs::SCREWDRIVER,
                fixture_slugs::GHOST_SOUR,
            ]
        );
    }

    #[test]
    fn test_request_id_unique() {
        assert_ne!(test_request_id(), test_request_id());
    }
}

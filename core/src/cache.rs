use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::models::Recipe;
use crate::samples::sample_recipes;

#[derive(Default)]
struct Entries {
    order: Vec<i64>,
    by_id: HashMap<i64, Recipe>,
}

/// In-memory recipe store keyed by id.
///
/// Iteration follows first-insertion order; overwriting a record keeps its
/// position. Writes replace the whole record, so concurrent writers for the
/// same id resolve to the last full write.
#[derive(Default)]
pub struct RecipeCache {
    entries: Mutex<Entries>,
}

impl RecipeCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache pre-populated with the built-in sample recipes.
    #[must_use]
    pub fn seeded() -> Self {
        let cache = Self::new();
        cache.put_many(sample_recipes());
        cache
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn get(&self, id: i64) -> Option<Recipe> {
        self.lock().by_id.get(&id).cloned()
    }

    #[must_use]
    pub fn get_all(&self) -> Vec<Recipe> {
        let entries = self.lock();
        entries
            .order
            .iter()
            .filter_map(|id| entries.by_id.get(id).cloned())
            .collect()
    }

    pub fn put(&self, recipe: Recipe) -> Recipe {
        let mut entries = self.lock();
        if !entries.by_id.contains_key(&recipe.id) {
            entries.order.push(recipe.id);
        }
        entries.by_id.insert(recipe.id, recipe.clone());
        recipe
    }

    pub fn put_many(&self, recipes: impl IntoIterator<Item = Recipe>) -> Vec<Recipe> {
        recipes.into_iter().map(|r| self.put(r)).collect()
    }

    /// Case-insensitive substring search over title, summary, cuisines and
    /// dish types. A missing or blank query returns everything.
    #[must_use]
    pub fn search(&self, query: Option<&str>) -> Vec<Recipe> {
        let Some(needle) = query.filter(|q| !q.trim().is_empty()) else {
            return self.get_all();
        };
        let needle = needle.to_lowercase();

        let entries = self.lock();
        entries
            .order
            .iter()
            .filter_map(|id| entries.by_id.get(id))
            .filter(|r| r.matches(&needle))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, InstructionStep};

    fn recipe(id: i64, title: &str) -> Recipe {
        Recipe::new(id, title)
    }

    fn ids(recipes: &[Recipe]) -> Vec<i64> {
        recipes.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_put_then_get_returns_equal_record() {
        let cache = RecipeCache::new();
        let mut r = recipe(10, "Pad Thai");
        r.servings = Some(2);
        r.ingredients = vec![Ingredient {
            id: 1,
            name: "rice noodles".to_string(),
            amount: 200.0,
            unit: "g".to_string(),
            original: "200g rice noodles".to_string(),
        }];
        r.instructions = vec![InstructionStep {
            number: 1,
            step: "Soak the noodles.".to_string(),
        }];

        let stored = cache.put(r.clone());
        assert_eq!(stored, r);
        assert_eq!(cache.get(10), Some(r));
        assert!(cache.get(11).is_none());
    }

    #[test]
    fn test_sparse_record_gets_defaults() {
        let cache = RecipeCache::new();
        let sparse: Recipe = serde_json::from_str(r#"{"id": 3, "title": "Soup"}"#).unwrap();
        cache.put(sparse);
        let got = cache.get(3).unwrap();
        assert!(got.cuisines.is_empty());
        assert!(got.dish_types.is_empty());
        assert!(got.diets.is_empty());
        assert!(got.ingredients.is_empty());
        assert!(got.instructions.is_empty());
        assert!(got.image.is_none());
        assert!(got.health_score.is_none());
    }

    #[test]
    fn test_put_is_idempotent() {
        let once = RecipeCache::new();
        once.put(recipe(1, "Ramen"));

        let twice = RecipeCache::new();
        twice.put(recipe(1, "Ramen"));
        twice.put(recipe(1, "Ramen"));

        assert_eq!(once.get_all(), twice.get_all());
        assert_eq!(twice.len(), 1);
    }

    #[test]
    fn test_overwrite_replaces_record_in_place() {
        let cache = RecipeCache::new();
        cache.put_many([recipe(1, "A"), recipe(2, "B"), recipe(3, "C")]);
        cache.put(recipe(2, "B2"));

        let all = cache.get_all();
        assert_eq!(ids(&all), vec![1, 2, 3]);
        assert_eq!(all[1].title, "B2");
    }

    #[test]
    fn test_put_many_preserves_input_order() {
        let cache = RecipeCache::new();
        let stored = cache.put_many([recipe(9, "Z"), recipe(4, "Y"), recipe(7, "X")]);
        assert_eq!(ids(&stored), vec![9, 4, 7]);
    }

    #[test]
    fn test_search_without_query_returns_everything() {
        let cache = RecipeCache::new();
        cache.put_many([recipe(5, "E"), recipe(1, "A"), recipe(3, "C")]);

        let mut found = ids(&cache.search(None));
        found.sort_unstable();
        assert_eq!(found, vec![1, 3, 5]);
        assert_eq!(cache.search(Some("  ")).len(), 3);
    }

    #[test]
    fn test_search_matches_fields_case_insensitively() {
        let cache = RecipeCache::seeded();

        assert_eq!(ids(&cache.search(Some("CARBONARA"))), vec![1]);
        // cuisine tag
        assert_eq!(ids(&cache.search(Some("american"))), vec![2, 3]);
        // dish type
        assert_eq!(ids(&cache.search(Some("Dessert"))), vec![3]);
        // summary text
        assert_eq!(ids(&cache.search(Some("poached egg"))), vec![2]);
        assert!(cache.search(Some("sushi")).is_empty());
    }

    #[test]
    fn test_seeded_cache_has_samples() {
        let cache = RecipeCache::seeded();
        assert_eq!(cache.len(), 3);
        assert_eq!(ids(&cache.get_all()), vec![1, 2, 3]);
        assert!(RecipeCache::new().is_empty());
    }
}

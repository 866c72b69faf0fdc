use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::RecipeError;

pub const DEFAULT_PAGE_SIZE: u32 = 12;
pub const MAX_PAGE_SIZE: u32 = 100;

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// A normalized recipe record.
///
/// List fields default to empty and scalar fields to `None` when absent from
/// JSON input, so every stored record carries the same shape regardless of
/// where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub health_score: Option<f64>,
    /// Price in cents.
    #[serde(default)]
    pub price_per_serving: Option<f64>,
    #[serde(default)]
    pub spoonacular_score: Option<f64>,
    #[serde(default)]
    pub aggregate_likes: Option<u32>,
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(default)]
    pub dish_types: Vec<String>,
    #[serde(default)]
    pub diets: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<InstructionStep>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub spoonacular_source_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub amount: f64,
    pub unit: String,
    pub original: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionStep {
    pub number: u32,
    pub step: String,
}

impl Recipe {
    /// A record with only the required fields set.
    #[must_use]
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            summary: None,
            image: None,
            ready_in_minutes: None,
            servings: None,
            health_score: None,
            price_per_serving: None,
            spoonacular_score: None,
            aggregate_likes: None,
            cuisines: Vec::new(),
            dish_types: Vec::new(),
            diets: Vec::new(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            source_url: None,
            spoonacular_source_url: None,
        }
    }

    /// Display category: the first dish type.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.dish_types.first().map(String::as_str)
    }

    /// Summary with HTML markup removed.
    #[must_use]
    pub fn plain_summary(&self) -> Option<String> {
        self.summary
            .as_deref()
            .map(|s| HTML_TAG.replace_all(s, "").trim().to_string())
    }

    /// Price per serving in dollars, e.g. `$3.50`.
    #[must_use]
    pub fn price_display(&self) -> Option<String> {
        self.price_per_serving
            .map(|cents| format!("${:.2}", cents / 100.0))
    }

    /// Score on a 0-5 scale, rounded to one decimal.
    #[must_use]
    pub fn star_rating(&self) -> Option<f64> {
        self.spoonacular_score
            .map(|score| (score / 20.0 * 10.0).round() / 10.0)
    }

    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .summary
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(needle))
            || self
                .cuisines
                .iter()
                .any(|c| c.to_lowercase().contains(needle))
            || self
                .dish_types
                .iter()
                .any(|t| t.to_lowercase().contains(needle))
    }
}

/// Validated search parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: Option<String>,
    pub cuisine: Option<String>,
    pub diet: Option<String>,
    pub dish_type: Option<String>,
    pub number: u32,
    pub offset: u32,
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            query: None,
            cuisine: None,
            diet: None,
            dish_type: None,
            number: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

impl SearchRequest {
    #[must_use]
    pub fn with_query(mut self, query: Option<&str>) -> Self {
        self.query = non_blank(query);
        self
    }

    #[must_use]
    pub fn with_cuisine(mut self, cuisine: Option<&str>) -> Self {
        self.cuisine = non_blank(cuisine);
        self
    }

    #[must_use]
    pub fn with_diet(mut self, diet: Option<&str>) -> Self {
        self.diet = non_blank(diet);
        self
    }

    #[must_use]
    pub fn with_dish_type(mut self, dish_type: Option<&str>) -> Self {
        self.dish_type = non_blank(dish_type);
        self
    }

    pub fn with_page(mut self, number: u32, offset: u32) -> Result<Self, RecipeError> {
        validate_page_size(number)?;
        self.number = number;
        self.offset = offset;
        Ok(self)
    }

    /// True when no free-text query and no filter is set.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.query.is_none()
            && self.cuisine.is_none()
            && self.diet.is_none()
            && self.dish_type.is_none()
    }
}

/// One page of search results, as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub results: Vec<Recipe>,
    pub total_results: u32,
    pub offset: u32,
    pub number: u32,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn validate_page_size(number: u32) -> Result<(), RecipeError> {
    if number == 0 || number > MAX_PAGE_SIZE {
        return Err(RecipeError::Validation(format!(
            "number must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    Ok(())
}

/// Parse an optional numeric query parameter, falling back to `default`
/// when it is absent or blank.
pub fn parse_page_param(name: &str, value: Option<&str>, default: u32) -> Result<u32, RecipeError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(raw) => raw.parse::<u32>().map_err(|_| {
            RecipeError::Validation(format!(
                "Invalid {name} '{raw}'. Must be a non-negative integer"
            ))
        }),
    }
}

/// Parse a recipe id from a path segment.
pub fn parse_recipe_id(raw: &str) -> Result<i64, RecipeError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| RecipeError::Validation("Invalid recipe ID".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carbonara() -> Recipe {
        let mut r = Recipe::new(1, "Classic Spaghetti Carbonara");
        r.summary = Some("A <b>traditional</b> Italian pasta dish.".to_string());
        r.price_per_serving = Some(350.0);
        r.spoonacular_score = Some(85.0);
        r.dish_types = vec!["dinner".to_string(), "main course".to_string()];
        r
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let r: Recipe = serde_json::from_str(r#"{"id": 7, "title": "Toast"}"#).unwrap();
        assert_eq!(r, Recipe::new(7, "Toast"));
        assert!(r.cuisines.is_empty());
        assert!(r.instructions.is_empty());
        assert!(r.summary.is_none());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(carbonara()).unwrap();
        assert_eq!(json["pricePerServing"], 350.0);
        assert_eq!(json["dishTypes"][0], "dinner");
        assert!(json["readyInMinutes"].is_null());
        assert!(json.get("spoonacularSourceUrl").is_some());
    }

    #[test]
    fn test_presentation_helpers() {
        let r = carbonara();
        assert_eq!(r.category(), Some("dinner"));
        assert_eq!(
            r.plain_summary().as_deref(),
            Some("A traditional Italian pasta dish.")
        );
        assert_eq!(r.price_display().as_deref(), Some("$3.50"));
        assert_eq!(r.star_rating(), Some(4.3));

        let bare = Recipe::new(2, "Plain");
        assert!(bare.category().is_none());
        assert!(bare.price_display().is_none());
        assert!(bare.star_rating().is_none());
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let r = carbonara();
        assert!(r.matches("spaghetti"));
        assert!(r.matches("italian"));
        assert!(r.matches("main"));
        assert!(!r.matches("sushi"));
    }

    #[test]
    fn test_search_request_blank_values_are_absent() {
        let req = SearchRequest::default()
            .with_query(Some("   "))
            .with_cuisine(Some(""))
            .with_dish_type(Some(" dessert "));
        assert!(req.query.is_none());
        assert!(req.cuisine.is_none());
        assert_eq!(req.dish_type.as_deref(), Some("dessert"));
        assert!(!req.is_unfiltered());
        assert!(SearchRequest::default().is_unfiltered());
    }

    #[test]
    fn test_with_page_validates_size() {
        assert!(SearchRequest::default().with_page(0, 0).is_err());
        assert!(SearchRequest::default().with_page(101, 0).is_err());
        let req = SearchRequest::default().with_page(100, 24).unwrap();
        assert_eq!((req.number, req.offset), (100, 24));
    }

    #[test]
    fn test_parse_page_param() {
        assert_eq!(parse_page_param("offset", None, 0).unwrap(), 0);
        assert_eq!(parse_page_param("offset", Some(""), 0).unwrap(), 0);
        assert_eq!(parse_page_param("number", Some("24"), 12).unwrap(), 24);
        assert!(matches!(
            parse_page_param("offset", Some("-1"), 0),
            Err(RecipeError::Validation(_))
        ));
        assert!(parse_page_param("number", Some("ten"), 12).is_err());
    }

    #[test]
    fn test_parse_recipe_id() {
        assert_eq!(parse_recipe_id("42").unwrap(), 42);
        assert_eq!(
            parse_recipe_id("abc").unwrap_err(),
            RecipeError::Validation("Invalid recipe ID".to_string())
        );
    }
}

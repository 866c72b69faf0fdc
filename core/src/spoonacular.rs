use serde::Deserialize;

use crate::models::{Ingredient, InstructionStep, Recipe, SearchPage};

/// Body of `GET /recipes/complexSearch`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexSearchResponse {
    #[serde(default)]
    pub results: Vec<RecipeData>,
    pub total_results: Option<u32>,
    pub offset: Option<u32>,
    pub number: Option<u32>,
}

/// A recipe as the upstream API describes it. Every field is optional so a
/// schema change upstream drops data instead of failing the whole response.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeData {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub ready_in_minutes: Option<i64>,
    pub servings: Option<i64>,
    pub health_score: Option<f64>,
    pub price_per_serving: Option<f64>,
    pub spoonacular_score: Option<f64>,
    pub aggregate_likes: Option<i64>,
    pub cuisines: Option<Vec<String>>,
    pub dish_types: Option<Vec<String>>,
    pub diets: Option<Vec<String>>,
    pub extended_ingredients: Option<Vec<IngredientData>>,
    pub source_url: Option<String>,
    pub spoonacular_source_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct IngredientData {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub unit: Option<String>,
    pub original: Option<String>,
}

/// One element of `GET /recipes/{id}/analyzedInstructions`.
#[derive(Debug, Default, Deserialize)]
pub struct InstructionGroup {
    #[serde(default)]
    pub steps: Vec<StepData>,
}

#[derive(Debug, Deserialize)]
pub struct StepData {
    pub number: Option<u32>,
    pub step: Option<String>,
}

fn non_negative(value: Option<i64>) -> Option<u32> {
    value.and_then(|v| u32::try_from(v).ok())
}

fn score(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite()).map(|v| v.clamp(0.0, 100.0))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn ingredient_from_data(data: IngredientData) -> Ingredient {
    Ingredient {
        id: data.id.unwrap_or_default(),
        name: data.name.unwrap_or_default(),
        amount: data.amount.unwrap_or_default(),
        unit: data.unit.unwrap_or_default(),
        original: data.original.unwrap_or_default(),
    }
}

/// Map an upstream recipe onto the normalized record.
///
/// Returns `None` when the id or title is missing. `instructions` is always
/// empty here; steps come from a separate endpoint.
#[must_use]
pub fn recipe_from_data(data: RecipeData) -> Option<Recipe> {
    let id = data.id?;
    let title = non_empty(data.title)?;

    Some(Recipe {
        id,
        title,
        summary: non_empty(data.summary),
        image: non_empty(data.image),
        ready_in_minutes: non_negative(data.ready_in_minutes),
        servings: non_negative(data.servings),
        health_score: score(data.health_score),
        price_per_serving: data
            .price_per_serving
            .filter(|p| p.is_finite() && *p >= 0.0),
        spoonacular_score: score(data.spoonacular_score),
        aggregate_likes: non_negative(data.aggregate_likes),
        cuisines: data.cuisines.unwrap_or_default(),
        dish_types: data.dish_types.unwrap_or_default(),
        diets: data.diets.unwrap_or_default(),
        ingredients: data
            .extended_ingredients
            .unwrap_or_default()
            .into_iter()
            .map(ingredient_from_data)
            .collect(),
        instructions: Vec::new(),
        source_url: non_empty(data.source_url),
        spoonacular_source_url: non_empty(data.spoonacular_source_url),
    })
}

/// Steps of the first instruction group, renumbered from 1. Blank steps are
/// dropped.
#[must_use]
pub fn steps_from_groups(groups: Vec<InstructionGroup>) -> Vec<InstructionStep> {
    let Some(first) = groups.into_iter().next() else {
        return Vec::new();
    };

    let mut ordered: Vec<(u32, String)> = first
        .steps
        .into_iter()
        .enumerate()
        .filter_map(|(i, s)| {
            let text = non_empty(s.step)?;
            Some((s.number.unwrap_or(i as u32 + 1), text))
        })
        .collect();
    ordered.sort_by_key(|(number, _)| *number);

    (1u32..)
        .zip(ordered)
        .map(|(number, (_, step))| InstructionStep { number, step })
        .collect()
}

/// Normalize a search response, falling back to the requested window when
/// the upstream omits paging fields.
#[must_use]
pub fn page_from_response(resp: ComplexSearchResponse, number: u32, offset: u32) -> SearchPage {
    let results: Vec<Recipe> = resp
        .results
        .into_iter()
        .filter_map(recipe_from_data)
        .collect();
    let total_results = resp
        .total_results
        .unwrap_or_else(|| offset.saturating_add(results.len() as u32));

    SearchPage {
        results,
        total_results,
        offset: resp.offset.unwrap_or(offset),
        number: resp.number.unwrap_or(number),
    }
}

use std::time::Duration;

use anyhow::Context;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use recipebook_core::error::RecipeError;
use recipebook_core::models::{Recipe, SearchPage, SearchRequest};
use recipebook_core::service::RecipeSource;
use recipebook_core::spoonacular::{
    ComplexSearchResponse, InstructionGroup, RecipeData, page_from_response, recipe_from_data,
    steps_from_groups,
};

pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";

pub struct SpoonacularClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl SpoonacularClient {
    pub fn new(api_key: Option<String>, base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!(
                "recipebook/{} (recipe discovery)",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, RecipeError> {
        let api_key = self.api_key.as_deref().ok_or_else(RecipeError::missing_api_key)?;

        let url = format!("{}{path}", self.base_url);
        debug!(%url, "requesting Spoonacular");
        let resp = self
            .client
            .get(&url)
            .query(&[("apiKey", api_key)])
            .query(params)
            .send()
            .await
            .map_err(|e| RecipeError::Transport(e.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), path, "Spoonacular request failed");
            return Err(RecipeError::from_status(status.as_u16()));
        }

        resp.json()
            .await
            .map_err(|e| {
                RecipeError::Transport(format!("failed to parse response: {}", e.without_url()))
            })
    }
}

fn search_params(request: &SearchRequest) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("number", request.number.to_string()),
        ("offset", request.offset.to_string()),
        ("addRecipeInformation", "true".to_string()),
        ("fillIngredients", "true".to_string()),
    ];
    let optional = [
        ("query", &request.query),
        ("cuisine", &request.cuisine),
        ("diet", &request.diet),
        ("type", &request.dish_type),
    ];
    params.extend(
        optional
            .into_iter()
            .filter_map(|(name, value)| value.clone().map(|v| (name, v))),
    );
    params
}

impl RecipeSource for SpoonacularClient {
    async fn search_remote(&self, request: &SearchRequest) -> Result<SearchPage, RecipeError> {
        let resp: ComplexSearchResponse = self
            .get_json("/recipes/complexSearch", &search_params(request))
            .await?;
        Ok(page_from_response(resp, request.number, request.offset))
    }

    async fn fetch_remote_detail(&self, id: i64) -> Result<Recipe, RecipeError> {
        let info_path = format!("/recipes/{id}/information");
        let steps_path = format!("/recipes/{id}/analyzedInstructions");
        let info_params = [("includeNutrition", "false".to_string())];

        let (info, groups) = tokio::join!(
            self.get_json::<RecipeData>(&info_path, &info_params),
            self.get_json::<Vec<InstructionGroup>>(&steps_path, &[]),
        );

        let info = info.map_err(|err| match err {
            RecipeError::RemoteSource { status: 404, .. } => RecipeError::NotFound { id },
            other => other,
        })?;
        let groups = groups?;

        let mut recipe = recipe_from_data(info).ok_or_else(|| {
            RecipeError::InvalidResponse(format!("recipe {id} has no id or title"))
        })?;
        recipe.instructions = steps_from_groups(groups);
        Ok(recipe)
    }
}

use anyhow::{Context, Result};

use recipebook_core::models::parse_recipe_id;
use recipebook_core::service::{RecipeService, RecipeSource};

use super::helpers::print_recipe_detail;

pub(crate) async fn cmd_show<S: RecipeSource>(
    service: &RecipeService<S>,
    id: &str,
    json: bool,
) -> Result<()> {
    let id = parse_recipe_id(id)?;
    let recipe = service
        .get_detail(id)
        .await
        .with_context(|| format!("Failed to load recipe {id}"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recipe)?);
    } else {
        print_recipe_detail(&recipe);
    }

    Ok(())
}

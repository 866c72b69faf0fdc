use anyhow::Result;
use std::process;

use recipebook_core::feed::RecipeFeed;
use recipebook_core::models::{Recipe, SearchRequest};
use recipebook_core::service::{RecipeService, RecipeSource};

use super::helpers::print_recipe_table;

/// Page through search results until `limit` recipes are collected or the
/// results run out.
pub(crate) async fn collect_results<S: RecipeSource>(
    service: &RecipeService<S>,
    request: SearchRequest,
    limit: usize,
) -> Result<Vec<Recipe>> {
    let mut feed = RecipeFeed::new();
    let generation = feed.start(request);

    while feed.records().len() < limit {
        let Some(next) = feed.next_request() else {
            break;
        };
        let page = service.search(&next).await?;
        feed.accept(generation, page);
    }

    Ok(feed.records().iter().take(limit).cloned().collect())
}

pub(crate) async fn cmd_search<S: RecipeSource>(
    service: &RecipeService<S>,
    request: SearchRequest,
    limit: usize,
    json: bool,
) -> Result<()> {
    let label = request.query.clone().unwrap_or_else(|| "featured".to_string());
    let all = collect_results(service, request, limit).await?;

    if all.is_empty() {
        if json {
            println!("[]");
        } else {
            eprintln!("No recipes found for '{label}'");
        }
        process::exit(2);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&all)?);
    } else {
        let refs: Vec<&Recipe> = all.iter().collect();
        print_recipe_table(&refs);
    }

    Ok(())
}

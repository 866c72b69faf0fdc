use tracing::{debug, warn};

use crate::cache::RecipeCache;
use crate::error::RecipeError;
use crate::models::{Recipe, SearchPage, SearchRequest};

/// Remote recipe lookup provider.
///
/// The server and CLI implement this with reqwest against Spoonacular.
/// Implementations never touch the cache; persisting results is the
/// orchestrator's job.
pub trait RecipeSource: Send + Sync {
    /// One page of search results. Returned records carry no instructions.
    fn search_remote(
        &self,
        request: &SearchRequest,
    ) -> impl Future<Output = Result<SearchPage, RecipeError>> + Send;

    /// Full record for `id`, including instructions.
    fn fetch_remote_detail(
        &self,
        id: i64,
    ) -> impl Future<Output = Result<Recipe, RecipeError>> + Send;
}

/// Routes searches and detail lookups between the cache and a remote source.
pub struct RecipeService<S> {
    cache: RecipeCache,
    source: S,
}

impl<S: RecipeSource> RecipeService<S> {
    pub fn new(cache: RecipeCache, source: S) -> Self {
        Self { cache, source }
    }

    pub fn cache(&self) -> &RecipeCache {
        &self.cache
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Serve the featured listing from the cache when possible, otherwise
    /// search remotely and cache every returned record.
    ///
    /// The cache only answers requests without query or filters whose offset
    /// lands inside the cached set; anything else goes remote.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchPage, RecipeError> {
        if request.is_unfiltered() {
            let cached = self.cache.search(None);
            let offset = request.offset as usize;
            if offset < cached.len() {
                debug!(
                    offset = request.offset,
                    number = request.number,
                    cached = cached.len(),
                    "serving featured recipes from cache"
                );
                let total_results = u32::try_from(cached.len()).unwrap_or(u32::MAX);
                let results = cached
                    .into_iter()
                    .skip(offset)
                    .take(request.number as usize)
                    .collect();
                return Ok(SearchPage {
                    results,
                    total_results,
                    offset: request.offset,
                    number: request.number,
                });
            }
        }

        debug!(
            query = request.query.as_deref().unwrap_or(""),
            offset = request.offset,
            "searching remote source"
        );
        let page = self.source.search_remote(request).await?;
        let results = self.cache.put_many(page.results);
        Ok(SearchPage { results, ..page })
    }

    /// Look up a recipe in the cache, fetching and caching it on a miss.
    ///
    /// Records cached from search results carry no instructions, so they are
    /// refreshed from the source once. If that refresh fails the cached
    /// summary is returned instead.
    pub async fn get_detail(&self, id: i64) -> Result<Recipe, RecipeError> {
        let cached = self.cache.get(id);
        if let Some(recipe) = cached.as_ref().filter(|r| !r.instructions.is_empty()) {
            return Ok(recipe.clone());
        }

        debug!(id, summary_cached = cached.is_some(), "fetching recipe detail");
        match self.source.fetch_remote_detail(id).await {
            Ok(recipe) => Ok(self.cache.put(recipe)),
            Err(err) => match cached {
                Some(summary) => {
                    warn!(id, "detail fetch failed, serving cached summary: {err}");
                    Ok(summary)
                }
                None => Err(err),
            },
        }
    }
}

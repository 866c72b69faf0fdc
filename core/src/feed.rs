use std::collections::HashSet;

use tracing::debug;

use crate::models::{Recipe, SearchPage, SearchRequest};

/// Accumulates "load more" pages for one logical search.
///
/// Every call to [`RecipeFeed::start`] bumps a generation counter. Pages are
/// accepted only for the current generation, so a slow response to an older
/// search cannot leak into a newer one.
#[derive(Debug, Default)]
pub struct RecipeFeed {
    generation: u64,
    request: Option<SearchRequest>,
    records: Vec<Recipe>,
    seen: HashSet<i64>,
    total_results: Option<u32>,
    next_offset: u32,
    exhausted: bool,
}

impl RecipeFeed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new search, discarding everything accumulated so far.
    pub fn start(&mut self, request: SearchRequest) -> u64 {
        self.generation += 1;
        self.request = Some(SearchRequest {
            offset: 0,
            ..request
        });
        self.records.clear();
        self.seen.clear();
        self.total_results = None;
        self.next_offset = 0;
        self.exhausted = false;
        self.generation
    }

    /// The request for the next page, or `None` when nothing is left to load.
    #[must_use]
    pub fn next_request(&self) -> Option<SearchRequest> {
        let base = self.request.as_ref()?;
        if self.exhausted || (self.total_results.is_some() && !self.has_more()) {
            return None;
        }
        Some(SearchRequest {
            offset: self.next_offset,
            ..base.clone()
        })
    }

    /// Append a page received for `generation`. Records already present are
    /// skipped. Returns how many records were added.
    pub fn accept(&mut self, generation: u64, page: SearchPage) -> usize {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "ignoring page from a stale search"
            );
            return 0;
        }
        let Some(base) = &self.request else {
            return 0;
        };

        self.next_offset = page.offset.saturating_add(base.number);
        self.total_results = Some(page.total_results);
        if page.results.is_empty() {
            self.exhausted = true;
        }

        let before = self.records.len();
        for recipe in page.results {
            if self.seen.insert(recipe.id) {
                self.records.push(recipe);
            }
        }
        self.records.len() - before
    }

    /// More results exist upstream than have been accumulated.
    #[must_use]
    pub fn has_more(&self) -> bool {
        !self.exhausted
            && self
                .total_results
                .is_some_and(|total| (self.records.len() as u64) < u64::from(total))
    }

    #[must_use]
    pub fn records(&self) -> &[Recipe] {
        &self.records
    }

    #[must_use]
    pub fn total_results(&self) -> Option<u32> {
        self.total_results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(ids: &[i64], offset: u32, total: u32) -> SearchPage {
        SearchPage {
            results: ids
                .iter()
                .map(|id| Recipe::new(*id, format!("Recipe {id}")))
                .collect(),
            total_results: total,
            offset,
            number: 2,
        }
    }

    fn ids(feed: &RecipeFeed) -> Vec<i64> {
        feed.records().iter().map(|r| r.id).collect()
    }

    fn pasta() -> SearchRequest {
        SearchRequest::default()
            .with_query(Some("pasta"))
            .with_page(2, 0)
            .unwrap()
    }

    #[test]
    fn test_empty_feed_has_nothing_to_request() {
        let feed = RecipeFeed::new();
        assert!(feed.next_request().is_none());
        assert!(!feed.has_more());
    }

    #[test]
    fn test_pages_accumulate_and_dedup() {
        let mut feed = RecipeFeed::new();
        let generation = feed.start(pasta());
        assert_eq!(feed.next_request().unwrap().offset, 0);

        assert_eq!(feed.accept(generation, page(&[1, 2], 0, 5)), 2);
        assert!(feed.has_more());
        assert_eq!(feed.next_request().unwrap().offset, 2);

        // id 2 repeated by the upstream
        assert_eq!(feed.accept(generation, page(&[2, 3], 2, 5)), 1);
        assert_eq!(ids(&feed), vec![1, 2, 3]);
        assert!(feed.has_more());

        assert_eq!(feed.accept(generation, page(&[4, 5], 4, 5)), 2);
        assert_eq!(ids(&feed), vec![1, 2, 3, 4, 5]);
        assert!(!feed.has_more());
        assert!(feed.next_request().is_none());
    }

    #[test]
    fn test_new_search_resets_even_with_same_first_result() {
        let mut feed = RecipeFeed::new();
        let first = feed.start(pasta());
        feed.accept(first, page(&[1, 2], 0, 4));
        feed.accept(first, page(&[3, 4], 2, 4));

        let second = feed.start(pasta().with_dish_type(Some("dinner")));
        assert_ne!(first, second);
        assert!(feed.records().is_empty());
        assert!(feed.total_results().is_none());

        feed.accept(second, page(&[1, 9], 0, 2));
        assert_eq!(ids(&feed), vec![1, 9]);
        assert!(!feed.has_more());
    }

    #[test]
    fn test_stale_generation_is_ignored() {
        let mut feed = RecipeFeed::new();
        let old = feed.start(pasta());
        let current = feed.start(pasta().with_query(Some("soup")));

        assert_eq!(feed.accept(old, page(&[1, 2], 0, 10)), 0);
        assert!(feed.records().is_empty());
        assert_eq!(feed.accept(current, page(&[7], 0, 1)), 1);
        assert_eq!(ids(&feed), vec![7]);
    }

    #[test]
    fn test_empty_page_ends_feed() {
        let mut feed = RecipeFeed::new();
        let generation = feed.start(pasta());
        feed.accept(generation, page(&[1, 2], 0, 50));
        feed.accept(generation, page(&[], 2, 50));
        assert!(!feed.has_more());
        assert!(feed.next_request().is_none());
    }

    #[test]
    fn test_start_resets_offset() {
        let mut feed = RecipeFeed::new();
        feed.start(pasta().with_page(2, 8).unwrap());
        assert_eq!(feed.next_request().unwrap().offset, 0);
    }
}

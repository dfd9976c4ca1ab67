//! The recipe list view model.
//!
//! `ListView` holds the filter inputs and derives the visible page from them in
//! stages: collection + criteria -> filtered positions -> page slice, plus the
//! canonical location. Each stage is cached against the revisions of its own
//! inputs, so changing the page does not re-run the text filter and a store
//! update does not rebuild the location.

use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::location::{FilterState, History, Location, LocationUpdate, QueryParams};
use crate::pagination::{page_count, paginate};
use crate::routes::LIST_PATH;
use crate::search::{collect_tags, filter_indices};
use crate::types::Recipe;

/// A single cached value and the key it was computed from.
#[derive(Debug, Default)]
struct Memo<K, V> {
    key: Option<K>,
    value: V,
    computations: usize,
}

impl<K: PartialEq, V> Memo<K, V> {
    fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        if self.key.as_ref() != Some(&key) {
            self.value = compute();
            self.key = Some(key);
            self.computations += 1;
        }
        &self.value
    }
}

/// What the list shows right now.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListSnapshot {
    pub recipes: Vec<Recipe>,
    /// Size of the whole filtered sequence
    pub total: usize,
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub query: String,
    pub tags: Vec<String>,
    pub all_tags: Vec<String>,
}

#[derive(Debug)]
pub struct ListView {
    collection: Arc<Vec<Recipe>>,
    collection_rev: u64,
    filter: FilterState,
    /// Bumped when the query or the tag set changes.
    criteria_rev: u64,
    page_size: usize,
    path: String,
    /// Parameters of the last applied location, unrelated ones included.
    params: QueryParams,
    params_rev: u64,

    filtered: Memo<(u64, u64), Vec<usize>>,
    visible: Memo<(u64, u64, usize, usize), Vec<usize>>,
    all_tags: Memo<u64, Vec<String>>,
    location: Memo<(u64, usize, u64), Location>,
}

impl ListView {
    pub fn new(collection: Arc<Vec<Recipe>>, page_size: usize) -> Self {
        Self {
            collection,
            collection_rev: 0,
            filter: FilterState::default(),
            criteria_rev: 0,
            page_size,
            path: LIST_PATH.to_string(),
            params: QueryParams::new(),
            params_rev: 0,
            filtered: Memo::default(),
            visible: Memo::default(),
            all_tags: Memo::default(),
            location: Memo::default(),
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Swap in a new committed collection. Filter state is kept.
    pub fn set_collection(&mut self, collection: Arc<Vec<Recipe>>) {
        if !Arc::ptr_eq(&self.collection, &collection) {
            self.collection = collection;
            self.collection_rev += 1;
        }
    }

    /// A new query resets to the first page. The same query is a no-op.
    pub fn set_query(&mut self, query: &str) -> Option<LocationUpdate> {
        if self.filter.query == query {
            return None;
        }
        self.filter.query = query.to_string();
        self.criteria_changed();
        Some(self.location_update())
    }

    /// A different tag set resets to the first page. An equal set is a no-op.
    pub fn set_tags(&mut self, tags: BTreeSet<String>) -> Option<LocationUpdate> {
        if self.filter.tags == tags {
            return None;
        }
        self.filter.tags = tags;
        self.criteria_changed();
        Some(self.location_update())
    }

    /// Add `tag` to the selection, or drop it if already selected.
    pub fn toggle_tag(&mut self, tag: &str) -> LocationUpdate {
        if !self.filter.tags.remove(tag) {
            self.filter.tags.insert(tag.to_string());
        }
        self.criteria_changed();
        self.location_update()
    }

    pub fn set_page(&mut self, page: usize) -> Option<LocationUpdate> {
        if self.filter.page == page {
            return None;
        }
        self.filter.page = page;
        Some(self.location_update())
    }

    /// Load state from an inbound location. Does not emit an update.
    pub fn apply_location(&mut self, location: &Location) {
        let state = FilterState::from_params(&location.params);
        if state.query != self.filter.query || state.tags != self.filter.tags {
            self.criteria_rev += 1;
        }
        self.filter = state;

        if location.params != self.params || location.path != self.path {
            self.params = location.params.clone();
            self.path = location.path.clone();
            self.params_rev += 1;
        }
    }

    /// The canonical location for the current state.
    pub fn location(&mut self) -> Location {
        let key = (self.criteria_rev, self.filter.page, self.params_rev);
        let (filter, params, path) = (&self.filter, &self.params, &self.path);
        self.location
            .get_or_compute(key, || {
                let mut params = params.clone();
                filter.write_to(&mut params);
                Location::new(path, params)
            })
            .clone()
    }

    pub fn snapshot(&mut self) -> ListSnapshot {
        self.refresh();

        ListSnapshot {
            recipes: self
                .visible
                .value
                .iter()
                .map(|&i| self.collection[i].clone())
                .collect(),
            total: self.filtered.value.len(),
            page_index: self.filter.page,
            page_size: self.page_size,
            page_count: page_count(self.filtered.value.len(), self.page_size),
            query: self.filter.query.clone(),
            tags: self.filter.tags.iter().cloned().collect(),
            all_tags: self.all_tags.value.clone(),
        }
    }

    fn refresh(&mut self) {
        let collection = &self.collection;
        let filter = &self.filter;

        let filtered = self
            .filtered
            .get_or_compute((self.collection_rev, self.criteria_rev), || {
                filter_indices(collection, &filter.query, &filter.tags)
            });

        let page_key = (self.collection_rev, self.criteria_rev, filter.page, self.page_size);
        let page_size = self.page_size;
        self.visible.get_or_compute(page_key, || {
            paginate(filtered, filter.page, page_size)
                .items
                .into_iter()
                .copied()
                .collect()
        });

        self.all_tags
            .get_or_compute(self.collection_rev, || collect_tags(collection));
    }

    fn criteria_changed(&mut self) {
        self.filter.page = 0;
        self.criteria_rev += 1;
    }

    fn location_update(&mut self) -> LocationUpdate {
        LocationUpdate {
            location: self.location(),
            history: History::Replace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn recipe(id: &str, name: &str, tags: &[&str]) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("{name} description"),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ingredients: vec!["salt".to_string()],
            steps: vec!["cook".to_string()],
            created_at: Utc::now(),
        }
    }

    fn collection(n: usize) -> Arc<Vec<Recipe>> {
        Arc::new(
            (0..n)
                .map(|i| {
                    let tags: &[&str] = if i % 2 == 0 { &["even"] } else { &["odd"] };
                    recipe(&format!("r{i}"), &format!("Recipe {i}"), tags)
                })
                .collect(),
        )
    }

    fn ids(snapshot: &ListSnapshot) -> Vec<&str> {
        snapshot.recipes.iter().map(|r| r.id.as_str()).collect()
    }

    fn tag_set(tags: &[&str]) -> BTreeSet<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_first_page() {
        let mut view = ListView::new(collection(25), 10);
        let snapshot = view.snapshot();
        assert_eq!(snapshot.recipes.len(), 10);
        assert_eq!(snapshot.total, 25);
        assert_eq!(snapshot.page_count, 3);
        assert_eq!(snapshot.all_tags, vec!["even", "odd"]);
    }

    #[test]
    fn test_last_partial_page() {
        let mut view = ListView::new(collection(25), 10);
        view.set_page(2);
        let snapshot = view.snapshot();
        assert_eq!(ids(&snapshot), vec!["r20", "r21", "r22", "r23", "r24"]);
    }

    #[test]
    fn test_query_change_resets_page() {
        let mut view = ListView::new(collection(25), 10);
        view.set_page(2);

        let update = view.set_query("recipe 1").unwrap();
        assert_eq!(view.filter().page, 0);
        assert_eq!(update.history, History::Replace);
        assert_eq!(update.location.to_string(), "/recipes?search=recipe+1&page=0");
    }

    #[test]
    fn test_same_query_is_noop() {
        let mut view = ListView::new(collection(25), 10);
        view.set_query("recipe");
        view.set_page(1);

        assert_eq!(view.set_query("recipe"), None);
        assert_eq!(view.filter().page, 1);
    }

    #[test]
    fn test_tag_change_resets_page() {
        let mut view = ListView::new(collection(25), 5);
        view.set_page(2);

        assert!(view.set_tags(tag_set(&["odd"])).is_some());
        assert_eq!(view.filter().page, 0);
        assert_eq!(view.set_tags(tag_set(&["odd"])), None);

        let snapshot = view.snapshot();
        assert_eq!(snapshot.total, 12);
        assert!(snapshot.recipes.iter().all(|r| r.has_tag("odd")));
    }

    #[test]
    fn test_toggle_tag() {
        let mut view = ListView::new(collection(4), 10);
        view.toggle_tag("even");
        assert_eq!(view.snapshot().tags, vec!["even"]);
        view.toggle_tag("even");
        assert!(view.snapshot().tags.is_empty());
    }

    #[test]
    fn test_page_change_does_not_refilter() {
        let mut view = ListView::new(collection(25), 10);
        view.set_query("recipe");
        view.snapshot();
        assert_eq!(view.filtered.computations, 1);

        view.set_page(1);
        view.snapshot();
        assert_eq!(view.filtered.computations, 1);
        assert_eq!(view.visible.computations, 2);
    }

    #[test]
    fn test_collection_change_refilters_but_keeps_location() {
        let mut view = ListView::new(collection(5), 10);
        view.set_query("recipe");
        view.snapshot();
        view.location();
        let location_runs = view.location.computations;

        view.set_collection(collection(6));
        assert_eq!(view.snapshot().total, 6);
        assert_eq!(view.filtered.computations, 2);

        view.location();
        assert_eq!(view.location.computations, location_runs);
    }

    #[test]
    fn test_unchanged_collection_arc_is_ignored() {
        let recipes = collection(3);
        let mut view = ListView::new(recipes.clone(), 10);
        view.snapshot();
        view.set_collection(recipes);
        view.snapshot();
        assert_eq!(view.filtered.computations, 1);
    }

    #[test]
    fn test_apply_location_loads_state() {
        let mut view = ListView::new(collection(25), 10);
        view.apply_location(&Location::parse("/recipes?view=grid&search=Recipe&tags=odd&page=1"));

        assert_eq!(view.filter().query, "Recipe");
        assert_eq!(view.filter().tags, tag_set(&["odd"]));
        assert_eq!(view.filter().page, 1);

        let snapshot = view.snapshot();
        assert_eq!(snapshot.total, 12);
        assert_eq!(snapshot.recipes.len(), 2);
    }

    #[test]
    fn test_location_keeps_unrelated_params() {
        let mut view = ListView::new(collection(25), 10);
        view.apply_location(&Location::parse("/recipes?view=grid&page=3"));

        let update = view.set_page(1).unwrap();
        assert_eq!(update.location.to_string(), "/recipes?view=grid&page=1");
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let mut view = ListView::new(collection(3), 10);
        view.set_page(7);
        let snapshot = view.snapshot();
        assert!(snapshot.recipes.is_empty());
        assert_eq!(snapshot.total, 3);
        assert_eq!(snapshot.page_index, 7);
    }
}

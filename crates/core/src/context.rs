//! Composite food and recipe searches over an explicit context.
//!
//! A [`SearchContext`] bundles everything a search reads: the document
//! store, the local caches, the notification surface and the current user.
//! It is built once by the host application and shared read-only with the
//! search worker.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{CacheName, LocalCache};
use crate::dispatch::{Dispatcher, LookupPlan, RecipeLookup};
use crate::fallback::scan_local;
use crate::item::{ItemKey, SearchableItem, normalize_term};
use crate::merge::{MAX_RESULTS, ResultMerger};
use crate::notify::{LogNotifier, Notifier};
use crate::store::{DocumentStore, FOODS_COLLECTION, recipes_collection};

/// Tunables for the composite searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
	/// Page size of the prefix and token lookups.
	pub page_size: usize,
	/// Page size of the recipe prefix lookup.
	pub recipe_page_size: usize,
	/// Cap on the merged, ranked list.
	pub max_results: usize,
	/// Terms shorter than this (in characters) are not searched.
	pub min_term_len: usize,
}

impl Default for SearchOptions {
	fn default() -> Self {
		Self {
			page_size: 15,
			recipe_page_size: 10,
			max_results: MAX_RESULTS,
			min_term_len: 2,
		}
	}
}

/// Which records a search covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchScope {
	FoodsOnly,
	FoodsAndRecipes,
}

impl SearchScope {
	pub fn as_str(self) -> &'static str {
		match self {
			SearchScope::FoodsOnly => "foods",
			SearchScope::FoodsAndRecipes => "foods-and-recipes",
		}
	}

	pub fn from_name(name: &str) -> Option<Self> {
		match name {
			"foods" | "foods-only" => Some(SearchScope::FoodsOnly),
			"foods-and-recipes" | "all" => Some(SearchScope::FoodsAndRecipes),
			_ => None,
		}
	}
}

/// Read-only inputs of every search.
pub struct SearchContext {
	store: Arc<dyn DocumentStore>,
	cache: Arc<dyn LocalCache>,
	notifier: Arc<dyn Notifier>,
	user_id: Option<String>,
	options: SearchOptions,
}

impl SearchContext {
	pub fn new(store: Arc<dyn DocumentStore>, cache: Arc<dyn LocalCache>) -> Self {
		Self {
			store,
			cache,
			notifier: Arc::new(LogNotifier),
			user_id: None,
			options: SearchOptions::default(),
		}
	}

	#[must_use]
	pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
		self.notifier = notifier;
		self
	}

	#[must_use]
	pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
		self.user_id = Some(user_id.into());
		self
	}

	#[must_use]
	pub fn with_options(mut self, options: SearchOptions) -> Self {
		self.options = options;
		self
	}

	pub fn options(&self) -> &SearchOptions {
		&self.options
	}

	pub fn user_id(&self) -> Option<&str> {
		self.user_id.as_deref()
	}

	/// Search the shared food database and the cached foods.
	pub fn search_foods_only(&self, term: &str) -> Vec<SearchableItem> {
		self.search(SearchScope::FoodsOnly, term)
	}

	/// Search foods plus the current user's recipes.
	pub fn search_foods_and_recipes(&self, term: &str) -> Vec<SearchableItem> {
		self.search(SearchScope::FoodsAndRecipes, term)
	}

	/// Run the full pipeline for `scope`: remote lookups, merge, local
	/// fallback, ranking.
	///
	/// Never fails; remote problems degrade to fewer results.
	pub fn search(&self, scope: SearchScope, raw_term: &str) -> Vec<SearchableItem> {
		let term = normalize_term(raw_term);
		if term.chars().count() < self.options.min_term_len {
			return Vec::new();
		}

		let plan = self.plan(scope, &term);
		let outcome = Dispatcher::new(self.store.as_ref(), self.notifier.as_ref()).dispatch(&plan);

		let mut merger = ResultMerger::new();
		merger.insert_primary(outcome.prefix);
		merger.insert_if_absent(outcome.token);
		if let Some(recipes) = outcome.recipes {
			merger.insert_recipes(recipes);
		}

		let foods = self.cache.items(CacheName::Foods);
		let recipes = match scope {
			SearchScope::FoodsAndRecipes => self.cache.items(CacheName::Recipes),
			SearchScope::FoodsOnly => Arc::from(Vec::new()),
		};
		let local_hits = scan_local(&term, &foods, &recipes, &mut merger);

		let results = merger.finish(&term, self.options.max_results);
		debug!(
			term = %term,
			scope = scope.as_str(),
			local_hits,
			results = results.len(),
			"search finished"
		);
		results
	}

	fn plan(&self, scope: SearchScope, term: &str) -> LookupPlan {
		let recipes = match (scope, self.user_id.as_deref()) {
			(SearchScope::FoodsAndRecipes, Some(user_id)) => Some(RecipeLookup {
				collection: recipes_collection(user_id),
				limit: self.options.recipe_page_size,
			}),
			_ => None,
		};
		LookupPlan {
			term: term.to_string(),
			page_size: self.options.page_size,
			recipes,
		}
	}

	/// Fetch the freshest copy of a selected item.
	///
	/// Falls back to the cached copy when the store cannot answer.
	pub fn fetch_item(&self, key: &ItemKey) -> Option<SearchableItem> {
		let (id, is_recipe) = key.parts();
		let collection = if is_recipe {
			recipes_collection(self.user_id.as_deref()?)
		} else {
			FOODS_COLLECTION.to_string()
		};

		match self.store.get_by_id(&collection, id) {
			Ok(mut item) => {
				item.is_recipe = is_recipe;
				Some(item)
			}
			Err(err) => {
				warn!(key = %key, %err, "falling back to cached copy");
				let cache = if is_recipe {
					CacheName::Recipes
				} else {
					CacheName::Foods
				};
				self.cache
					.items(cache)
					.iter()
					.find(|item| item.id == id)
					.cloned()
					.map(|mut item| {
						item.is_recipe = is_recipe;
						item
					})
			}
		}
	}
}

/// Term-to-ranked-items function consumed by the UI.
pub trait Searcher: Send + Sync {
	fn search(&self, term: &str) -> Vec<SearchableItem>;
}

impl<F> Searcher for F
where
	F: Fn(&str) -> Vec<SearchableItem> + Send + Sync,
{
	fn search(&self, term: &str) -> Vec<SearchableItem> {
		self(term)
	}
}

/// [`Searcher`] running one of the composite searches of a shared context.
#[derive(Clone)]
pub struct ScopedSearch {
	context: Arc<SearchContext>,
	scope: SearchScope,
}

impl ScopedSearch {
	pub fn new(context: Arc<SearchContext>, scope: SearchScope) -> Self {
		Self { context, scope }
	}

	pub fn foods_only(context: Arc<SearchContext>) -> Self {
		Self::new(context, SearchScope::FoodsOnly)
	}

	pub fn foods_and_recipes(context: Arc<SearchContext>) -> Self {
		Self::new(context, SearchScope::FoodsAndRecipes)
	}

	pub fn context(&self) -> &Arc<SearchContext> {
		&self.context
	}

	pub fn scope(&self) -> SearchScope {
		self.scope
	}
}

impl Searcher for ScopedSearch {
	fn search(&self, term: &str) -> Vec<SearchableItem> {
		self.context.search(self.scope, term)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cache::CacheSnapshot;
	use crate::store::{MemoryStore, OfflineStore};

	fn context(store: Arc<dyn DocumentStore>, cache: CacheSnapshot) -> SearchContext {
		SearchContext::new(store, Arc::new(cache)).with_user("u1")
	}

	#[test]
	fn short_terms_are_not_searched() {
		let ctx = context(
			Arc::new(MemoryStore::new()),
			CacheSnapshot::new(vec![SearchableItem::food("f1", "A")], Vec::new()),
		);
		assert!(ctx.search_foods_only("a").is_empty());
		assert!(ctx.search_foods_only("  a ").is_empty());
	}

	#[test]
	fn foods_only_ignores_cached_recipes() {
		let ctx = context(
			Arc::new(MemoryStore::new()),
			CacheSnapshot::new(
				vec![SearchableItem::food("f1", "Pasta")],
				vec![SearchableItem::recipe("r1", "Pasta al pesto")],
			),
		);
		let foods = ctx.search_foods_only("pasta");
		assert_eq!(foods.len(), 1);

		let all = ctx.search_foods_and_recipes("pasta");
		assert_eq!(all.len(), 2);
		assert_eq!(all[1].key().as_str(), "recipe-r1");
	}

	#[test]
	fn fetch_item_prefers_store_then_cache() {
		let mut store = MemoryStore::new();
		store.insert_all(FOODS_COLLECTION, [SearchableItem::food("f1", "Mela fresca")]);
		let cache = CacheSnapshot::new(
			vec![SearchableItem::food("f1", "Mela")],
			vec![SearchableItem::recipe("r1", "Torta di mele")],
		);

		let ctx = context(Arc::new(store), cache.clone());
		let fresh = ctx.fetch_item(&ItemKey::food("f1")).expect("food");
		assert_eq!(fresh.name, "Mela fresca");

		let offline = context(Arc::new(OfflineStore), cache);
		let cached = offline.fetch_item(&ItemKey::recipe("r1")).expect("recipe");
		assert_eq!(cached.name, "Torta di mele");
		assert!(cached.is_recipe);
	}
}

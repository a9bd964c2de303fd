//! End-to-end searches against the in-memory store.

use std::sync::{Arc, Mutex};

use mealdex_core::store::{FOODS_COLLECTION, recipes_collection};
use mealdex_core::{
	CacheSnapshot, MemoryStore, Notifier, OfflineStore, SEARCH_UNAVAILABLE_MESSAGE, ScopedSearch,
	SearchContext, SearchableItem, Searcher, Severity, SharedCache, merge,
};

#[derive(Default)]
struct Toasts(Mutex<Vec<(String, Severity)>>);

impl Notifier for Toasts {
	fn notify(&self, message: &str, severity: Severity) {
		self.0.lock().unwrap().push((message.to_string(), severity));
	}
}

impl Toasts {
	fn taken(&self) -> Vec<(String, Severity)> {
		std::mem::take(&mut *self.0.lock().unwrap())
	}
}

fn names(items: &[SearchableItem]) -> Vec<&str> {
	items.iter().map(|item| item.name.as_str()).collect()
}

fn pantry() -> MemoryStore {
	let mut store = MemoryStore::new();
	store.insert_all(
		FOODS_COLLECTION,
		[
			SearchableItem::food("f1", "Mela"),
			SearchableItem::food("f2", "Mela Verde"),
			SearchableItem::food("f3", "Marmellata di mele"),
			SearchableItem::food("f4", "Succo di mela"),
			SearchableItem::food("f5", "Pane bianco"),
		],
	);
	store.insert_all(
		&recipes_collection("u1"),
		[
			SearchableItem::recipe("f1", "Mela al forno"),
			SearchableItem::recipe("r2", "Torta di mele"),
		],
	);
	store
}

fn context(store: MemoryStore, cache: CacheSnapshot, toasts: Arc<Toasts>) -> SearchContext {
	SearchContext::new(Arc::new(store), Arc::new(cache))
		.with_user("u1")
		.with_notifier(toasts)
}

#[test]
fn exact_and_prefix_matches_lead_the_list() {
	let toasts = Arc::new(Toasts::default());
	let ctx = context(pantry(), CacheSnapshot::default(), Arc::clone(&toasts));

	let results = ctx.search_foods_only("Mela");
	assert_eq!(names(&results), vec!["Mela", "Mela Verde", "Succo di mela"]);
	assert!(toasts.taken().is_empty());
}

#[test]
fn unrelated_item_surfaced_by_a_source_ranks_last() {
	let marmellata = SearchableItem::food("f3", "Marmellata di mele");
	let merged = merge(
		"mela",
		vec![SearchableItem::food("f2", "Mela Verde")],
		vec![marmellata, SearchableItem::food("f1", "Mela")],
		None,
		Vec::new(),
		20,
	);
	assert_eq!(names(&merged), vec!["Mela", "Mela Verde", "Marmellata di mele"]);
}

#[test]
fn recipes_join_foods_under_their_own_namespace() {
	let ctx = context(pantry(), CacheSnapshot::default(), Arc::new(Toasts::default()));

	let results = ctx.search_foods_and_recipes("mela");
	let keys: Vec<String> = results.iter().map(|item| item.key().to_string()).collect();
	assert_eq!(keys, vec!["f1", "recipe-f1", "f2", "f4"]);
	assert!(results[1].is_recipe);
}

#[test]
fn recipes_need_a_signed_in_user() {
	let store: Arc<MemoryStore> = Arc::new(pantry());
	let ctx = SearchContext::new(store, Arc::new(CacheSnapshot::default()));
	let results = ctx.search_foods_and_recipes("mela");
	assert!(results.iter().all(|item| !item.is_recipe));
}

#[test]
fn offline_search_falls_back_to_the_cache() {
	let toasts = Arc::new(Toasts::default());
	let cache = CacheSnapshot::new(vec![SearchableItem::food("f9", "Pane integrale")], Vec::new());
	let ctx = SearchContext::new(Arc::new(OfflineStore), Arc::new(cache))
		.with_user("u1")
		.with_notifier(Arc::clone(&toasts) as Arc<dyn Notifier>);

	let results = ctx.search_foods_and_recipes("pane");
	let ids: Vec<&str> = results.iter().map(|item| item.id.as_str()).collect();
	assert_eq!(ids, vec!["f9"]);
	assert_eq!(
		toasts.taken(),
		vec![(SEARCH_UNAVAILABLE_MESSAGE.to_string(), Severity::Error)]
	);
}

#[test]
fn fresh_cache_writes_show_up_before_the_index_catches_up() {
	let cache = Arc::new(SharedCache::new(CacheSnapshot::default()));
	let ctx = Arc::new(SearchContext::new(Arc::new(pantry()), cache.clone()).with_user("u1"));
	let search = ScopedSearch::foods_and_recipes(Arc::clone(&ctx));

	assert!(search.search("panzan").is_empty());

	cache.replace(CacheSnapshot::new(
		Vec::new(),
		vec![SearchableItem::recipe("r9", "Panzanella")],
	));
	let results = search.search("panzan");
	assert_eq!(names(&results), vec!["Panzanella"]);
	assert_eq!(results[0].key().as_str(), "recipe-r9");
}

#[test]
fn repeated_searches_return_identical_lists() {
	let cache = CacheSnapshot::new(
		vec![
			SearchableItem::food("c1", "Pane di segale"),
			SearchableItem::food("c2", "pane di segale"),
		],
		Vec::new(),
	);
	let ctx = context(pantry(), cache, Arc::new(Toasts::default()));

	let first = ctx.search_foods_only("pane");
	for _ in 0..5 {
		assert_eq!(ctx.search_foods_only("pane"), first);
	}
	let ids: Vec<&str> = first.iter().map(|item| item.id.as_str()).collect();
	assert_eq!(ids, vec!["f5", "c1", "c2"]);
}

#[test]
fn results_are_capped() {
	let mut store = MemoryStore::new();
	store.insert_all(
		FOODS_COLLECTION,
		(0..40).map(|n| SearchableItem::food(format!("p{n:02}"), format!("Pasta {n:02}"))),
	);
	let cache = CacheSnapshot::new(store.documents(FOODS_COLLECTION), Vec::new());
	let ctx = context(store, cache, Arc::new(Toasts::default()));

	let results = ctx.search_foods_only("pasta");
	assert_eq!(results.len(), 20);
	assert_eq!(results[0].name, "Pasta 00");
	assert_eq!(results[19].name, "Pasta 19");
}

#[test]
fn closures_are_searchers() {
	let canned = |term: &str| vec![SearchableItem::food("k1", term)];
	let searcher: &dyn Searcher = &canned;
	assert_eq!(searcher.search("kiwi")[0].name, "kiwi");
}

//! Union of remote and local search contributions.
//!
//! Sources are inserted in a fixed priority order so that, when two sources
//! return the same record, the higher-priority copy is the one kept:
//! prefix results, then token results, then recipes, then local fallback.

use indexmap::IndexMap;

use crate::item::{ItemKey, SearchableItem};
use crate::score::rank;

/// Default cap on the number of merged results handed to the UI.
pub const MAX_RESULTS: usize = 20;

/// Insertion-ordered, identity-keyed accumulator for search results.
#[derive(Debug, Default, Clone)]
pub struct ResultMerger {
	entries: IndexMap<ItemKey, SearchableItem>,
}

impl ResultMerger {
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert every item, replacing nothing that is already present.
	///
	/// Used for the first (highest priority) source; duplicates inside that
	/// source keep their first occurrence.
	pub fn insert_primary(&mut self, items: impl IntoIterator<Item = SearchableItem>) {
		self.insert_if_absent(items);
	}

	/// Insert items whose key has not been seen yet.
	pub fn insert_if_absent(&mut self, items: impl IntoIterator<Item = SearchableItem>) {
		for item in items {
			self.entries.entry(item.key()).or_insert(item);
		}
	}

	/// Insert recipe results.
	///
	/// Recipe keys live in their own namespace, so these never displace a
	/// food entry.
	pub fn insert_recipes(&mut self, recipes: impl IntoIterator<Item = SearchableItem>) {
		for mut recipe in recipes {
			recipe.is_recipe = true;
			self.entries.entry(recipe.key()).or_insert(recipe);
		}
	}

	#[must_use]
	pub fn contains(&self, key: &ItemKey) -> bool {
		self.entries.contains_key(key)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Rank the union against `normalized_term` and keep the best `limit`.
	#[must_use]
	pub fn finish(self, normalized_term: &str, limit: usize) -> Vec<SearchableItem> {
		let mut items: Vec<SearchableItem> = self.entries.into_values().collect();
		rank(&mut items, normalized_term);
		items.truncate(limit);
		items
	}
}

/// Merge the contributions of every source into a ranked, deduplicated list.
#[must_use]
pub fn merge(
	normalized_term: &str,
	prefix: Vec<SearchableItem>,
	token: Vec<SearchableItem>,
	recipes: Option<Vec<SearchableItem>>,
	local: Vec<SearchableItem>,
	limit: usize,
) -> Vec<SearchableItem> {
	let mut merger = ResultMerger::new();
	merger.insert_primary(prefix);
	merger.insert_if_absent(token);
	if let Some(recipes) = recipes {
		merger.insert_recipes(recipes);
	}
	merger.insert_if_absent(local);
	merger.finish(normalized_term, limit)
}

//! Client-side scan of cached items.
//!
//! Covers what the remote lookups miss: the client being offline, a record
//! written moments ago that the remote index has not caught up with, and
//! substring matches the store cannot answer efficiently.

use crate::item::{SearchableItem, term_tokens};
use crate::merge::ResultMerger;

/// Whether a cached item matches `term` under the local rules.
///
/// Looser than the remote token lookup: the term may appear anywhere in the
/// lowercased name.
#[must_use]
pub fn matches_locally(item: &SearchableItem, term: &str) -> bool {
	item.folded_name().contains(term)
		|| term_tokens(term).any(|token| item.search_tokens.iter().any(|stored| stored == token))
}

/// Add cached foods and recipes matching `term` that the merger has not seen.
///
/// Returns how many items were added.
pub fn scan_local(
	term: &str,
	foods: &[SearchableItem],
	recipes: &[SearchableItem],
	merger: &mut ResultMerger,
) -> usize {
	let before = merger.len();

	let food_hits = foods
		.iter()
		.filter(|food| !merger.contains(&food.key()) && matches_locally(food, term))
		.cloned()
		.collect::<Vec<_>>();
	merger.insert_if_absent(food_hits);

	let recipe_hits = recipes
		.iter()
		.map(|recipe| {
			let mut recipe = recipe.clone();
			recipe.is_recipe = true;
			recipe
		})
		.filter(|recipe| !merger.contains(&recipe.key()) && matches_locally(recipe, term))
		.collect::<Vec<_>>();
	merger.insert_if_absent(recipe_hits);

	merger.len() - before
}

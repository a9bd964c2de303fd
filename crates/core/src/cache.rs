//! Read access to the application's in-memory item caches.
//!
//! The owning application refreshes the caches (for example from realtime
//! subscriptions) by swapping in a whole new [`CacheSnapshot`]; searches only
//! ever read the snapshot that was current when they started.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::item::SearchableItem;

/// Names of the caches the search pipeline reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheName {
	Foods,
	Recipes,
}

impl CacheName {
	pub fn as_str(self) -> &'static str {
		match self {
			CacheName::Foods => "foods",
			CacheName::Recipes => "recipes",
		}
	}
}

/// Synchronous read of previously loaded items.
pub trait LocalCache: Send + Sync {
	fn items(&self, name: CacheName) -> Arc<[SearchableItem]>;
}

/// Immutable contents of both caches at one point in time.
#[derive(Debug, Clone)]
pub struct CacheSnapshot {
	pub foods: Arc<[SearchableItem]>,
	pub recipes: Arc<[SearchableItem]>,
}

impl Default for CacheSnapshot {
	fn default() -> Self {
		Self::new(Vec::new(), Vec::new())
	}
}

impl CacheSnapshot {
	pub fn new(foods: Vec<SearchableItem>, mut recipes: Vec<SearchableItem>) -> Self {
		for recipe in &mut recipes {
			recipe.is_recipe = true;
		}
		Self {
			foods: foods.into(),
			recipes: recipes.into(),
		}
	}
}

impl LocalCache for CacheSnapshot {
	fn items(&self, name: CacheName) -> Arc<[SearchableItem]> {
		match name {
			CacheName::Foods => Arc::clone(&self.foods),
			CacheName::Recipes => Arc::clone(&self.recipes),
		}
	}
}

/// Cache handle shared between the application (writer) and searches (readers).
#[derive(Debug, Default)]
pub struct SharedCache {
	current: ArcSwap<CacheSnapshot>,
}

impl SharedCache {
	pub fn new(snapshot: CacheSnapshot) -> Self {
		Self {
			current: ArcSwap::from_pointee(snapshot),
		}
	}

	/// Publish a new snapshot; in-flight searches keep the one they loaded.
	pub fn replace(&self, snapshot: CacheSnapshot) {
		self.current.store(Arc::new(snapshot));
	}

	pub fn snapshot(&self) -> Arc<CacheSnapshot> {
		self.current.load_full()
	}
}

impl LocalCache for SharedCache {
	fn items(&self, name: CacheName) -> Arc<[SearchableItem]> {
		self.current.load().items(name)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn replacing_snapshot_does_not_affect_loaded_readers() {
		let cache = SharedCache::new(CacheSnapshot::new(
			vec![SearchableItem::food("f1", "Mela")],
			Vec::new(),
		));
		let before = cache.items(CacheName::Foods);

		cache.replace(CacheSnapshot::new(
			vec![
				SearchableItem::food("f1", "Mela"),
				SearchableItem::food("f2", "Pera"),
			],
			Vec::new(),
		));

		assert_eq!(before.len(), 1);
		assert_eq!(cache.items(CacheName::Foods).len(), 2);
	}

	#[test]
	fn cached_recipes_are_flagged() {
		let snapshot = CacheSnapshot::new(Vec::new(), vec![SearchableItem::food("r1", "Pesto")]);
		assert!(snapshot.items(CacheName::Recipes)[0].is_recipe);
	}
}

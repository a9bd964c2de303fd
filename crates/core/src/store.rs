//! Seam to the remote document database.
//!
//! The pipeline only needs three primitives: a prefix-range query over a
//! string field, an exact-membership query over an array field, and a
//! lookup by id. [`MemoryStore`] implements them over an in-memory snapshot
//! and [`OfflineStore`] fails every call.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::item::SearchableItem;

/// Collection holding the shared food database.
pub const FOODS_COLLECTION: &str = "foods";
/// Field storing the lowercased display name.
pub const NAME_LOWERCASE_FIELD: &str = "nameLowercase";
/// Field storing the array of search tokens.
pub const SEARCH_TOKENS_FIELD: &str = "searchTokens";
/// Upper bound appended to a term to turn a range query into "starts with".
pub const HIGH_SENTINEL: char = '\u{f8ff}';

/// Collection path of a user's private recipes.
#[must_use]
pub fn recipes_collection(user_id: &str) -> String {
	format!("users/{user_id}/recipes")
}

/// Upper bound of the prefix range for `term`.
#[must_use]
pub fn prefix_upper_bound(term: &str) -> String {
	let mut upper = String::with_capacity(term.len() + HIGH_SENTINEL.len_utf8());
	upper.push_str(term);
	upper.push(HIGH_SENTINEL);
	upper
}

/// Errors returned by a [`DocumentStore`].
#[derive(Debug, Error)]
pub enum StoreError {
	/// The store could not be reached.
	#[error("document store unavailable: {0}")]
	Unavailable(String),
	/// The query addressed a field the store cannot filter on.
	#[error("unsupported query on {collection}.{field}")]
	InvalidQuery { collection: String, field: String },
	/// No document with the requested id exists.
	#[error("document {id} not found in {collection}")]
	NotFound { collection: String, id: String },
	/// A snapshot file could not be read or parsed.
	#[error("failed to load snapshot {path}: {reason}")]
	Snapshot { path: PathBuf, reason: String },
}

/// Remote document database as consumed by the search pipeline.
pub trait DocumentStore: Send + Sync {
	/// Documents whose `field` lies in `[lower, upper)`, ordered by `field`.
	fn query_by_prefix_range(
		&self,
		collection: &str,
		field: &str,
		lower: &str,
		upper: &str,
		limit: usize,
	) -> Result<Vec<SearchableItem>, StoreError>;

	/// Documents whose array `field` contains `value`.
	fn query_by_array_contains(
		&self,
		collection: &str,
		field: &str,
		value: &str,
		limit: usize,
	) -> Result<Vec<SearchableItem>, StoreError>;

	/// A single document by id.
	fn get_by_id(&self, collection: &str, id: &str) -> Result<SearchableItem, StoreError>;
}

/// On-disk layout of a store snapshot.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Snapshot {
	pub foods: Vec<SearchableItem>,
	pub users: HashMap<String, UserSnapshot>,
}

/// Per-user part of a [`Snapshot`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserSnapshot {
	pub recipes: Vec<SearchableItem>,
}

impl Snapshot {
	/// Read a snapshot from a JSON file.
	pub fn from_path(path: &Path) -> Result<Self, StoreError> {
		let raw = fs::read_to_string(path).map_err(|err| StoreError::Snapshot {
			path: path.to_path_buf(),
			reason: err.to_string(),
		})?;
		serde_json::from_str(&raw).map_err(|err| StoreError::Snapshot {
			path: path.to_path_buf(),
			reason: err.to_string(),
		})
	}
}

/// Document store backed by in-memory collections.
#[derive(Debug, Default)]
pub struct MemoryStore {
	collections: HashMap<String, BTreeMap<String, SearchableItem>>,
	latency: Option<Duration>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a store from a parsed snapshot.
	pub fn from_snapshot(snapshot: Snapshot) -> Self {
		let mut store = Self::new();
		store.insert_all(FOODS_COLLECTION, snapshot.foods);
		for (user_id, user) in snapshot.users {
			let recipes = user.recipes.into_iter().map(|mut recipe| {
				recipe.is_recipe = true;
				recipe
			});
			store.insert_all(&recipes_collection(&user_id), recipes);
		}
		store
	}

	/// Delay every call by `latency`, simulating a remote round trip.
	#[must_use]
	pub fn with_latency(mut self, latency: Duration) -> Self {
		self.latency = (!latency.is_zero()).then_some(latency);
		self
	}

	/// Insert or replace documents in `collection`.
	pub fn insert_all(
		&mut self,
		collection: &str,
		items: impl IntoIterator<Item = SearchableItem>,
	) {
		let docs = self.collections.entry(collection.to_string()).or_default();
		for mut item in items {
			item.ensure_search_fields();
			docs.insert(item.id.clone(), item);
		}
	}

	/// Every document of `collection`, in id order.
	pub fn documents(&self, collection: &str) -> Vec<SearchableItem> {
		self.collections
			.get(collection)
			.map(|docs| docs.values().cloned().collect())
			.unwrap_or_default()
	}

	fn simulate_latency(&self) {
		if let Some(latency) = self.latency {
			thread::sleep(latency);
		}
	}
}

impl DocumentStore for MemoryStore {
	fn query_by_prefix_range(
		&self,
		collection: &str,
		field: &str,
		lower: &str,
		upper: &str,
		limit: usize,
	) -> Result<Vec<SearchableItem>, StoreError> {
		self.simulate_latency();
		if field != NAME_LOWERCASE_FIELD {
			return Err(StoreError::InvalidQuery {
				collection: collection.to_string(),
				field: field.to_string(),
			});
		}
		let Some(docs) = self.collections.get(collection) else {
			return Ok(Vec::new());
		};

		let mut hits: Vec<&SearchableItem> = docs
			.values()
			.filter(|doc| {
				let value = doc.name_lowercase.as_str();
				value >= lower && value < upper
			})
			.collect();
		hits.sort_by(|a, b| a.name_lowercase.cmp(&b.name_lowercase).then_with(|| a.id.cmp(&b.id)));
		Ok(hits.into_iter().take(limit).cloned().collect())
	}

	fn query_by_array_contains(
		&self,
		collection: &str,
		field: &str,
		value: &str,
		limit: usize,
	) -> Result<Vec<SearchableItem>, StoreError> {
		self.simulate_latency();
		if field != SEARCH_TOKENS_FIELD {
			return Err(StoreError::InvalidQuery {
				collection: collection.to_string(),
				field: field.to_string(),
			});
		}
		let Some(docs) = self.collections.get(collection) else {
			return Ok(Vec::new());
		};

		Ok(docs
			.values()
			.filter(|doc| doc.search_tokens.iter().any(|token| token == value))
			.take(limit)
			.cloned()
			.collect())
	}

	fn get_by_id(&self, collection: &str, id: &str) -> Result<SearchableItem, StoreError> {
		self.simulate_latency();
		self.collections
			.get(collection)
			.and_then(|docs| docs.get(id))
			.cloned()
			.ok_or_else(|| StoreError::NotFound {
				collection: collection.to_string(),
				id: id.to_string(),
			})
	}
}

/// Store that behaves like a client without network access.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineStore;

impl OfflineStore {
	fn unavailable() -> StoreError {
		StoreError::Unavailable("client is offline".to_string())
	}
}

impl DocumentStore for OfflineStore {
	fn query_by_prefix_range(
		&self,
		_collection: &str,
		_field: &str,
		_lower: &str,
		_upper: &str,
		_limit: usize,
	) -> Result<Vec<SearchableItem>, StoreError> {
		Err(Self::unavailable())
	}

	fn query_by_array_contains(
		&self,
		_collection: &str,
		_field: &str,
		_value: &str,
		_limit: usize,
	) -> Result<Vec<SearchableItem>, StoreError> {
		Err(Self::unavailable())
	}

	fn get_by_id(&self, _collection: &str, _id: &str) -> Result<SearchableItem, StoreError> {
		Err(Self::unavailable())
	}
}

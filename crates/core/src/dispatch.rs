//! Concurrent remote lookups with a settle-all policy.
//!
//! Each lookup runs on its own scoped thread and is joined independently.
//! A failed (or panicked) lookup contributes nothing; only when every
//! attempted lookup fails is the user told, once.

use std::thread;

use tracing::{debug, error, warn};

use crate::item::SearchableItem;
use crate::notify::{Notifier, Severity};
use crate::store::{
	DocumentStore, FOODS_COLLECTION, NAME_LOWERCASE_FIELD, SEARCH_TOKENS_FIELD, StoreError,
	prefix_upper_bound,
};

/// Message shown when no remote lookup could be completed.
pub const SEARCH_UNAVAILABLE_MESSAGE: &str = "Search is unavailable right now";

/// Identifies one of the remote lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
	Prefix,
	Token,
	RecipePrefix,
}

impl LookupKind {
	pub fn as_str(self) -> &'static str {
		match self {
			LookupKind::Prefix => "prefix",
			LookupKind::Token => "token",
			LookupKind::RecipePrefix => "recipe-prefix",
		}
	}
}

/// Recipe lookup scoped to one user's collection.
#[derive(Debug, Clone)]
pub struct RecipeLookup {
	pub collection: String,
	pub limit: usize,
}

/// The set of lookups to issue for one normalized term.
#[derive(Debug, Clone)]
pub struct LookupPlan {
	pub term: String,
	pub page_size: usize,
	pub recipes: Option<RecipeLookup>,
}

/// Settled contributions of every lookup in a plan.
#[derive(Debug, Default)]
pub struct DispatchOutcome {
	pub prefix: Vec<SearchableItem>,
	pub token: Vec<SearchableItem>,
	/// `None` when the plan had no recipe lookup.
	pub recipes: Option<Vec<SearchableItem>>,
	pub attempted: usize,
	pub failed: usize,
}

impl DispatchOutcome {
	#[must_use]
	pub fn all_failed(&self) -> bool {
		self.attempted > 0 && self.failed == self.attempted
	}

	/// Number of remote records returned across all lookups.
	#[must_use]
	pub fn remote_hits(&self) -> usize {
		self.prefix.len() + self.token.len() + self.recipes.as_ref().map_or(0, Vec::len)
	}
}

type LookupResult = Result<Vec<SearchableItem>, StoreError>;

/// Issues the lookups of a [`LookupPlan`] against a store.
pub struct Dispatcher<'a> {
	store: &'a dyn DocumentStore,
	notifier: &'a dyn Notifier,
}

impl<'a> Dispatcher<'a> {
	pub fn new(store: &'a dyn DocumentStore, notifier: &'a dyn Notifier) -> Self {
		Self { store, notifier }
	}

	/// Run every lookup in `plan` concurrently and wait for all of them.
	pub fn dispatch(&self, plan: &LookupPlan) -> DispatchOutcome {
		let store = self.store;
		let term = plan.term.as_str();
		let upper = prefix_upper_bound(term);
		let upper = upper.as_str();

		let (prefix, token, recipes) = thread::scope(|scope| {
			let prefix = scope.spawn(move || {
				store.query_by_prefix_range(
					FOODS_COLLECTION,
					NAME_LOWERCASE_FIELD,
					term,
					upper,
					plan.page_size,
				)
			});
			let token = scope.spawn(move || {
				store.query_by_array_contains(
					FOODS_COLLECTION,
					SEARCH_TOKENS_FIELD,
					term,
					plan.page_size,
				)
			});
			let recipes = plan.recipes.as_ref().map(|lookup| {
				scope.spawn(move || {
					store.query_by_prefix_range(
						&lookup.collection,
						NAME_LOWERCASE_FIELD,
						term,
						upper,
						lookup.limit,
					)
				})
			});

			(
				join_lookup(prefix),
				join_lookup(token),
				recipes.map(join_lookup),
			)
		});

		let mut tally = Tally::default();
		let prefix = tally.settle(LookupKind::Prefix, prefix);
		let token = tally.settle(LookupKind::Token, token);
		let recipes = recipes.map(|result| tally.settle(LookupKind::RecipePrefix, result));
		let outcome = DispatchOutcome {
			prefix,
			token,
			recipes,
			attempted: tally.attempted,
			failed: tally.failed,
		};

		if outcome.all_failed() {
			error!(term, attempted = outcome.attempted, "every search lookup failed");
			self.notifier.notify(SEARCH_UNAVAILABLE_MESSAGE, Severity::Error);
		} else {
			debug!(
				term,
				attempted = outcome.attempted,
				failed = outcome.failed,
				hits = outcome.remote_hits(),
				"search lookups settled"
			);
		}

		outcome
	}
}

#[derive(Default)]
struct Tally {
	attempted: usize,
	failed: usize,
}

impl Tally {
	fn settle(&mut self, kind: LookupKind, result: LookupResult) -> Vec<SearchableItem> {
		self.attempted += 1;
		match result {
			Ok(items) => items,
			Err(err) => {
				self.failed += 1;
				warn!(lookup = kind.as_str(), %err, "search lookup failed");
				Vec::new()
			}
		}
	}
}

fn join_lookup(handle: thread::ScopedJoinHandle<'_, LookupResult>) -> LookupResult {
	handle
		.join()
		.unwrap_or_else(|_| Err(StoreError::Unavailable("lookup thread panicked".to_string())))
}

#[cfg(test)]
mod tests {
	use std::sync::Mutex;

	use super::*;
	use crate::store::{MemoryStore, OfflineStore, recipes_collection};

	#[derive(Default)]
	struct RecordingNotifier {
		messages: Mutex<Vec<(String, Severity)>>,
	}

	impl Notifier for RecordingNotifier {
		fn notify(&self, message: &str, severity: Severity) {
			self.messages
				.lock()
				.expect("notifier lock")
				.push((message.to_string(), severity));
		}
	}

	/// Fails only the token lookup.
	struct TokenOutage(MemoryStore);

	impl DocumentStore for TokenOutage {
		fn query_by_prefix_range(
			&self,
			collection: &str,
			field: &str,
			lower: &str,
			upper: &str,
			limit: usize,
		) -> LookupResult {
			self.0.query_by_prefix_range(collection, field, lower, upper, limit)
		}

		fn query_by_array_contains(
			&self,
			_collection: &str,
			_field: &str,
			_value: &str,
			_limit: usize,
		) -> LookupResult {
			Err(StoreError::Unavailable("token index down".to_string()))
		}

		fn get_by_id(&self, collection: &str, id: &str) -> Result<SearchableItem, StoreError> {
			self.0.get_by_id(collection, id)
		}
	}

	fn store() -> MemoryStore {
		let mut store = MemoryStore::new();
		store.insert_all(
			FOODS_COLLECTION,
			[
				SearchableItem::food("f1", "Mela"),
				SearchableItem::food("f2", "Succo di mela"),
			],
		);
		store.insert_all(&recipes_collection("u1"), [SearchableItem::recipe("r1", "Mela cotta")]);
		store
	}

	fn plan(with_recipes: bool) -> LookupPlan {
		LookupPlan {
			term: "mela".to_string(),
			page_size: 10,
			recipes: with_recipes.then(|| RecipeLookup {
				collection: recipes_collection("u1"),
				limit: 10,
			}),
		}
	}

	#[test]
	fn all_lookups_contribute() {
		let notifier = RecordingNotifier::default();
		let store = store();
		let outcome = Dispatcher::new(&store, &notifier).dispatch(&plan(true));

		assert_eq!(outcome.attempted, 3);
		assert_eq!(outcome.failed, 0);
		assert_eq!(outcome.prefix.len(), 1);
		assert_eq!(outcome.token.len(), 2);
		assert_eq!(outcome.recipes.as_ref().map(Vec::len), Some(1));
		assert!(notifier.messages.lock().unwrap().is_empty());
	}

	#[test]
	fn partial_failure_is_silent() {
		let notifier = RecordingNotifier::default();
		let store = TokenOutage(store());
		let outcome = Dispatcher::new(&store, &notifier).dispatch(&plan(false));

		assert_eq!(outcome.attempted, 2);
		assert_eq!(outcome.failed, 1);
		assert_eq!(outcome.prefix.len(), 1);
		assert!(outcome.token.is_empty());
		assert!(outcome.recipes.is_none());
		assert!(notifier.messages.lock().unwrap().is_empty());
	}

	#[test]
	fn total_failure_notifies_once() {
		let notifier = RecordingNotifier::default();
		let outcome = Dispatcher::new(&OfflineStore, &notifier).dispatch(&plan(true));

		assert!(outcome.all_failed());
		assert_eq!(outcome.remote_hits(), 0);
		let messages = notifier.messages.lock().unwrap();
		assert_eq!(
			*messages,
			vec![(SEARCH_UNAVAILABLE_MESSAGE.to_string(), Severity::Error)]
		);
	}
}

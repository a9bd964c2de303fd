//! Food and recipe search for the `mealdex` meal log.
//!
//! The crate is a pure data pipeline: a term goes in, a ranked and
//! deduplicated list of [`SearchableItem`]s comes out. Rendering lives in
//! `mealdex-tui`; this crate never touches a terminal.
//!
//! The pieces, leaves first:
//!
//! - [`score`] rates one item against a term and orders result sets.
//! - [`merge`] unions the sources by [`ItemKey`] in priority order.
//! - [`dispatch`] runs the remote lookups concurrently, settling all of them.
//! - [`fallback`] scans the in-memory caches for anything the store missed.
//! - [`context`] ties them together behind [`SearchContext`].

pub mod cache;
pub mod context;
pub mod dispatch;
pub mod fallback;
pub mod item;
pub mod merge;
pub mod notify;
pub mod score;
pub mod store;

pub use crate::cache::{CacheName, CacheSnapshot, LocalCache, SharedCache};
pub use crate::context::{ScopedSearch, SearchContext, SearchOptions, SearchScope, Searcher};
pub use crate::dispatch::{DispatchOutcome, Dispatcher, LookupPlan, SEARCH_UNAVAILABLE_MESSAGE};
pub use crate::item::{ItemKey, Nutrition, SearchableItem, normalize_term, tokenize_name};
pub use crate::merge::{MAX_RESULTS, ResultMerger, merge};
pub use crate::notify::{LogNotifier, Notifier, Severity};
pub use crate::score::{MatchTier, rank, score};
pub use crate::store::{DocumentStore, MemoryStore, OfflineStore, Snapshot, StoreError};

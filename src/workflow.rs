use std::sync::Arc;

use anyhow::{Context, Result};
use mealdex_core::{
	CacheSnapshot, DocumentStore, LogNotifier, MemoryStore, Notifier, OfflineStore, ScopedSearch,
	SearchContext, SearchOptions, SearchScope, SharedCache, Snapshot,
};
use mealdex_tui::{UiOptions, toast};
use tracing::info;

use crate::cli::MealReport;
use crate::settings::ResolvedConfig;

/// Store, caches and options assembled from the resolved configuration.
pub(crate) struct MealWorkflow {
	store: Arc<dyn DocumentStore>,
	cache: Arc<SharedCache>,
	user_id: Option<String>,
	scope: SearchScope,
	search: SearchOptions,
	ui: UiOptions,
}

impl MealWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
		let ResolvedConfig {
			data,
			scope,
			search,
			ui,
			..
		} = config;

		let snapshot = match &data.snapshot {
			Some(path) => Snapshot::from_path(path)
				.with_context(|| format!("failed to load data snapshot {}", path.display()))?,
			None => Snapshot::default(),
		};
		let cache = Arc::new(SharedCache::new(cache_snapshot(
			&snapshot,
			data.user_id.as_deref(),
		)));

		let store: Arc<dyn DocumentStore> = if data.offline {
			Arc::new(OfflineStore)
		} else {
			Arc::new(MemoryStore::from_snapshot(snapshot).with_latency(data.latency))
		};
		info!(
			offline = data.offline,
			user = data.user_id.as_deref().unwrap_or("-"),
			scope = scope.as_str(),
			"search workflow ready"
		);

		Ok(Self {
			store,
			cache,
			user_id: data.user_id,
			scope,
			search,
			ui,
		})
	}

	fn context(&self, notifier: Arc<dyn Notifier>) -> Arc<SearchContext> {
		let mut context = SearchContext::new(Arc::clone(&self.store), self.cache.clone())
			.with_notifier(notifier)
			.with_options(self.search);
		if let Some(user) = &self.user_id {
			context = context.with_user(user.clone());
		}
		Arc::new(context)
	}

	/// Run one composite search and report the ranked list.
	pub(crate) fn search_once(&self, term: &str) -> MealReport {
		let context = self.context(Arc::new(LogNotifier));
		let items = context.search(self.scope, term);
		MealReport::Results {
			term: term.to_string(),
			items,
		}
	}

	/// Run the interactive meal-log screen until the user exits.
	pub(crate) fn run_interactive(self) -> Result<MealReport> {
		let (notifier, toasts) = toast::channel();
		let context = self.context(Arc::new(notifier));
		let searcher = Arc::new(ScopedSearch::new(Arc::clone(&context), self.scope));
		let outcome = mealdex_tui::run(searcher, Some(context), toasts, self.ui)?;
		Ok(MealReport::Session(outcome))
	}
}

/// Locally cached copies: every snapshot food plus the signed-in user's recipes.
fn cache_snapshot(snapshot: &Snapshot, user_id: Option<&str>) -> CacheSnapshot {
	let recipes = user_id
		.and_then(|user| snapshot.users.get(user))
		.map(|user| user.recipes.clone())
		.unwrap_or_default();
	CacheSnapshot::new(snapshot.foods.clone(), recipes)
}

//! Background search worker thread and command infrastructure.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::{io, thread};

use mealdex_core::{SearchableItem, Searcher};
use tracing::{debug, trace, warn};

/// Commands understood by the background search worker.
#[derive(Debug)]
pub enum SearchCommand {
	/// Run the searcher for the provided term.
	Query {
		/// Identifier that allows the UI to correlate responses with the originating query.
		id: u64,
		/// Normalized search term.
		term: String,
	},
	/// Stop the background worker thread.
	Shutdown,
}

/// Ranked items produced for one query.
#[derive(Debug, Clone)]
pub struct SearchResponse {
	pub id: u64,
	pub term: String,
	pub items: Vec<SearchableItem>,
}

/// Launches the background search worker thread and returns communication channels.
pub fn spawn(
	searcher: Arc<dyn Searcher>,
) -> (
	Sender<SearchCommand>,
	Receiver<SearchResponse>,
	Arc<AtomicU64>,
) {
	let (command_tx, command_rx) = mpsc::channel();
	let (result_tx, result_rx) = mpsc::channel();
	let latest_query_id = Arc::new(AtomicU64::new(0));
	let thread_latest = Arc::clone(&latest_query_id);

	thread::spawn(move || worker_loop(searcher, command_rx, result_tx, thread_latest));

	(command_tx, result_rx, latest_query_id)
}

fn worker_loop(
	searcher: Arc<dyn Searcher>,
	command_rx: Receiver<SearchCommand>,
	result_tx: Sender<SearchResponse>,
	latest_query_id: Arc<AtomicU64>,
) {
	while let Ok(command) = command_rx.recv() {
		if !handle_command(&searcher, &result_tx, &latest_query_id, command) {
			break;
		}
	}
	debug!("search worker stopped");
}

fn handle_command(
	searcher: &Arc<dyn Searcher>,
	result_tx: &Sender<SearchResponse>,
	latest_query_id: &Arc<AtomicU64>,
	command: SearchCommand,
) -> bool {
	match command {
		SearchCommand::Query { id, term } => {
			if latest_query_id.load(Ordering::Acquire) != id {
				trace!(id, term = %term, "skipping superseded query");
				return true;
			}
			let searcher = Arc::clone(searcher);
			let query_tx = result_tx.clone();
			let query = term.clone();
			let spawned = thread::Builder::new()
				.name(format!("mealdex-search-{id}"))
				.spawn(move || {
					let items = searcher.search(&query);
					let _ = query_tx.send(SearchResponse {
						id,
						term: query,
						items,
					});
				});
			if let Err(err) = spawned {
				report_failed_start(result_tx, id, term, &err);
			}
			true
		}
		SearchCommand::Shutdown => false,
	}
}

/// Answer a query whose thread never started so the UI stops waiting on it.
fn report_failed_start(
	result_tx: &Sender<SearchResponse>,
	id: u64,
	term: String,
	err: &io::Error,
) {
	warn!(id, %err, "failed to start search thread");
	let _ = result_tx.send(SearchResponse {
		id,
		term,
		items: Vec::new(),
	});
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn failed_thread_start_still_answers_the_query() {
		let (result_tx, result_rx) = mpsc::channel();
		report_failed_start(&result_tx, 7, "pane".into(), &io::Error::other("no threads left"));

		let response = result_rx.try_recv().expect("response");
		assert_eq!(response.id, 7);
		assert_eq!(response.term, "pane");
		assert!(response.items.is_empty());
	}
}

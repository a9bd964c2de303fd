//! Query sequencing between the search field and the background worker.

mod worker;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::mpsc::{Receiver, Sender, TryRecvError};

use mealdex_core::Searcher;
use tracing::trace;

pub use self::worker::{SearchCommand, SearchResponse, spawn};

/// UI-side handle of the search worker.
///
/// Every issued query gets a fresh id; only the response carrying the most
/// recent id is ever handed back to the caller.
pub struct SearchRuntime {
	tx: Sender<SearchCommand>,
	rx: Receiver<SearchResponse>,
	latest_query_id: Arc<AtomicU64>,
	next_query_id: u64,
	current_query_id: Option<u64>,
	in_flight: bool,
}

impl SearchRuntime {
	pub fn new(searcher: Arc<dyn Searcher>) -> Self {
		let (tx, rx, latest_query_id) = spawn(searcher);
		Self {
			tx,
			rx,
			latest_query_id,
			next_query_id: 0,
			current_query_id: None,
			in_flight: false,
		}
	}

	pub fn shutdown(&self) {
		let _ = self.tx.send(SearchCommand::Shutdown);
	}

	/// Send `term` to the worker, superseding every earlier query.
	pub fn issue_search(&mut self, term: String) -> u64 {
		let id = self.bump();
		self.in_flight = true;
		let _ = self.tx.send(SearchCommand::Query { id, term });
		id
	}

	/// Supersede any outstanding query without issuing a new one.
	pub fn invalidate(&mut self) {
		self.bump();
		self.current_query_id = None;
		self.in_flight = false;
	}

	fn bump(&mut self) -> u64 {
		self.next_query_id = self.next_query_id.saturating_add(1);
		let id = self.next_query_id;
		self.current_query_id = Some(id);
		self.latest_query_id.store(id, AtomicOrdering::Release);
		id
	}

	pub fn matches_latest(&self, result_id: u64) -> bool {
		Some(result_id) == self.current_query_id
	}

	pub fn has_issued_query(&self) -> bool {
		self.current_query_id.is_some()
	}

	pub fn is_in_flight(&self) -> bool {
		self.in_flight
	}

	pub fn try_recv(&mut self) -> Result<SearchResponse, TryRecvError> {
		self.rx.try_recv()
	}

	/// Drain waiting responses and return the one for the latest query.
	///
	/// Stale responses are discarded.
	pub fn pump(&mut self) -> Option<SearchResponse> {
		let mut latest = None;
		loop {
			match self.try_recv() {
				Ok(response) if self.matches_latest(response.id) => {
					self.in_flight = false;
					latest = Some(response);
				}
				Ok(response) => {
					trace!(id = response.id, term = %response.term, "dropping stale search result");
				}
				Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
			}
		}
		latest
	}
}

impl Drop for SearchRuntime {
	fn drop(&mut self) {
		self.shutdown();
	}
}

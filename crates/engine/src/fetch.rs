//! Debounced candidate fetching.
//!
//! Each keystroke in an active trigger session re-arms a cancellable timer;
//! only the most recent keystroke's timer survives the quiet period. A timer
//! that has already fired has dispatched its fetch, and a dispatched fetch
//! cannot be recalled: its result lands whenever the supplier resolves, even
//! if a newer fetch finished first. That stale-overwrite window is a known
//! gap, demonstrated in the engine tests rather than papered over with a
//! sequence guard.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use atmark_score::Candidate;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Error produced by a rejecting candidate supplier.
#[derive(Debug, Clone, Error)]
#[error("candidate supplier failed: {0}")]
pub struct SupplierError(pub String);

/// Supplies a full replacement candidate list.
///
/// The engine never merges partial results; whatever a fetch resolves to
/// replaces the whole working set.
#[async_trait]
pub trait CandidateSupplier: Send + Sync {
	async fn fetch(&self) -> Result<Vec<Candidate>, SupplierError>;
}

pub(crate) type FetchOutcome = Result<Vec<Candidate>, SupplierError>;

/// Cancel-and-reschedule debounce around a [`CandidateSupplier`].
pub(crate) struct DebouncedFetcher {
	supplier: Arc<dyn CandidateSupplier>,
	delay: Duration,
	pending: Option<CancellationToken>,
	outcomes: mpsc::UnboundedSender<FetchOutcome>,
}

impl DebouncedFetcher {
	pub(crate) fn new(
		supplier: Arc<dyn CandidateSupplier>,
		delay: Duration,
	) -> (Self, mpsc::UnboundedReceiver<FetchOutcome>) {
		let (outcomes, rx) = mpsc::unbounded_channel();
		(
			Self {
				supplier,
				delay,
				pending: None,
				outcomes,
			},
			rx,
		)
	}

	/// Cancels any pending timer and arms a fresh one. When the timer fires
	/// the supplier is invoked and its outcome queued for [`pump`]ing.
	///
	/// [`pump`]: crate::Mentions::pump
	pub(crate) fn arm(&mut self) {
		self.cancel();
		let token = CancellationToken::new();
		self.pending = Some(token.clone());

		let supplier = Arc::clone(&self.supplier);
		let outcomes = self.outcomes.clone();
		let delay = self.delay;
		tokio::spawn(async move {
			tokio::select! {
				_ = token.cancelled() => {}
				_ = tokio::time::sleep(delay) => {
					// Past this point the fetch is committed; cancellation
					// only ever reaches un-fired timers.
					let _ = outcomes.send(supplier.fetch().await);
				}
			}
		});
	}

	/// Cancels the pending timer, if any. Fetches already dispatched keep
	/// running.
	pub(crate) fn cancel(&mut self) {
		if let Some(token) = self.pending.take() {
			token.cancel();
		}
	}
}

impl Drop for DebouncedFetcher {
	fn drop(&mut self) {
		self.cancel();
	}
}

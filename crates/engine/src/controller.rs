//! The mention controller: one instance per editable surface.

use std::time::Duration;

use atmark_score::Candidate;
use atmark_surface::{CaretGeometry, TextModel};
use tokio::sync::mpsc;

use crate::config::MentionConfig;
use crate::fetch::{DebouncedFetcher, FetchOutcome};
use crate::pipeline::{self, Middleware};
use crate::trigger::{self, TriggerState};
use crate::view::{Anchor, SuggestionView};

/// Drives the trigger state machine over one text model and owns that
/// surface's candidate set, middleware chain, debounce timer, and view.
///
/// Instances attached to different surfaces are fully independent; the only
/// process-wide sharing is the measurement scratch inside
/// [`MonospaceGeometry`](atmark_surface::MonospaceGeometry).
pub struct Mentions<M: TextModel> {
	model: M,
	view: Box<dyn SuggestionView>,
	geometry: Box<dyn CaretGeometry>,
	config: MentionConfig,
	candidates: Vec<Candidate>,
	middlewares: Vec<Middleware>,
	fetcher: Option<DebouncedFetcher>,
	outcomes: Option<mpsc::UnboundedReceiver<FetchOutcome>>,
	/// The list currently on screen; selection indices resolve against it.
	visible: Vec<Candidate>,
	destroyed: bool,
}

impl<M: TextModel> Mentions<M> {
	pub fn new(
		model: M,
		view: Box<dyn SuggestionView>,
		geometry: Box<dyn CaretGeometry>,
		mut config: MentionConfig,
	) -> Self {
		let candidates = std::mem::take(&mut config.candidates);
		let (fetcher, outcomes) = match config.supplier.clone() {
			Some(supplier) => {
				let delay = Duration::from_millis(config.debounce_ms);
				let (fetcher, rx) = DebouncedFetcher::new(supplier, delay);
				(Some(fetcher), Some(rx))
			}
			None => (None, None),
		};
		Self {
			model,
			view,
			geometry,
			config,
			candidates,
			middlewares: Vec::new(),
			fetcher,
			outcomes,
			visible: Vec::new(),
			destroyed: false,
		}
	}

	/// The underlying text model.
	pub fn model(&self) -> &M {
		&self.model
	}

	/// Mutable access for the host to apply edits before [`Self::on_input`].
	pub fn model_mut(&mut self) -> &mut M {
		&mut self.model
	}

	/// Appends a middleware stage. Stages run in registration order.
	pub fn use_middleware(&mut self, middleware: Middleware) {
		self.middlewares.push(middleware);
	}

	/// Appends one candidate to the live set.
	pub fn add_candidate(&mut self, candidate: Candidate) {
		self.candidates.push(candidate);
	}

	/// Removes every candidate whose key equals `key`.
	pub fn remove_candidate(&mut self, key: &str) {
		self.candidates.retain(|candidate| candidate.key != key);
	}

	/// Feeds one text-change notification through the state machine.
	///
	/// Derives the trigger session from scratch, then either arms the
	/// debounced fetch (supplier configured) or renders immediately from
	/// the live candidate set.
	pub fn on_input(&mut self) {
		if self.destroyed {
			return;
		}
		match self.current_state() {
			TriggerState::Active { .. } => {
				self.model.capture_snapshot();
				match &mut self.fetcher {
					Some(fetcher) => fetcher.arm(),
					None => self.render(),
				}
			}
			TriggerState::Idle => {
				if let Some(fetcher) = &mut self.fetcher {
					fetcher.cancel();
				}
				self.hide();
			}
		}
	}

	/// Applies completed fetch outcomes. Cooperative single-threaded model:
	/// the host calls this after yielding to the runtime; it never blocks.
	///
	/// Each successful outcome replaces the candidate set wholesale, in
	/// arrival order — a stale fetch that resolves late still wins.
	pub fn pump(&mut self) {
		if self.destroyed {
			return;
		}
		let Some(rx) = &mut self.outcomes else {
			return;
		};
		let mut refreshed = false;
		loop {
			match rx.try_recv() {
				Ok(Ok(list)) => {
					self.candidates = list;
					refreshed = true;
				}
				Ok(Err(error)) => {
					// The view stays in whatever state it was; no retry.
					tracing::warn!(%error, "candidate supplier rejected");
				}
				Err(_) => break,
			}
		}
		if refreshed {
			self.render();
		}
	}

	/// Splices the visible entry at `index` into the text model and hides
	/// the view. Out-of-range indices are ignored.
	pub fn select(&mut self, index: usize) {
		if self.destroyed {
			return;
		}
		let Some(candidate) = self.visible.get(index) else {
			if self.config.verbose {
				tracing::debug!(index, "selection index out of range");
			}
			return;
		};
		let display = candidate.display.clone();
		self.model
			.splice(self.config.trigger, &display, self.config.keep_trigger);
		self.hide();
	}

	/// Hides the view without touching the text. The outside-click path.
	pub fn dismiss(&mut self) {
		if self.destroyed {
			return;
		}
		self.hide();
	}

	/// Cancels timers and tears the view down. Idempotent; also runs on
	/// drop. No other method does anything after this.
	pub fn destroy(&mut self) {
		if self.destroyed {
			return;
		}
		self.destroyed = true;
		if let Some(fetcher) = &mut self.fetcher {
			fetcher.cancel();
		}
		self.visible.clear();
		self.view.teardown();
	}

	fn current_state(&self) -> TriggerState {
		match self.model.text_before_caret() {
			Some(before) => trigger::evaluate(&before, self.config.trigger),
			None => TriggerState::Idle,
		}
	}

	fn hide(&mut self) {
		self.visible.clear();
		self.view.hide();
	}

	/// One render pass: re-derive the query, run the pipeline, then show or
	/// hide. Reached synchronously from [`Self::on_input`] when no supplier
	/// is configured, and from [`Self::pump`] after a fetch lands.
	fn render(&mut self) {
		let query = match self.current_state() {
			TriggerState::Active { .. } => self
				.model
				.query_since_trigger(self.config.trigger)
				.unwrap_or_default(),
			TriggerState::Idle => {
				// The session closed while a fetch was in flight.
				self.hide();
				return;
			}
		};

		let ranked = pipeline::run(
			self.candidates.clone(),
			&self.middlewares,
			self.config.middleware_failure,
			&query,
			self.config.min_score,
			self.config.max_suggestions,
		);
		if ranked.is_empty() {
			if self.config.verbose {
				tracing::debug!(%query, "no suggestions above threshold");
			}
			self.hide();
			return;
		}

		let caret = self
			.model
			.text_before_caret()
			.map(|before| self.geometry.caret_position(&before))
			.unwrap_or(atmark_surface::Point { top: 0.0, left: 0.0 });
		let anchor = Anchor::below_caret(caret, self.geometry.line_height());
		self.view.show(&ranked, anchor);
		self.visible = ranked;
	}
}

impl<M: TextModel> Drop for Mentions<M> {
	fn drop(&mut self) {
		self.destroy();
	}
}

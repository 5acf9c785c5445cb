//! Controller configuration.

use std::sync::Arc;

use atmark_score::Candidate;
use serde::Deserialize;

use crate::fetch::CandidateSupplier;

/// What a failing middleware stage does to the rest of the chain.
///
/// The failing stage itself always collapses to identity; the policy only
/// decides whether the stages after it still run. Upstream implementations
/// of this pattern disagree on the answer, so it is configurable rather
/// than baked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MiddlewareFailure {
	/// Skip the failing stage, keep running the rest (default).
	#[default]
	SkipStage,
	/// A failure also short-circuits the remaining stages.
	AbortChain,
}

/// Configuration for a [`Mentions`](crate::Mentions) controller.
///
/// Every field is independently optional; `Default` (and `#[serde(default)]`
/// for TOML-loaded configs) fills the stated defaults.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct MentionConfig {
	/// Initial candidate list.
	pub candidates: Vec<Candidate>,
	/// Retain the trigger character in front of the inserted text.
	pub keep_trigger: bool,
	/// Character opening a mention context.
	pub trigger: char,
	/// Maximum number of suggestions rendered.
	pub max_suggestions: usize,
	/// Minimum score a candidate needs to survive ranking.
	pub min_score: f64,
	/// Asynchronous replacement-list supplier. Without one, rendering
	/// falls back to static ranking of the live candidate list.
	#[serde(skip)]
	pub supplier: Option<Arc<dyn CandidateSupplier>>,
	/// Quiet period before an armed fetch fires, in milliseconds.
	pub debounce_ms: u64,
	/// Emit chatty diagnostics for recoverable conditions.
	pub verbose: bool,
	/// Failure policy for the middleware chain.
	pub middleware_failure: MiddlewareFailure,
}

impl Default for MentionConfig {
	fn default() -> Self {
		Self {
			candidates: Vec::new(),
			keep_trigger: false,
			trigger: '@',
			max_suggestions: 5,
			min_score: 0.0,
			supplier: None,
			debounce_ms: 300,
			verbose: false,
			middleware_failure: MiddlewareFailure::default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = MentionConfig::default();
		assert_eq!(config.trigger, '@');
		assert!(!config.keep_trigger);
		assert_eq!(config.max_suggestions, 5);
		assert_eq!(config.min_score, 0.0);
		assert_eq!(config.debounce_ms, 300);
		assert!(config.supplier.is_none());
		assert!(!config.verbose);
		assert_eq!(config.middleware_failure, MiddlewareFailure::SkipStage);
	}
}

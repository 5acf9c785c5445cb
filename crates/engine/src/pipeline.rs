//! Suggestion pipeline: middleware chain, scoring, truncation.

use atmark_score::{Candidate, rank};
use thiserror::Error;

use crate::config::MiddlewareFailure;

/// Error returned by a failing middleware stage.
#[derive(Debug, Error)]
#[error("middleware stage failed: {0}")]
pub struct MiddlewareError(pub String);

/// A registered transformation stage. Stages run in registration order,
/// each feeding the next, before scoring ever sees the list.
pub type Middleware = Box<dyn Fn(Vec<Candidate>) -> Result<Vec<Candidate>, MiddlewareError>>;

/// Runs the full render-pass pipeline over a private clone of the candidate
/// set: middlewares in order, then [`rank`], then truncation to `limit`.
///
/// A failing stage is logged and collapses to identity — its input becomes
/// its output. Under [`MiddlewareFailure::AbortChain`] the failure also
/// short-circuits the remaining stages.
pub(crate) fn run(
	candidates: Vec<Candidate>,
	middlewares: &[Middleware],
	failure_policy: MiddlewareFailure,
	query: &str,
	min_score: f64,
	limit: usize,
) -> Vec<Candidate> {
	let mut list = candidates;
	for (stage, middleware) in middlewares.iter().enumerate() {
		match middleware(list.clone()) {
			Ok(next) => list = next,
			Err(error) => {
				tracing::warn!(stage, %error, "suggestion middleware failed");
				if failure_policy == MiddlewareFailure::AbortChain {
					break;
				}
			}
		}
	}
	let mut ranked = rank(list, query, min_score);
	ranked.truncate(limit);
	ranked
}

//! Candidate scoring for mention autocompletion.
//!
//! Scoring is a substring-position heuristic, not edit distance: a query that
//! occurs earlier in the key scores higher. [`rank`] attaches scores to the
//! working list in place, filters by a threshold, and sorts descending.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single suggestable entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Candidate {
	/// The text inserted into the document when this entry is chosen.
	pub display: String,
	/// The identity text the query is matched against. Removal by key
	/// removes every entry sharing this value.
	pub key: String,
	/// Score attached during the last ranking pass; `None` until ranked.
	#[cfg_attr(feature = "serde", serde(skip))]
	pub match_score: Option<f64>,
}

impl Candidate {
	/// Creates an unranked candidate.
	pub fn new(display: impl Into<String>, key: impl Into<String>) -> Self {
		Self {
			display: display.into(),
			key: key.into(),
			match_score: None,
		}
	}
}

/// Scores `query` against `key`, in `[0, 1]`.
///
/// Empty query scores 0. A case-insensitive exact match scores 1. A missing
/// case-insensitive substring scores 0. Otherwise the score is
/// `1 - first_index / len`, both measured in chars, so earlier occurrences
/// rank higher.
pub fn match_score(key: &str, query: &str) -> f64 {
	if query.is_empty() {
		return 0.0;
	}
	let key_lower = key.to_lowercase();
	let query_lower = query.to_lowercase();
	if key_lower == query_lower {
		return 1.0;
	}
	let Some(byte_index) = key_lower.find(&query_lower) else {
		return 0.0;
	};
	let char_index = key_lower[..byte_index].chars().count();
	let char_len = key_lower.chars().count();
	if char_len == 0 {
		return 0.0;
	}
	(1.0 - char_index as f64 / char_len as f64).clamp(0.0, 1.0)
}

/// Ranks `candidates` against `query`, dropping entries under `min_score`.
///
/// An empty query returns the input untouched: no scores are attached, no
/// entry is filtered, and the order is preserved. Otherwise every candidate
/// gets a score attached in place, entries below the threshold are dropped,
/// and the rest are sorted descending. Ordering among equal scores is
/// unspecified.
pub fn rank(mut candidates: Vec<Candidate>, query: &str, min_score: f64) -> Vec<Candidate> {
	if query.is_empty() {
		return candidates;
	}
	for candidate in &mut candidates {
		candidate.match_score = Some(match_score(&candidate.key, query));
	}
	candidates.retain(|candidate| candidate.match_score.unwrap_or(0.0) >= min_score);
	candidates.sort_unstable_by(|a, b| {
		let a = a.match_score.unwrap_or(0.0);
		let b = b.match_score.unwrap_or(0.0);
		b.total_cmp(&a)
	});
	candidates
}

#[cfg(test)]
mod tests {
	use super::*;

	fn keys(candidates: &[Candidate]) -> Vec<&str> {
		candidates.iter().map(|c| c.key.as_str()).collect()
	}

	#[test]
	fn test_score_bounds() {
		for (key, query) in [
			("Alice", "al"),
			("Albert", "bert"),
			("bob", "zzz"),
			("", "a"),
			("key", ""),
			("日本語テスト", "テスト"),
		] {
			let score = match_score(key, query);
			assert!((0.0..=1.0).contains(&score), "{key:?}/{query:?} -> {score}");
		}
	}

	#[test]
	fn test_exact_match_case_insensitive() {
		assert_eq!(match_score("Alice", "alice"), 1.0);
		assert_eq!(match_score("alice", "ALICE"), 1.0);
	}

	#[test]
	fn test_empty_query_scores_zero() {
		assert_eq!(match_score("Alice", ""), 0.0);
	}

	#[test]
	fn test_zero_iff_not_substring() {
		assert_eq!(match_score("Alice", "bob"), 0.0);
		assert!(match_score("Alice", "lic") > 0.0);
	}

	#[test]
	fn test_earlier_occurrence_scores_higher() {
		// "ob" at index 0 of "obi" vs index 1 of "bob".
		assert!(match_score("obi", "ob") > match_score("bob", "ob"));
	}

	#[test]
	fn test_char_indexing_not_bytes() {
		// Multi-byte prefix: index must count chars, or the score would
		// go negative after clamping hides the bug.
		let score = match_score("héllo", "llo");
		assert!((score - (1.0 - 2.0 / 5.0)).abs() < 1e-9);
	}

	#[test]
	fn test_rank_filters_and_sorts_descending() {
		let ranked = rank(
			vec![
				Candidate::new("Bob", "Bob"),
				Candidate::new("Albert", "Albert"),
				Candidate::new("Alice", "alice"),
			],
			"alice",
			0.1,
		);
		assert_eq!(keys(&ranked), ["alice"]);
		assert_eq!(ranked[0].match_score, Some(1.0));
	}

	#[test]
	fn test_rank_threshold_is_inclusive() {
		let ranked = rank(vec![Candidate::new("Alice", "Alice")], "al", 1.0);
		assert_eq!(ranked.len(), 1);
	}

	#[test]
	fn test_rank_orders_by_position() {
		let ranked = rank(
			vec![
				Candidate::new("Carol", "xcarol"),
				Candidate::new("Carl", "carl"),
			],
			"car",
			0.0,
		);
		assert_eq!(keys(&ranked), ["carl", "xcarol"]);
		let scores: Vec<f64> = ranked.iter().map(|c| c.match_score.unwrap()).collect();
		assert!(scores[0] > scores[1]);
	}

	#[test]
	fn test_empty_query_returns_input_untouched() {
		let input = vec![
			Candidate::new("Zed", "Zed"),
			Candidate::new("Alice", "Alice"),
		];
		let out = rank(input.clone(), "", 0.9);
		assert_eq!(out, input);
		assert!(out.iter().all(|c| c.match_score.is_none()));
	}

	#[test]
	fn test_tied_scores_both_survive() {
		// Both contain the query at index 0; relative order among ties is
		// unspecified, but both must be present with score 1.0.
		let ranked = rank(
			vec![
				Candidate::new("Alice", "Alice"),
				Candidate::new("Albert", "Albert"),
			],
			"al",
			0.0,
		);
		assert_eq!(ranked.len(), 2);
		assert!(ranked.iter().all(|c| c.match_score == Some(1.0)));
	}
}

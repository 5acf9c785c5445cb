//! Pure trigger-session derivation.
//!
//! There is no stored session object to drift out of sync with the text:
//! the state is recomputed from the text before the caret on every
//! keystroke, which makes it one testable function.

/// Outcome of evaluating the text before the caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerState {
	/// No mention context at the caret.
	Idle,
	/// A mention context is open; `query` is what was typed after the
	/// trigger character. Never contains a space.
	Active { query: String },
}

impl TriggerState {
	/// The active query, if any.
	pub fn query(&self) -> Option<&str> {
		match self {
			Self::Active { query } => Some(query),
			Self::Idle => None,
		}
	}
}

const NBSP: char = '\u{a0}';

/// Derives the trigger session from the text before the caret.
///
/// Non-breaking spaces are normalized to plain spaces first (editable
/// regions produce them freely), then the text is split on spaces and the
/// session is active exactly when the final token starts with `trigger`.
/// Splitting on spaces is what guarantees the extracted query carries no
/// embedded space: typing past the mention deactivates the session.
pub fn evaluate(text_before_caret: &str, trigger: char) -> TriggerState {
	let normalized = text_before_caret.replace(NBSP, " ");
	let last_token = normalized.split(' ').next_back().unwrap_or("");
	match last_token.strip_prefix(trigger) {
		Some(query) => TriggerState::Active {
			query: query.to_string(),
		},
		None => TriggerState::Idle,
	}
}

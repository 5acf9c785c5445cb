/// A position in a text window, measured in characters (not bytes).
pub type CharIdx = usize;

/// Capability surface shared by both text models.
///
/// Every operation that depends on locating the trigger character degrades to
/// `None` / `false` when the trigger is absent from the relevant window. Such
/// misses are logged as diagnostics and never surface as errors: a mention
/// widget must not take its host down over a caret in an odd place.
pub trait TextModel {
	/// The text from the start of the caret's local window up to the caret.
	///
	/// `None` means the caret is somewhere the model cannot read (only the
	/// tree variant produces this, for a caret outside a text node).
	fn text_before_caret(&self) -> Option<String>;

	/// The span between the last occurrence of `trigger` before the caret
	/// and the caret itself, without the trigger character.
	fn query_since_trigger(&self, trigger: char) -> Option<String>;

	/// Replaces the trigger+query span with `display` (plus a trailing
	/// space), optionally retaining the trigger character, and repositions
	/// the caret just past the insertion.
	///
	/// Returns `false` without touching the model when no trigger is found
	/// or the caret cannot be resolved.
	fn splice(&mut self, trigger: char, display: &str, keep_trigger: bool) -> bool;

	/// Captures the caret location so an asynchronous response arriving
	/// after further edits can still resolve the insertion point.
	///
	/// The flat variant re-reads the live caret at insertion time instead
	/// and keeps this a no-op.
	fn capture_snapshot(&mut self) {}
}

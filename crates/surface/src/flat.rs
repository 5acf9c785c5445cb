//! Flat-buffer text model: one string value plus numeric selection offsets.

use crate::model::{CharIdx, TextModel};

/// A plain input/textarea-like widget: a string value and a selection
/// expressed as char offsets into it.
///
/// Reads use the selection start; the splice tail resumes at the selection
/// end, so an active (non-collapsed) selection is consumed by insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatBuffer {
	value: String,
	selection_start: CharIdx,
	selection_end: CharIdx,
}

impl FlatBuffer {
	/// Creates a buffer with the caret collapsed at the end of `value`.
	pub fn new(value: impl Into<String>) -> Self {
		let value = value.into();
		let caret = value.chars().count();
		Self {
			value,
			selection_start: caret,
			selection_end: caret,
		}
	}

	/// The full buffer content.
	pub fn value(&self) -> &str {
		&self.value
	}

	/// The collapsed caret position (selection start), in chars.
	pub fn caret(&self) -> CharIdx {
		self.selection_start
	}

	/// Collapses the selection at `caret`, clamped to the buffer length.
	pub fn set_caret(&mut self, caret: CharIdx) {
		let caret = caret.min(self.char_len());
		self.selection_start = caret;
		self.selection_end = caret;
	}

	/// Sets an explicit selection range, clamped and normalized.
	pub fn set_selection(&mut self, start: CharIdx, end: CharIdx) {
		let len = self.char_len();
		let start = start.min(len);
		let end = end.min(len);
		self.selection_start = start.min(end);
		self.selection_end = start.max(end);
	}

	/// Types `text` at the caret, replacing any active selection.
	pub fn insert(&mut self, text: &str) {
		let start = self.byte_of(self.selection_start);
		let end = self.byte_of(self.selection_end);
		self.value.replace_range(start..end, text);
		let caret = self.selection_start + text.chars().count();
		self.selection_start = caret;
		self.selection_end = caret;
	}

	fn char_len(&self) -> usize {
		self.value.chars().count()
	}

	fn byte_of(&self, char_idx: CharIdx) -> usize {
		self.value
			.char_indices()
			.nth(char_idx)
			.map(|(byte, _)| byte)
			.unwrap_or(self.value.len())
	}
}

impl TextModel for FlatBuffer {
	fn text_before_caret(&self) -> Option<String> {
		let caret_byte = self.byte_of(self.selection_start);
		Some(self.value[..caret_byte].to_string())
	}

	fn query_since_trigger(&self, trigger: char) -> Option<String> {
		let before = self.text_before_caret()?;
		match before.rfind(trigger) {
			Some(byte_idx) => Some(before[byte_idx + trigger.len_utf8()..].to_string()),
			None => {
				tracing::debug!(%trigger, "trigger not found before caret in flat buffer");
				None
			}
		}
	}

	fn splice(&mut self, trigger: char, display: &str, keep_trigger: bool) -> bool {
		let before = match self.text_before_caret() {
			Some(before) => before,
			None => return false,
		};
		let Some(trigger_byte) = before.rfind(trigger) else {
			tracing::debug!(%trigger, "trigger not found before caret, skipping splice");
			return false;
		};
		let tail_byte = self.byte_of(self.selection_end);

		let mut next = String::with_capacity(self.value.len() + display.len() + 2);
		next.push_str(&self.value[..trigger_byte]);
		if keep_trigger {
			next.push(trigger);
		}
		next.push_str(display);
		next.push(' ');
		let caret = next.chars().count();
		next.push_str(&self.value[tail_byte..]);

		self.value = next;
		self.selection_start = caret;
		self.selection_end = caret;
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_text_before_caret_is_prefix() {
		let mut buffer = FlatBuffer::new("hello @al");
		assert_eq!(buffer.text_before_caret().unwrap(), "hello @al");
		buffer.set_caret(5);
		assert_eq!(buffer.text_before_caret().unwrap(), "hello");
	}

	#[test]
	fn test_query_since_trigger() {
		let buffer = FlatBuffer::new("hello @al");
		assert_eq!(buffer.query_since_trigger('@').unwrap(), "al");
	}

	#[test]
	fn test_query_uses_last_trigger_occurrence() {
		let buffer = FlatBuffer::new("@bob said @al");
		assert_eq!(buffer.query_since_trigger('@').unwrap(), "al");
	}

	#[test]
	fn test_query_missing_trigger_is_none() {
		let buffer = FlatBuffer::new("hello world");
		assert_eq!(buffer.query_since_trigger('@'), None);
	}

	#[test]
	fn test_splice_drops_trigger_by_default() {
		let mut buffer = FlatBuffer::new("hello @al");
		assert!(buffer.splice('@', "Alice", false));
		assert_eq!(buffer.value(), "hello Alice ");
		assert_eq!(buffer.caret(), "hello Alice ".chars().count());
	}

	#[test]
	fn test_splice_keeps_trigger_when_asked() {
		let mut buffer = FlatBuffer::new("hello @al");
		assert!(buffer.splice('@', "Alice", true));
		assert_eq!(buffer.value(), "hello @Alice ");
		assert_eq!(buffer.caret(), "hello @Alice ".chars().count());
	}

	#[test]
	fn test_splice_mid_buffer_preserves_tail() {
		let mut buffer = FlatBuffer::new("hi @al, how are you");
		buffer.set_caret(6); // after "hi @al"
		assert!(buffer.splice('@', "Alice", false));
		assert_eq!(buffer.value(), "hi Alice , how are you");
		assert_eq!(buffer.caret(), "hi Alice ".chars().count());
	}

	#[test]
	fn test_splice_without_trigger_is_noop() {
		let mut buffer = FlatBuffer::new("hello world");
		assert!(!buffer.splice('@', "Alice", false));
		assert_eq!(buffer.value(), "hello world");
	}

	#[test]
	fn test_splice_round_trip_reads_back_display() {
		let mut buffer = FlatBuffer::new("hello @al");
		buffer.splice('@', "Alice", false);
		let before = buffer.text_before_caret().unwrap();
		assert!(before.ends_with("Alice "));
	}

	#[test]
	fn test_splice_multibyte_prefix() {
		let mut buffer = FlatBuffer::new("héllo @al");
		assert!(buffer.splice('@', "Alice", false));
		assert_eq!(buffer.value(), "héllo Alice ");
		assert_eq!(buffer.caret(), "héllo Alice ".chars().count());
	}

	#[test]
	fn test_insert_replaces_active_selection() {
		let mut buffer = FlatBuffer::new("hello world");
		buffer.set_selection(6, 11);
		buffer.insert("@a");
		assert_eq!(buffer.value(), "hello @a");
		assert_eq!(buffer.caret(), 8);
	}
}

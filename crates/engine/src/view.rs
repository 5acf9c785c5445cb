//! Rendering seam for the suggestion list.

use atmark_score::Candidate;
use atmark_surface::Point;

/// Horizontal nudge applied to the anchor so the list clears the caret.
pub const MENU_LEFT_OFFSET: f64 = 2.0;

/// Screen location the suggestion list is anchored at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
	pub top: f64,
	pub left: f64,
}

impl Anchor {
	/// One line below the caret, nudged right of it.
	pub fn below_caret(caret: Point, line_height: f64) -> Self {
		Self {
			top: caret.top + line_height,
			left: caret.left + MENU_LEFT_OFFSET,
		}
	}
}

/// What the engine needs from a rendered suggestion list.
///
/// Selection travels the other way: the host observes its own input (click,
/// key, whatever) and calls [`Mentions::select`](crate::Mentions::select)
/// with the entry index; an outside click maps to
/// [`Mentions::dismiss`](crate::Mentions::dismiss).
pub trait SuggestionView {
	/// Draws `candidates` at `anchor`. Never called with an empty list;
	/// an empty pipeline result hides the view instead.
	fn show(&mut self, candidates: &[Candidate], anchor: Anchor);

	/// Hides the list, keeping resources for the next render.
	fn hide(&mut self);

	/// Releases everything the view holds: listeners, elements, the lot.
	/// Must be idempotent; the engine may call it more than once.
	fn teardown(&mut self);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_anchor_below_caret() {
		let anchor = Anchor::below_caret(Point { top: 3.0, left: 7.0 }, 1.0);
		assert_eq!(anchor.top, 4.0);
		assert_eq!(anchor.left, 7.0 + MENU_LEFT_OFFSET);
	}
}

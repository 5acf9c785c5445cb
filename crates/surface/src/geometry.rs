//! Caret geometry contract and a fixed-pitch reference implementation.
//!
//! The engine only needs viewport coordinates for the caret; how a host
//! measures them is its own business. The monospace measurer here is enough
//! for terminal-cell hosts and for tests.

use std::sync::{Mutex, OnceLock, PoisonError};

use unicode_width::UnicodeWidthStr;

/// Viewport coordinates, in whatever unit the host surface uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
	pub top: f64,
	pub left: f64,
}

/// Supplies caret coordinates for anchoring the suggestion list.
pub trait CaretGeometry {
	/// Coordinates of the caret, given the text before it.
	fn caret_position(&self, text_before_caret: &str) -> Point;

	/// Height of one text line, used to anchor the list below the caret.
	fn line_height(&self) -> f64;
}

/// Shared measurement scratch, one per process.
///
/// Stands in for the single hidden measurement element a document host keeps
/// under a fixed identifier: lazily created on first use, reused by every
/// instance afterwards. The original pattern relies on a single-threaded
/// host for safety; here the mutex makes the sharing safe outright.
fn measure_scratch() -> &'static Mutex<String> {
	static MEASURE_SCRATCH: OnceLock<Mutex<String>> = OnceLock::new();
	MEASURE_SCRATCH.get_or_init(|| Mutex::new(String::new()))
}

/// Fixed-pitch measurer: columns via `unicode-width`, rows via newline count.
///
/// Defaults to 1.0×1.0 cells, matching terminal hosts. Pixel hosts configure
/// the metrics or bring their own [`CaretGeometry`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceGeometry {
	pub cell_width: f64,
	pub cell_height: f64,
}

impl Default for MonospaceGeometry {
	fn default() -> Self {
		Self {
			cell_width: 1.0,
			cell_height: 1.0,
		}
	}
}

impl CaretGeometry for MonospaceGeometry {
	fn caret_position(&self, text_before_caret: &str) -> Point {
		let mut scratch = measure_scratch()
			.lock()
			.unwrap_or_else(PoisonError::into_inner);
		let line_start = text_before_caret
			.rfind('\n')
			.map(|idx| idx + 1)
			.unwrap_or(0);
		scratch.clear();
		scratch.push_str(&text_before_caret[line_start..]);
		let columns = scratch.width() as f64;
		let rows = text_before_caret.matches('\n').count() as f64;
		Point {
			top: rows * self.cell_height,
			left: columns * self.cell_width,
		}
	}

	fn line_height(&self) -> f64 {
		self.cell_height
	}
}

//! Tree-structured text model: an arena of element and text nodes with a
//! `(node, offset)` selection, the way rich editable regions address text.
//!
//! All operations act on the text node directly containing the caret. A caret
//! whose container is not a text node degrades every operation to a logged
//! no-op; that is a documented limitation of this model, not a failure.

use crate::model::{CharIdx, TextModel};

/// Index of a node in a [`TreeDoc`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeKind {
	Element { children: Vec<NodeId> },
	Text(String),
}

#[derive(Debug, Clone)]
struct Node {
	kind: NodeKind,
	parent: Option<NodeId>,
}

/// An editable document tree. Nodes are never freed; detached nodes simply
/// become unreachable from the root, which matches how the hosting
/// environment treats replaced nodes.
#[derive(Debug, Clone)]
pub struct TreeDoc {
	nodes: Vec<Node>,
	root: NodeId,
}

impl Default for TreeDoc {
	fn default() -> Self {
		Self::new()
	}
}

impl TreeDoc {
	/// Creates a document holding a single empty root element.
	pub fn new() -> Self {
		let root_node = Node {
			kind: NodeKind::Element { children: Vec::new() },
			parent: None,
		};
		Self {
			nodes: vec![root_node],
			root: NodeId(0),
		}
	}

	/// The root element.
	pub fn root(&self) -> NodeId {
		self.root
	}

	/// Creates a detached element node.
	pub fn new_element(&mut self) -> NodeId {
		self.push(NodeKind::Element { children: Vec::new() })
	}

	/// Creates a detached text node.
	pub fn new_text(&mut self, content: impl Into<String>) -> NodeId {
		self.push(NodeKind::Text(content.into()))
	}

	fn push(&mut self, kind: NodeKind) -> NodeId {
		let id = NodeId(self.nodes.len());
		self.nodes.push(Node { kind, parent: None });
		id
	}

	/// Appends `child` to `parent`'s child list.
	pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
		self.nodes[child.0].parent = Some(parent);
		if let NodeKind::Element { children } = &mut self.nodes[parent.0].kind {
			children.push(child);
		}
	}

	/// The text content of a text node, or `None` for elements.
	pub fn text(&self, id: NodeId) -> Option<&str> {
		match &self.nodes[id.0].kind {
			NodeKind::Text(content) => Some(content),
			NodeKind::Element { .. } => None,
		}
	}

	/// Child list of an element, empty for text nodes.
	pub fn children(&self, id: NodeId) -> &[NodeId] {
		match &self.nodes[id.0].kind {
			NodeKind::Element { children } => children,
			NodeKind::Text(_) => &[],
		}
	}

	/// Concatenated text of the subtree rooted at `id`.
	pub fn text_content(&self, id: NodeId) -> String {
		match &self.nodes[id.0].kind {
			NodeKind::Text(content) => content.clone(),
			NodeKind::Element { children } => children
				.iter()
				.map(|child| self.text_content(*child))
				.collect(),
		}
	}

	/// Replaces `old` in its parent's child list with `replacements`.
	/// Returns false when `old` has no parent or is not among its children.
	fn replace_with(&mut self, old: NodeId, replacements: &[NodeId]) -> bool {
		let Some(parent) = self.nodes[old.0].parent else {
			return false;
		};
		let NodeKind::Element { children } = &mut self.nodes[parent.0].kind else {
			return false;
		};
		let Some(slot) = children.iter().position(|child| *child == old) else {
			return false;
		};
		let _ = children.splice(slot..=slot, replacements.iter().copied());
		self.nodes[old.0].parent = None;
		for id in replacements {
			self.nodes[id.0].parent = Some(parent);
		}
		true
	}
}

/// A caret location: a node and a char offset within it.
///
/// The offset is only meaningful when `node` is a text node; a selection
/// pointing at an element is the degraded case every operation no-ops on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeSelection {
	pub node: NodeId,
	pub offset: CharIdx,
}

impl TreeSelection {
	/// A collapsed caret at `offset` chars into `node`.
	pub fn collapsed(node: NodeId, offset: CharIdx) -> Self {
		Self { node, offset }
	}
}

/// The editable-tree adapter: a document, its live selection, and the
/// position snapshot captured on each keystroke.
///
/// Splices resolve through the snapshot so that a suggestion accepted after
/// an asynchronous fetch still lands where the trigger was typed, even if
/// the live selection has moved since.
#[derive(Debug, Clone)]
pub struct TreeSurface {
	doc: TreeDoc,
	selection: TreeSelection,
	snapshot: Option<TreeSelection>,
}

impl TreeSurface {
	pub fn new(doc: TreeDoc, selection: TreeSelection) -> Self {
		Self {
			doc,
			selection,
			snapshot: None,
		}
	}

	/// Builds a surface over a single text node holding `content`, caret at
	/// the end. The common starting shape in tests and demos.
	pub fn with_text(content: impl Into<String>) -> Self {
		let mut doc = TreeDoc::new();
		let content = content.into();
		let offset = content.chars().count();
		let text = doc.new_text(content);
		let root = doc.root();
		doc.append_child(root, text);
		Self::new(doc, TreeSelection::collapsed(text, offset))
	}

	pub fn doc(&self) -> &TreeDoc {
		&self.doc
	}

	pub fn doc_mut(&mut self) -> &mut TreeDoc {
		&mut self.doc
	}

	pub fn selection(&self) -> TreeSelection {
		self.selection
	}

	pub fn set_selection(&mut self, selection: TreeSelection) {
		self.selection = selection;
	}

	/// Text before the caret within the caret's text node, resolved through
	/// `at`. `None` when `at` does not point into a text node.
	fn local_prefix(&self, at: TreeSelection) -> Option<String> {
		let Some(content) = self.doc.text(at.node) else {
			tracing::debug!(node = at.node.0, "caret container is not a text node");
			return None;
		};
		Some(content.chars().take(at.offset).collect())
	}
}

impl TextModel for TreeSurface {
	fn text_before_caret(&self) -> Option<String> {
		self.local_prefix(self.selection)
	}

	fn query_since_trigger(&self, trigger: char) -> Option<String> {
		let before = self.text_before_caret()?;
		match before.rfind(trigger) {
			Some(byte_idx) => Some(before[byte_idx + trigger.len_utf8()..].to_string()),
			None => {
				tracing::debug!(%trigger, "trigger not found before caret in text node");
				None
			}
		}
	}

	fn splice(&mut self, trigger: char, display: &str, keep_trigger: bool) -> bool {
		// A snapshot from the triggering keystroke wins over the live
		// selection; late fetch responses splice where the trigger was.
		let at = self.snapshot.unwrap_or(self.selection);
		let Some(before) = self.local_prefix(at) else {
			return false;
		};
		let Some(trigger_byte) = before.rfind(trigger) else {
			tracing::debug!(%trigger, "trigger not found before caret, skipping splice");
			return false;
		};

		let content = self.doc.text(at.node).unwrap_or_default().to_string();
		let caret_byte = content
			.char_indices()
			.nth(at.offset)
			.map(|(byte, _)| byte)
			.unwrap_or(content.len());

		let mut inserted = String::with_capacity(display.len() + 2);
		if keep_trigger {
			inserted.push(trigger);
		}
		inserted.push_str(display);
		inserted.push(' ');
		let inserted_len = inserted.chars().count();

		let head = self.doc.new_text(&content[..trigger_byte]);
		let body = self.doc.new_text(inserted);
		let tail = self.doc.new_text(&content[caret_byte..]);
		if !self.doc.replace_with(at.node, &[head, body, tail]) {
			tracing::debug!(node = at.node.0, "caret text node has no parent, skipping splice");
			return false;
		}

		// Selection lands immediately after the inserted content.
		self.selection = TreeSelection::collapsed(body, inserted_len);
		self.snapshot = None;
		true
	}

	fn capture_snapshot(&mut self) {
		self.snapshot = Some(self.selection);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_text_before_caret_reads_local_text_node() {
		let surface = TreeSurface::with_text("hello @al");
		assert_eq!(surface.text_before_caret().unwrap(), "hello @al");
	}

	#[test]
	fn test_query_since_trigger() {
		let surface = TreeSurface::with_text("hello @al");
		assert_eq!(surface.query_since_trigger('@').unwrap(), "al");
	}

	#[test]
	fn test_caret_on_element_degrades_to_none() {
		let mut surface = TreeSurface::with_text("hello @al");
		let root = surface.doc().root();
		surface.set_selection(TreeSelection::collapsed(root, 0));
		assert_eq!(surface.text_before_caret(), None);
		assert_eq!(surface.query_since_trigger('@'), None);
		assert!(!surface.splice('@', "Alice", false));
	}

	#[test]
	fn test_splice_rebuilds_three_text_nodes() {
		let mut surface = TreeSurface::with_text("hello @al");
		assert!(surface.splice('@', "Alice", false));

		let root = surface.doc().root();
		let children = surface.doc().children(root).to_vec();
		assert_eq!(children.len(), 3);
		assert_eq!(surface.doc().text(children[0]), Some("hello "));
		assert_eq!(surface.doc().text(children[1]), Some("Alice "));
		assert_eq!(surface.doc().text(children[2]), Some(""));
		assert_eq!(surface.doc().text_content(root), "hello Alice ");
	}

	#[test]
	fn test_splice_keep_trigger() {
		let mut surface = TreeSurface::with_text("hello @al");
		assert!(surface.splice('@', "Alice", true));
		let root = surface.doc().root();
		assert_eq!(surface.doc().text_content(root), "hello @Alice ");
	}

	#[test]
	fn test_splice_positions_selection_after_insertion() {
		let mut surface = TreeSurface::with_text("hello @al");
		surface.splice('@', "Alice", false);
		let selection = surface.selection();
		assert_eq!(surface.doc().text(selection.node), Some("Alice "));
		assert_eq!(selection.offset, "Alice ".chars().count());
	}

	#[test]
	fn test_splice_round_trip_reads_back_display() {
		let mut surface = TreeSurface::with_text("hello @al");
		surface.splice('@', "Alice", false);
		let before = surface.text_before_caret().unwrap();
		assert!(before.ends_with("Alice "));
	}

	#[test]
	fn test_splice_resolves_through_snapshot() {
		let mut surface = TreeSurface::with_text("hello @al");
		surface.capture_snapshot();

		// The live selection wanders off to another node before the
		// (late) response lands; the splice must still use the snapshot.
		let stray = surface.doc_mut().new_text("elsewhere");
		let root = surface.doc().root();
		surface.doc_mut().append_child(root, stray);
		surface.set_selection(TreeSelection::collapsed(stray, 0));

		assert!(surface.splice('@', "Alice", false));
		let selection = surface.selection();
		assert_eq!(surface.doc().text(selection.node), Some("Alice "));
	}

	#[test]
	fn test_splice_mid_node_keeps_tail() {
		let mut surface = TreeSurface::with_text("hi @al, bye");
		let node = surface.selection().node;
		surface.set_selection(TreeSelection::collapsed(node, 6));
		assert!(surface.splice('@', "Alice", false));
		let root = surface.doc().root();
		assert_eq!(surface.doc().text_content(root), "hi Alice , bye");
	}

	#[test]
	fn test_splice_without_trigger_is_noop() {
		let mut surface = TreeSurface::with_text("hello world");
		assert!(!surface.splice('@', "Alice", false));
		let root = surface.doc().root();
		assert_eq!(surface.doc().text_content(root), "hello world");
	}

	#[test]
	fn test_detached_text_node_cannot_be_spliced() {
		let mut doc = TreeDoc::new();
		let orphan = doc.new_text("@al");
		let mut surface = TreeSurface::new(doc, TreeSelection::collapsed(orphan, 3));
		assert!(!surface.splice('@', "Alice", false));
	}
}

//! Text-model adapters for mention autocompletion.
//!
//! Two editable surfaces hide behind one capability trait: a flat string
//! buffer addressed by char offsets, and a tree-structured document addressed
//! by `(node, offset)` selections. The variant is chosen once, when the
//! controller is constructed; nothing re-branches on surface kind per call.

pub mod flat;
pub mod geometry;
pub mod model;
pub mod tree;

pub use flat::FlatBuffer;
pub use geometry::{CaretGeometry, MonospaceGeometry, Point};
pub use model::{CharIdx, TextModel};
pub use tree::{NodeId, TreeDoc, TreeSelection, TreeSurface};

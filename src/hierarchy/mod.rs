//! Node hierarchy and geometry providers consumed by the navigator.

mod arena;
pub mod loader;

use std::fmt;

use serde::Serialize;

use crate::geometry::{Rect, Vec2};

pub use arena::{NodeTree, VisibleRow, DEFAULT_CHAR_WIDTH, DEFAULT_INDENT, DEFAULT_ROW_HEIGHT};
pub use loader::{load_directory, LoadOptions};

/// Handle to a node owned by a hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Parent/child structure and expansion state of a tree of nodes.
///
/// The hierarchy owns its nodes; callers only hold [`NodeId`] handles.
pub trait Hierarchy {
    /// The root node, if the hierarchy is not empty.
    fn root(&self) -> Option<NodeId>;

    /// Whether `id` refers to a live node of this hierarchy.
    fn contains(&self, id: NodeId) -> bool;

    fn parent(&self, id: NodeId) -> Option<NodeId>;

    fn children_count(&self, id: NodeId) -> usize;

    /// Child at `index`, or `None` when out of range or not a tree node.
    fn child(&self, id: NodeId, index: usize) -> Option<NodeId>;

    /// Position of `id` among its parent's children.
    fn index_in_parent(&self, id: NodeId) -> Option<usize>;

    fn is_root(&self, id: NodeId) -> bool {
        self.root() == Some(id)
    }

    fn is_expanded(&self, id: NodeId) -> bool;

    fn expand(&mut self, id: NodeId);

    fn collapse(&mut self, id: NodeId);

    fn is_collapsed(&self, id: NodeId) -> bool {
        !self.is_expanded(id)
    }

    fn has_children(&self, id: NodeId) -> bool {
        self.children_count(id) > 0
    }

    /// Expands every ancestor of `id`, making it reachable through expanded nodes.
    fn expand_all_parents(&mut self, id: NodeId) {
        let mut current = self.parent(id);
        while let Some(parent) = current {
            self.expand(parent);
            current = self.parent(parent);
        }
    }
}

/// Projected placement of nodes.
pub trait Geometry {
    /// Top-left corner of the node's own row.
    fn row_position(&self, id: NodeId) -> Vec2;

    /// Width needed to show the node and its visible descendants.
    fn minimum_width(&self, id: NodeId) -> f32;

    /// Area covered by the node, including its visible subtree.
    fn bounds(&self, id: NodeId) -> Rect;

    fn is_visible(&self, id: NodeId) -> bool;
}

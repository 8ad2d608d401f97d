//! Arena-backed node tree with an eagerly maintained row layout.

use crate::geometry::{Rect, Vec2};

use super::{Geometry, Hierarchy, NodeId};

/// Height of one row in projected units (one terminal line).
pub const DEFAULT_ROW_HEIGHT: f32 = 1.0;
/// Horizontal offset added per depth level.
pub const DEFAULT_INDENT: f32 = 2.0;
/// Width of one label character.
pub const DEFAULT_CHAR_WIDTH: f32 = 1.0;

const ROOT: NodeId = NodeId(0);

#[derive(Debug, Clone, Copy, Default)]
struct NodeLayout {
    depth: usize,
    /// Row index among visible rows (None when hidden by a collapsed ancestor).
    row: Option<usize>,
    min_width: f32,
    /// Number of visible rows in the subtree, including the node itself.
    subtree_rows: usize,
}

#[derive(Debug, Clone)]
struct Node {
    label: String,
    detail: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    expanded: bool,
    layout: NodeLayout,
}

impl Node {
    fn new(label: String, parent: Option<NodeId>) -> Self {
        Self {
            label,
            detail: None,
            parent,
            children: Vec::new(),
            expanded: false,
            layout: NodeLayout::default(),
        }
    }
}

/// A visible row in the flattened tree view.
#[derive(Debug, Clone, Copy)]
pub struct VisibleRow<'a> {
    pub id: NodeId,
    pub label: &'a str,
    pub detail: Option<&'a str>,
    /// Depth in the tree (0 = root).
    pub depth: usize,
    pub is_expanded: bool,
    pub has_children: bool,
}

/// Owning node hierarchy. The root is created with the tree and never removed.
#[derive(Debug, Clone)]
pub struct NodeTree {
    nodes: Vec<Option<Node>>,
    rows: Vec<NodeId>,
    row_height: f32,
    indent: f32,
    char_width: f32,
}

impl NodeTree {
    /// Create a tree holding only a collapsed root.
    pub fn new(root_label: impl Into<String>) -> Self {
        Self::with_metrics(root_label, DEFAULT_ROW_HEIGHT, DEFAULT_INDENT, DEFAULT_CHAR_WIDTH)
    }

    pub fn with_metrics(
        root_label: impl Into<String>,
        row_height: f32,
        indent: f32,
        char_width: f32,
    ) -> Self {
        let mut tree = Self {
            nodes: vec![Some(Node::new(root_label.into(), None))],
            rows: Vec::new(),
            row_height,
            indent,
            char_width,
        };
        tree.relayout();
        tree
    }

    /// Change the per-level indentation and recompute the layout.
    pub fn set_indent(&mut self, indent: f32) {
        self.indent = indent;
        self.relayout();
    }

    pub fn root_id(&self) -> NodeId {
        ROOT
    }

    /// Append a collapsed child under `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not a live node.
    pub fn add_child(&mut self, parent: NodeId, label: impl Into<String>) -> NodeId {
        assert!(self.contains(parent), "unknown parent node {parent}");
        let id = self.push_child(parent, label.into());
        self.relayout();
        id
    }

    /// Append without recomputing the layout; callers must `relayout` afterwards.
    pub(super) fn push_child(&mut self, parent: NodeId, label: String) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node::new(label, Some(parent))));
        if let Some(node) = self.node_mut(parent) {
            node.children.push(id);
        }
        id
    }

    /// Detach and destroy `id` with its whole subtree. The root cannot be removed.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == ROOT || !self.contains(id) {
            return false;
        }
        if let Some(parent) = self.parent(id) {
            if let Some(node) = self.node_mut(parent) {
                node.children.retain(|&child| child != id);
            }
        }
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes[current.0].take() {
                pending.extend(node.children);
            }
        }
        self.relayout();
        true
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|node| node.label.as_str())
    }

    pub fn detail(&self, id: NodeId) -> Option<&str> {
        self.node(id).and_then(|node| node.detail.as_deref())
    }

    pub fn set_detail(&mut self, id: NodeId, detail: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.detail = Some(detail.into());
        }
    }

    pub fn depth(&self, id: NodeId) -> Option<usize> {
        self.node(id).map(|node| node.layout.depth)
    }

    /// Visible row index of `id`, if shown.
    pub fn row_of(&self, id: NodeId) -> Option<usize> {
        self.node(id).and_then(|node| node.layout.row)
    }

    pub fn node_at_row(&self, row: usize) -> Option<NodeId> {
        self.rows.get(row).copied()
    }

    pub fn visible_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows reachable from the root through expanded nodes, in display order.
    pub fn visible_rows(&self) -> impl Iterator<Item = VisibleRow<'_>> + '_ {
        self.rows.iter().filter_map(move |&id| {
            self.node(id).map(|node| VisibleRow {
                id,
                label: &node.label,
                detail: node.detail.as_deref(),
                depth: node.layout.depth,
                is_expanded: node.expanded,
                has_children: !node.children.is_empty(),
            })
        })
    }

    /// Expand every node of the tree.
    pub fn expand_all(&mut self) {
        for node in self.nodes.iter_mut().flatten() {
            node.expanded = true;
        }
        self.relayout();
    }

    /// Find a node by its labels below the root (`["src", "main.rs"]`).
    pub fn find_relative(&self, labels: &[&str]) -> Option<NodeId> {
        let mut current = ROOT;
        for label in labels {
            let node = self.node(current)?;
            current = node
                .children
                .iter()
                .copied()
                .find(|&child| self.label(child) == Some(*label))?;
        }
        Some(current)
    }

    /// Labels from below the root down to `id`, joined with `/`.
    pub fn relative_path(&self, id: NodeId) -> Option<String> {
        let mut labels = Vec::new();
        let mut current = id;
        while current != ROOT {
            let node = self.node(current)?;
            labels.push(node.label.as_str());
            current = node.parent?;
        }
        labels.reverse();
        Some(labels.join("/"))
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    fn set_expanded(&mut self, id: NodeId, expanded: bool) {
        let changed = match self.node_mut(id) {
            Some(node) if node.expanded != expanded => {
                node.expanded = expanded;
                true
            }
            _ => false,
        };
        if changed {
            self.relayout();
        }
    }

    pub(super) fn relayout(&mut self) {
        self.rows.clear();
        self.layout_node(ROOT, 0, true);
    }

    /// Returns (visible rows, minimum width) of the subtree at `id`.
    fn layout_node(&mut self, id: NodeId, depth: usize, visible: bool) -> (usize, f32) {
        let (children, expanded, label_chars) = match self.node(id) {
            Some(node) => (node.children.clone(), node.expanded, node.label.chars().count()),
            None => return (0, 0.0),
        };

        let row = if visible {
            self.rows.push(id);
            Some(self.rows.len() - 1)
        } else {
            None
        };

        let mut rows = usize::from(visible);
        let mut width = depth as f32 * self.indent + label_chars as f32 * self.char_width;
        let show_children = visible && expanded;
        for child in children {
            let (child_rows, child_width) = self.layout_node(child, depth + 1, show_children);
            rows += child_rows;
            if show_children {
                width = width.max(child_width);
            }
        }

        if let Some(node) = self.node_mut(id) {
            node.layout = NodeLayout {
                depth,
                row,
                min_width: width,
                subtree_rows: rows,
            };
        }
        (rows, width)
    }

    /// Row of `id`, or of its closest visible ancestor when hidden.
    fn projected_row(&self, id: NodeId) -> usize {
        let mut current = Some(id);
        while let Some(node_id) = current {
            match self.node(node_id) {
                Some(node) => {
                    if let Some(row) = node.layout.row {
                        return row;
                    }
                    current = node.parent;
                }
                None => break,
            }
        }
        0
    }
}

impl Hierarchy for NodeTree {
    fn root(&self) -> Option<NodeId> {
        self.node(ROOT).map(|_| ROOT)
    }

    fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    fn children_count(&self, id: NodeId) -> usize {
        self.node(id).map_or(0, |node| node.children.len())
    }

    fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.node(id).and_then(|node| node.children.get(index).copied())
    }

    fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.node(parent)?
            .children
            .iter()
            .position(|&child| child == id)
    }

    fn is_expanded(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|node| node.expanded)
    }

    fn expand(&mut self, id: NodeId) {
        self.set_expanded(id, true);
    }

    fn collapse(&mut self, id: NodeId) {
        self.set_expanded(id, false);
    }

    fn expand_all_parents(&mut self, id: NodeId) {
        let mut changed = false;
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if let Some(node) = self.node_mut(parent) {
                changed |= !node.expanded;
                node.expanded = true;
            }
            current = self.parent(parent);
        }
        if changed {
            self.relayout();
        }
    }
}

impl Geometry for NodeTree {
    fn row_position(&self, id: NodeId) -> Vec2 {
        let depth = self.depth(id).unwrap_or(0);
        Vec2::new(
            depth as f32 * self.indent,
            self.projected_row(id) as f32 * self.row_height,
        )
    }

    fn minimum_width(&self, id: NodeId) -> f32 {
        self.node(id).map_or(0.0, |node| node.layout.min_width)
    }

    fn bounds(&self, id: NodeId) -> Rect {
        let rows = self.node(id).map_or(0, |node| node.layout.subtree_rows);
        Rect::new(
            self.row_position(id),
            Vec2::new(self.minimum_width(id), rows as f32 * self.row_height),
        )
    }

    fn is_visible(&self, id: NodeId) -> bool {
        self.row_of(id).is_some()
    }
}

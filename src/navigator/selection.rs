//! Selection-setting operations.

use super::{ensure_node, TreeNavigator};
use crate::error::NavError;
use crate::geometry::{Rect, Vec2, EPSILON};
use crate::hierarchy::{Geometry, Hierarchy, NodeId};

/// Horizontal extent of a row in range selection; rows span the whole control.
const RANGE_ROW_WIDTH: f32 = 10_000.0;

impl TreeNavigator {
    /// Select exactly `node`, expanding its ancestors.
    pub fn select<H: Hierarchy>(&mut self, tree: &mut H, node: NodeId) -> Result<(), NavError> {
        ensure_node(tree, node)?;
        self.select_unchecked(tree, node);
        Ok(())
    }

    pub(super) fn select_unchecked<H: Hierarchy>(&mut self, tree: &mut H, node: NodeId) {
        if self.selection.len() == 1 && self.selected_node() == Some(node) {
            return;
        }

        let before = std::mem::replace(&mut self.selection, vec![node]);
        tree.expand_all_parents(node);

        self.notify_selection_changed(&before);
        self.focus();
    }

    /// Replace the selection with `nodes`.
    ///
    /// Without multi-selection only the first node is kept.
    pub fn select_many<H: Hierarchy>(
        &mut self,
        tree: &mut H,
        nodes: &[NodeId],
    ) -> Result<(), NavError> {
        if let Some(&missing) = nodes.iter().find(|&&node| !tree.contains(node)) {
            return Err(NavError::InvalidArgument(missing));
        }

        if self.selection.as_slice() == nodes {
            return Ok(());
        }

        let after = if self.multi_select {
            let mut unique = Vec::with_capacity(nodes.len());
            for &node in nodes {
                if !unique.contains(&node) {
                    unique.push(node);
                }
            }
            unique
        } else {
            nodes.first().copied().into_iter().collect()
        };

        let before = std::mem::replace(&mut self.selection, after);
        for &node in &self.selection {
            tree.expand_all_parents(node);
        }

        if self.selection != before {
            self.notify_selection_changed(&before);
        }
        self.focus();
        Ok(())
    }

    /// Add `node` to the selection, or remove it if already selected.
    ///
    /// Unlike [`select`](Self::select) this leaves ancestors untouched.
    pub fn toggle_selection<H: Hierarchy>(
        &mut self,
        tree: &H,
        node: NodeId,
    ) -> Result<(), NavError> {
        ensure_node(tree, node)?;

        let before = self.selection.clone();
        if let Some(index) = self.selection.iter().position(|&selected| selected == node) {
            self.selection.remove(index);
        } else {
            if !self.multi_select {
                self.selection.clear();
            }
            self.selection.push(node);
        }

        self.notify_selection_changed(&before);
        self.focus();
        Ok(())
    }

    /// Extend the selection to every visible row between it and `end`.
    ///
    /// Falls back to [`select`](Self::select) without multi-selection or when
    /// nothing is selected yet.
    pub fn select_range<H: Hierarchy + Geometry>(
        &mut self,
        tree: &mut H,
        end: NodeId,
    ) -> Result<(), NavError> {
        ensure_node(tree, end)?;
        if !self.multi_select || self.selection.is_empty() {
            self.select_unchecked(tree, end);
            return Ok(());
        }

        let before = self.selection.clone();

        // Ids removed from the tree have no row of their own.
        let Some(mut range) = before
            .iter()
            .filter(|&&node| tree.contains(node))
            .map(|&node| row_range_rect(tree, node))
            .reduce(Rect::union)
        else {
            self.select_unchecked(tree, end);
            return Ok(());
        };
        let end_rect = row_range_rect(tree, end);
        if end_rect.top() - EPSILON <= range.top() {
            let diff = (range.top() - end_rect.top()).max(0.0);
            range.location.y -= diff;
            range.size.y += diff;
        } else if end_rect.bottom() + EPSILON >= range.bottom() {
            range.size.y += (end_rect.bottom() - range.bottom()).max(0.0);
        }

        let mut after = Vec::new();
        if let Some(root) = tree.root() {
            collect_in_range(tree, root, &range, &mut after);
        }
        self.selection = after;

        if self.selection != before {
            self.notify_selection_changed(&before);
        }
        self.focus();
        Ok(())
    }

    /// Select every node reachable from the root through expanded nodes.
    ///
    /// Does nothing without multi-selection.
    pub fn select_all_expanded<H: Hierarchy>(&mut self, tree: &H) {
        if !self.multi_select {
            return;
        }

        let mut after = Vec::new();
        if let Some(root) = tree.root() {
            collect_expanded(tree, root, &mut after);
        }
        let before = std::mem::replace(&mut self.selection, after);

        if self.selection != before {
            self.notify_selection_changed(&before);
        }
        self.focus();
    }

    /// Drop selected nodes that no longer exist in `tree`.
    pub fn retain_existing<H: Hierarchy>(&mut self, tree: &H) {
        let before = self.selection.clone();
        self.selection.retain(|&node| tree.contains(node));
        if self.selection != before {
            self.notify_selection_changed(&before);
        }
    }
}

fn row_range_rect<G: Geometry>(tree: &G, node: NodeId) -> Rect {
    let position = tree.row_position(node);
    Rect::new(Vec2::new(0.0, position.y), Vec2::new(RANGE_ROW_WIDTH, 0.0))
}

fn collect_in_range<H: Hierarchy + Geometry>(
    tree: &H,
    node: NodeId,
    range: &Rect,
    out: &mut Vec<NodeId>,
) {
    for index in 0..tree.children_count(node) {
        if let Some(child) = tree.child(node, index) {
            if range.contains(tree.row_position(child)) {
                out.push(child);
            }
            if tree.is_expanded(child) {
                collect_in_range(tree, child, range, out);
            }
        }
    }
}

fn collect_expanded<H: Hierarchy>(tree: &H, node: NodeId, out: &mut Vec<NodeId>) {
    for index in 0..tree.children_count(node) {
        if let Some(child) = tree.child(node, index) {
            out.push(child);
            if tree.is_expanded(child) {
                collect_expanded(tree, child, out);
            }
        }
    }
}

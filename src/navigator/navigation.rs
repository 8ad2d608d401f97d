//! Per-frame keyboard navigation and pointer dispatch.

use super::TreeNavigator;
use crate::error::NavError;
use crate::geometry::Vec2;
use crate::hierarchy::{Geometry, Hierarchy, NodeId};
use crate::input::{InputState, Key, Modifiers};

impl TreeNavigator {
    /// Advance one frame of arrow-key navigation.
    ///
    /// Up/Down are level-triggered and throttled by the key repeat interval;
    /// Left/Right are edge-triggered and act on every press.
    pub fn update<H: Hierarchy, I: InputState>(&mut self, tree: &mut H, input: &I, delta_time: f32) {
        if !self.focused {
            return;
        }
        let Some(node) = self.selected_node() else {
            return;
        };
        if !tree.contains(node) || tree.is_root(node) {
            return;
        }

        if self.repeat_ready() {
            let up = input.key_held(Key::Up);
            let down = input.key_held(Key::Down);

            if up != down {
                let target = if up {
                    step_up(tree, node)
                } else {
                    step_down(tree, node)
                };
                if let Some(target) = target {
                    tracing::debug!(from = %node, to = %target, up, "Arrow navigation");
                    self.select_unchecked(tree, target);
                }
                self.key_update_time = 0.0;
            }
        } else {
            self.key_update_time += delta_time;
            tracing::trace!(elapsed = self.key_update_time, "Key repeat gate closed");
        }

        if input.key_pressed(Key::Right) {
            if tree.is_expanded(node) {
                if let Some(first) = tree.child(node, 0) {
                    self.select_unchecked(tree, first);
                }
            } else {
                tree.expand(node);
            }
        } else if input.key_pressed(Key::Left) {
            if tree.is_collapsed(node) {
                let parent = tree.parent(node).filter(|&parent| !tree.is_root(parent));
                if let Some(parent) = parent {
                    self.select_unchecked(tree, parent);
                }
            } else {
                tree.collapse(node);
            }
        }
    }

    /// Handle a key press routed to the control. Returns whether it was consumed.
    pub fn on_key_down<H: Hierarchy, I: InputState>(
        &mut self,
        tree: &H,
        key: Key,
        input: &I,
    ) -> bool {
        if self.multi_select && key == Key::A && input.key_held(Key::Control) {
            self.select_all_expanded(tree);
            return true;
        }
        false
    }

    /// Left mouse button released over `node`.
    ///
    /// Ctrl toggles the node, Shift extends the selection up to it, otherwise
    /// the node becomes the only selection.
    pub fn click<H: Hierarchy + Geometry>(
        &mut self,
        tree: &mut H,
        node: NodeId,
        modifiers: Modifiers,
    ) -> Result<(), NavError> {
        if modifiers.ctrl {
            self.toggle_selection(tree, node)
        } else if modifiers.shift {
            self.select_range(tree, node)
        } else {
            self.select(tree, node)
        }
    }

    /// Mouse button released over `node` at `location`, dispatched by button.
    pub fn pointer_up<H: Hierarchy + Geometry>(
        &mut self,
        tree: &mut H,
        node: NodeId,
        button: PointerButton,
        modifiers: Modifiers,
        location: Vec2,
    ) -> Result<(), NavError> {
        match button {
            PointerButton::Left => self.click(tree, node, modifiers),
            PointerButton::Right => self.right_click(tree, node, location),
        }
    }
}

/// Mouse buttons the navigator distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
}

/// Target of an Up step from `node`.
fn step_up<H: Hierarchy>(tree: &H, node: NodeId) -> Option<NodeId> {
    let parent = tree.parent(node)?;
    let index = tree.index_in_parent(node)?;

    if index == 0 {
        return (!tree.is_root(parent)).then_some(parent);
    }

    let previous = tree.child(parent, index - 1)?;
    if tree.is_expanded(previous) && tree.has_children(previous) {
        // One level only: the previous sibling's last child.
        tree.child(previous, tree.children_count(previous) - 1)
    } else {
        Some(previous)
    }
}

/// Target of a Down step from `node`.
fn step_down<H: Hierarchy>(tree: &H, node: NodeId) -> Option<NodeId> {
    if tree.is_expanded(node) && tree.has_children(node) {
        return tree.child(node, 0);
    }

    let parent = tree.parent(node)?;
    let index = tree.index_in_parent(node)?;

    if index + 1 == tree.children_count(parent) {
        let grandparent = tree.parent(parent)?;
        let parent_index = tree.index_in_parent(parent)?;
        if parent_index + 1 < tree.children_count(grandparent) {
            tree.child(grandparent, parent_index + 1)
        } else {
            None
        }
    } else {
        tree.child(parent, index + 1)
    }
}

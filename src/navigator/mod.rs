//! Selection state and keyboard navigation for a tree of nodes.
//!
//! The navigator never owns nodes. It keeps an ordered selection of
//! [`NodeId`]s over a hierarchy supplied by the caller on every operation,
//! expands ancestors so selected nodes stay visible, and reports every change
//! synchronously to registered listeners.

mod layout;
mod navigation;
mod selection;

pub use navigation::PointerButton;

use std::fmt;

use crate::config::{NavigatorConfig, DEFAULT_KEY_REPEAT_INTERVAL};
use crate::error::NavError;
use crate::geometry::Vec2;
use crate::hierarchy::{Hierarchy, NodeId};

/// Called with the selection before and after a change.
pub type SelectionListener = Box<dyn FnMut(&[NodeId], &[NodeId])>;

/// Called with the clicked node and the pointer location.
pub type RightClickListener = Box<dyn FnMut(NodeId, Vec2)>;

/// Selection and navigation state of a tree control.
pub struct TreeNavigator {
    /// Selected nodes; the first one is the primary selection.
    selection: Vec<NodeId>,
    multi_select: bool,
    key_repeat_interval: f32,
    /// Seconds since the last Up/Down step.
    key_update_time: f32,
    focused: bool,
    size: Vec2,
    container_width: Option<f32>,
    selection_listeners: Vec<SelectionListener>,
    right_click_listeners: Vec<RightClickListener>,
}

impl TreeNavigator {
    /// Create a navigator with the default key repeat interval.
    pub fn new(multi_select: bool) -> Self {
        Self::with_config(NavigatorConfig {
            multi_select,
            key_repeat_interval: DEFAULT_KEY_REPEAT_INTERVAL,
        })
    }

    pub fn with_config(config: NavigatorConfig) -> Self {
        Self {
            selection: Vec::new(),
            multi_select: config.multi_select,
            key_repeat_interval: config.key_repeat_interval,
            // Lets the very first held arrow key act immediately.
            key_update_time: config.key_repeat_interval * 10.0,
            focused: false,
            size: Vec2::new(100.0, 100.0),
            container_width: None,
            selection_listeners: Vec::new(),
            right_click_listeners: Vec::new(),
        }
    }

    pub fn supports_multi_select(&self) -> bool {
        self.multi_select
    }

    pub fn key_repeat_interval(&self) -> f32 {
        self.key_repeat_interval
    }

    /// All selected nodes in selection order.
    pub fn selection(&self) -> &[NodeId] {
        &self.selection
    }

    /// The primary selection.
    pub fn selected_node(&self) -> Option<NodeId> {
        self.selection.first().copied()
    }

    pub fn is_selected(&self, node: NodeId) -> bool {
        self.selection.contains(&node)
    }

    /// Whether the next held Up/Down key moves the selection.
    pub fn repeat_ready(&self) -> bool {
        self.key_update_time >= self.key_repeat_interval
    }

    pub fn has_focus(&self) -> bool {
        self.focused
    }

    /// Request input focus; gaining it resets the key repeat timer.
    pub fn focus(&mut self) {
        if !self.focused {
            self.focused = true;
            self.on_got_focus();
        }
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn on_got_focus(&mut self) {
        self.key_update_time = 0.0;
    }

    /// Register a listener for selection changes.
    pub fn on_selection_changed(&mut self, listener: impl FnMut(&[NodeId], &[NodeId]) + 'static) {
        self.selection_listeners.push(Box::new(listener));
    }

    /// Register a listener for right clicks on nodes.
    pub fn on_right_click(&mut self, listener: impl FnMut(NodeId, Vec2) + 'static) {
        self.right_click_listeners.push(Box::new(listener));
    }

    /// Report a right click released over `node`.
    pub fn right_click<H: Hierarchy>(
        &mut self,
        tree: &H,
        node: NodeId,
        location: Vec2,
    ) -> Result<(), NavError> {
        ensure_node(tree, node)?;
        for listener in &mut self.right_click_listeners {
            listener(node, location);
        }
        Ok(())
    }

    /// Current width and height as computed by the layout hooks.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    fn notify_selection_changed(&mut self, before: &[NodeId]) {
        tracing::debug!(
            before = before.len(),
            after = self.selection.len(),
            primary = ?self.selected_node(),
            "Selection changed"
        );
        for listener in &mut self.selection_listeners {
            listener(before, &self.selection);
        }
    }
}

impl fmt::Debug for TreeNavigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeNavigator")
            .field("selection", &self.selection)
            .field("multi_select", &self.multi_select)
            .field("key_repeat_interval", &self.key_repeat_interval)
            .field("key_update_time", &self.key_update_time)
            .field("focused", &self.focused)
            .field("size", &self.size)
            .field("selection_listeners", &self.selection_listeners.len())
            .field("right_click_listeners", &self.right_click_listeners.len())
            .finish()
    }
}

fn ensure_node<H: Hierarchy>(tree: &H, node: NodeId) -> Result<(), NavError> {
    if tree.contains(node) {
        Ok(())
    } else {
        Err(NavError::InvalidArgument(node))
    }
}

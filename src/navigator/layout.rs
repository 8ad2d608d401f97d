//! Size hooks: the navigator spans its container and grows with its content.

use super::TreeNavigator;
use crate::geometry::Vec2;
use crate::hierarchy::{Geometry, Hierarchy};

impl TreeNavigator {
    /// Width = max(container width, widest top-level node).
    pub fn update_width<H: Hierarchy + Geometry>(&mut self, tree: &H) {
        let mut width = self.container_width.unwrap_or(1.0);
        if let Some(root) = tree.root() {
            width = width.max(tree.minimum_width(root));
        }
        self.size.x = width;
    }

    /// Height = lowest bottom edge among visible top-level nodes.
    pub fn on_child_resized<H: Hierarchy + Geometry>(&mut self, tree: &H) {
        let mut bottom_right = Vec2::ZERO;
        if let Some(root) = tree.root().filter(|&root| tree.is_visible(root)) {
            bottom_right = bottom_right.max(tree.bounds(root).bottom_right());
        }
        self.size.y = bottom_right.y;
    }

    /// The container now offers `available_width`.
    pub fn on_parent_resized<H: Hierarchy + Geometry>(&mut self, tree: &H, available_width: f32) {
        self.container_width = Some(available_width);
        self.update_width(tree);
    }

    pub fn perform_layout_self<H: Hierarchy + Geometry>(&mut self, tree: &H) {
        self.update_width(tree);
    }
}

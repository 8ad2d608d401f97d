//! Application state for the TUI.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use ratatui::layout::Rect;

use crate::commands::dump::resolve;
use crate::config::NavigatorConfig;
use crate::error::Result;
use crate::hierarchy::{load_directory, Hierarchy, LoadOptions, NodeId, NodeTree};
use crate::input::{FrameInput, Key};
use crate::navigator::TreeNavigator;

/// The current UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal navigation mode.
    Normal,
    /// Help overlay mode.
    Help,
}

/// Notifications queued by the navigator's listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavigatorEvent {
    SelectionChanged { count: usize },
    RightClick(NodeId),
}

/// Main application state for the TUI.
pub struct App {
    /// Root directory being browsed.
    pub root: PathBuf,

    /// Loaded directory hierarchy.
    pub tree: NodeTree,

    /// Selection and keyboard navigation state.
    pub navigator: TreeNavigator,

    /// Keys received during the current frame.
    pub input: FrameInput,

    /// Current UI mode.
    pub mode: Mode,

    /// Application should quit.
    pub should_quit: bool,

    /// Status message to display.
    pub status_message: Option<String>,

    /// Screen area holding the tree rows, updated on every draw.
    pub viewport: Rect,

    /// Columns of indentation per level.
    pub indent: u16,

    load_options: LoadOptions,
    events: Rc<RefCell<Vec<NavigatorEvent>>>,
}

impl App {
    /// Create a new App instance with the first top-level entry selected.
    pub fn new(root: PathBuf, tree: NodeTree, config: NavigatorConfig) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut navigator = TreeNavigator::with_config(config);

        let sink = Rc::clone(&events);
        navigator.on_selection_changed(move |_, after| {
            sink.borrow_mut()
                .push(NavigatorEvent::SelectionChanged { count: after.len() });
        });
        let sink = Rc::clone(&events);
        navigator.on_right_click(move |node, _| {
            sink.borrow_mut().push(NavigatorEvent::RightClick(node));
        });

        let mut app = Self {
            root,
            tree,
            navigator,
            input: FrameInput::new(),
            mode: Mode::Normal,
            should_quit: false,
            status_message: None,
            viewport: Rect::default(),
            indent: 2,
            load_options: LoadOptions::default(),
            events,
        };
        app.select_first();
        app.navigator.focus();
        app.navigator.on_child_resized(&app.tree);
        app.events.borrow_mut().clear();
        app
    }

    /// Options used when reloading the tree from disk.
    pub fn with_load_options(mut self, options: LoadOptions) -> Self {
        self.load_options = options;
        self
    }

    pub fn with_indent(mut self, indent: u16) -> Self {
        self.indent = indent;
        self.tree.set_indent(f32::from(indent));
        self
    }

    /// Advance one frame: apply the collected keys and process notifications.
    ///
    /// Up/Down taps that arrive while the repeat gate is closed stay held
    /// until a later frame can act on them.
    pub fn tick(&mut self, delta_time: f32) {
        let gate_closed = self.navigator.has_focus() && !self.navigator.repeat_ready();
        self.navigator.update(&mut self.tree, &self.input, delta_time);
        if gate_closed {
            self.input.carry_over(&[Key::Up, Key::Down]);
        } else {
            self.input.clear();
        }
        self.navigator.on_child_resized(&self.tree);
        self.drain_events();
    }

    /// Record the area available for tree rows.
    pub fn set_viewport(&mut self, area: Rect) {
        if area.width != self.viewport.width {
            self.navigator
                .on_parent_resized(&self.tree, f32::from(area.width));
        }
        self.viewport = area;
    }

    /// First visible row index, keeping the primary selection on screen.
    pub fn scroll_offset(&self) -> usize {
        let selected = self
            .navigator
            .selected_node()
            .and_then(|node| self.tree.row_of(node))
            .unwrap_or(0);
        let total = self.navigator.size().y.max(0.0) as usize;
        calculate_scroll_offset(selected, self.viewport.height as usize, total)
    }

    /// Node shown at terminal row `y`, if any.
    pub fn node_at_screen_row(&self, y: u16) -> Option<NodeId> {
        let top = self.viewport.y;
        if y < top || y >= top.saturating_add(self.viewport.height) {
            return None;
        }
        self.tree
            .node_at_row(usize::from(y - top) + self.scroll_offset())
    }

    /// Expand or collapse the primary selection.
    pub fn toggle_expanded(&mut self) {
        let Some(node) = self.navigator.selected_node() else {
            return;
        };
        if self.tree.is_expanded(node) {
            self.tree.collapse(node);
        } else {
            self.tree.expand(node);
        }
        self.navigator.on_child_resized(&self.tree);
    }

    /// Reload the tree from disk, keeping selected paths that still exist.
    pub fn reload(&mut self) -> Result<()> {
        let paths: Vec<String> = self
            .navigator
            .selection()
            .iter()
            .filter_map(|&node| self.tree.relative_path(node))
            .collect();

        let mut tree = load_directory(&self.root, &self.load_options)?;
        tree.set_indent(f32::from(self.indent));
        let targets: Vec<NodeId> = paths.iter().filter_map(|path| resolve(&tree, path)).collect();

        // Ids are stable across reloads of an unchanged tree, so the selection
        // may compare equal and skip expanding ancestors.
        for &node in &targets {
            tree.expand_all_parents(node);
        }
        self.tree = tree;
        self.navigator.select_many(&mut self.tree, &targets)?;
        if targets.is_empty() {
            self.select_first();
        }
        self.navigator.perform_layout_self(&self.tree);
        self.navigator.on_child_resized(&self.tree);
        self.drain_events();
        self.status_message = Some(format!("Reloaded {} entries", self.tree.len()));
        Ok(())
    }

    /// Relative path of the primary selection.
    pub fn selected_path(&self) -> Option<String> {
        self.navigator
            .selected_node()
            .and_then(|node| self.tree.relative_path(node))
    }

    fn select_first(&mut self) {
        let root = self.tree.root_id();
        if let Some(first) = self.tree.child(root, 0) {
            if let Err(err) = self.navigator.select(&mut self.tree, first) {
                tracing::warn!(error = %err, "Could not select first entry");
            }
        }
    }

    fn drain_events(&mut self) {
        let events: Vec<NavigatorEvent> = self.events.borrow_mut().drain(..).collect();
        for event in events {
            self.status_message = match event {
                NavigatorEvent::SelectionChanged { count: 0 } => Some("Nothing selected".into()),
                NavigatorEvent::SelectionChanged { count: 1 } => self.selected_path(),
                NavigatorEvent::SelectionChanged { count } => Some(format!("{count} selected")),
                NavigatorEvent::RightClick(node) => self
                    .tree
                    .relative_path(node)
                    .map(|path| format!("Context: {path}")),
            };
        }
    }
}

/// Keep `selected` visible with a little padding above and below.
pub fn calculate_scroll_offset(selected: usize, visible_height: usize, total: usize) -> usize {
    if total <= visible_height {
        return 0;
    }

    let padding = 3.min(visible_height / 4);

    if selected < padding {
        0
    } else if selected >= total - padding {
        total.saturating_sub(visible_height)
    } else {
        selected.saturating_sub(padding)
    }
}

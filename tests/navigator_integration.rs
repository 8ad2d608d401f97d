//! Selection and navigation behavior through the public API.

use std::cell::RefCell;
use std::rc::Rc;

use grove::geometry::Vec2;
use grove::{FrameInput, Hierarchy, Key, Modifiers, NavError, NodeId, NodeTree, TreeNavigator};

type Changes = Rc<RefCell<Vec<(Vec<NodeId>, Vec<NodeId>)>>>;

fn record(navigator: &mut TreeNavigator) -> Changes {
    let changes: Changes = Rc::default();
    let sink = Rc::clone(&changes);
    navigator.on_selection_changed(move |before, after| {
        sink.borrow_mut().push((before.to_vec(), after.to_vec()));
    });
    changes
}

fn sorted(nodes: &[NodeId]) -> Vec<NodeId> {
    let mut nodes = nodes.to_vec();
    nodes.sort();
    nodes
}

/// R { A { A1 }, B }
struct Small {
    tree: NodeTree,
    r: NodeId,
    a: NodeId,
    a1: NodeId,
    b: NodeId,
}

fn small() -> Small {
    let mut tree = NodeTree::new("R");
    let r = tree.root_id();
    let a = tree.add_child(r, "A");
    let a1 = tree.add_child(a, "A1");
    let b = tree.add_child(r, "B");
    Small { tree, r, a, a1, b }
}

/// R (expanded) { A, B, C }
fn siblings() -> (NodeTree, [NodeId; 3]) {
    let mut tree = NodeTree::new("R");
    let r = tree.root_id();
    let a = tree.add_child(r, "A");
    let b = tree.add_child(r, "B");
    let c = tree.add_child(r, "C");
    tree.expand(r);
    (tree, [a, b, c])
}

fn down() -> FrameInput {
    let mut input = FrameInput::new();
    input.hold(Key::Down);
    input
}

#[test]
fn select_expands_every_ancestor() {
    let mut tree = NodeTree::new("R");
    let r = tree.root_id();
    let a = tree.add_child(r, "A");
    let b = tree.add_child(a, "B");
    let c = tree.add_child(b, "C");
    let mut navigator = TreeNavigator::new(true);

    navigator.select(&mut tree, c).unwrap();

    assert_eq!(navigator.selection(), &[c]);
    assert!(tree.is_expanded(r));
    assert!(tree.is_expanded(a));
    assert!(tree.is_expanded(b));
    assert!(!tree.is_expanded(c));
    assert!(navigator.has_focus());
}

#[test]
fn select_same_node_twice_notifies_once() {
    let mut s = small();
    let mut navigator = TreeNavigator::new(true);
    let changes = record(&mut navigator);

    navigator.select(&mut s.tree, s.b).unwrap();
    navigator.select(&mut s.tree, s.b).unwrap();

    assert_eq!(*changes.borrow(), vec![(vec![], vec![s.b])]);
}

#[test]
fn single_mode_keeps_at_most_one_node() {
    let (mut tree, [a, b, c]) = siblings();
    let mut navigator = TreeNavigator::new(false);

    navigator.select_many(&mut tree, &[a, b, c]).unwrap();
    assert_eq!(navigator.selection(), &[a]);

    navigator.toggle_selection(&tree, b).unwrap();
    assert_eq!(navigator.selection(), &[b]);

    navigator.toggle_selection(&tree, c).unwrap();
    assert_eq!(navigator.selection(), &[c]);

    navigator.select_range(&mut tree, a).unwrap();
    assert_eq!(navigator.selection(), &[a]);
}

#[test]
fn toggle_twice_restores_selection_set() {
    let (mut tree, [a, b, c]) = siblings();
    let mut navigator = TreeNavigator::new(true);
    navigator.select_many(&mut tree, &[a, b]).unwrap();
    let before = sorted(navigator.selection());

    navigator.toggle_selection(&tree, c).unwrap();
    navigator.toggle_selection(&tree, c).unwrap();
    assert_eq!(sorted(navigator.selection()), before);

    navigator.toggle_selection(&tree, a).unwrap();
    navigator.toggle_selection(&tree, a).unwrap();
    assert_eq!(sorted(navigator.selection()), before);
}

#[test]
fn toggle_twice_restores_sole_selection_in_single_mode() {
    let (mut tree, [a, _, _]) = siblings();
    let mut navigator = TreeNavigator::new(false);
    navigator.select(&mut tree, a).unwrap();

    navigator.toggle_selection(&tree, a).unwrap();
    assert!(navigator.selection().is_empty());
    navigator.toggle_selection(&tree, a).unwrap();
    assert_eq!(navigator.selection(), &[a]);
}

#[test]
fn toggle_always_notifies() {
    let (tree, [a, _, _]) = siblings();
    let mut navigator = TreeNavigator::new(true);
    let changes = record(&mut navigator);

    navigator.toggle_selection(&tree, a).unwrap();
    navigator.toggle_selection(&tree, a).unwrap();

    assert_eq!(
        *changes.borrow(),
        vec![(vec![], vec![a]), (vec![a], vec![])]
    );
}

#[test]
fn select_all_expanded_is_noop_in_single_mode() {
    let (mut tree, [_, b, _]) = siblings();
    let mut navigator = TreeNavigator::new(false);
    navigator.select(&mut tree, b).unwrap();
    let changes = record(&mut navigator);

    navigator.select_all_expanded(&tree);

    assert_eq!(navigator.selection(), &[b]);
    assert!(changes.borrow().is_empty());
}

#[test]
fn select_all_expanded_follows_expanded_branches() {
    let mut s = small();
    s.tree.expand(s.r);
    let mut navigator = TreeNavigator::new(true);

    navigator.select_all_expanded(&s.tree);
    assert_eq!(navigator.selection(), &[s.a, s.b]);

    s.tree.expand(s.a);
    navigator.select_all_expanded(&s.tree);
    assert_eq!(navigator.selection(), &[s.a, s.a1, s.b]);
}

#[test]
fn select_leaf_then_down_moves_to_uncle() {
    let mut s = small();
    let mut navigator = TreeNavigator::new(false);

    navigator.select(&mut s.tree, s.a1).unwrap();
    assert!(s.tree.is_expanded(s.a));
    assert!(s.tree.is_expanded(s.r));

    // Gaining focus closed the repeat gate; let it reopen first.
    navigator.update(&mut s.tree, &FrameInput::new(), 0.2);
    navigator.update(&mut s.tree, &down(), 0.0);

    assert_eq!(navigator.selection(), &[s.b]);
}

#[test]
fn select_range_covers_siblings_in_between() {
    let (mut tree, [a, b, c]) = siblings();
    let mut navigator = TreeNavigator::new(true);
    navigator.select(&mut tree, a).unwrap();

    navigator.select_range(&mut tree, c).unwrap();

    assert_eq!(navigator.selection(), &[a, b, c]);
}

#[test]
fn select_range_upwards() {
    let (mut tree, [a, b, c]) = siblings();
    let mut navigator = TreeNavigator::new(true);
    navigator.select(&mut tree, c).unwrap();

    navigator.select_range(&mut tree, a).unwrap();

    assert_eq!(navigator.selection(), &[a, b, c]);
}

#[test]
fn select_range_without_selection_selects_end() {
    let (mut tree, [_, b, _]) = siblings();
    let mut navigator = TreeNavigator::new(true);
    let changes = record(&mut navigator);

    navigator.select_range(&mut tree, b).unwrap();

    assert_eq!(navigator.selection(), &[b]);
    assert_eq!(changes.borrow().len(), 1);
}

#[test]
fn select_range_to_selected_node_does_not_notify() {
    let (mut tree, [a, b, _]) = siblings();
    let mut navigator = TreeNavigator::new(true);
    navigator.select_many(&mut tree, &[a, b]).unwrap();
    let changes = record(&mut navigator);

    navigator.select_range(&mut tree, b).unwrap();

    assert_eq!(navigator.selection(), &[a, b]);
    assert!(changes.borrow().is_empty());
}

#[test]
fn repeat_gate_waits_for_interval() {
    let (mut tree, [a, b, _]) = siblings();
    let mut navigator = TreeNavigator::new(false);
    navigator.select(&mut tree, a).unwrap();
    let input = down();

    for _ in 0..3 {
        navigator.update(&mut tree, &input, 0.05);
        assert_eq!(navigator.selection(), &[a]);
    }

    navigator.update(&mut tree, &input, 0.05);
    assert_eq!(navigator.selection(), &[b]);

    // The step closed the gate again.
    navigator.update(&mut tree, &input, 0.05);
    assert_eq!(navigator.selection(), &[b]);
}

#[test]
fn arrows_need_focus() {
    let (mut tree, [a, b, _]) = siblings();
    let mut navigator = TreeNavigator::new(false);
    navigator.select(&mut tree, a).unwrap();

    navigator.blur();
    navigator.update(&mut tree, &down(), 1.0);
    assert_eq!(navigator.selection(), &[a]);

    navigator.focus();
    navigator.update(&mut tree, &FrameInput::new(), 0.2);
    navigator.update(&mut tree, &down(), 0.0);
    assert_eq!(navigator.selection(), &[b]);
}

#[test]
fn unknown_nodes_are_rejected() {
    let (mut tree, [a, _, c]) = siblings();
    let mut navigator = TreeNavigator::new(true);
    navigator.select(&mut tree, a).unwrap();
    let missing = NodeId::from_index(999);

    assert_eq!(
        navigator.select(&mut tree, missing),
        Err(NavError::InvalidArgument(missing))
    );
    assert_eq!(
        navigator.select_many(&mut tree, &[c, missing]),
        Err(NavError::InvalidArgument(missing))
    );
    assert!(navigator.toggle_selection(&tree, missing).is_err());
    assert!(navigator.select_range(&mut tree, missing).is_err());
    assert!(navigator.right_click(&tree, missing, Vec2::ZERO).is_err());

    assert_eq!(navigator.selection(), &[a]);
}

#[test]
fn removed_nodes_are_dropped_by_retain_existing() {
    let (mut tree, [a, b, c]) = siblings();
    let mut navigator = TreeNavigator::new(true);
    navigator.select_many(&mut tree, &[a, b, c]).unwrap();
    let changes = record(&mut navigator);

    assert!(tree.remove(b));
    navigator.retain_existing(&tree);
    navigator.retain_existing(&tree);

    assert_eq!(navigator.selection(), &[a, c]);
    assert_eq!(changes.borrow().len(), 1);
    assert!(navigator.select(&mut tree, b).is_err());
}

#[test]
fn click_dispatches_on_modifiers() {
    let (mut tree, [a, b, c]) = siblings();
    let mut navigator = TreeNavigator::new(true);

    navigator.click(&mut tree, a, Modifiers::NONE).unwrap();
    assert_eq!(navigator.selection(), &[a]);

    navigator.click(&mut tree, c, Modifiers::CTRL).unwrap();
    assert_eq!(navigator.selection(), &[a, c]);

    navigator.click(&mut tree, a, Modifiers::CTRL).unwrap();
    assert_eq!(navigator.selection(), &[c]);

    navigator.click(&mut tree, a, Modifiers::SHIFT).unwrap();
    assert_eq!(navigator.selection(), &[a, b, c]);
}

#[test]
fn right_click_reaches_listeners_in_order() {
    let (tree, [_, b, _]) = siblings();
    let mut navigator = TreeNavigator::new(true);
    let seen = Rc::new(RefCell::new(Vec::new()));

    for tag in ["first", "second"] {
        let sink = Rc::clone(&seen);
        navigator.on_right_click(move |node, location| {
            sink.borrow_mut().push((tag, node, location));
        });
    }

    navigator
        .right_click(&tree, b, Vec2::new(3.0, 2.0))
        .unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![
            ("first", b, Vec2::new(3.0, 2.0)),
            ("second", b, Vec2::new(3.0, 2.0)),
        ]
    );
    assert!(navigator.selection().is_empty());
}

#[test]
fn ctrl_a_shortcut() {
    let (tree, [a, b, c]) = siblings();
    let mut navigator = TreeNavigator::new(true);
    let mut input = FrameInput::new();

    assert!(!navigator.on_key_down(&tree, Key::A, &input));
    assert!(navigator.selection().is_empty());

    input.set_modifiers(Modifiers::CTRL);
    assert!(!navigator.on_key_down(&tree, Key::Char('b'), &input));
    assert!(navigator.on_key_down(&tree, Key::A, &input));
    assert_eq!(navigator.selection(), &[a, b, c]);

    let mut single = TreeNavigator::new(false);
    assert!(!single.on_key_down(&tree, Key::A, &input));
}

#[test]
fn layout_hooks_track_content() {
    let mut s = small();
    let mut navigator = TreeNavigator::new(true);

    navigator.on_parent_resized(&s.tree, 40.0);
    navigator.on_child_resized(&s.tree);
    assert_eq!(navigator.size(), Vec2::new(40.0, 1.0));

    navigator.select(&mut s.tree, s.a1).unwrap();
    navigator.on_child_resized(&s.tree);
    assert_eq!(navigator.size().y, 4.0);

    navigator.on_parent_resized(&s.tree, 1.0);
    // A1 at depth 2 with an indent of 2
    assert_eq!(navigator.size().x, 6.0);
}

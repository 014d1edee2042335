use std::cell::Cell;
use std::rc::Rc;

use crate::{
    location_key, named_key, useState, with_current_composer, with_node_mut, Composition, Node,
    NodeError, NodeId,
};

#[derive(Default)]
struct LabelNode {
    text: String,
    children: Vec<NodeId>,
    updates: usize,
}

impl Node for LabelNode {
    fn update(&mut self) {
        self.updates += 1;
    }

    fn insert_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    fn children(&self) -> Vec<NodeId> {
        self.children.clone()
    }
}

fn label(text: &str) -> NodeId {
    let text = text.to_string();
    let id = with_current_composer(|composer| {
        composer.emit_node(|| LabelNode {
            text: text.clone(),
            ..LabelNode::default()
        })
    });
    with_node_mut(id, |node: &mut LabelNode| {
        if node.text != text {
            node.text = text.clone();
        }
    })
    .expect("label node available");
    id
}

fn panel(content: impl FnOnce()) -> NodeId {
    let id = with_current_composer(|composer| composer.emit_node(LabelNode::default));
    crate::push_parent(id);
    content();
    crate::pop_parent();
    id
}

#[test]
fn rerender_under_same_key_reuses_nodes() {
    let key = location_key(file!(), line!(), column!());
    let mut composition = Composition::new();
    let first = Cell::new(0usize);
    composition
        .render(key, || {
            let id = label("hello");
            first.set(id);
            id
        })
        .expect("first render");
    let first_id = first.get();

    composition
        .render(key, || label("world"))
        .expect("second render");

    assert_eq!(composition.root(), Some(first_id));
    assert_eq!(composition.applier().len(), 1);
    composition
        .applier_mut()
        .with_node(first_id, |node: &mut LabelNode| {
            assert_eq!(node.text, "world");
            assert_eq!(node.updates, 1);
        })
        .expect("reused node");
}

#[test]
fn root_key_change_tears_down_previous_tree() {
    let key_a = named_key("mode-a");
    let key_b = named_key("mode-b");
    let mut composition = Composition::new();

    composition
        .render(key_a, || {
            panel(|| {
                label("one");
                label("two");
            })
        })
        .expect("render a");
    assert_eq!(composition.applier().len(), 3);

    composition
        .render(key_b, || label("fresh"))
        .expect("render b");
    assert_eq!(composition.applier().len(), 1);
    let root = composition.root().expect("root after remount");
    composition
        .applier_mut()
        .with_node(root, |node: &mut LabelNode| {
            assert_eq!(node.text, "fresh");
            assert_eq!(node.updates, 0);
        })
        .expect("fresh node");
}

#[test]
fn children_are_linked_in_emit_order() {
    let key = named_key("children");
    let mut composition = Composition::new();
    composition
        .render(key, || {
            panel(|| {
                label("a");
                label("b");
                label("c");
            })
        })
        .expect("render");
    let root = composition.root().expect("root");
    let children = composition.applier().children(root).expect("children");
    assert_eq!(children.len(), 3);
    let texts: Vec<String> = children
        .iter()
        .map(|id| {
            composition
                .applier()
                .with_node_ref(*id, |node: &LabelNode| node.text.clone())
                .expect("child")
        })
        .collect();
    assert_eq!(texts, ["a", "b", "c"]);
}

#[test]
fn remember_runs_init_once() {
    let key = named_key("remember");
    let mut composition = Composition::new();
    let init_calls = Rc::new(Cell::new(0usize));

    for _ in 0..3 {
        let init_calls = Rc::clone(&init_calls);
        composition
            .render(key, move || {
                let calls = Rc::clone(&init_calls);
                crate::remember(move || {
                    calls.set(calls.get() + 1);
                    42usize
                });
                label("body")
            })
            .expect("render");
    }
    assert_eq!(init_calls.get(), 1);
}

#[test]
fn state_write_requests_frame_and_persists() {
    let key = named_key("state");
    let mut composition = Composition::new();
    let seen = Rc::new(Cell::new(0u32));

    let render = |composition: &mut Composition, seen: &Rc<Cell<u32>>| {
        let seen = Rc::clone(seen);
        composition
            .render(key, move || {
                let counter = useState(|| 0u32);
                seen.set(counter.value());
                if counter.get() == 0 {
                    counter.update(|value| *value = 7);
                }
                label("body")
            })
            .expect("render");
    };

    // Initial render leaves a frame request from the state write.
    composition.take_frame_request();
    render(&mut composition, &seen);
    assert_eq!(seen.get(), 0);
    assert!(composition.take_frame_request());

    render(&mut composition, &seen);
    assert_eq!(seen.get(), 7);
    assert!(!composition.take_frame_request());
}

#[test]
fn shrinking_pass_unmounts_orphaned_tail_nodes() {
    let key = named_key("shrink");
    let mut composition = Composition::new();
    let extra = Cell::new(0usize);
    composition
        .render(key, || {
            let kept = label("kept");
            extra.set(label("extra"));
            kept
        })
        .expect("first render");
    assert_eq!(composition.applier().len(), 2);

    // The second pass emits one node less; the tail node must be gone.
    composition
        .render(key, || label("kept"))
        .expect("second render");
    assert_eq!(composition.applier().len(), 1);
    assert_eq!(
        composition.applier().get(extra.get()).err(),
        Some(NodeError::Missing { id: extra.get() })
    );
}

#[test]
#[should_panic(expected = "already borrowed")]
fn reentrant_composer_access_panics() {
    let key = named_key("reentrant");
    let mut composition = Composition::new();
    let _ = composition.render(key, || {
        with_current_composer(|_| {
            with_current_composer(|composer| composer.emit_node(LabelNode::default))
        })
    });
}

#[test]
fn with_node_reports_type_mismatch() {
    let key = named_key("mismatch");
    let mut composition = Composition::new();
    composition.render(key, || label("x")).expect("render");
    let root = composition.root().expect("root");

    struct OtherNode;
    impl Node for OtherNode {}

    let err = composition
        .applier_mut()
        .with_node(root, |_: &mut OtherNode| ())
        .expect_err("mismatch");
    assert!(matches!(err, NodeError::TypeMismatch { .. }));
    assert!(err.to_string().contains("is not a"));

    let missing = composition
        .applier()
        .get(9999)
        .err()
        .expect("missing node error");
    assert_eq!(missing, NodeError::Missing { id: 9999 });
}

#[test]
fn dump_tree_walks_children() {
    let key = named_key("dump");
    let mut composition = Composition::new();
    composition
        .render(key, || {
            panel(|| {
                label("inner");
            })
        })
        .expect("render");
    let dump = composition.applier().dump_tree(composition.root());
    assert!(dump.contains("LabelNode"));
    assert_eq!(dump.lines().count(), 2);
}

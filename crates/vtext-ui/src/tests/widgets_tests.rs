use std::cell::Cell;
use std::rc::Rc;

use vtext_core::{named_key, Composition};

use crate::semantics::{collect_text, find_button_with_text, find_text, press_button};
use crate::widgets::nodes::{Axis, LazyListNode, LazyListState, TextNode, TextSpan, ViewNode};
use crate::widgets::{Button, Column, LazyColumn, LazyColumnSpec, Row, SpannedText, Text};
use crate::Modifier;

#[test]
fn text_updates_in_place_across_passes() {
    let key = named_key("text-update");
    let mut composition = Composition::new();
    let value = Rc::new(Cell::new(1u32));

    let render = |composition: &mut Composition, value: &Rc<Cell<u32>>| {
        let value = Rc::clone(value);
        composition
            .render(key, move || {
                Text(format!("count {}", value.get()), Modifier::empty())
            })
            .expect("render");
    };

    render(&mut composition, &value);
    let first_root = composition.root().expect("root");
    value.set(2);
    render(&mut composition, &value);

    assert_eq!(composition.root(), Some(first_root));
    assert_eq!(composition.applier().len(), 1);
    composition
        .applier()
        .with_node_ref(first_root, |node: &TextNode| {
            assert_eq!(node.text, "count 2");
        })
        .expect("text node");
}

#[test]
fn spanned_text_stores_span_kinds() {
    let key = named_key("spans");
    let mut composition = Composition::new();
    composition
        .render(key, || {
            SpannedText(
                Modifier::empty(),
                vec![
                    TextSpan::Virtual("left ".into()),
                    TextSpan::Native("right".into()),
                ],
            )
        })
        .expect("render");
    let root = composition.root().expect("root");
    composition
        .applier()
        .with_node_ref(root, |node: &TextNode| {
            assert!(node.text.is_empty());
            assert_eq!(node.spans.len(), 2);
            assert!(node.spans[0].is_virtual());
            assert!(!node.spans[1].is_virtual());
            assert_eq!(node.spans[1].content(), "right");
        })
        .expect("text node");
}

#[test]
fn containers_link_children_with_axis() {
    let key = named_key("containers");
    let mut composition = Composition::new();
    composition
        .render(key, || {
            Column(Modifier::empty(), || {
                Row(Modifier::empty(), || {
                    Text("a", Modifier::empty());
                });
                Text("b", Modifier::empty());
            })
        })
        .expect("render");
    let root = composition.root().expect("root");
    let applier = composition.applier();
    applier
        .with_node_ref(root, |node: &ViewNode| {
            assert_eq!(node.axis, Axis::Vertical);
            assert_eq!(node.children.len(), 2);
        })
        .expect("column node");
    let children = applier.children(root).expect("children");
    applier
        .with_node_ref(children[0], |node: &ViewNode| {
            assert_eq!(node.axis, Axis::Horizontal);
        })
        .expect("row node");
    assert_eq!(collect_text(applier, root), ["a", "b"]);
}

#[test]
fn button_press_runs_latest_handler() {
    let key = named_key("button");
    let mut composition = Composition::new();
    let pressed = Rc::new(Cell::new(0u32));

    let render = |composition: &mut Composition, pressed: &Rc<Cell<u32>>| {
        let pressed = Rc::clone(pressed);
        composition
            .render(key, move || {
                let pressed = Rc::clone(&pressed);
                Button(
                    Modifier::empty(),
                    move || pressed.set(pressed.get() + 1),
                    || {
                        Text("Press me", Modifier::empty());
                    },
                )
            })
            .expect("render");
    };

    render(&mut composition, &pressed);
    let root = composition.root().expect("root");
    let button = find_button_with_text(composition.applier(), root, "Press me").expect("button");
    press_button(composition.applier(), button).expect("press");
    assert_eq!(pressed.get(), 1);

    // A second pass replaces the handler; pressing still works.
    render(&mut composition, &pressed);
    press_button(composition.applier(), button).expect("press again");
    assert_eq!(pressed.get(), 2);
}

#[test]
fn lazy_column_records_request_fields() {
    let key = named_key("lazy");
    let identity_a = named_key("list-a");
    let identity_b = named_key("list-b");
    let mut composition = Composition::new();

    let render = |composition: &mut Composition, identity: vtext_core::Key| {
        composition
            .render(key, move || {
                LazyColumn(
                    Modifier::empty(),
                    LazyColumnSpec::new().identity(identity),
                    LazyListState::default().scrolled_to(3),
                    |scope| {
                        scope.items(
                            50,
                            |index| index.to_string(),
                            |index| Text(format!("row {index}"), Modifier::empty()),
                        );
                    },
                )
            })
            .expect("render");
    };

    render(&mut composition, identity_a);
    let root = composition.root().expect("root");
    composition
        .applier()
        .with_node_ref(root, |node: &LazyListNode| {
            assert_eq!(node.identity, identity_a);
            assert_eq!(node.state.first_visible, 3);
            let items = node.items.as_ref().expect("items");
            assert_eq!(items.count, 50);
            assert_eq!((items.key)(7), "7");
        })
        .expect("list node");

    // Same composition structure, new identity token: updated in place here;
    // the remount is the host backend's concern.
    render(&mut composition, identity_b);
    composition
        .applier()
        .with_node_ref(root, |node: &LazyListNode| {
            assert_eq!(node.identity, identity_b);
        })
        .expect("list node");
}

#[test]
fn find_text_matches_flattened_content() {
    let key = named_key("find");
    let mut composition = Composition::new();
    composition
        .render(key, || {
            Column(Modifier::empty(), || {
                SpannedText(
                    Modifier::empty(),
                    vec![
                        TextSpan::Virtual("Some Text ".into()),
                        TextSpan::Virtual("merged".into()),
                    ],
                );
            })
        })
        .expect("render");
    let root = composition.root().expect("root");
    assert!(find_text(composition.applier(), root, "Some Text merged").is_some());
    assert!(find_text(composition.applier(), root, "Some Text").is_none());
}

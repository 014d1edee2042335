//! Button widget.

#![allow(non_snake_case)]

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexSet;
use vtext_core::{with_current_composer, with_node_mut, NodeId};

use super::nodes::ButtonNode;
use crate::composable;
use crate::modifier::Modifier;

#[composable]
pub fn Button<F, G>(modifier: Modifier, on_press: F, content: G) -> NodeId
where
    F: FnMut() + 'static,
    G: FnOnce(),
{
    let on_press_rc: Rc<RefCell<dyn FnMut()>> = Rc::new(RefCell::new(on_press));
    let id = with_current_composer(|composer| {
        composer.emit_node(|| ButtonNode {
            modifier: modifier.clone(),
            on_press: on_press_rc.clone(),
            children: IndexSet::new(),
        })
    });
    if let Err(err) = with_node_mut(id, |node: &mut ButtonNode| {
        node.modifier = modifier;
        node.on_press = on_press_rc.clone();
    }) {
        debug_assert!(false, "failed to update Button node: {err}");
    }
    vtext_core::push_parent(id);
    content();
    vtext_core::pop_parent();
    id
}

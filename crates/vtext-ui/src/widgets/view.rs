//! Container widgets.

#![allow(non_snake_case)]

use vtext_core::{with_current_composer, with_node_mut, NodeId};

use super::nodes::{Axis, ViewNode};
use crate::composable;
use crate::modifier::Modifier;

fn container(modifier: Modifier, axis: Axis, content: impl FnOnce()) -> NodeId {
    let id = with_current_composer(|composer| {
        composer.emit_node(|| ViewNode {
            modifier: modifier.clone(),
            axis,
            children: Vec::new(),
        })
    });
    if let Err(err) = with_node_mut(id, |node: &mut ViewNode| {
        node.modifier = modifier;
        node.axis = axis;
    }) {
        debug_assert!(false, "failed to update view node: {err}");
    }
    vtext_core::push_parent(id);
    content();
    vtext_core::pop_parent();
    id
}

#[composable]
pub fn BoxView(modifier: Modifier, content: impl FnOnce()) -> NodeId {
    container(modifier, Axis::Stack, content)
}

#[composable]
pub fn Row(modifier: Modifier, content: impl FnOnce()) -> NodeId {
    container(modifier, Axis::Horizontal, content)
}

#[composable]
pub fn Column(modifier: Modifier, content: impl FnOnce()) -> NodeId {
    container(modifier, Axis::Vertical, content)
}

//! Fixed-size gap.

#![allow(non_snake_case)]

use vtext_core::{with_current_composer, with_node_mut, NodeId};

use super::nodes::SpacerNode;
use crate::composable;
use crate::modifier::Size;

#[composable]
pub fn Spacer(size: Size) -> NodeId {
    let id = with_current_composer(|composer| composer.emit_node(|| SpacerNode { size }));
    if let Err(err) = with_node_mut(id, |node: &mut SpacerNode| {
        node.size = size;
    }) {
        debug_assert!(false, "failed to update Spacer node: {err}");
    }
    id
}

//! Queries over a composed tree, for tests and headless drivers.
//!
//! Works on node descriptors, not realized native views; lazy list rows are
//! therefore not reachable here (query the realized tree for those).

use vtext_core::{MemoryApplier, NodeError, NodeId};

use crate::widgets::nodes::{ButtonNode, TextNode};

/// The flattened content of a text node: direct text followed by every span
/// fragment, in order.
pub fn flattened_text(node: &TextNode) -> String {
    let mut content = node.text.clone();
    for span in &node.spans {
        content.push_str(span.content());
    }
    content
}

/// Depth-first list of every text node's flattened content under `root`.
pub fn collect_text(applier: &MemoryApplier, root: NodeId) -> Vec<String> {
    let mut out = Vec::new();
    collect_text_into(applier, root, &mut out);
    out
}

fn collect_text_into(applier: &MemoryApplier, id: NodeId, out: &mut Vec<String>) {
    if let Ok(text) = applier.with_node_ref(id, |node: &TextNode| flattened_text(node)) {
        out.push(text);
        return;
    }
    if let Ok(children) = applier.children(id) {
        for child in children {
            collect_text_into(applier, child, out);
        }
    }
}

/// Finds the first text node whose flattened content equals `needle`.
pub fn find_text(applier: &MemoryApplier, root: NodeId, needle: &str) -> Option<NodeId> {
    if let Ok(text) = applier.with_node_ref(root, |node: &TextNode| flattened_text(node)) {
        if text == needle {
            return Some(root);
        }
    }
    for child in applier.children(root).ok()? {
        if let Some(found) = find_text(applier, child, needle) {
            return Some(found);
        }
    }
    None
}

/// Finds the first button whose subtree contains a text node matching `label`.
pub fn find_button_with_text(
    applier: &MemoryApplier,
    root: NodeId,
    label: &str,
) -> Option<NodeId> {
    let is_button = applier
        .with_node_ref(root, |_: &ButtonNode| ())
        .is_ok();
    if is_button && find_text(applier, root, label).is_some() {
        return Some(root);
    }
    for child in applier.children(root).ok()? {
        if let Some(found) = find_button_with_text(applier, child, label) {
            return Some(found);
        }
    }
    None
}

/// Runs a button's press handler.
pub fn press_button(applier: &MemoryApplier, id: NodeId) -> Result<(), NodeError> {
    let handler = applier.with_node_ref(id, |node: &ButtonNode| node.on_press.clone())?;
    (handler.borrow_mut())();
    Ok(())
}

//! Text widgets.
//!
//! [`Text`] is a plain native text view. [`SpannedText`] composes its content
//! from inline [`TextSpan`]s; whether a span materializes its own native view
//! or merges into the enclosing one is the span's kind, which is the whole
//! point of the demo.

#![allow(non_snake_case)]

use vtext_core::{with_current_composer, with_node_mut, NodeId};

use super::nodes::{TextNode, TextSpan};
use crate::composable;
use crate::modifier::Modifier;

#[composable]
pub fn Text<S: Into<String>>(value: S, modifier: Modifier) -> NodeId {
    let current: String = value.into();
    let id = with_current_composer(|composer| {
        composer.emit_node(|| TextNode {
            modifier: modifier.clone(),
            text: current.clone(),
            spans: Vec::new(),
        })
    });
    if let Err(err) = with_node_mut(id, |node: &mut TextNode| {
        if node.text != current {
            node.text = current.clone();
        }
        node.modifier = modifier.clone();
    }) {
        debug_assert!(false, "failed to update Text node: {err}");
    }
    id
}

#[composable]
pub fn SpannedText(modifier: Modifier, spans: Vec<TextSpan>) -> NodeId {
    let id = with_current_composer(|composer| {
        composer.emit_node(|| TextNode {
            modifier: modifier.clone(),
            text: String::new(),
            spans: spans.clone(),
        })
    });
    if let Err(err) = with_node_mut(id, |node: &mut TextNode| {
        if node.spans != spans {
            node.spans = spans.clone();
        }
        node.modifier = modifier.clone();
    }) {
        debug_assert!(false, "failed to update SpannedText node: {err}");
    }
    id
}

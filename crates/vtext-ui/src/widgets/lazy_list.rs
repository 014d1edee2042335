//! Lazy list widget.
//!
//! Composes a list *request* rather than the rows themselves: item count,
//! stable per-row keys, a pure per-row content function, the scroll window
//! and an identity token. The host backend materializes only the windowed
//! rows and rebuilds everything when the identity token changes.

#![allow(non_snake_case)]

use std::rc::Rc;

use vtext_core::{named_key, with_current_composer, with_node_mut, Key, NodeId};

use super::nodes::{LazyListNode, LazyListState, ListItems};
use crate::composable;
use crate::modifier::Modifier;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LazyColumnSpec {
    pub identity: Key,
}

impl LazyColumnSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn identity(mut self, identity: Key) -> Self {
        self.identity = identity;
        self
    }
}

impl Default for LazyColumnSpec {
    fn default() -> Self {
        Self {
            identity: named_key("lazy-column"),
        }
    }
}

/// Receiver scope for list content definition.
#[derive(Default)]
pub struct LazyListScope {
    items: Option<ListItems>,
}

impl LazyListScope {
    /// Adds `count` rows addressed by index, with a stable key per row and a
    /// pure content function invoked only for materialized rows.
    pub fn items<K, F>(&mut self, count: usize, key: K, content: F)
    where
        K: Fn(usize) -> String + 'static,
        F: Fn(usize) -> NodeId + 'static,
    {
        self.items = Some(ListItems {
            count,
            key: Rc::new(key),
            content: Rc::new(content),
        });
    }
}

#[composable]
pub fn LazyColumn(
    modifier: Modifier,
    spec: LazyColumnSpec,
    state: LazyListState,
    build: impl FnOnce(&mut LazyListScope),
) -> NodeId {
    let mut scope = LazyListScope::default();
    build(&mut scope);
    let items = scope.items;
    let id = with_current_composer(|composer| {
        composer.emit_node(|| LazyListNode {
            modifier: modifier.clone(),
            identity: spec.identity,
            state,
            items: items.clone(),
        })
    });
    if let Err(err) = with_node_mut(id, |node: &mut LazyListNode| {
        node.modifier = modifier;
        node.identity = spec.identity;
        node.state = state;
        node.items = items;
    }) {
        debug_assert!(false, "failed to update LazyColumn node: {err}");
    }
    id
}

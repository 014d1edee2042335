//! Headless compositing backend.
//!
//! Realizes composed node descriptors into a [`NativeViewTree`], applying
//! the two host contracts the demo exercises:
//!
//! - text spans: `TextSpan::Native` fragments get a dedicated child text
//!   view; `TextSpan::Virtual` fragments fold into the enclosing text view's
//!   single allocation;
//! - lazy lists: only rows inside the requested window are composed and
//!   realized, cached per row key, and the whole cache is discarded when the
//!   list's identity token changes.

use indexmap::IndexMap;
use vtext_core::{Composition, Key, MemoryApplier, NodeError, NodeId};
use vtext_render_common::{NativeView, NativeViewKind, NativeViewTree, Renderer};
use vtext_ui::{LazyListNode, ListItems, SpacerNode, TextNode, TextSpan};

struct RowCache {
    identity: Key,
    rows: IndexMap<String, NativeView>,
}

impl RowCache {
    fn new(identity: Key) -> Self {
        Self {
            identity,
            rows: IndexMap::new(),
        }
    }
}

/// Reference host collaborator: materializes native views without binding a
/// platform. One windowed list per realized tree is supported, which is all
/// the demo and its tests need.
#[derive(Default)]
pub struct HeadlessRenderer {
    tree: Option<NativeViewTree>,
    list_cache: Option<RowCache>,
    rows_composed: usize,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cumulative count of row compositions, i.e. list-cache misses.
    /// Diagnostic for asserting lazy materialization.
    pub fn rows_composed(&self) -> usize {
        self.rows_composed
    }

    fn realize_node(
        &mut self,
        applier: &MemoryApplier,
        id: NodeId,
    ) -> Result<NativeView, NodeError> {
        if let Ok(view) = applier.with_node_ref(id, realize_text) {
            return Ok(view);
        }
        if applier.with_node_ref(id, |_: &LazyListNode| ()).is_ok() {
            return self.realize_list(applier, id);
        }
        if applier.with_node_ref(id, |_: &SpacerNode| ()).is_ok() {
            return Ok(NativeView::view(Vec::new()));
        }
        // Containers (views, buttons): one native view wrapping the children.
        let mut children = Vec::new();
        for child in applier.children(id)? {
            children.push(self.realize_node(applier, child)?);
        }
        Ok(NativeView::view(children))
    }

    fn realize_list(
        &mut self,
        applier: &MemoryApplier,
        id: NodeId,
    ) -> Result<NativeView, NodeError> {
        let (identity, state, items) = applier.with_node_ref(id, |node: &LazyListNode| {
            (node.identity, node.state, node.items.clone())
        })?;
        let Some(items) = items else {
            return Ok(NativeView::view(Vec::new()));
        };

        let mut cache = match self.list_cache.take() {
            Some(cache) if cache.identity == identity => cache,
            Some(previous) => {
                log::debug!(
                    "list identity changed ({:#x} -> {:#x}); discarding {} realized rows",
                    previous.identity,
                    identity,
                    previous.rows.len()
                );
                RowCache::new(identity)
            }
            None => RowCache::new(identity),
        };

        let start = state.first_visible.min(items.count);
        let end = (state.first_visible + state.window_len).min(items.count);
        let mut children = Vec::with_capacity(end - start);
        for index in start..end {
            let row_key = (items.key)(index);
            let realized = match cache.rows.get(&row_key) {
                Some(row) => row.clone(),
                None => {
                    let row = self.compose_row(&items, index)?;
                    cache.rows.insert(row_key, row.clone());
                    row
                }
            };
            children.push(realized);
        }
        self.list_cache = Some(cache);
        Ok(NativeView::view(children))
    }

    /// Runs a row's pure content function in a scratch composition and
    /// realizes the result.
    fn compose_row(&mut self, items: &ListItems, index: usize) -> Result<NativeView, NodeError> {
        self.rows_composed += 1;
        let mut scratch = Composition::new();
        let content = items.content.clone();
        let row_key = vtext_core::named_key(&(items.key)(index));
        scratch.render(row_key, move || content(index))?;
        let Some(root) = scratch.root() else {
            debug_assert!(false, "row composition produced no root");
            return Ok(NativeView::view(Vec::new()));
        };
        self.realize_node(scratch.applier(), root)
    }
}

impl Renderer for HeadlessRenderer {
    type Error = NodeError;

    fn rebuild(&mut self, applier: &mut MemoryApplier, root: NodeId) -> Result<(), NodeError> {
        let realized = self.realize_node(applier, root)?;
        self.tree = Some(NativeViewTree { root: realized });
        Ok(())
    }

    fn tree(&self) -> Option<&NativeViewTree> {
        self.tree.as_ref()
    }
}

fn realize_text(node: &TextNode) -> NativeView {
    let mut content = node.text.clone();
    let mut merged_spans = 0usize;
    let mut children = Vec::new();
    for span in &node.spans {
        match span {
            TextSpan::Native(fragment) => {
                children.push(NativeView::text(fragment.clone(), 0));
            }
            TextSpan::Virtual(fragment) => {
                content.push_str(fragment);
                merged_spans += 1;
            }
        }
    }
    NativeView {
        kind: NativeViewKind::Text {
            content,
            merged_spans,
        },
        children,
    }
}

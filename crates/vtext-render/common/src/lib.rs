//! Common rendering contracts shared between compositing backends.
//!
//! A backend consumes composed node descriptors and produces a
//! [`NativeViewTree`]: the tree of native view allocations a host platform
//! would actually pay for. The demo's whole purpose is comparing the shape
//! of this tree under different text compositions.

use std::fmt;

use vtext_core::{MemoryApplier, NodeId};

/// What a realized native view is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NativeViewKind {
    /// A plain container/box allocation.
    View,
    /// A text view allocation. `content` is the text this view draws itself;
    /// `merged_spans` counts the virtual fragments folded into it.
    Text { content: String, merged_spans: usize },
}

/// One native view allocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NativeView {
    pub kind: NativeViewKind,
    pub children: Vec<NativeView>,
}

impl NativeView {
    pub fn view(children: Vec<NativeView>) -> Self {
        Self {
            kind: NativeViewKind::View,
            children,
        }
    }

    pub fn text(content: impl Into<String>, merged_spans: usize) -> Self {
        Self {
            kind: NativeViewKind::Text {
                content: content.into(),
                merged_spans,
            },
            children: Vec::new(),
        }
    }

    /// The text this view renders, including nested text-run children.
    pub fn flattened_text(&self) -> String {
        let mut out = String::new();
        self.append_text(&mut out);
        out
    }

    fn append_text(&self, out: &mut String) {
        if let NativeViewKind::Text { content, .. } = &self.kind {
            out.push_str(content);
        }
        for child in &self.children {
            child.append_text(out);
        }
    }

    fn accumulate(&self, stats: &mut NativeTreeStats) {
        stats.views += 1;
        if let NativeViewKind::Text {
            content,
            merged_spans,
        } = &self.kind
        {
            stats.text_views += 1;
            // A text leaf is a text view that requested its own allocation
            // for its own content. Merged virtual content does not count:
            // those fragments never asked for a view of their own.
            if !content.is_empty() && *merged_spans == 0 {
                stats.text_leaves += 1;
            }
        }
        for child in &self.children {
            child.accumulate(stats);
        }
    }

    fn describe(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        match &self.kind {
            NativeViewKind::View => out.push_str(&format!("{indent}View\n")),
            NativeViewKind::Text {
                content,
                merged_spans,
            } => out.push_str(&format!(
                "{indent}Text({content:?}, merged: {merged_spans})\n"
            )),
        }
        for child in &self.children {
            child.describe(out, depth + 1);
        }
    }
}

/// Size measures of a realized tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NativeTreeStats {
    /// Every native allocation, containers included.
    pub views: usize,
    /// Native text view allocations.
    pub text_views: usize,
    /// Independently materialized text-bearing allocations.
    pub text_leaves: usize,
}

impl fmt::Display for NativeTreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} native views ({} text views, {} text leaves)",
            self.views, self.text_views, self.text_leaves
        )
    }
}

/// The realized native allocation tree for one composition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NativeViewTree {
    pub root: NativeView,
}

impl NativeViewTree {
    pub fn stats(&self) -> NativeTreeStats {
        let mut stats = NativeTreeStats::default();
        self.root.accumulate(&mut stats);
        stats
    }

    /// Rendered text content in order, one entry per top-level text view.
    /// Nested text runs flatten into their enclosing text view's entry, so
    /// compositions that differ only in allocation strategy compare equal.
    pub fn text_content(&self) -> Vec<String> {
        let mut out = Vec::new();
        Self::collect_text(&self.root, &mut out);
        out
    }

    fn collect_text(view: &NativeView, out: &mut Vec<String>) {
        if matches!(view.kind, NativeViewKind::Text { .. }) {
            out.push(view.flattened_text());
            return;
        }
        for child in &view.children {
            Self::collect_text(child, out);
        }
    }

    pub fn describe(&self) -> String {
        let mut out = String::new();
        self.root.describe(&mut out, 0);
        out
    }
}

/// Abstraction implemented by concrete compositing backends.
pub trait Renderer {
    type Error: fmt::Debug;

    /// Realizes the composed tree under `root` into native view allocations.
    fn rebuild(&mut self, applier: &mut MemoryApplier, root: NodeId) -> Result<(), Self::Error>;

    /// The tree produced by the last successful [`Renderer::rebuild`].
    fn tree(&self) -> Option<&NativeViewTree>;
}

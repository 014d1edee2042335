//! Node descriptor types emitted by the widget functions.
//!
//! Descriptors carry composition data only; realizing them into native view
//! allocations is the compositing backend's job.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexSet;
use vtext_core::{Key, Node, NodeId};

use crate::modifier::{Modifier, Size};

/// Layout direction of a container view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
    Stack,
}

/// A generic container that realizes as one native view.
pub struct ViewNode {
    pub modifier: Modifier,
    pub axis: Axis,
    pub children: Vec<NodeId>,
}

impl Node for ViewNode {
    fn insert_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    fn children(&self) -> Vec<NodeId> {
        self.children.clone()
    }
}

/// One inline fragment of a text view's content.
///
/// `Native` requests a dedicated native text view for the fragment;
/// `Virtual` is content the backend folds into the enclosing text view's
/// single allocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextSpan {
    Native(String),
    Virtual(String),
}

impl TextSpan {
    pub fn content(&self) -> &str {
        match self {
            TextSpan::Native(content) | TextSpan::Virtual(content) => content,
        }
    }

    pub fn is_virtual(&self) -> bool {
        matches!(self, TextSpan::Virtual(_))
    }
}

/// A text view: direct content plus optional inline spans.
#[derive(Clone, Default)]
pub struct TextNode {
    pub modifier: Modifier,
    pub text: String,
    pub spans: Vec<TextSpan>,
}

impl Node for TextNode {}

/// A pressable container.
pub struct ButtonNode {
    pub modifier: Modifier,
    pub on_press: Rc<RefCell<dyn FnMut()>>,
    pub children: IndexSet<NodeId>,
}

impl Node for ButtonNode {
    fn insert_child(&mut self, child: NodeId) {
        self.children.insert(child);
    }

    fn children(&self) -> Vec<NodeId> {
        self.children.iter().copied().collect()
    }
}

#[derive(Clone, Copy, Default)]
pub struct SpacerNode {
    pub size: Size,
}

impl Node for SpacerNode {}

/// Scroll window of a lazy list: which rows the host materializes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LazyListState {
    pub first_visible: usize,
    pub window_len: usize,
}

impl Default for LazyListState {
    fn default() -> Self {
        Self {
            first_visible: 0,
            window_len: 10,
        }
    }
}

impl LazyListState {
    pub fn scrolled_to(self, first_visible: usize) -> Self {
        Self {
            first_visible,
            ..self
        }
    }
}

/// The item source handed to the list host: ordered rows addressed by index,
/// a stable per-row key and a pure per-row content function.
#[derive(Clone)]
pub struct ListItems {
    pub count: usize,
    pub key: Rc<dyn Fn(usize) -> String>,
    pub content: Rc<dyn Fn(usize) -> NodeId>,
}

/// The composed lazy list request.
///
/// `identity` is the list's identity token: the host interprets a change as
/// "this is conceptually a different list" and rebuilds its realized rows
/// instead of patching them.
pub struct LazyListNode {
    pub modifier: Modifier,
    pub identity: Key,
    pub state: LazyListState,
    pub items: Option<ListItems>,
}

impl Node for LazyListNode {}

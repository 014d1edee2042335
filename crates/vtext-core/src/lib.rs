#![doc = r"Core composition runtime: slot table, node applier, composer and state cells."]

pub mod owned;
pub mod runtime;
pub mod slot_table;
pub mod state;

pub use owned::Owned;
pub use runtime::{Runtime, RuntimeHandle};
pub use slot_table::SlotTable;
pub use state::MutableState;

use std::any::Any;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::thread_local;

pub type Key = u64;
pub type NodeId = usize;

/// Stable key for a composable call site.
pub fn location_key(file: &str, line: u32, column: u32) -> Key {
    let mut hasher = ahash::AHasher::default();
    file.hash(&mut hasher);
    line.hash(&mut hasher);
    column.hash(&mut hasher);
    hasher.finish()
}

/// Stable key derived from a name, for identity tokens chosen by the app.
pub fn named_key(name: &str) -> Key {
    let mut hasher = ahash::AHasher::default();
    name.hash(&mut hasher);
    hasher.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeError {
    Missing { id: NodeId },
    TypeMismatch { id: NodeId, expected: &'static str },
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeError::Missing { id } => write!(f, "node {id} is missing"),
            NodeError::TypeMismatch { id, expected } => {
                write!(f, "node {id} is not a {expected}")
            }
        }
    }
}

impl std::error::Error for NodeError {}

/// A node descriptor emitted into the composition tree.
pub trait Node: Any {
    fn mount(&mut self) {}
    fn update(&mut self) {}
    fn unmount(&mut self) {}
    fn insert_child(&mut self, _child: NodeId) {}
    fn children(&self) -> Vec<NodeId> {
        Vec::new()
    }

    /// Concrete type name for tree dumps. Resolved per implementor; calling
    /// `type_name` on the boxed `dyn Node` would only ever name the trait.
    fn type_label(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl dyn Node {
    pub fn as_any(&self) -> &dyn Any {
        self
    }

    pub fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// In-memory node store addressed by [`NodeId`].
#[derive(Default)]
pub struct MemoryApplier {
    nodes: Vec<Option<Box<dyn Node>>>,
}

impl MemoryApplier {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn create(&mut self, node: Box<dyn Node>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Some(node));
        id
    }

    pub fn get(&self, id: NodeId) -> Result<&dyn Node, NodeError> {
        self.nodes
            .get(id)
            .and_then(|slot| slot.as_deref())
            .ok_or(NodeError::Missing { id })
    }

    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut dyn Node, NodeError> {
        self.nodes
            .get_mut(id)
            .and_then(|slot| slot.as_deref_mut())
            .ok_or(NodeError::Missing { id })
    }

    pub fn with_node<N: Node + 'static, R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut N) -> R,
    ) -> Result<R, NodeError> {
        let node = self.get_mut(id)?;
        let typed = node
            .as_any_mut()
            .downcast_mut::<N>()
            .ok_or(NodeError::TypeMismatch {
                id,
                expected: std::any::type_name::<N>(),
            })?;
        Ok(f(typed))
    }

    pub fn with_node_ref<N: Node + 'static, R>(
        &self,
        id: NodeId,
        f: impl FnOnce(&N) -> R,
    ) -> Result<R, NodeError> {
        let node = self.get(id)?;
        let typed = node
            .as_any()
            .downcast_ref::<N>()
            .ok_or(NodeError::TypeMismatch {
                id,
                expected: std::any::type_name::<N>(),
            })?;
        Ok(f(typed))
    }

    pub fn children(&self, id: NodeId) -> Result<Vec<NodeId>, NodeError> {
        Ok(self.get(id)?.children())
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unmounts and discards a single node. Used for nodes a recomposition
    /// no longer emits.
    pub fn remove(&mut self, id: NodeId) -> Result<(), NodeError> {
        let slot = self.nodes.get_mut(id).ok_or(NodeError::Missing { id })?;
        let mut node = slot.take().ok_or(NodeError::Missing { id })?;
        node.unmount();
        Ok(())
    }

    /// Unmounts and discards every node. Used when a composition is torn
    /// down under a new root key.
    pub fn clear(&mut self) {
        for slot in &mut self.nodes {
            if let Some(node) = slot.as_deref_mut() {
                node.unmount();
            }
        }
        self.nodes.clear();
    }

    pub fn dump_tree(&self, root: Option<NodeId>) -> String {
        let mut output = String::new();
        match root {
            Some(root_id) => self.dump_node(&mut output, root_id, 0),
            None => output.push_str("(no root)\n"),
        }
        output
    }

    fn dump_node(&self, output: &mut String, id: NodeId, depth: usize) {
        let indent = "  ".repeat(depth);
        if let Some(Some(node)) = self.nodes.get(id) {
            let type_name = node.type_label();
            let short = type_name.rsplit("::").next().unwrap_or(type_name);
            output.push_str(&format!("{indent}[{id}] {short}\n"));
            for child in node.children() {
                self.dump_node(output, child, depth + 1);
            }
        } else {
            output.push_str(&format!("{indent}[{id}] <missing>\n"));
        }
    }
}

type Command = Box<dyn FnOnce(&mut MemoryApplier)>;

thread_local! {
    static COMPOSER_STACK: RefCell<Vec<*mut ()>> = const { RefCell::new(Vec::new()) };
}

struct ComposerScopeGuard;

impl Drop for ComposerScopeGuard {
    fn drop(&mut self) {
        COMPOSER_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

fn enter_composer_scope(composer: &mut Composer<'_>) -> ComposerScopeGuard {
    COMPOSER_STACK.with(|stack| {
        stack
            .borrow_mut()
            .push(composer as *mut Composer<'_> as *mut ());
    });
    ComposerScopeGuard
}

struct ComposerBorrow {
    index: usize,
    ptr: *mut (),
}

impl Drop for ComposerBorrow {
    fn drop(&mut self) {
        COMPOSER_STACK.with(|stack| {
            stack.borrow_mut()[self.index] = self.ptr;
        });
    }
}

/// Runs `f` against the composer installed on this thread.
///
/// Panics when called outside of [`Composition::render`]; composables are
/// only meaningful during an active composition pass. Also panics when `f`
/// itself calls back in: the composer's stack entry is taken for the
/// duration of the call, so a reentrant borrow can never alias it.
pub fn with_current_composer<R>(f: impl FnOnce(&mut Composer<'_>) -> R) -> R {
    let (index, ptr) = COMPOSER_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        let index = stack
            .len()
            .checked_sub(1)
            .expect("with_current_composer: no active composer");
        let ptr = std::mem::replace(&mut stack[index], std::ptr::null_mut());
        (index, ptr)
    });
    assert!(
        !ptr.is_null(),
        "with_current_composer: composer already borrowed"
    );
    let _restore = ComposerBorrow { index, ptr };
    let composer = ptr as *mut Composer<'_>;
    // SAFETY: the pointer was pushed from a live mutable reference, remains
    // valid until the corresponding scope guard is dropped, and its stack
    // entry is nulled out while this borrow is live.
    let composer = unsafe { &mut *composer };
    f(composer)
}

/// Typed access to a node from inside a composable.
pub fn with_node_mut<N: Node + 'static, R>(
    id: NodeId,
    f: impl FnOnce(&mut N) -> R,
) -> Result<R, NodeError> {
    with_current_composer(|composer| composer.applier.with_node(id, f))
}

pub fn push_parent(id: NodeId) {
    with_current_composer(|composer| composer.push_parent(id));
}

pub fn pop_parent() {
    with_current_composer(|composer| composer.pop_parent());
}

pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Owned<T> {
    with_current_composer(|composer| composer.remember(init))
}

#[allow(non_snake_case)]
pub fn useState<T: 'static>(init: impl FnOnce() -> T) -> MutableState<T> {
    with_current_composer(|composer| {
        let handle = composer.runtime_handle();
        composer
            .remember(move || MutableState::with_runtime(init(), handle))
            .with(|state| state.clone())
    })
}

/// Orchestrates the slot table, node applier and parent stack during a
/// composition pass.
pub struct Composer<'a> {
    slots: &'a mut SlotTable,
    applier: &'a mut MemoryApplier,
    runtime: RuntimeHandle,
    parents: Vec<NodeId>,
    commands: VecDeque<Command>,
}

impl<'a> Composer<'a> {
    pub fn new(
        slots: &'a mut SlotTable,
        applier: &'a mut MemoryApplier,
        runtime: RuntimeHandle,
    ) -> Self {
        Self {
            slots,
            applier,
            runtime,
            parents: Vec::new(),
            commands: VecDeque::new(),
        }
    }

    /// Opens a group without holding the composer across the group body.
    /// Used by the `#[composable]` macro expansion; pair with [`Self::end_group`].
    pub fn start_group(&mut self, key: Key) {
        self.slots.start(key);
    }

    pub fn end_group(&mut self) {
        self.slots.end();
    }

    /// Emits a node for the current slot, reusing the previously created one
    /// when the composition structure is unchanged.
    pub fn emit_node<N: Node + 'static>(&mut self, init: impl FnOnce() -> N) -> NodeId {
        if let Some(id) = self.slots.read_node() {
            if let Ok(node) = self.applier.get_mut(id) {
                node.update();
            }
            return id;
        }
        let id = self.applier.create(Box::new(init()));
        self.slots.record_node(id);
        if let Some(parent) = self.parents.last().copied() {
            if let Ok(node) = self.applier.get_mut(parent) {
                node.insert_child(id);
            }
        }
        self.commands
            .push_back(Box::new(move |applier: &mut MemoryApplier| {
                if let Ok(node) = applier.get_mut(id) {
                    node.mount();
                }
            }));
        id
    }

    pub fn remember<T: 'static>(&mut self, init: impl FnOnce() -> T) -> Owned<T> {
        if let Some(existing) = self.slots.read_value::<Owned<T>>() {
            return existing;
        }
        let owned = Owned::new(init());
        self.slots.record_value(owned.clone());
        owned
    }

    pub fn push_parent(&mut self, id: NodeId) {
        self.parents.push(id);
    }

    pub fn pop_parent(&mut self) {
        self.parents.pop();
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.clone()
    }

    fn take_commands(&mut self) -> VecDeque<Command> {
        std::mem::take(&mut self.commands)
    }
}

/// A retained composition: slot table plus node store plus the key it was
/// last rendered under.
///
/// Rendering under a different root key is the identity-token contract:
/// the previous tree is torn down wholesale instead of patched. Rendering
/// under the same key reuses nodes positionally and updates them in place.
pub struct Composition {
    slots: SlotTable,
    applier: MemoryApplier,
    runtime: Runtime,
    root: Option<NodeId>,
    root_key: Option<Key>,
}

impl Composition {
    pub fn new() -> Self {
        Self::with_runtime(MemoryApplier::new(), Runtime::new())
    }

    pub fn with_runtime(applier: MemoryApplier, runtime: Runtime) -> Self {
        Self {
            slots: SlotTable::new(),
            applier,
            runtime,
            root: None,
            root_key: None,
        }
    }

    pub fn render(
        &mut self,
        root_key: Key,
        mut content: impl FnMut() -> NodeId,
    ) -> Result<(), NodeError> {
        if self.root_key != Some(root_key) {
            self.slots.clear();
            self.applier.clear();
            self.root = None;
            self.root_key = Some(root_key);
        }
        self.slots.reset();
        let mut composer = Composer::new(&mut self.slots, &mut self.applier, self.runtime.handle());
        let root = {
            let _guard = enter_composer_scope(&mut composer);
            with_current_composer(|composer| composer.start_group(root_key));
            let root = content();
            with_current_composer(|composer| composer.end_group());
            root
        };
        let mut commands = composer.take_commands();
        drop(composer);
        // A pass that emitted less than the previous one leaves a stale slot
        // tail; the nodes recorded there are gone from the composition.
        for id in self.slots.trim() {
            self.applier.remove(id)?;
        }
        while let Some(command) = commands.pop_front() {
            command(&mut self.applier);
        }
        self.root = Some(root);
        Ok(())
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn applier(&self) -> &MemoryApplier {
        &self.applier
    }

    pub fn applier_mut(&mut self) -> &mut MemoryApplier {
        &mut self.applier
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn take_frame_request(&self) -> bool {
        self.runtime.take_frame_request()
    }
}

impl Default for Composition {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;

//! Positional slot storage backing the composer.
//!
//! Reuse is strictly positional: a render pass that keeps the same structure
//! reads back the groups, nodes and values it wrote last time. When the
//! stream diverges from what is stored, the stale tail is truncated and
//! rewritten; node ids dropped that way are reported through [`SlotTable::trim`]
//! at end of pass so the caller can unmount them. Structural identity changes
//! are expected to go through a root key change on [`crate::Composition`],
//! which clears the table outright.

use std::any::Any;
use std::rc::Rc;

use crate::{Key, NodeId};

#[derive(Default)]
pub struct SlotTable {
    slots: Vec<Slot>,
    cursor: usize,
    orphaned: Vec<NodeId>,
}

#[derive(Clone)]
enum Slot {
    GroupStart { key: Key },
    GroupEnd,
    Node(NodeId),
    Value(Rc<dyn Any>),
}

impl SlotTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewinds the cursor for a new pass over retained slots.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Discards all retained slots. The caller tears the node store down
    /// wholesale, so pending orphans are dropped too.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.cursor = 0;
        self.orphaned.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn start(&mut self, key: Key) {
        if let Some(Slot::GroupStart { key: existing }) = self.slots.get(self.cursor) {
            if *existing == key {
                self.cursor += 1;
                return;
            }
        }
        self.truncate_tail();
        self.slots.push(Slot::GroupStart { key });
        self.cursor += 1;
    }

    pub(crate) fn end(&mut self) {
        if let Some(Slot::GroupEnd) = self.slots.get(self.cursor) {
            self.cursor += 1;
            return;
        }
        self.truncate_tail();
        self.slots.push(Slot::GroupEnd);
        self.cursor += 1;
    }

    pub(crate) fn read_node(&mut self) -> Option<NodeId> {
        if let Some(Slot::Node(id)) = self.slots.get(self.cursor) {
            let id = *id;
            self.cursor += 1;
            return Some(id);
        }
        None
    }

    pub(crate) fn record_node(&mut self, id: NodeId) {
        self.truncate_tail();
        self.slots.push(Slot::Node(id));
        self.cursor += 1;
    }

    pub(crate) fn read_value<V: Any + Clone>(&mut self) -> Option<V> {
        if let Some(Slot::Value(stored)) = self.slots.get(self.cursor) {
            if let Some(value) = stored.downcast_ref::<V>() {
                let value = value.clone();
                self.cursor += 1;
                return Some(value);
            }
        }
        None
    }

    pub(crate) fn record_value<V: Any>(&mut self, value: V) {
        self.truncate_tail();
        self.slots.push(Slot::Value(Rc::new(value)));
        self.cursor += 1;
    }

    /// Truncates whatever a finished pass left beyond the cursor and yields
    /// every node id the table dropped during the pass, for unmounting.
    pub(crate) fn trim(&mut self) -> Vec<NodeId> {
        self.truncate_tail();
        std::mem::take(&mut self.orphaned)
    }

    fn truncate_tail(&mut self) {
        for slot in self.slots.drain(self.cursor..) {
            if let Slot::Node(id) = slot {
                self.orphaned.push(id);
            }
        }
    }
}

//! Frame scheduling cell shared between state writes and the render loop.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

struct RuntimeInner {
    needs_frame: Cell<bool>,
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RuntimeInner {
                needs_frame: Cell::new(true),
            }),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::clone(&self.inner),
        }
    }

    /// Consumes a pending frame request, if any.
    pub fn take_frame_request(&self) -> bool {
        self.inner.needs_frame.replace(false)
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Rc<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn request_frame(&self) {
        self.inner.needs_frame.set(true);
    }
}

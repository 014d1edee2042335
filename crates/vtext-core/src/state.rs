//! Single-threaded observable state cell.
//!
//! Writing a new value raises the runtime's frame request so the owning
//! shell knows to recompose. There is no per-scope invalidation; the whole
//! content closure re-runs and nodes are reused positionally.

use std::cell::RefCell;
use std::rc::Rc;

use crate::runtime::RuntimeHandle;

pub struct MutableState<T> {
    inner: Rc<RefCell<T>>,
    runtime: RuntimeHandle,
}

impl<T: 'static> MutableState<T> {
    pub fn with_runtime(value: T, runtime: RuntimeHandle) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
            runtime,
        }
    }

    pub fn set(&self, value: T) {
        *self.inner.borrow_mut() = value;
        self.runtime.request_frame();
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.inner.borrow_mut());
        self.runtime.request_frame();
        result
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow())
    }
}

impl<T: Clone + 'static> MutableState<T> {
    pub fn get(&self) -> T {
        self.inner.borrow().clone()
    }

    pub fn value(&self) -> T {
        self.get()
    }
}

impl<T> Clone for MutableState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            runtime: self.runtime.clone(),
        }
    }
}

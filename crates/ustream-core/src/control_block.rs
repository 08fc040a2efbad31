//! The shared, reference-counted control block (spec §3, "Control block").
//!
//! `Arc<ControlBlockInner>` is this crate's reading of the spec's own design
//! note: "an instance holds a raw back-reference... in a language with
//! destructors, the equivalent is a trait object whose `drop` implementation
//! releases data first then its own storage". `Arc`'s strong count is the
//! atomic ref-count port (spec §6); `ControlBlockInner::drop` reproduces the
//! fixed release order (`data_release` strictly before `control_block_release`,
//! each invoked at most once) that the C vtable expressed as two raw
//! function pointers.

use std::sync::Arc;

use crate::backend::Backend;

pub(crate) type ControlBlock = Arc<ControlBlockInner>;

pub(crate) struct ControlBlockInner {
    // `Option` only so `Drop` can move the backend out and drop it before
    // `on_drop` runs; it is `Some` for the entire reachable lifetime of the
    // control block.
    backend: Option<Box<dyn Backend>>,
    on_drop: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl ControlBlockInner {
    pub(crate) fn new(backend: Box<dyn Backend>) -> Self {
        Self {
            backend: Some(backend),
            on_drop: None,
        }
    }

    /// `on_drop` plays the role of spec §3's `control_block_release`: a
    /// caller-supplied hook invoked exactly once, after the backend's own
    /// data has been released, when the last instance referencing this
    /// control block is dropped.
    pub(crate) fn with_release(
        backend: Box<dyn Backend>,
        on_drop: impl FnOnce() + Send + Sync + 'static,
    ) -> Self {
        Self {
            backend: Some(backend),
            on_drop: Some(Box::new(on_drop)),
        }
    }

    pub(crate) fn backend(&self) -> &dyn Backend {
        // Invariant: `backend` is only ever `None` inside `drop`, after which
        // no live reference to `self` can observe this getter again.
        self.backend.as_deref().expect("backend read after drop")
    }
}

impl Drop for ControlBlockInner {
    fn drop(&mut self) {
        // Data release strictly before control-block release (spec §3).
        drop(self.backend.take());
        if let Some(on_drop) = self.on_drop.take() {
            on_drop();
        }
    }
}

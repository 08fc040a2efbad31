//! The forward stream's control block — structurally identical to the
//! rewindable core's (spec §3), but there is no public `clone`, so in
//! practice exactly one [`crate::ForwardStream`] ever points at a given
//! control block. The two-phase release order is kept anyway: it is what
//! the vtable this is modeled on does, and a future caller-supplied
//! `ForwardBackend` that does acquire a second handle (a pooled connection
//! shared between a forward stream and something else entirely) gets the
//! same guarantee every other control block in this workspace gives.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::backend::ForwardBackend;

pub(crate) type ForwardControlBlock = Arc<ForwardControlBlockInner>;

/// The backend lives behind a mutex, not a plain field, purely to let a
/// `&self` `Arc` hand out `&mut dyn ForwardBackend` for `read`/`flush`
/// (there is no concurrent access to guard against in practice, since
/// nothing clones a `ForwardStream`).
pub(crate) struct ForwardControlBlockInner {
    backend: Mutex<Option<Box<dyn ForwardBackend>>>,
    on_drop: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl ForwardControlBlockInner {
    pub(crate) fn new(backend: Box<dyn ForwardBackend>) -> Self {
        Self {
            backend: Mutex::new(Some(backend)),
            on_drop: None,
        }
    }

    pub(crate) fn with_release(
        backend: Box<dyn ForwardBackend>,
        on_drop: impl FnOnce() + Send + Sync + 'static,
    ) -> Self {
        Self {
            backend: Mutex::new(Some(backend)),
            on_drop: Some(Box::new(on_drop)),
        }
    }

    pub(crate) fn with_backend<R>(&self, f: impl FnOnce(&mut dyn ForwardBackend) -> R) -> R {
        let mut guard = self.backend.lock();
        let backend = guard.as_deref_mut().expect("backend read after drop");
        f(backend)
    }
}

impl Drop for ForwardControlBlockInner {
    fn drop(&mut self) {
        drop(self.backend.get_mut().take());
        if let Some(on_drop) = self.on_drop.take() {
            on_drop();
        }
    }
}

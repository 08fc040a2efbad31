//! The forward stream handle (spec §4.4, component C7).

use std::sync::Arc;

use ustream_core::{UResult, UStreamError};

use crate::backend::ForwardBackend;
use crate::control_block::{ForwardControlBlock, ForwardControlBlockInner};

/// A forward-only, non-rewindable streaming byte buffer.
///
/// Unlike [`ustream_core::Instance`], `ForwardStream` has no
/// `set_position`/`reset`/`release`/`clone`: once a byte has been produced
/// by `read` or `flush`, there is no way back to it. This is the shape for
/// data whose total size is not known up front and cannot be cheaply
/// re-acquired, where the core crate's sliding-window bookkeeping would be
/// dead weight.
pub struct ForwardStream {
    control_block: ForwardControlBlock,
}

impl ForwardStream {
    pub(crate) fn new(backend: Box<dyn ForwardBackend>) -> Self {
        Self {
            control_block: Arc::new(ForwardControlBlockInner::new(backend)),
        }
    }

    pub(crate) fn with_release(
        backend: Box<dyn ForwardBackend>,
        on_drop: impl FnOnce() + Send + Sync + 'static,
    ) -> Self {
        Self {
            control_block: Arc::new(ForwardControlBlockInner::with_release(backend, on_drop)),
        }
    }

    /// Builds a forward stream over a third-party [`ForwardBackend`]. This is
    /// the entry point a backend outside this crate uses; the in-memory
    /// backend shipped here goes through the crate-private constructor
    /// instead, since it builds its control block directly.
    pub fn from_custom_backend(backend: Box<dyn ForwardBackend>) -> Self {
        Self::new(backend)
    }

    /// As [`ForwardStream::from_custom_backend`], but with a caller-supplied
    /// hook run once, after the backend itself has been dropped, when this
    /// stream is disposed.
    pub fn from_custom_backend_with_release(
        backend: Box<dyn ForwardBackend>,
        on_drop: impl FnOnce() + Send + Sync + 'static,
    ) -> Self {
        Self::with_release(backend, on_drop)
    }

    /// §4.4's `read`. `out` must be non-empty; callers loop until `Eof`.
    pub fn read(&mut self, out: &mut [u8]) -> UResult<usize> {
        if out.is_empty() {
            return Err(UStreamError::IllegalArgument);
        }
        self.control_block.with_backend(|backend| backend.read(out))
    }

    /// §4.4's `flush`: drains the entire remainder through `push`, with no
    /// intermediate copy into a caller-owned buffer.
    pub fn flush(&mut self, push: &mut dyn FnMut(&[u8]) -> UResult<()>) -> UResult<()> {
        self.control_block.with_backend(|backend| backend.flush(push))
    }

    /// §4.4's `get_remaining_size`.
    pub fn get_remaining_size(&self) -> usize {
        self.control_block.with_backend(|backend| backend.get_remaining_size())
    }

    /// §4.4's `dispose`. Spelled out explicitly to mirror the vtable this is
    /// modeled on; equivalent to dropping the stream.
    pub fn dispose(self) {
        drop(self);
    }
}

//! The per-consumer cursor (spec §3 "Instance") and the public dispatch
//! surface (spec §4.1, component C8).

use crate::backend::Backend;
use crate::control_block::{ControlBlock, ControlBlockInner};
use crate::cursor::Cursor;
use crate::error::{UResult, UStreamError};

/// A lightweight, per-consumer cursor over a shared, reference-counted
/// control block.
///
/// `Instance` intentionally does **not** implement [`Clone`]: spec.md's
/// design notes call this out explicitly — cloning a ustream always takes a
/// logical offset and is never an implicit, value-semantics copy. Use
/// [`Instance::clone_at`] instead.
///
/// Not `Send` across an await point or a raw thread boundary by itself is
/// fine to violate (the type is `Send`, since the backend trait requires
/// `Send + Sync`) but a single `Instance` must never be used concurrently
/// from two threads at once (spec §5) — that contract is not, and cannot
/// be, enforced by the type system here, same as in the source.
pub struct Instance {
    control_block: ControlBlock,
    cursor: Cursor,
}

impl Instance {
    fn new(control_block: ControlBlock, length: usize) -> Self {
        Self {
            control_block,
            cursor: Cursor::new(length),
        }
    }

    pub(crate) fn from_backend(backend: Box<dyn Backend>, length: usize) -> Self {
        Self::new(std::sync::Arc::new(ControlBlockInner::new(backend)), length)
    }

    /// Builds an instance over a third-party [`Backend`]. This is the entry
    /// point a backend outside this crate uses; the in-memory and
    /// multi-stream backends shipped here go through the crate-private
    /// constructors instead, since they construct their control blocks
    /// directly.
    pub fn from_custom_backend(backend: Box<dyn Backend>, length: usize) -> Self {
        Self::from_backend(backend, length)
    }

    /// As [`Instance::from_custom_backend`], but with a caller-supplied hook
    /// run once, after the backend itself has been released, when the last
    /// instance sharing this control block is dropped — the `on_drop` half
    /// of spec §3's two-phase release (the backend's own `Drop`, if any,
    /// already covers `data_release`; this covers `control_block_release`
    /// for a backend that needs to release something beyond its own
    /// storage, such as an external resource pool handle it does not own
    /// exclusively).
    pub fn from_custom_backend_with_release(
        backend: Box<dyn Backend>,
        length: usize,
        on_drop: impl FnOnce() + Send + Sync + 'static,
    ) -> Self {
        Self::new(
            std::sync::Arc::new(ControlBlockInner::with_release(backend, on_drop)),
            length,
        )
    }

    pub(crate) fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Builds a fresh `Instance` that shares `control_block` but starts its
    /// own cursor at physical position `current`, reporting `current` at
    /// logical position `logical_offset`. Used by the multi-stream backend
    /// to reconstruct a donor-like cursor without going through the public
    /// `clone_at` (which also bumps the shared ref count, already accounted
    /// for by the caller in that case).
    pub(crate) fn with_cursor(control_block: ControlBlock, cursor: Cursor) -> Self {
        Self {
            control_block,
            cursor,
        }
    }

    /// §4.1.5.
    pub fn get_position(&self) -> UResult<usize> {
        self.cursor.get_position()
    }

    /// §4.1.4.
    pub fn get_remaining_size(&self) -> usize {
        self.cursor.get_remaining_size()
    }

    /// §4.1.1.
    pub fn set_position(&mut self, logical_position: usize) -> UResult<()> {
        self.control_block
            .backend()
            .set_position(&mut self.cursor, logical_position)
    }

    /// §4.1.2.
    pub fn reset(&mut self) {
        self.control_block.backend().reset(&mut self.cursor);
    }

    /// §4.1.6.
    pub fn release(&mut self, logical_position: usize) -> UResult<()> {
        self.control_block
            .backend()
            .release(&mut self.cursor, logical_position)
    }

    /// The signed physical-to-logical bias for this instance's cursor. Not
    /// part of the public surface; the multi-stream backend uses it to
    /// translate between its own logical numbering and each child's.
    pub(crate) fn offset_diff(&self) -> i64 {
        self.cursor.offset_diff
    }

    /// The physical position up to (exclusive) which this instance's cursor
    /// has already been released. Lets the multi-stream backend make
    /// repeated `release` calls idempotent on each child.
    pub(crate) fn first_valid_physical(&self) -> usize {
        self.cursor.first_valid
    }

    /// §4.1.3. `out` must be non-empty; callers must loop until `Eof`.
    pub fn read(&mut self, out: &mut [u8]) -> UResult<usize> {
        if out.is_empty() {
            return Err(UStreamError::IllegalArgument);
        }
        self.control_block.backend().read(&mut self.cursor, out)
    }

    /// §4.1.7. Creates an independent cursor over the same control block,
    /// starting at this instance's current position and reporting that
    /// position as `logical_offset`.
    pub fn clone_at(&self, logical_offset: usize) -> UResult<Self> {
        let cursor = self.cursor.clone_at(logical_offset)?;
        Ok(Self {
            control_block: self.control_block.clone(),
            cursor,
        })
    }

    /// §4.1.8. Equivalent to dropping the instance; spelled out explicitly
    /// to mirror the source's public API surface.
    pub fn dispose(self) {
        drop(self);
    }
}

//! The streaming vtable (spec §4.1), expressed as an open-extension trait
//! instead of a closed enum: the spec explicitly requires third-party
//! backends to be able to expose novel media, so one trait with one impl
//! per backend is the idiomatic shape here (spec §9, "Backend polymorphism").

use crate::cursor::Cursor;
use crate::error::UResult;

/// A concrete data source a [`crate::Instance`] can read from.
///
/// Implementors own (or borrow statically) the actual bytes; the generic
/// cursor bookkeeping (`set_position`, `reset`, `release`,
/// `get_position`, `get_remaining_size`) lives in [`Cursor`] and never needs
/// backend-specific input for the in-memory and multi-stream backends this
/// crate ships. A third-party backend that must react to a released frontier
/// (to free paged-in data, say) overrides [`Backend::on_release`]; one that
/// only needs to serve `read` out of its own storage only needs
/// [`Cursor::position`], [`Cursor::remaining`]/[`Cursor::is_eof`], and
/// [`Cursor::advance`] — the only parts of `Cursor` this crate exposes
/// publicly, since the rest of its bookkeeping (the logical/physical offset
/// bias, the released frontier) is internal to the sliding-window contract
/// and never needs to be read or poked directly by a backend's `read`.
pub trait Backend: Send + Sync {
    /// Pull up to `out.len()` bytes starting at [`Cursor::position`],
    /// advancing the cursor by the number of bytes written via
    /// [`Cursor::advance`].
    ///
    /// Implementations must follow §4.1.3 exactly:
    /// - if [`Cursor::is_eof`], return `Err(UStreamError::Eof)` without
    ///   touching `out`;
    /// - otherwise write at least one byte and return `Ok(n)` with
    ///   `0 < n <= out.len()`.
    fn read(&self, cursor: &mut Cursor, out: &mut [u8]) -> UResult<usize>;

    /// §4.1.1. The default is pure bookkeeping on `cursor`, correct for any
    /// backend whose instances are not themselves composed of further
    /// instances. The multi-stream backend overrides this to additionally
    /// propagate into its children (§4.3.3).
    fn set_position(&self, cursor: &mut Cursor, logical_position: usize) -> UResult<()> {
        cursor.set_position(logical_position)
    }

    /// §4.1.2. See `set_position` above for why this is overridable.
    fn reset(&self, cursor: &mut Cursor) {
        cursor.reset();
    }

    /// §4.1.6. The default advances `cursor`'s bookkeeping and calls
    /// [`Backend::on_release`] with the new first-valid physical position.
    fn release(&self, cursor: &mut Cursor, logical_position: usize) -> UResult<()> {
        cursor.release(logical_position)?;
        self.on_release(cursor.first_valid.saturating_sub(1));
        Ok(())
    }

    /// Called by the default `release` after [`Cursor::release`] has already
    /// advanced `first_valid_position`, with the physical position up to
    /// (and including) which bytes are now released. Backends that hold
    /// immutable, always-resident content can leave this as a no-op (§4.2).
    fn on_release(&self, _released_through_physical: usize) {}
}

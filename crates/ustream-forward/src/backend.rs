//! The forward stream's vtable (spec §4.4): narrower than the rewindable
//! core's, since there is no `set_position`/`reset`/`release`/`clone` to
//! support.

use ustream_core::UResult;

/// A data source a [`crate::ForwardStream`] can read or flush from, once,
/// moving strictly forward.
pub trait ForwardBackend: Send + Sync {
    /// Pull up to `out.len()` bytes starting at the current position,
    /// advancing it by the number of bytes written. Same EOF contract as
    /// `ustream_core::Backend::read`: `Err(Eof)` only when nothing at all is
    /// left, never mixed with a partial `Ok`.
    fn read(&mut self, out: &mut [u8]) -> UResult<usize>;

    /// Push the entire remainder of the stream through `push`, without
    /// copying it into an intermediate caller-owned buffer first. A backend
    /// whose data is not all resident at once (a paged HTTP body, say) calls
    /// `push` once per page it fetches; a backend already holding a
    /// contiguous byte slice can call `push` exactly once.
    ///
    /// If the stream is already exhausted when `flush` is called (nothing
    /// left to produce, whether because a prior `flush` already drained it
    /// or `read` consumed everything), `push` is invoked once with an empty
    /// slice and `flush` returns `Err(UStreamError::Eof)` — the same
    /// "EOF observed exactly once, with an empty view" contract spec §4.4
    /// describes. Otherwise `push` is called one or more times with the
    /// remaining data and `flush` returns `Ok(())`. `push` returning `Err`
    /// aborts the flush and that error is returned to the caller unchanged.
    fn flush(&mut self, push: &mut dyn FnMut(&[u8]) -> UResult<()>) -> UResult<()>;

    /// Number of bytes between the current position and the end of the
    /// stream.
    fn get_remaining_size(&self) -> usize;
}

//! The per-instance position bookkeeping shared by every backend (spec §3,
//! "Instance").
//!
//! Everything here is backend-agnostic arithmetic on plain integers; the
//! backend-specific parts of `set_position`/`reset`/`release` (propagating
//! into children, for the multi-stream backend) live in
//! `backends::multi` and call back into these primitives for their own
//! bookkeeping.

use crate::error::{UResult, UStreamError};

/// Physical-position bookkeeping for one consumer's cursor over a control
/// block's data.
///
/// `current` and `first_valid` are physical positions (§3: "the physical
/// offset of the next byte to be read" / "the earliest physical offset the
/// instance is still allowed to seek to"). `offset_diff` is the signed bias
/// applied to convert between physical and logical positions. `length` is
/// the logical length of the region this instance can see.
///
/// The type is public so a third-party [`crate::Backend`] can name it; its
/// fields stay crate-private so the `[first_valid, current, length]`
/// invariant can only be advanced through [`Cursor::advance`], never
/// poked at directly from outside this crate.
#[derive(Debug, Clone, Copy)]
pub struct Cursor {
    pub(crate) current: usize,
    pub(crate) first_valid: usize,
    pub(crate) offset_diff: i64,
    pub(crate) length: usize,
}

impl Cursor {
    pub(crate) fn new(length: usize) -> Self {
        Self {
            current: 0,
            first_valid: 0,
            offset_diff: 0,
            length,
        }
    }

    /// The physical position a [`Backend::read`](crate::Backend::read)
    /// implementation should read its next byte from — not the logical
    /// position `Instance::get_position` reports to callers, which also
    /// folds in `offset_diff` and, for a composed stream, the other
    /// child's contribution.
    pub fn position(&self) -> usize {
        self.current
    }

    /// Total number of bytes in the region this instance can see, in the
    /// same physical addressing as [`Cursor::position`].
    /// `position() == length()` means the cursor is at EOF.
    pub fn length(&self) -> usize {
        self.length
    }

    /// `length() - position()`: how many bytes a `read` may still produce
    /// before EOF.
    pub fn remaining(&self) -> usize {
        self.length - self.current
    }

    /// Whether the cursor is already at EOF (`position() == length()`).
    pub fn is_eof(&self) -> bool {
        self.current >= self.length
    }

    /// Advances `position()` by `n` bytes, after a [`Backend::read`]
    /// implementation has copied that many bytes into the caller's output
    /// buffer. `n` must not exceed [`Cursor::remaining`] — a backend may
    /// never report reading more bytes than are left.
    pub fn advance(&mut self, n: usize) -> UResult<()> {
        if n > self.remaining() {
            return Err(UStreamError::IllegalArgument);
        }
        self.current += n;
        Ok(())
    }

    /// `logical(p) = p + offset_diff`.
    pub(crate) fn to_logical(&self, physical: usize) -> UResult<usize> {
        let physical = i64::try_from(physical).map_err(|_| UStreamError::IllegalArgument)?;
        let logical = physical
            .checked_add(self.offset_diff)
            .ok_or(UStreamError::IllegalArgument)?;
        usize::try_from(logical).map_err(|_| UStreamError::IllegalArgument)
    }

    /// `physical(L) = L - offset_diff`.
    pub(crate) fn to_physical(&self, logical: usize) -> UResult<usize> {
        let logical = i64::try_from(logical).map_err(|_| UStreamError::IllegalArgument)?;
        let physical = logical
            .checked_sub(self.offset_diff)
            .ok_or(UStreamError::IllegalArgument)?;
        usize::try_from(physical).map_err(|_| UStreamError::IllegalArgument)
    }

    pub(crate) fn get_position(&self) -> UResult<usize> {
        self.to_logical(self.current)
    }

    pub(crate) fn get_remaining_size(&self) -> usize {
        self.remaining()
    }

    /// §4.1.1. Does not itself reject a handle mismatch — callers check that.
    pub(crate) fn set_position(&mut self, logical: usize) -> UResult<()> {
        let physical = self.to_physical(logical)?;
        if physical < self.first_valid || physical > self.length {
            return Err(UStreamError::NoSuchElement);
        }
        self.current = physical;
        Ok(())
    }

    /// §4.1.2.
    pub(crate) fn reset(&mut self) {
        self.current = self.first_valid;
    }

    /// §4.1.6. `logical` is the last position still guaranteed readable
    /// after this call returns (the frontier moves to `logical + 1`).
    pub(crate) fn release(&mut self, logical: usize) -> UResult<()> {
        let physical = self.to_physical(logical)?;
        if physical >= self.current || physical < self.first_valid {
            return Err(UStreamError::IllegalArgument);
        }
        self.first_valid = physical + 1;
        Ok(())
    }

    /// `local_physical + bias` as a logical position, checked the same way
    /// `to_logical` is. Used by the multi-stream backend to translate a
    /// local offset within one child into that child's own logical numbering
    /// without exposing `offset_diff` itself outside the crate.
    pub(crate) fn biased(local_physical: usize, bias: i64) -> UResult<usize> {
        let local_physical =
            i64::try_from(local_physical).map_err(|_| UStreamError::IllegalArgument)?;
        let logical = local_physical
            .checked_add(bias)
            .ok_or(UStreamError::IllegalArgument)?;
        usize::try_from(logical).map_err(|_| UStreamError::IllegalArgument)
    }

    /// §4.1.7's bookkeeping half: the clone's own cursor, given the donor's
    /// current physical position and the logical offset the clone should
    /// report for that same byte.
    pub(crate) fn clone_at(&self, logical_offset: usize) -> UResult<Self> {
        let logical_offset_signed =
            i64::try_from(logical_offset).map_err(|_| UStreamError::IllegalArgument)?;
        let current_signed =
            i64::try_from(self.current).map_err(|_| UStreamError::IllegalArgument)?;
        let offset_diff = logical_offset_signed
            .checked_sub(current_signed)
            .ok_or(UStreamError::IllegalArgument)?;

        // §3: "length + offset_diff <= max_size_t (rejected at clone time)".
        let length_signed = i64::try_from(self.length).map_err(|_| UStreamError::IllegalArgument)?;
        offset_diff
            .checked_add(length_signed)
            .ok_or(UStreamError::IllegalArgument)?;

        Ok(Self {
            current: self.current,
            first_valid: self.current,
            offset_diff,
            length: self.length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_physical_round_trip() {
        let mut c = Cursor::new(100);
        c.offset_diff = 1000;
        assert_eq!(c.to_logical(10).unwrap(), 1010);
        assert_eq!(c.to_physical(1010).unwrap(), 10);
    }

    #[test]
    fn set_position_rejects_before_first_valid() {
        let mut c = Cursor::new(100);
        c.first_valid = 10;
        c.current = 10;
        assert_eq!(c.set_position(5), Err(UStreamError::NoSuchElement));
    }

    #[test]
    fn set_position_rejects_past_length() {
        let mut c = Cursor::new(100);
        assert_eq!(c.set_position(101), Err(UStreamError::NoSuchElement));
    }

    #[test]
    fn set_position_to_length_is_legal() {
        let mut c = Cursor::new(100);
        assert!(c.set_position(100).is_ok());
        assert_eq!(c.get_remaining_size(), 0);
    }

    #[test]
    fn release_then_reset_lands_after_released_byte() {
        let mut c = Cursor::new(62);
        c.current = 20;
        c.release(9).unwrap();
        assert_eq!(c.first_valid, 10);
        assert_eq!(c.set_position(0), Err(UStreamError::NoSuchElement));
        c.reset();
        assert_eq!(c.current, 10);
    }

    #[test]
    fn release_rejects_at_or_after_current() {
        let mut c = Cursor::new(62);
        c.current = 20;
        assert_eq!(c.release(20), Err(UStreamError::IllegalArgument));
        assert_eq!(c.release(25), Err(UStreamError::IllegalArgument));
    }

    #[test]
    fn clone_at_computes_offset_diff() {
        let mut c = Cursor::new(60);
        c.current = 10;
        let clone = c.clone_at(0).unwrap();
        assert_eq!(clone.offset_diff, -10);
        assert_eq!(clone.get_position().unwrap(), 0);
    }

    #[test]
    fn clone_rejects_overflowing_offset() {
        let c = Cursor::new(usize::MAX);
        assert_eq!(
            c.clone_at(usize::MAX).unwrap_err(),
            UStreamError::IllegalArgument
        );
    }
}

//! The multi-stream composer (spec §4.3, component C6): joins two instances
//! end to end behind a single control block, so a consumer reading through
//! it sees one continuous byte range.
//!
//! A composer's children are plain, private `Instance` values sharing a
//! `parking_lot::Mutex`. Because a child is only ever owned by the one
//! composer that created it (never independently shared), the composer's
//! own `Arc` strong count already tracks "how many handles to this
//! concatenation are alive" — there is no need for the separate per-child
//! ref counts the design notes describe for the general case; `MultiBackend`
//! simply drops both children, through the mutex, when it is itself dropped
//! (i.e. when the last composer clone is disposed), which is the same end
//! state as walking down two independent counters to zero.

use parking_lot::Mutex;

use crate::backend::Backend;
use crate::cursor::Cursor;
use crate::error::{UResult, UStreamError};
use crate::instance::Instance;

struct MultiChildren {
    child_one: Instance,
    child_two: Instance,
}

/// Backend over two instances joined end to end. `boundary` is child_one's
/// logical length at concat time and never changes afterward; it is the
/// split point in the composer's own physical numbering.
pub(crate) struct MultiBackend {
    boundary: usize,
    child_one_logical_base: i64,
    child_two_logical_base: i64,
    children: Mutex<MultiChildren>,
}

impl MultiBackend {
    fn child_one_logical(&self, local_physical: usize) -> UResult<usize> {
        Cursor::biased(local_physical, self.child_one_logical_base)
    }

    fn child_two_logical(&self, local_physical: usize) -> UResult<usize> {
        Cursor::biased(local_physical, self.child_two_logical_base)
    }
}

impl Backend for MultiBackend {
    /// §4.3.2. Lock scope is only the set-position-then-read pair on the
    /// child currently being read from, never the whole call — so a sibling
    /// clone reading the other child can make progress between our chunks.
    fn read(&self, cursor: &mut Cursor, out: &mut [u8]) -> UResult<usize> {
        if cursor.current >= cursor.length {
            return Err(UStreamError::Eof);
        }

        let mut copied = 0usize;
        let mut pos = cursor.current;

        while copied < out.len() && pos < cursor.length {
            let in_one = pos < self.boundary;
            let local = if in_one { pos } else { pos - self.boundary };
            let child_logical = if in_one {
                self.child_one_logical(local)?
            } else {
                self.child_two_logical(local)?
            };

            let step = {
                let mut children = self.children.lock();
                let child = if in_one {
                    &mut children.child_one
                } else {
                    &mut children.child_two
                };
                child
                    .set_position(child_logical)
                    .and_then(|()| child.read(&mut out[copied..]))
            };

            match step {
                Ok(n) => {
                    copied += n;
                    pos += n;
                }
                Err(UStreamError::Eof) if in_one => {
                    // child_one exhausted; hand off to child_two if there is
                    // any logical room left for it.
                    pos = self.boundary;
                }
                Err(UStreamError::Eof) => break,
                Err(e) => {
                    cursor.current = pos;
                    return if copied > 0 { Ok(copied) } else { Err(e) };
                }
            }
        }

        cursor.current = pos;
        if copied == 0 {
            Err(UStreamError::Eof)
        } else {
            Ok(copied)
        }
    }

    /// §4.3.3. Translates the logical position, then walks both children in
    /// order, rolling back whichever was already touched if the other
    /// fails.
    fn set_position(&self, cursor: &mut Cursor, logical_position: usize) -> UResult<()> {
        let prev_cursor = *cursor;
        cursor.set_position(logical_position)?;
        let pos = cursor.current;
        let in_one = pos.min(self.boundary);
        let in_two = pos.saturating_sub(self.boundary);

        let one_logical = match self.child_one_logical(in_one) {
            Ok(v) => v,
            Err(e) => {
                *cursor = prev_cursor;
                return Err(e);
            }
        };
        let two_logical = match self.child_two_logical(in_two) {
            Ok(v) => v,
            Err(e) => {
                *cursor = prev_cursor;
                return Err(e);
            }
        };

        let mut children = self.children.lock();
        let prev_one = match children.child_one.get_position() {
            Ok(p) => p,
            Err(e) => {
                *cursor = prev_cursor;
                return Err(e);
            }
        };

        if let Err(e) = children.child_one.set_position(one_logical) {
            *cursor = prev_cursor;
            return Err(e);
        }
        if let Err(e) = children.child_two.set_position(two_logical) {
            let _ = children.child_one.set_position(prev_one);
            *cursor = prev_cursor;
            return Err(e);
        }
        Ok(())
    }

    /// §4.3.3. Cannot fail; resets both children to their own released
    /// frontiers as well as the composer's own cursor.
    fn reset(&self, cursor: &mut Cursor) {
        cursor.reset();
        let mut children = self.children.lock();
        children.child_one.reset();
        children.child_two.reset();
    }

    /// §4.3.3. Propagates the newly-released frontier into whichever
    /// children it now covers. Idempotent: a child already released past the
    /// requested point is left untouched rather than erroring.
    fn release(&self, cursor: &mut Cursor, logical_position: usize) -> UResult<()> {
        cursor.release(logical_position)?;
        let released_through_exclusive = cursor.first_valid;
        let mut children = self.children.lock();

        if released_through_exclusive > 0 {
            let one_through_exclusive = released_through_exclusive.min(self.boundary);
            if one_through_exclusive > 0 {
                let already = children.child_one.first_valid_physical();
                if one_through_exclusive > already {
                    let logical = self.child_one_logical(one_through_exclusive - 1)?;
                    children.child_one.release(logical)?;
                }
            }
        }

        if released_through_exclusive > self.boundary {
            let two_through_exclusive = released_through_exclusive - self.boundary;
            let already = children.child_two.first_valid_physical();
            if two_through_exclusive > already {
                let logical = self.child_two_logical(two_through_exclusive - 1)?;
                children.child_two.release(logical)?;
            }
        }

        Ok(())
    }
}

/// §4.3.1. Appends `to_append`'s unread remainder onto `base`, in place:
/// the returned instance keeps `base`'s own position (if `base` had already
/// been partway read, that progress is preserved) but now reports a length
/// extended by however much of `to_append` was left to read.
///
/// `to_append` is cloned (its own cursor and ref count are untouched); only
/// the clone's remainder becomes part of the new stream.
pub fn concat(base: Instance, to_append: &Instance) -> UResult<Instance> {
    let boundary = base.cursor().length;
    let child_two = to_append.clone_at(boundary)?;
    let child_two_remaining = child_two.get_remaining_size();
    let new_length = boundary
        .checked_add(child_two_remaining)
        .ok_or(UStreamError::IllegalArgument)?;

    // child_two's clone reports its own *current* physical position (the
    // donor's position at clone time, which may be partway through if the
    // donor had already been read from) as logical `boundary` — that is what
    // `clone_at(boundary)` above asked for. So a parent-relative local offset
    // `local` (0 at the clone's current position) maps to child_two's own
    // logical numbering as `local + boundary`, not `local + child_two`'s
    // `offset_diff` (those only coincide when the donor was unread, i.e.
    // `offset_diff == boundary`).
    let child_one_logical_base = base.offset_diff();
    let child_two_logical_base =
        i64::try_from(boundary).map_err(|_| UStreamError::IllegalArgument)?;
    let mut new_cursor = *base.cursor();
    new_cursor.length = new_length;

    let child_one = base;

    let backend = MultiBackend {
        boundary,
        child_one_logical_base,
        child_two_logical_base,
        children: Mutex::new(MultiChildren { child_one, child_two }),
    };

    Ok(Instance::with_cursor(
        std::sync::Arc::new(crate::control_block::ControlBlockInner::new(Box::new(backend))),
        new_cursor,
    ))
}

/// Convenience sugar over repeated [`concat`], folding `rest` onto `base` in
/// order. Not part of the original vtable; a small ergonomic addition for
/// the common case of joining more than two streams at once.
pub fn concat_many(
    base: Instance,
    rest: impl IntoIterator<Item = Instance>,
) -> UResult<Instance> {
    let mut acc = base;
    for next in rest {
        acc = concat(acc, &next)?;
    }
    Ok(acc)
}

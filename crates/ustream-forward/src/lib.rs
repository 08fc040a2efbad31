//! A forward-only, non-rewindable streaming byte buffer with zero-copy
//! flush.
//!
//! [`ForwardStream`] is the sibling of `ustream_core::Instance` for data
//! that cannot, or should not, be re-read: there is no `set_position`,
//! `reset`, `release`, or `clone` here, only [`ForwardStream::read`] (pull
//! into a caller-owned buffer, as usual) and [`ForwardStream::flush`] (push
//! the entire remainder through a callback with no intermediate copy).
//! Reach for this over [`ustream_core`] when a stream's total size isn't
//! known ahead of time and re-reading it would mean re-fetching it.

mod backend;
pub(crate) mod backends;
mod control_block;
mod instance;

pub use backend::ForwardBackend;
pub use backends::memory::{from_owned, from_owned_with_release};
pub use instance::ForwardStream;

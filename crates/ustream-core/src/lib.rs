//! A heterogeneous, immutable, reference-counted streaming byte buffer.
//!
//! A [`ustream`](Instance) is a handle onto a region of bytes that may be
//! held in memory, composed from other streams, or backed by something a
//! third party defines by implementing [`Backend`]. Many instances can
//! share the same underlying data through a single reference-counted
//! control block; each instance carries its own read cursor, independent of
//! every other instance over the same data.
//!
//! Three things make this more than a `Cursor<Vec<u8>>`:
//!
//! - **Open backend polymorphism.** [`Backend`] is a trait, not a closed
//!   enum, so a caller can plug in a memory-mapped file or a network
//!   fetcher without this crate knowing about it.
//! - **Explicit, offset-biased cloning.** [`Instance::clone_at`] produces an
//!   independent cursor over shared data, reporting its own logical
//!   position numbering — deliberately not the `Clone` trait, since a plain
//!   copy would silently duplicate position state without it being obvious
//!   at the call site.
//! - **Composable streams.** [`concat`] joins two instances end to end
//!   behind one control block, so a consumer reads through the join
//!   without ever knowing the data came from two places.
//!
//! See [`forward`](https://docs.rs/ustream-forward) for the companion
//! forward-only, non-rewindable variant with zero-copy flush, used when a
//! stream's total size isn't known up front.

mod backend;
pub(crate) mod backends;
mod control_block;
mod cursor;
mod error;
mod instance;

pub use backend::Backend;
pub use backends::memory::{from_owned, from_owned_with_release, from_static};
pub use backends::multi::{concat, concat_many};
pub use cursor::Cursor;
pub use error::{UResult, UStreamError};
pub use instance::Instance;

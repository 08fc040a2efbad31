//! The default, in-memory backend (spec §4.2, component C5).

use crate::backend::Backend;
use crate::cursor::Cursor;
use crate::error::{UResult, UStreamError};
use crate::instance::Instance;

/// Backend over a region of bytes. `release`/`reset` are pure bookkeeping —
/// the region is not freed until the control block's final dispose (§4.2).
struct MemoryBackend {
    data: Storage,
}

/// Either a `'static` region (the "const init" flavor — no data release) or
/// an owned, heap-allocated region (the "owning init" flavor — dropping
/// `Vec<u8>` is the data release for free; `from_owned_with_release` on top
/// gives a caller-supplied allocator hook for the rare case that needs one).
enum Storage {
    Static(&'static [u8]),
    Owned(Vec<u8>),
}

impl Storage {
    fn as_slice(&self) -> &[u8] {
        match self {
            Storage::Static(s) => s,
            Storage::Owned(v) => v,
        }
    }
}

impl Backend for MemoryBackend {
    fn read(&self, cursor: &mut Cursor, out: &mut [u8]) -> UResult<usize> {
        if cursor.current >= cursor.length {
            return Err(UStreamError::Eof);
        }
        let data = self.data.as_slice();
        let remaining = cursor.length - cursor.current;
        let n = remaining.min(out.len());
        out[..n].copy_from_slice(&data[cursor.current..cursor.current + n]);
        cursor.current += n;
        Ok(n)
    }
}

/// Builds a ustream over statically-known bytes (the "const init" flavor —
/// never needs a release callback).
pub fn from_static(data: &'static [u8]) -> Instance {
    let length = data.len();
    Instance::from_backend(Box::new(MemoryBackend { data: Storage::Static(data) }), length)
}

/// Builds a ustream that takes ownership of `data`. Dropping the backing
/// `Vec<u8>`, which happens exactly once when the control block's ref count
/// reaches zero, is the data release (spec §4.2, "owning init").
pub fn from_owned(data: Vec<u8>) -> Instance {
    let length = data.len();
    Instance::from_backend(Box::new(MemoryBackend { data: Storage::Owned(data) }), length)
}

/// As [`from_owned`], but `release` is invoked with the backing buffer right
/// before it would otherwise be dropped, for a caller that allocated `data`
/// through a non-default allocator and needs the matching deallocation hook
/// (spec §4.2's "owning init... at final dispose invokes the caller-supplied
/// `data_release`").
pub fn from_owned_with_release(
    data: Vec<u8>,
    release: impl FnOnce(Vec<u8>) + Send + Sync + 'static,
) -> Instance {
    struct ReleasingMemoryBackend {
        data: Option<Vec<u8>>,
        release: Option<Box<dyn FnOnce(Vec<u8>) + Send + Sync>>,
    }

    impl Backend for ReleasingMemoryBackend {
        fn read(&self, cursor: &mut Cursor, out: &mut [u8]) -> UResult<usize> {
            if cursor.current >= cursor.length {
                return Err(UStreamError::Eof);
            }
            let data = self.data.as_deref().expect("data read after drop");
            let remaining = cursor.length - cursor.current;
            let n = remaining.min(out.len());
            out[..n].copy_from_slice(&data[cursor.current..cursor.current + n]);
            cursor.current += n;
            Ok(n)
        }
    }

    impl Drop for ReleasingMemoryBackend {
        fn drop(&mut self) {
            if let (Some(data), Some(release)) = (self.data.take(), self.release.take()) {
                release(data);
            }
        }
    }

    let length = data.len();
    Instance::from_backend(
        Box::new(ReleasingMemoryBackend {
            data: Some(data),
            release: Some(Box::new(release)),
        }),
        length,
    )
}

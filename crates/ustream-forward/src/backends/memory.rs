//! The default, in-memory forward backend.

use ustream_core::{UResult, UStreamError};

use crate::backend::ForwardBackend;
use crate::instance::ForwardStream;

/// Flushes in chunks of this size rather than handing the whole buffer to
/// `push` in one call, so `flush` exercises the same "call push once per
/// page" loop a paged backend (an HTTP body, say) would need — even though
/// an in-memory backend has no real reason to split it.
const FLUSH_CHUNK: usize = 4096;

struct MemoryForwardBackend {
    data: Vec<u8>,
    position: usize,
}

impl ForwardBackend for MemoryForwardBackend {
    fn read(&mut self, out: &mut [u8]) -> UResult<usize> {
        if self.position >= self.data.len() {
            return Err(UStreamError::Eof);
        }
        let remaining = self.data.len() - self.position;
        let n = remaining.min(out.len());
        out[..n].copy_from_slice(&self.data[self.position..self.position + n]);
        self.position += n;
        Ok(n)
    }

    fn flush(&mut self, push: &mut dyn FnMut(&[u8]) -> UResult<()>) -> UResult<()> {
        if self.position >= self.data.len() {
            push(&[])?;
            return Err(UStreamError::Eof);
        }
        while self.position < self.data.len() {
            let end = (self.position + FLUSH_CHUNK).min(self.data.len());
            push(&self.data[self.position..end])?;
            self.position = end;
        }
        Ok(())
    }

    fn get_remaining_size(&self) -> usize {
        self.data.len() - self.position
    }
}

/// Builds a forward stream that takes ownership of `data`. Dropping the
/// backing `Vec<u8>` is the data release.
pub fn from_owned(data: Vec<u8>) -> ForwardStream {
    ForwardStream::new(Box::new(MemoryForwardBackend { data, position: 0 }))
}

/// As [`from_owned`], but `release` is invoked with the backing buffer right
/// before it would otherwise be dropped.
pub fn from_owned_with_release(
    data: Vec<u8>,
    release: impl FnOnce(Vec<u8>) + Send + Sync + 'static,
) -> ForwardStream {
    struct ReleasingMemoryForwardBackend {
        inner: MemoryForwardBackend,
        release: Option<Box<dyn FnOnce(Vec<u8>) + Send + Sync>>,
    }

    impl ForwardBackend for ReleasingMemoryForwardBackend {
        fn read(&mut self, out: &mut [u8]) -> UResult<usize> {
            self.inner.read(out)
        }

        fn flush(&mut self, push: &mut dyn FnMut(&[u8]) -> UResult<()>) -> UResult<()> {
            self.inner.flush(push)
        }

        fn get_remaining_size(&self) -> usize {
            self.inner.get_remaining_size()
        }
    }

    impl Drop for ReleasingMemoryForwardBackend {
        fn drop(&mut self) {
            if let Some(release) = self.release.take() {
                release(std::mem::take(&mut self.inner.data));
            }
        }
    }

    ForwardStream::new(Box::new(ReleasingMemoryForwardBackend {
        inner: MemoryForwardBackend { data, position: 0 },
        release: Some(Box::new(release)),
    }))
}

//! The closed result taxonomy every ustream operation returns through.

use thiserror::Error;

/// Closed set of non-success outcomes a ustream operation can produce.
///
/// `EOF` lives here rather than as a side channel because the source this
/// crate is modeled on (`ULIB_RESULT`) folds end-of-data into the same
/// closed enum as the hard errors; callers that need to distinguish "no more
/// data" from "something went wrong" match on [`UStreamError::Eof`]
/// specifically rather than treating every `Err` the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UStreamError {
    /// End of data reached. Not a failure for `read`/`flush`.
    #[error("end of stream")]
    Eof,
    /// A null/invalid required argument, a mismatched backend handle, or a
    /// position that would overflow.
    #[error("illegal argument")]
    IllegalArgument,
    /// The requested position lies outside `[first_valid, length]`.
    #[error("no such element")]
    NoSuchElement,
    /// A backend that must allocate could not.
    #[error("out of memory")]
    OutOfMemory,
    /// A backend-internal resource is temporarily unavailable; retry later.
    #[error("resource busy")]
    Busy,
    /// A dependent external call was canceled.
    #[error("operation canceled")]
    Canceled,
    /// A backend-internal fetch could not be satisfied with available memory.
    #[error("not enough space")]
    NotEnoughSpace,
    /// A backend-internal operation was refused on security grounds.
    #[error("security error")]
    Security,
    /// Any other backend-internal failure.
    #[error("system error")]
    SystemError,
    /// This operation is not implemented by this backend.
    #[error("operation not supported")]
    NotSupported,
    /// The instance or control block is in a pre-init state.
    #[error("not initialized")]
    NotInitialized,
}

/// Shorthand used throughout this crate and its sibling `ustream-forward`.
pub type UResult<T> = Result<T, UStreamError>;

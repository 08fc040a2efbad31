//! Concrete [`crate::ForwardBackend`] implementations shipped with this crate.

pub mod memory;

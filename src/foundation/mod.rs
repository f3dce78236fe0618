//! Frame arithmetic primitives and the crate error type.

pub(crate) mod core;
pub(crate) mod error;

//! Background footage normalization.

pub(crate) mod resolve;

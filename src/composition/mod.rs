//! The render tree: node model, builder and structural fingerprint.

pub(crate) mod builder;
pub(crate) mod fingerprint;
pub(crate) mod model;

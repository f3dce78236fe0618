//! End-to-end planning: request document in, render tree out.

pub(crate) mod plan;
pub(crate) mod request;

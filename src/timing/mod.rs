//! Seconds → frames conversion for the hook and script segments.

pub(crate) mod calc;

//! Per-frame evaluation of a render tree.

pub(crate) mod evaluator;

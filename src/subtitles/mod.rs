//! Word-by-word subtitle timing.
//!
//! Word windows are always expressed in frames local to the script segment; the
//! composition builder moves them onto the global timeline.

pub(crate) mod srt;
pub(crate) mod words;

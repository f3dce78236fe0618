use crate::foundation::error::{HookreelError, HookreelResult};

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
/// A frame position on some timeline (global or segment-local).
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Half-open frame window `[start, end)`.
pub struct FrameRange {
    /// First frame inside the window.
    pub start: FrameIndex,
    /// First frame after the window.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> HookreelResult<Self> {
        if start.0 > end.0 {
            return Err(HookreelError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Build a range from a start frame and a length in frames.
    pub fn with_len(start: FrameIndex, len_frames: u64) -> Self {
        Self {
            start,
            end: FrameIndex(start.0.saturating_add(len_frames)),
        }
    }

    /// Number of frames covered.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// `true` when the window covers no frame.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// `true` when `f` lies inside `[start, end)`.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    /// Overlapping part of two windows, if any frame is shared.
    pub fn intersect(self, other: Self) -> Option<Self> {
        let start = self.start.0.max(other.start.0);
        let end = self.end.0.min(other.end.0);
        if start < end {
            Some(Self {
                start: FrameIndex(start),
                end: FrameIndex(end),
            })
        } else {
            None
        }
    }

    /// Move a local window onto the timeline whose origin is `origin`.
    pub fn to_global(self, origin: FrameIndex) -> Self {
        Self {
            start: local_to_global(self.start, origin),
            end: local_to_global(self.end, origin),
        }
    }
}

/// Translate a frame local to a segment into the parent timeline.
///
/// Every nesting level of the composition tree goes through this function; a node's
/// `start` is always relative to its parent's origin.
pub fn local_to_global(local: FrameIndex, origin: FrameIndex) -> FrameIndex {
    FrameIndex(origin.0.saturating_add(local.0))
}

/// Inverse of [`local_to_global`]. `None` when `global` precedes the segment origin.
pub fn global_to_local(global: FrameIndex, origin: FrameIndex) -> Option<FrameIndex> {
    global.0.checked_sub(origin.0).map(FrameIndex)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Rational frame rate.
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be > 0.
    pub den: u32,
}

impl Fps {
    /// Build a frame rate, rejecting zero numerator or denominator.
    pub fn new(num: u32, den: u32) -> HookreelResult<Self> {
        if den == 0 {
            return Err(HookreelError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(HookreelError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Integer frame rate such as 30 or 60.
    pub fn integer(fps: u32) -> HookreelResult<Self> {
        Self::new(fps, 1)
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Seconds covered by one frame.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Seconds at the start of frame `frames`.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Smallest frame count covering `secs`. Callers validate `secs` first.
    pub fn secs_to_frames_ceil(self, secs: f64) -> u64 {
        (secs * self.as_f64()).ceil().max(0.0) as u64
    }

    /// Frame count nearest to `secs`.
    pub fn secs_to_frames_round(self, secs: f64) -> u64 {
        (secs * self.as_f64()).round().max(0.0) as u64
    }

    /// Frame containing the instant `secs`.
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }

    /// [`Fps::secs_to_frames_ceil`], or `None` when the count does not fit in a `u64`.
    pub fn checked_secs_to_frames_ceil(self, secs: f64) -> Option<u64> {
        frames_in_range((secs * self.as_f64()).ceil())
    }

    /// [`Fps::secs_to_frames_floor`], or `None` when the count does not fit in a `u64`.
    pub fn checked_secs_to_frames_floor(self, secs: f64) -> Option<u64> {
        frames_in_range((secs * self.as_f64()).floor())
    }
}

// `u64::MAX as f64` is exactly 2^64, so anything strictly below it casts without saturating.
fn frames_in_range(frames: f64) -> Option<u64> {
    (frames.is_finite() && frames >= 0.0 && frames < u64::MAX as f64).then_some(frames as u64)
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 30, den: 1 }
    }
}

/// Reject negative, NaN and infinite durations.
pub(crate) fn ensure_duration_secs(secs: f64, field: &str) -> HookreelResult<()> {
    if !secs.is_finite() || secs < 0.0 {
        return Err(HookreelError::validation(format!(
            "{field} must be finite and >= 0 (got {secs})"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

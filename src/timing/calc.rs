use crate::foundation::core::{Fps, FrameIndex, FrameRange, ensure_duration_secs};
use crate::foundation::error::{HookreelError, HookreelResult};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Raw timing inputs reported by narration synthesis.
pub struct TimingSpec {
    /// Timeline frame rate.
    pub fps: Fps,
    /// Hook narration length in seconds.
    pub hook_duration_secs: f64,
    /// Script narration length in seconds.
    pub script_duration_secs: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Frame counts derived from a [`TimingSpec`].
pub struct FrameCounts {
    /// Frame rate the counts were computed at.
    pub fps: Fps,
    /// `ceil(hook_secs * fps)`.
    pub hook_frames: u64,
    /// `ceil(script_secs * fps)`.
    pub script_frames: u64,
    /// `hook_frames + script_frames`.
    pub total_frames: u64,
    /// Set when an externally expected total disagrees with `total_frames`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<DurationMismatch>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Non-fatal disagreement between an expected total and the per-segment sum.
pub struct DurationMismatch {
    /// Total supplied by the caller.
    pub expected_total_frames: u64,
    /// Total computed here; this is the one used for layout.
    pub computed_total_frames: u64,
}

impl std::fmt::Display for DurationMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "expected {} total frames, computed {}",
            self.expected_total_frames, self.computed_total_frames
        )
    }
}

impl TimingSpec {
    /// Compute frame counts for these durations. See [`compute_frame_counts`].
    pub fn frame_counts(&self, expected_total_frames: Option<u64>) -> HookreelResult<FrameCounts> {
        compute_frame_counts(
            self.fps,
            self.hook_duration_secs,
            self.script_duration_secs,
            expected_total_frames,
        )
    }
}

impl FrameCounts {
    /// Global window occupied by the hook segment.
    pub fn hook_range(&self) -> FrameRange {
        FrameRange::with_len(FrameIndex(0), self.hook_frames)
    }

    /// Global window occupied by the script segment.
    pub fn script_range(&self) -> FrameRange {
        FrameRange::with_len(self.script_origin(), self.script_frames)
    }

    /// Global frame where the script segment's local frame 0 lands.
    pub fn script_origin(&self) -> FrameIndex {
        FrameIndex(self.hook_frames)
    }

    /// Global window of the whole video.
    pub fn total_range(&self) -> FrameRange {
        FrameRange::with_len(FrameIndex(0), self.total_frames)
    }
}

/// Convert narration durations into frame counts.
///
/// Durations are always rounded up: under-covering a segment truncates its audio.
/// When `expected_total_frames` is supplied and differs from the computed total the
/// result carries a [`DurationMismatch`] and a warning is logged; the computed total
/// is still the one every other stage lays out against.
#[tracing::instrument]
pub fn compute_frame_counts(
    fps: Fps,
    hook_secs: f64,
    script_secs: f64,
    expected_total_frames: Option<u64>,
) -> HookreelResult<FrameCounts> {
    let fps = Fps::new(fps.num, fps.den)?;
    ensure_duration_secs(hook_secs, "hook duration")?;
    ensure_duration_secs(script_secs, "script duration")?;

    let hook_frames = segment_frames(fps, hook_secs, "hook duration")?;
    let script_frames = segment_frames(fps, script_secs, "script duration")?;
    let total_frames = hook_frames.checked_add(script_frames).ok_or_else(|| {
        HookreelError::timing(format!(
            "hook ({hook_frames}) + script ({script_frames}) frames overflow the timeline"
        ))
    })?;

    let warning = expected_total_frames
        .filter(|&expected| expected != total_frames)
        .map(|expected| DurationMismatch {
            expected_total_frames: expected,
            computed_total_frames: total_frames,
        });
    if let Some(w) = warning {
        tracing::warn!(
            expected = w.expected_total_frames,
            computed = w.computed_total_frames,
            "total duration mismatch; laying out with computed total"
        );
    }

    Ok(FrameCounts {
        fps,
        hook_frames,
        script_frames,
        total_frames,
        warning,
    })
}

fn segment_frames(fps: Fps, secs: f64, field: &str) -> HookreelResult<u64> {
    fps.checked_secs_to_frames_ceil(secs).ok_or_else(|| {
        HookreelError::validation(format!("{field} of {secs}s is too long to count in frames"))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/timing/calc.rs"]
mod tests;

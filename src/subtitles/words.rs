use crate::{
    animation::ease::Ease,
    foundation::core::{Fps, FrameIndex, FrameRange, global_to_local},
    foundation::error::{HookreelError, HookreelResult},
};

/// Length of the scale pop applied when a word appears.
pub const POP_IN_FRAMES: u64 = 6;

const POP_IN_FROM: f64 = 0.95;
const POP_IN_PEAK: f64 = 1.05;
const POP_IN_REST: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Highlight color for a subtitle word.
pub enum WordColor {
    /// Default subtitle color.
    White,
    /// Yellow highlight.
    Yellow,
    /// Red highlight.
    Red,
    /// Green highlight.
    Green,
    /// Purple highlight.
    Purple,
}

impl WordColor {
    /// Straight-alpha RGBA8 value used by renderers.
    pub fn rgba8(self) -> [u8; 4] {
        match self {
            Self::White => [255, 255, 255, 255],
            Self::Yellow => [255, 214, 10, 255],
            Self::Red => [255, 59, 48, 255],
            Self::Green => [52, 199, 89, 255],
            Self::Purple => [175, 82, 222, 255],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// A subtitle word and its visible window, local to the script segment.
pub struct WordTiming {
    /// Word text as displayed.
    pub text: String,
    /// First visible frame.
    pub start_frame: FrameIndex,
    /// First frame after the word disappears.
    pub end_frame: FrameIndex,
    /// Optional highlight color; renderers fall back to their default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<WordColor>,
}

impl WordTiming {
    /// Visible window `[start_frame, end_frame)`. `None` for inverted timings.
    pub fn window(&self) -> Option<FrameRange> {
        FrameRange::new(self.start_frame, self.end_frame).ok()
    }

    /// Frames the word stays on screen (0 for inverted timings).
    pub fn duration_frames(&self) -> u64 {
        self.end_frame.0.saturating_sub(self.start_frame.0)
    }

    /// Frame relative to the word's own start, when the word is visible at `frame`.
    ///
    /// `frame` is on the same timeline as `start_frame`.
    pub fn local_frame(&self, frame: FrameIndex) -> Option<FrameIndex> {
        let local = global_to_local(frame, self.start_frame)?;
        (local.0 < self.duration_frames()).then_some(local)
    }

    /// `true` when the word is on screen at `frame`.
    pub fn is_visible_at(&self, frame: FrameIndex) -> bool {
        self.local_frame(frame).is_some()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Word alignment as reported in seconds by a speech alignment service.
pub struct AlignedWord {
    /// Word text.
    pub text: String,
    /// Start time in seconds from the script narration start.
    pub start_secs: f64,
    /// End time in seconds from the script narration start.
    pub end_secs: f64,
    /// Optional highlight color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<WordColor>,
}

/// Produce the subtitle track for the script segment.
///
/// Non-empty `explicit` timings are returned untouched: the caller's alignment is
/// authoritative and any inconsistency is left for the renderer to surface.
///
/// Otherwise `text` is split on whitespace and `script_frames` is divided evenly with
/// `ceil`, so the last word ends at or after `script_frames`. When `script_frames` is 0,
/// `fallback_frames_per_word` (if any) sizes each window instead. Frames saturate at
/// `u64::MAX`, so an oversized fallback yields empty trailing windows rather than wrapping.
pub fn resolve_word_timings(
    text: &str,
    explicit: &[WordTiming],
    script_frames: u64,
    fallback_frames_per_word: Option<u64>,
) -> Vec<WordTiming> {
    if !explicit.is_empty() {
        return explicit.to_vec();
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }

    let n = words.len() as u64;
    let per_word = match script_frames.div_ceil(n) {
        0 => fallback_frames_per_word.unwrap_or(0),
        per_word => per_word,
    };
    tracing::debug!(words = n, per_word, script_frames, "even word split");

    words
        .into_iter()
        .enumerate()
        .map(|(i, word)| {
            let i = i as u64;
            WordTiming {
                text: word.to_string(),
                start_frame: FrameIndex(i.saturating_mul(per_word)),
                end_frame: FrameIndex((i + 1).saturating_mul(per_word)),
                color: None,
            }
        })
        .collect()
}

/// Convert second-based alignment into frame windows.
///
/// Starts are floored and ends ceiled so a word never loses its first or last frame;
/// every window is at least one frame long.
pub fn word_timings_from_seconds(words: &[AlignedWord], fps: Fps) -> HookreelResult<Vec<WordTiming>> {
    let fps = Fps::new(fps.num, fps.den)?;
    words
        .iter()
        .enumerate()
        .map(|(i, w)| {
            if !w.start_secs.is_finite() || w.start_secs < 0.0 {
                return Err(HookreelError::validation(format!(
                    "aligned word {i} ('{}') start_secs must be finite and >= 0",
                    w.text
                )));
            }
            if !w.end_secs.is_finite() || w.end_secs < w.start_secs {
                return Err(HookreelError::validation(format!(
                    "aligned word {i} ('{}') end_secs must be finite and >= start_secs",
                    w.text
                )));
            }
            let too_long = || {
                HookreelError::validation(format!(
                    "aligned word {i} ('{}') is too far into the audio to count in frames",
                    w.text
                ))
            };
            let start = fps
                .checked_secs_to_frames_floor(w.start_secs)
                .ok_or_else(too_long)?;
            let end = fps
                .checked_secs_to_frames_ceil(w.end_secs)
                .ok_or_else(too_long)?
                .max(start.checked_add(1).ok_or_else(too_long)?);
            Ok(WordTiming {
                text: w.text.clone(),
                start_frame: FrameIndex(start),
                end_frame: FrameIndex(end),
                color: w.color,
            })
        })
        .collect()
}

/// First word visible at `frame` (script-local), in track order.
pub fn active_word_at(words: &[WordTiming], frame: FrameIndex) -> Option<&WordTiming> {
    words.iter().find(|w| w.is_visible_at(frame))
}

/// Scale applied to a word `local_frame` frames after it appears.
///
/// Rises from 0.95 to 1.05 over the first half of the pop-in window, settles to 1.0
/// over the second half, and stays at 1.0 afterwards.
pub fn pop_in_scale(local_frame: FrameIndex) -> f64 {
    let half = POP_IN_FRAMES as f64 / 2.0;
    let t = local_frame.0 as f64;
    if t >= POP_IN_FRAMES as f64 {
        POP_IN_REST
    } else if t < half {
        Ease::OutQuad.lerp(POP_IN_FROM, POP_IN_PEAK, t / half)
    } else {
        Ease::InOutQuad.lerp(POP_IN_PEAK, POP_IN_REST, (t - half) / half)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/subtitles/words.rs"]
mod tests;

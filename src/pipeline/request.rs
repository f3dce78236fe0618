use std::path::Path;

use anyhow::Context as _;

use crate::{
    background::resolve::BackgroundDescriptor,
    composition::builder::HookAnimation,
    composition::model::{SubtitleStyle, validate_volume},
    foundation::core::{Fps, ensure_duration_secs},
    foundation::error::{HookreelError, HookreelResult},
    subtitles::words::{AlignedWord, WordTiming},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Everything needed to plan one video, as produced by the surrounding application
/// once narration has been synthesized.
pub struct RenderRequest {
    /// Integer frame rate.
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Hook segment inputs.
    pub hook: HookInput,
    /// Script segment inputs.
    pub script: ScriptInput,
    /// Background footage.
    pub background: BackgroundDescriptor,
    /// Background music.
    #[serde(default)]
    pub music: MusicSettings,
    /// Subtitle presentation settings.
    #[serde(default)]
    pub subtitles: SubtitleStyle,
    /// Linear gain for both narration tracks.
    #[serde(default = "default_narration_volume")]
    pub narration_volume: f64,
    /// Total computed by another component; only compared, never used for layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_total_frames: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Synthesized narration for one segment.
pub struct NarrationAudio {
    /// Audio URL or path.
    pub src: String,
    /// Length reported by the synthesis service.
    pub duration_secs: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Hook segment inputs.
pub struct HookInput {
    /// Hook caption.
    pub text: String,
    /// Hook narration.
    pub audio: NarrationAudio,
    /// Hook sub-tree variant.
    #[serde(default)]
    pub animation: HookAnimation,
    /// Optional media shown during the hook.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Script segment inputs.
pub struct ScriptInput {
    /// Script body, used for the even word split when no alignment is given.
    pub text: String,
    /// Script narration.
    pub audio: NarrationAudio,
    /// Word alignment in script-local frames.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<WordTiming>,
    /// Word alignment in seconds; converted with the request fps.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aligned_words: Vec<AlignedWord>,
    /// Word length used when the script narration has zero frames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_frames_per_word: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Background music settings.
pub struct MusicSettings {
    /// Attach music to the tree.
    #[serde(default)]
    pub enabled: bool,
    /// Music URL or path; required when enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Linear gain.
    #[serde(default = "default_music_volume")]
    pub volume: f64,
}

impl Default for MusicSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            src: None,
            volume: default_music_volume(),
        }
    }
}

fn default_fps() -> u32 {
    30
}

fn default_narration_volume() -> f64 {
    1.0
}

fn default_music_volume() -> f64 {
    0.15
}

impl RenderRequest {
    /// Parse a request from JSON text.
    pub fn from_json_str(s: &str) -> HookreelResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read and parse a request file.
    pub fn from_path(path: &Path) -> HookreelResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read request '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Timeline frame rate.
    pub fn fps(&self) -> HookreelResult<Fps> {
        Fps::integer(self.fps)
    }

    /// Check request-level invariants before any planning work.
    pub fn validate(&self) -> HookreelResult<()> {
        self.fps()?;
        ensure_duration_secs(self.hook.audio.duration_secs, "hook audio duration_secs")?;
        ensure_duration_secs(self.script.audio.duration_secs, "script audio duration_secs")?;
        if self.hook.audio.src.trim().is_empty() || self.script.audio.src.trim().is_empty() {
            return Err(HookreelError::validation(
                "hook and script audio src must be non-empty",
            ));
        }
        if !self.script.words.is_empty() && !self.script.aligned_words.is_empty() {
            return Err(HookreelError::validation(
                "script.words and script.aligned_words are mutually exclusive",
            ));
        }
        if let Some(per_word) = self.script.fallback_frames_per_word {
            let n = self.script.text.split_whitespace().count() as u64;
            if n.checked_mul(per_word).is_none() {
                return Err(HookreelError::validation(format!(
                    "script.fallback_frames_per_word {per_word} overflows the timeline for {n} words"
                )));
            }
        }
        validate_volume(self.narration_volume, "narration")?;
        if self.music.enabled {
            if self.music.src.as_deref().is_none_or(|s| s.trim().is_empty()) {
                return Err(HookreelError::validation(
                    "music.src is required when music is enabled",
                ));
            }
            validate_volume(self.music.volume, "music")?;
        }
        for (name, v) in [
            ("text_size_px", self.subtitles.text_size_px),
            ("stroke_size_px", self.subtitles.stroke_size_px),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(HookreelError::validation(format!(
                    "subtitles.{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/request.rs"]
mod tests;

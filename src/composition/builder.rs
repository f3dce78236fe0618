use crate::{
    background::resolve::Clip,
    composition::model::{CompositionNode, NodeKind, SubtitleStyle, TextRole, validate_volume},
    foundation::core::FrameIndex,
    foundation::error::{HookreelError, HookreelResult},
    subtitles::words::{WordColor, WordTiming, resolve_word_timings},
    timing::calc::FrameCounts,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Shape of the hook segment sub-tree.
pub enum HookAnimation {
    /// The whole hook caption stays on screen for the hook segment.
    #[default]
    Static,
    /// The hook caption is split into words shown one after another.
    WordByWord,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Visual inputs of the hook segment.
pub struct HookAssets {
    /// Hook caption.
    pub text: String,
    /// Which hook sub-tree to build.
    #[serde(default)]
    pub animation: HookAnimation,
    /// Optional media shown over the background during the hook.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Synthesized narration tracks.
pub struct NarrationRefs {
    /// Hook narration audio.
    pub hook: String,
    /// Script narration audio.
    pub script: String,
    /// Linear gain applied to both tracks.
    #[serde(default = "default_narration_volume")]
    pub volume: f64,
}

fn default_narration_volume() -> f64 {
    1.0
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Background music spanning the whole video.
pub struct AmbientAudio {
    /// Music audio.
    pub src: String,
    /// Linear gain.
    pub volume: f64,
}

/// Builder for the render tree.
///
/// Every frame stored in the produced tree is relative to the parent node: script
/// words and narration use the script segment's origin, never global frames.
pub struct CompositionBuilder {
    counts: FrameCounts,
    background: Vec<Clip>,
    hook: HookAssets,
    words: Vec<WordTiming>,
    narration: Option<NarrationRefs>,
    ambient: Option<AmbientAudio>,
    style: SubtitleStyle,
}

impl CompositionBuilder {
    /// Create a builder laying out against `counts`.
    pub fn new(counts: FrameCounts) -> Self {
        Self {
            counts,
            background: Vec::new(),
            hook: HookAssets::default(),
            words: Vec::new(),
            narration: None,
            ambient: None,
            style: SubtitleStyle::default(),
        }
    }

    /// Set resolved background clips.
    pub fn background(mut self, clips: Vec<Clip>) -> Self {
        self.background = clips;
        self
    }

    /// Set hook segment visuals.
    pub fn hook(mut self, hook: HookAssets) -> Self {
        self.hook = hook;
        self
    }

    /// Set script subtitle words (script-local frames).
    pub fn words(mut self, words: Vec<WordTiming>) -> Self {
        self.words = words;
        self
    }

    /// Set narration tracks.
    pub fn narration(mut self, narration: NarrationRefs) -> Self {
        self.narration = Some(narration);
        self
    }

    /// Set or clear background music.
    pub fn ambient(mut self, ambient: Option<AmbientAudio>) -> Self {
        self.ambient = ambient;
        self
    }

    /// Set subtitle presentation settings.
    pub fn style(mut self, style: SubtitleStyle) -> Self {
        self.style = style;
        self
    }

    /// Validate every input, then assemble the tree.
    #[tracing::instrument(skip(self), fields(total_frames = self.counts.total_frames))]
    pub fn build(self) -> HookreelResult<CompositionNode> {
        let narration = self
            .narration
            .as_ref()
            .ok_or_else(|| HookreelError::validation("narration tracks are required"))?;
        self.validate(narration)?;

        let total = self.counts.total_frames;
        let mut root_children = vec![self.background_node()];
        if let Some(ambient) = &self.ambient {
            root_children.push(CompositionNode {
                id: "ambient".to_string(),
                start_frame: FrameIndex(0),
                duration_in_frames: total,
                kind: NodeKind::Audio {
                    src: ambient.src.clone(),
                    volume: ambient.volume,
                },
                children: Vec::new(),
            });
        }
        root_children.push(CompositionNode {
            id: "content".to_string(),
            start_frame: FrameIndex(0),
            duration_in_frames: total,
            kind: NodeKind::Sequence,
            children: vec![self.hook_node(narration), self.script_node(narration)],
        });

        Ok(CompositionNode {
            id: "root".to_string(),
            start_frame: FrameIndex(0),
            duration_in_frames: total,
            kind: NodeKind::Parallel,
            children: root_children,
        })
    }

    fn validate(&self, narration: &NarrationRefs) -> HookreelResult<()> {
        let c = &self.counts;
        if c.hook_frames.checked_add(c.script_frames) != Some(c.total_frames) {
            return Err(HookreelError::timing(format!(
                "hook ({}) + script ({}) frames do not add up to total ({})",
                c.hook_frames, c.script_frames, c.total_frames
            )));
        }

        if self.background.is_empty() {
            return Err(HookreelError::validation(
                "at least one background clip is required",
            ));
        }
        let mut cursor = 0u64;
        for (i, clip) in self.background.iter().enumerate() {
            if clip.start_frame.0 != cursor {
                return Err(HookreelError::timing(format!(
                    "background clip {i} starts at {} but the previous clip ends at {cursor}",
                    clip.start_frame.0
                )));
            }
            cursor = cursor.saturating_add(clip.duration_in_frames);
        }
        if cursor != c.total_frames {
            return Err(HookreelError::timing(format!(
                "background clips cover {cursor} frames, timeline has {}",
                c.total_frames
            )));
        }

        for (i, w) in self.words.iter().enumerate() {
            if w.end_frame < w.start_frame {
                return Err(HookreelError::validation(format!(
                    "word {i} ('{}') has end_frame {} < start_frame {}",
                    w.text, w.end_frame.0, w.start_frame.0
                )));
            }
        }

        if narration.hook.trim().is_empty() || narration.script.trim().is_empty() {
            return Err(HookreelError::validation(
                "narration audio sources must be non-empty",
            ));
        }
        validate_volume(narration.volume, "narration")?;
        if let Some(ambient) = &self.ambient {
            if ambient.src.trim().is_empty() {
                return Err(HookreelError::validation(
                    "background music source must be non-empty",
                ));
            }
            validate_volume(ambient.volume, "background music")?;
        }
        Ok(())
    }

    fn background_node(&self) -> CompositionNode {
        let children = self
            .background
            .iter()
            .enumerate()
            .map(|(i, clip)| CompositionNode {
                id: format!("background/{i}"),
                start_frame: clip.start_frame,
                duration_in_frames: clip.duration_in_frames,
                kind: NodeKind::Clip {
                    path: clip.path.clone(),
                    looped: true,
                },
                children: Vec::new(),
            })
            .collect();
        CompositionNode {
            id: "background".to_string(),
            start_frame: FrameIndex(0),
            duration_in_frames: self.counts.total_frames,
            kind: NodeKind::Sequence,
            children,
        }
    }

    fn hook_node(&self, narration: &NarrationRefs) -> CompositionNode {
        let hook_frames = self.counts.hook_frames;
        let mut children = Vec::new();

        if let Some(overlay) = &self.hook.overlay {
            children.push(CompositionNode {
                id: "hook/overlay".to_string(),
                start_frame: FrameIndex(0),
                duration_in_frames: hook_frames,
                kind: NodeKind::Clip {
                    path: overlay.clone(),
                    looped: false,
                },
                children: Vec::new(),
            });
        }

        match self.hook.animation {
            HookAnimation::Static => children.push(CompositionNode {
                id: "hook/text".to_string(),
                start_frame: FrameIndex(0),
                duration_in_frames: hook_frames,
                kind: self.text_kind(self.hook.text.trim(), TextRole::Hook, None),
                children: Vec::new(),
            }),
            HookAnimation::WordByWord => {
                let words = resolve_word_timings(&self.hook.text, &[], hook_frames, None);
                children.push(self.word_sequence("hook/words", hook_frames, &words));
            }
        }

        children.push(CompositionNode {
            id: "hook/narration".to_string(),
            start_frame: FrameIndex(0),
            duration_in_frames: hook_frames,
            kind: NodeKind::Audio {
                src: narration.hook.clone(),
                volume: narration.volume,
            },
            children: Vec::new(),
        });

        CompositionNode {
            id: "hook".to_string(),
            start_frame: FrameIndex(0),
            duration_in_frames: hook_frames,
            kind: NodeKind::Parallel,
            children,
        }
    }

    fn script_node(&self, narration: &NarrationRefs) -> CompositionNode {
        let script_frames = self.counts.script_frames;
        CompositionNode {
            id: "script".to_string(),
            // Relative to the content sequence, whose origin is global frame 0.
            start_frame: self.counts.script_origin(),
            duration_in_frames: script_frames,
            kind: NodeKind::Parallel,
            children: vec![
                self.word_sequence("script/subtitles", script_frames, &self.words),
                CompositionNode {
                    id: "script/narration".to_string(),
                    start_frame: FrameIndex(0),
                    duration_in_frames: script_frames,
                    kind: NodeKind::Audio {
                        src: narration.script.clone(),
                        volume: narration.volume,
                    },
                    children: Vec::new(),
                },
            ],
        }
    }

    /// Words are placed at their own (segment-local) start frames; a word running past
    /// the segment end is clipped by the parent window at evaluation time.
    fn word_sequence(&self, id: &str, duration: u64, words: &[WordTiming]) -> CompositionNode {
        let children = words
            .iter()
            .enumerate()
            .filter(|(_, w)| w.duration_frames() > 0)
            .map(|(i, w)| CompositionNode {
                id: format!("{id}/{i}"),
                start_frame: w.start_frame,
                duration_in_frames: w.duration_frames(),
                kind: self.text_kind(&w.text, TextRole::Word, w.color),
                children: Vec::new(),
            })
            .collect();
        CompositionNode {
            id: id.to_string(),
            start_frame: FrameIndex(0),
            duration_in_frames: duration,
            kind: NodeKind::Sequence,
            children,
        }
    }

    fn text_kind(&self, text: &str, role: TextRole, color: Option<WordColor>) -> NodeKind {
        NodeKind::Text {
            text: text.to_string(),
            role,
            color,
            style: self.style,
        }
    }
}

/// Assemble the render tree with default subtitle styling.
///
/// `words` are script-local; `background` must already cover `counts.total_frames`
/// exactly (see [`crate::resolve_background_clips`]).
pub fn build_tree(
    counts: &FrameCounts,
    background: &[Clip],
    hook: &HookAssets,
    words: &[WordTiming],
    narration: &NarrationRefs,
    ambient: Option<&AmbientAudio>,
) -> HookreelResult<CompositionNode> {
    CompositionBuilder::new(*counts)
        .background(background.to_vec())
        .hook(hook.clone())
        .words(words.to_vec())
        .narration(narration.clone())
        .ambient(ambient.cloned())
        .build()
}

#[cfg(test)]
#[path = "../../tests/unit/composition/builder.rs"]
mod tests;

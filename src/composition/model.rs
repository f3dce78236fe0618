use crate::{
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{HookreelError, HookreelResult},
    subtitles::words::WordColor,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A node of the declarative render tree.
///
/// `start_frame` is relative to the parent node's origin; the root's origin is global
/// frame 0. Use [`CompositionNode::placements`] to see every node on the global timeline.
pub struct CompositionNode {
    /// Path-like identifier, unique within the tree (`script/subtitles/3`).
    pub id: String,
    /// Start relative to the parent's origin.
    pub start_frame: FrameIndex,
    /// Frames the node is active for.
    pub duration_in_frames: u64,
    /// What the node renders.
    #[serde(flatten)]
    pub kind: NodeKind,
    /// Nested nodes, in painter's order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CompositionNode>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// Node payloads.
pub enum NodeKind {
    /// Children laid out one after another in time.
    Sequence,
    /// Children rendered on top of each other.
    Parallel,
    /// Video or image media.
    Clip {
        /// Opaque media path or URL.
        path: String,
        /// Renderer repeats the media when it is shorter than the node.
        #[serde(default)]
        looped: bool,
    },
    /// Audio track.
    Audio {
        /// Opaque media path or URL.
        src: String,
        /// Linear gain.
        volume: f64,
    },
    /// On-screen text.
    Text {
        /// Displayed string.
        text: String,
        /// Which part of the video the text belongs to.
        role: TextRole,
        /// Highlight color, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<WordColor>,
        /// Passed through to the renderer untouched.
        style: SubtitleStyle,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Origin of a text node.
pub enum TextRole {
    /// Whole hook caption shown for the hook segment.
    Hook,
    /// A single word popping in (hook word-by-word or script subtitles).
    Word,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Subtitle presentation settings. Not interpreted by this crate.
pub struct SubtitleStyle {
    /// Font size in pixels.
    #[serde(default = "default_text_size_px")]
    pub text_size_px: f32,
    /// Outline width in pixels.
    #[serde(default = "default_stroke_size_px")]
    pub stroke_size_px: f32,
}

fn default_text_size_px() -> f32 {
    64.0
}

fn default_stroke_size_px() -> f32 {
    8.0
}

impl Default for SubtitleStyle {
    fn default() -> Self {
        Self {
            text_size_px: default_text_size_px(),
            stroke_size_px: default_stroke_size_px(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A node placed on the global timeline.
pub struct Placement {
    /// Node identifier.
    pub id: String,
    /// Nesting depth (root is 0).
    pub depth: usize,
    /// Node window in global frames.
    pub global: FrameRange,
}

impl NodeKind {
    /// Stable lowercase tag, matching the serialized `type` field.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::Parallel => "parallel",
            Self::Clip { .. } => "clip",
            Self::Audio { .. } => "audio",
            Self::Text { .. } => "text",
        }
    }

    /// `true` for nodes that only group children.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Sequence | Self::Parallel)
    }
}

impl CompositionNode {
    /// Node window relative to its parent's origin.
    pub fn range(&self) -> FrameRange {
        FrameRange::with_len(self.start_frame, self.duration_in_frames)
    }

    /// Every node with its window on the global timeline, depth-first in tree order.
    pub fn placements(&self) -> Vec<Placement> {
        let mut out = Vec::new();
        collect_placements(self, FrameIndex(0), 0, &mut out);
        out
    }

    /// Depth-first search by id.
    pub fn find(&self, id: &str) -> Option<&CompositionNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Check structural invariants of a tree built elsewhere (e.g. loaded from JSON).
    pub fn validate(&self) -> HookreelResult<()> {
        let mut seen = std::collections::BTreeSet::new();
        validate_node(self, &mut seen)
    }
}

fn collect_placements(
    node: &CompositionNode,
    parent_origin: FrameIndex,
    depth: usize,
    out: &mut Vec<Placement>,
) {
    let global = node.range().to_global(parent_origin);
    out.push(Placement {
        id: node.id.clone(),
        depth,
        global,
    });
    for child in &node.children {
        collect_placements(child, global.start, depth + 1, out);
    }
}

fn validate_node<'a>(
    node: &'a CompositionNode,
    seen: &mut std::collections::BTreeSet<&'a str>,
) -> HookreelResult<()> {
    if node.id.trim().is_empty() {
        return Err(HookreelError::validation("node id must be non-empty"));
    }
    if !seen.insert(node.id.as_str()) {
        return Err(HookreelError::validation(format!(
            "duplicate node id '{}'",
            node.id
        )));
    }
    match &node.kind {
        NodeKind::Sequence | NodeKind::Parallel => {}
        NodeKind::Clip { path, .. } => {
            if path.trim().is_empty() {
                return Err(HookreelError::validation(format!(
                    "clip node '{}' path must be non-empty",
                    node.id
                )));
            }
        }
        NodeKind::Audio { src, volume } => {
            if src.trim().is_empty() {
                return Err(HookreelError::validation(format!(
                    "audio node '{}' src must be non-empty",
                    node.id
                )));
            }
            validate_volume(*volume, &node.id)?;
        }
        NodeKind::Text { .. } => {}
    }
    if !node.kind.is_container() && !node.children.is_empty() {
        return Err(HookreelError::validation(format!(
            "{} node '{}' cannot have children",
            node.kind.name(),
            node.id
        )));
    }
    for child in &node.children {
        validate_node(child, seen)?;
    }
    Ok(())
}

pub(crate) fn validate_volume(volume: f64, what: &str) -> HookreelResult<()> {
    if !volume.is_finite() || volume < 0.0 {
        return Err(HookreelError::validation(format!(
            "{what} volume must be finite and >= 0"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;

use crate::{
    background::resolve::{Clip, resolve_background_clips},
    composition::builder::{AmbientAudio, CompositionBuilder, HookAssets, NarrationRefs},
    composition::fingerprint::{TreeFingerprint, fingerprint_tree},
    composition::model::CompositionNode,
    foundation::error::HookreelResult,
    pipeline::request::RenderRequest,
    subtitles::words::{WordTiming, resolve_word_timings, word_timings_from_seconds},
    timing::calc::{FrameCounts, compute_frame_counts},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Result of planning one request: the tree plus the intermediate values it was built from.
pub struct RenderPlan {
    /// Segment frame counts (carries the duration-mismatch warning, if any).
    pub counts: FrameCounts,
    /// Script subtitle words, script-local.
    pub words: Vec<WordTiming>,
    /// Background clips on the global timeline.
    pub background: Vec<Clip>,
    /// Render tree for the rendering engine.
    pub tree: CompositionNode,
    /// Structural fingerprint of `tree`.
    pub fingerprint: TreeFingerprint,
}

/// Run every planning stage for `req`, in order.
///
/// Fails before building anything when the request is malformed.
#[tracing::instrument(skip(req))]
pub fn plan_render(req: &RenderRequest) -> HookreelResult<RenderPlan> {
    req.validate()?;
    let fps = req.fps()?;

    let counts = compute_frame_counts(
        fps,
        req.hook.audio.duration_secs,
        req.script.audio.duration_secs,
        req.expected_total_frames,
    )?;

    let explicit = if req.script.aligned_words.is_empty() {
        req.script.words.clone()
    } else {
        word_timings_from_seconds(&req.script.aligned_words, fps)?
    };
    let words = resolve_word_timings(
        &req.script.text,
        &explicit,
        counts.script_frames,
        req.script.fallback_frames_per_word,
    );

    let background = resolve_background_clips(&req.background, counts.total_frames, fps)?;

    let ambient = if req.music.enabled {
        req.music.src.as_ref().map(|src| AmbientAudio {
            src: src.clone(),
            volume: req.music.volume,
        })
    } else {
        None
    };

    let tree = CompositionBuilder::new(counts)
        .background(background.clone())
        .hook(HookAssets {
            text: req.hook.text.clone(),
            animation: req.hook.animation,
            overlay: req.hook.overlay.clone(),
        })
        .words(words.clone())
        .narration(NarrationRefs {
            hook: req.hook.audio.src.clone(),
            script: req.script.audio.src.clone(),
            volume: req.narration_volume,
        })
        .ambient(ambient)
        .style(req.subtitles)
        .build()?;
    let fingerprint = fingerprint_tree(&tree);

    tracing::debug!(
        total_frames = counts.total_frames,
        words = words.len(),
        background_clips = background.len(),
        %fingerprint,
        "render plan ready"
    );

    Ok(RenderPlan {
        counts,
        words,
        background,
        tree,
        fingerprint,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/plan.rs"]
mod tests;

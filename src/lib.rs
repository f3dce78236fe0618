//! hookreel plans short-form narrated videos.
//!
//! Given narration durations, script text (or word alignment) and background footage, it
//! computes a deterministic, frame-accurate render tree for an external rendering engine:
//! background clips covering the whole video, optional background music, a hook segment
//! and a script segment with word-by-word subtitles.
//!
//! # Pipeline overview
//!
//! 1. **Timing**: narration seconds → hook/script/total frame counts ([`compute_frame_counts`])
//! 2. **Words**: explicit alignment or an even split of the script ([`resolve_word_timings`])
//! 3. **Background**: descriptor → gapless clips ([`resolve_background_clips`])
//! 4. **Tree**: everything above → [`CompositionNode`] ([`CompositionBuilder`], [`build_tree`])
//!
//! [`plan_render`] runs all four stages for a [`RenderRequest`], and [`Evaluator`] answers
//! "what is on screen at frame N" for a finished tree.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure**: no IO and no hidden state; identical inputs give identical trees.
//! - **Local frames**: a node's start is relative to its parent; translation between
//!   segment-local and global frames goes through [`local_to_global`] / [`global_to_local`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod background;
mod composition;
mod eval;
mod foundation;
mod pipeline;
mod subtitles;
mod timing;

pub use animation::ease::Ease;
pub use background::resolve::{
    BackgroundDescriptor, BackgroundSegment, Clip, resolve_background_clips,
};
pub use composition::builder::{
    AmbientAudio, CompositionBuilder, HookAnimation, HookAssets, NarrationRefs, build_tree,
};
pub use composition::fingerprint::{TreeFingerprint, fingerprint_tree};
pub use composition::model::{CompositionNode, NodeKind, Placement, SubtitleStyle, TextRole};
pub use eval::evaluator::{ActiveNode, EvaluatedFrame, Evaluator};
pub use foundation::core::{Fps, FrameIndex, FrameRange, global_to_local, local_to_global};
pub use foundation::error::{HookreelError, HookreelResult};
pub use pipeline::plan::{RenderPlan, plan_render};
pub use pipeline::request::{
    HookInput, MusicSettings, NarrationAudio, RenderRequest, ScriptInput,
};
pub use subtitles::srt::write_srt;
pub use subtitles::words::{
    AlignedWord, POP_IN_FRAMES, WordColor, WordTiming, active_word_at, pop_in_scale,
    resolve_word_timings, word_timings_from_seconds,
};
pub use timing::calc::{DurationMismatch, FrameCounts, TimingSpec, compute_frame_counts};

use crate::{
    foundation::core::{Fps, FrameIndex, FrameRange, ensure_duration_secs},
    foundation::error::{HookreelError, HookreelResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// The three accepted shapes of background footage input.
///
/// In JSON this is a bare string, an array of strings, or an array of records.
pub enum BackgroundDescriptor {
    /// One video looped or trimmed over the whole timeline.
    Single(String),
    /// Several videos sharing the timeline evenly, in order.
    Playlist(Vec<String>),
    /// Videos with their own durations, placed back to back.
    Timed(Vec<BackgroundSegment>),
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A background video with an explicit duration.
pub struct BackgroundSegment {
    /// Opaque media path or URL.
    pub path: String,
    /// Duration in frames; wins over `duration_in_seconds` when both are set.
    #[serde(
        default,
        alias = "durationInFrames",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration_in_frames: Option<u64>,
    /// Duration in seconds, converted with `round(secs * fps)`.
    #[serde(
        default,
        alias = "durationInSeconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration_in_seconds: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// A background video placed on the global timeline.
pub struct Clip {
    /// Opaque media path or URL.
    pub path: String,
    /// Global frame where the clip starts.
    pub start_frame: FrameIndex,
    /// Frames the clip occupies.
    pub duration_in_frames: u64,
}

impl Clip {
    /// Global window `[start_frame, start_frame + duration_in_frames)`.
    pub fn range(&self) -> FrameRange {
        FrameRange::with_len(self.start_frame, self.duration_in_frames)
    }
}

/// Normalize `descriptor` into back-to-back clips covering exactly `total_frames`.
///
/// `fps` is only used to convert `duration_in_seconds` records.
#[tracing::instrument(skip(descriptor))]
pub fn resolve_background_clips(
    descriptor: &BackgroundDescriptor,
    total_frames: u64,
    fps: Fps,
) -> HookreelResult<Vec<Clip>> {
    let clips = match descriptor {
        BackgroundDescriptor::Single(path) => resolve_single(path, total_frames)?,
        BackgroundDescriptor::Playlist(paths) => resolve_playlist(paths, total_frames)?,
        BackgroundDescriptor::Timed(segments) => resolve_timed(segments, total_frames, fps)?,
    };
    if clips.is_empty() {
        return Err(HookreelError::validation(
            "background descriptor resolved to zero clips",
        ));
    }
    Ok(clips)
}

fn resolve_single(path: &str, total_frames: u64) -> HookreelResult<Vec<Clip>> {
    validate_path(path, 0)?;
    Ok(vec![Clip {
        path: path.to_string(),
        start_frame: FrameIndex(0),
        duration_in_frames: total_frames,
    }])
}

fn resolve_playlist(paths: &[String], total_frames: u64) -> HookreelResult<Vec<Clip>> {
    if paths.is_empty() {
        return Err(HookreelError::validation("background path list is empty"));
    }
    for (i, p) in paths.iter().enumerate() {
        validate_path(p, i)?;
    }

    let count = paths.len() as u64;
    let base = total_frames / count;
    let remainder = total_frames % count;

    let mut cursor = 0u64;
    let clips = paths
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let is_last = i + 1 == paths.len();
            let duration = if is_last { base + remainder } else { base };
            let clip = Clip {
                path: p.clone(),
                start_frame: FrameIndex(cursor),
                duration_in_frames: duration,
            };
            cursor += duration;
            clip
        })
        .collect();
    Ok(clips)
}

fn resolve_timed(
    segments: &[BackgroundSegment],
    total_frames: u64,
    fps: Fps,
) -> HookreelResult<Vec<Clip>> {
    if segments.is_empty() {
        return Err(HookreelError::validation(
            "background segment list is empty",
        ));
    }
    let fps = Fps::new(fps.num, fps.den)?;

    let durations = segments
        .iter()
        .enumerate()
        .map(|(i, seg)| {
            validate_path(&seg.path, i)?;
            segment_frames(seg, i, fps)
        })
        .collect::<HookreelResult<Vec<u64>>>()?;

    let mut clips = Vec::with_capacity(segments.len());
    let mut cursor = 0u64;
    for (seg, &duration) in segments.iter().zip(&durations) {
        if cursor >= total_frames && !clips.is_empty() {
            tracing::debug!(path = %seg.path, "background segment past timeline end dropped");
            continue;
        }
        let duration = duration.min(total_frames - cursor);
        clips.push(Clip {
            path: seg.path.clone(),
            start_frame: FrameIndex(cursor),
            duration_in_frames: duration,
        });
        cursor += duration;
    }

    if cursor < total_frames
        && let Some(last) = clips.last_mut()
    {
        let shortfall = total_frames - cursor;
        tracing::debug!(
            path = %last.path,
            shortfall,
            "extending last background clip to cover timeline"
        );
        last.duration_in_frames += shortfall;
    }

    Ok(clips)
}

fn segment_frames(seg: &BackgroundSegment, index: usize, fps: Fps) -> HookreelResult<u64> {
    if let Some(frames) = seg.duration_in_frames {
        return Ok(frames);
    }
    match seg.duration_in_seconds {
        Some(secs) => {
            ensure_duration_secs(secs, &format!("background segment {index} duration"))?;
            Ok(fps.secs_to_frames_round(secs))
        }
        None => Err(HookreelError::validation(format!(
            "background segment {index} ('{}') needs duration_in_frames or duration_in_seconds",
            seg.path
        ))),
    }
}

fn validate_path(path: &str, index: usize) -> HookreelResult<()> {
    if path.trim().is_empty() {
        return Err(HookreelError::validation(format!(
            "background path {index} must be non-empty"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/background/resolve.rs"]
mod tests;

use crate::{
    foundation::core::{Fps, FrameIndex, local_to_global},
    subtitles::words::WordTiming,
};

/// Render word timings as SubRip cues, one cue per word.
///
/// `origin` is the global frame of the segment the words are local to, so cue times
/// line up with the finished video rather than the script narration alone. Words with
/// an empty or inverted window are skipped.
pub fn write_srt(words: &[WordTiming], fps: Fps, origin: FrameIndex) -> String {
    let mut out = String::new();
    let mut index = 0usize;
    for w in words {
        if w.duration_frames() == 0 {
            continue;
        }
        index += 1;
        let start = fps.frames_to_secs(local_to_global(w.start_frame, origin).0);
        let end = fps.frames_to_secs(local_to_global(w.end_frame, origin).0);
        out.push_str(&format!(
            "{index}\n{} --> {}\n{}\n\n",
            format_srt_time(start),
            format_srt_time(end),
            w.text
        ));
    }
    out
}

fn format_srt_time(seconds: f64) -> String {
    let total_ms = (seconds * 1000.0).round().max(0.0) as u64;
    let ms = total_ms % 1000;
    let total_sec = total_ms / 1000;
    let s = total_sec % 60;
    let total_min = total_sec / 60;
    let m = total_min % 60;
    let h = total_min / 60;
    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}

#[cfg(test)]
#[path = "../../tests/unit/subtitles/srt.rs"]
mod tests;

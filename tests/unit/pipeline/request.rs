use super::*;

fn minimal() -> RenderRequest {
    RenderRequest::from_json_str(
        r#"{
            "hook": { "text": "hi", "audio": { "src": "h.mp3", "duration_secs": 1.0 } },
            "script": { "text": "a b", "audio": { "src": "s.mp3", "duration_secs": 2.0 } },
            "background": "bg.mp4"
        }"#,
    )
    .unwrap()
}

#[test]
fn defaults_fill_optional_fields() {
    let req = minimal();
    assert_eq!(req.fps, 30);
    assert_eq!(req.hook.animation, HookAnimation::Static);
    assert!(!req.music.enabled);
    assert_eq!(req.music.volume, 0.15);
    assert_eq!(req.narration_volume, 1.0);
    assert_eq!(req.subtitles, SubtitleStyle::default());
    assert!(req.script.words.is_empty());
    assert_eq!(req.expected_total_frames, None);
    req.validate().unwrap();
}

#[test]
fn malformed_requests_fail_validation() {
    let mut r = minimal();
    r.fps = 0;
    assert!(r.validate().is_err());

    let mut r = minimal();
    r.script.audio.duration_secs = -1.0;
    assert!(r.validate().is_err());

    let mut r = minimal();
    r.music.enabled = true;
    assert!(r.validate().is_err());
    r.music.src = Some("m.mp3".to_string());
    r.validate().unwrap();
    r.music.volume = f64::INFINITY;
    assert!(r.validate().is_err());

    let mut r = minimal();
    r.subtitles.stroke_size_px = f32::NAN;
    assert!(r.validate().is_err());

    let mut r = minimal();
    r.hook.audio.src.clear();
    assert!(r.validate().is_err());
}

#[test]
fn frame_and_second_alignment_are_exclusive() {
    let mut r = minimal();
    r.script.words.push(WordTiming {
        text: "a".to_string(),
        start_frame: crate::foundation::core::FrameIndex(0),
        end_frame: crate::foundation::core::FrameIndex(5),
        color: None,
    });
    r.script.aligned_words.push(AlignedWord {
        text: "a".to_string(),
        start_secs: 0.0,
        end_secs: 0.2,
        color: None,
    });
    assert!(r.validate().is_err());
}

#[test]
fn fallback_length_must_fit_the_word_count() {
    let mut r = minimal();
    r.script.fallback_frames_per_word = Some(u64::MAX);
    let err = r.validate().unwrap_err();
    assert!(matches!(err, HookreelError::Validation(_)));

    r.script.fallback_frames_per_word = Some(u64::MAX / 2);
    r.validate().unwrap();
}

#[test]
fn bad_json_is_a_serde_error() {
    let err = RenderRequest::from_json_str("{\"fps\": 30}").unwrap_err();
    assert!(matches!(err, HookreelError::Serde(_)));
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = RenderRequest::from_path(Path::new("does/not/exist.json")).unwrap_err();
    assert!(format!("{err:#}").contains("does/not/exist.json"));
}

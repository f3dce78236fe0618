use super::*;

fn fps30() -> Fps {
    Fps::integer(30).unwrap()
}

fn durations(clips: &[Clip]) -> Vec<u64> {
    clips.iter().map(|c| c.duration_in_frames).collect()
}

fn starts(clips: &[Clip]) -> Vec<u64> {
    clips.iter().map(|c| c.start_frame.0).collect()
}

fn seg(path: &str, frames: Option<u64>, secs: Option<f64>) -> BackgroundSegment {
    BackgroundSegment {
        path: path.to_string(),
        duration_in_frames: frames,
        duration_in_seconds: secs,
    }
}

fn paths(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("bg/{i}.mp4")).collect()
}

#[test]
fn single_path_spans_timeline() {
    let d = BackgroundDescriptor::Single("bg/loop.mp4".to_string());
    let clips = resolve_background_clips(&d, 405, fps30()).unwrap();
    assert_eq!(
        clips,
        vec![Clip {
            path: "bg/loop.mp4".to_string(),
            start_frame: FrameIndex(0),
            duration_in_frames: 405,
        }]
    );
    assert_eq!(clips[0].range().end, FrameIndex(405));
}

#[test]
fn playlist_remainder_goes_to_last_clip() {
    let d = BackgroundDescriptor::Playlist(paths(3));
    let clips = resolve_background_clips(&d, 100, fps30()).unwrap();
    assert_eq!(durations(&clips), vec![33, 33, 34]);
    assert_eq!(starts(&clips), vec![0, 33, 66]);
}

#[test]
fn timed_shortfall_extends_last_clip() {
    let d = BackgroundDescriptor::Timed(vec![
        seg("a.mp4", Some(40), None),
        seg("b.mp4", Some(40), None),
    ]);
    let clips = resolve_background_clips(&d, 100, fps30()).unwrap();
    assert_eq!(durations(&clips), vec![40, 60]);
    assert_eq!(starts(&clips), vec![0, 40]);
}

#[test]
fn timed_overflow_truncates_in_order() {
    let d = BackgroundDescriptor::Timed(vec![
        seg("a.mp4", Some(60), None),
        seg("b.mp4", Some(60), None),
        seg("c.mp4", Some(60), None),
    ]);
    let clips = resolve_background_clips(&d, 100, fps30()).unwrap();
    assert_eq!(durations(&clips), vec![60, 40]);
    assert_eq!(clips[1].path, "b.mp4");
}

#[test]
fn timed_seconds_are_rounded() {
    let d = BackgroundDescriptor::Timed(vec![
        seg("a.mp4", None, Some(1.49)),
        seg("b.mp4", Some(10), Some(99.0)),
        seg("c.mp4", None, Some(2.0)),
    ]);
    let clips = resolve_background_clips(&d, 115, fps30()).unwrap();
    // 1.49s -> 45 frames, frames beat seconds for b, 2s -> 60 frames.
    assert_eq!(durations(&clips), vec![45, 10, 60]);
    assert_eq!(starts(&clips), vec![0, 45, 55]);
}

#[test]
fn every_variant_sums_to_total() {
    let single = BackgroundDescriptor::Single("x.mp4".to_string());
    for total in [0u64, 1, 2, 7, 99, 100, 101, 405, 1800] {
        for d in [
            single.clone(),
            BackgroundDescriptor::Playlist(paths(1)),
            BackgroundDescriptor::Playlist(paths(4)),
            BackgroundDescriptor::Playlist(paths(7)),
            BackgroundDescriptor::Timed(vec![seg("a", Some(40), None), seg("b", Some(40), None)]),
            BackgroundDescriptor::Timed(vec![seg("a", None, Some(0.5)), seg("b", Some(0), None)]),
            BackgroundDescriptor::Timed(vec![seg("a", Some(5000), None)]),
        ] {
            let clips = resolve_background_clips(&d, total, fps30()).unwrap();
            assert!(!clips.is_empty());
            assert_eq!(durations(&clips).iter().sum::<u64>(), total, "{d:?} @ {total}");
            let mut cursor = 0;
            for c in &clips {
                assert_eq!(c.start_frame.0, cursor);
                cursor += c.duration_in_frames;
            }
        }
    }
}

#[test]
fn malformed_descriptors_are_rejected() {
    let fps = fps30();
    assert!(resolve_background_clips(&BackgroundDescriptor::Playlist(vec![]), 10, fps).is_err());
    assert!(resolve_background_clips(&BackgroundDescriptor::Timed(vec![]), 10, fps).is_err());
    assert!(resolve_background_clips(&BackgroundDescriptor::Single("  ".into()), 10, fps).is_err());
    assert!(
        resolve_background_clips(
            &BackgroundDescriptor::Timed(vec![seg("a", None, None)]),
            10,
            fps
        )
        .is_err()
    );
    assert!(
        resolve_background_clips(
            &BackgroundDescriptor::Timed(vec![seg("a", None, Some(-2.0))]),
            10,
            fps
        )
        .is_err()
    );
    assert!(
        resolve_background_clips(
            &BackgroundDescriptor::Timed(vec![seg("a", None, Some(1.0))]),
            10,
            Fps { num: 0, den: 1 }
        )
        .is_err()
    );
}

#[test]
fn json_shapes_map_onto_variants() {
    let single: BackgroundDescriptor = serde_json::from_str(r#""bg.mp4""#).unwrap();
    assert_eq!(single, BackgroundDescriptor::Single("bg.mp4".to_string()));

    let list: BackgroundDescriptor = serde_json::from_str(r#"["a.mp4","b.mp4"]"#).unwrap();
    assert_eq!(
        list,
        BackgroundDescriptor::Playlist(vec!["a.mp4".to_string(), "b.mp4".to_string()])
    );

    let timed: BackgroundDescriptor = serde_json::from_str(
        r#"[{"path":"a.mp4","durationInFrames":40},{"path":"b.mp4","duration_in_seconds":1.5}]"#,
    )
    .unwrap();
    assert_eq!(
        timed,
        BackgroundDescriptor::Timed(vec![
            seg("a.mp4", Some(40), None),
            seg("b.mp4", None, Some(1.5)),
        ])
    );
}

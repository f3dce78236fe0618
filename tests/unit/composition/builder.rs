use super::*;
use crate::{
    background::resolve::{BackgroundDescriptor, resolve_background_clips},
    foundation::core::Fps,
    timing::calc::compute_frame_counts,
};

fn counts() -> FrameCounts {
    compute_frame_counts(Fps::integer(30).unwrap(), 3.0, 10.5, None).unwrap()
}

fn background(total: u64) -> Vec<Clip> {
    resolve_background_clips(
        &BackgroundDescriptor::Playlist(vec!["bg/a.mp4".into(), "bg/b.mp4".into()]),
        total,
        Fps::integer(30).unwrap(),
    )
    .unwrap()
}

fn narration() -> NarrationRefs {
    NarrationRefs {
        hook: "tts/hook.mp3".to_string(),
        script: "tts/script.mp3".to_string(),
        volume: 1.0,
    }
}

fn hook() -> HookAssets {
    HookAssets {
        text: "You won't believe this".to_string(),
        animation: HookAnimation::Static,
        overlay: None,
    }
}

fn words() -> Vec<WordTiming> {
    resolve_word_timings("one two three four five", &[], 315, None)
}

fn tree(ambient: Option<&AmbientAudio>) -> CompositionNode {
    let c = counts();
    build_tree(&c, &background(c.total_frames), &hook(), &words(), &narration(), ambient).unwrap()
}

fn global_start(tree: &CompositionNode, id: &str) -> u64 {
    tree.placements()
        .into_iter()
        .find(|p| p.id == id)
        .unwrap_or_else(|| panic!("missing node {id}"))
        .global
        .start
        .0
}

#[test]
fn root_layout_matches_timeline() {
    let t = tree(None);
    assert_eq!(t.kind, NodeKind::Parallel);
    assert_eq!(t.duration_in_frames, 405);
    let ids: Vec<&str> = t.children.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["background", "content"]);

    let content = t.find("content").unwrap();
    assert_eq!(content.kind, NodeKind::Sequence);
    assert_eq!(content.children.len(), 2);
    let hook = &content.children[0];
    let script = &content.children[1];
    assert_eq!((hook.start_frame.0, hook.duration_in_frames), (0, 90));
    assert_eq!((script.start_frame.0, script.duration_in_frames), (90, 315));
}

#[test]
fn first_script_word_lands_on_hook_end() {
    let t = tree(None);
    let c = counts();
    assert_eq!(global_start(&t, "script/subtitles/0"), c.hook_frames);
    assert_eq!(global_start(&t, "script/narration"), c.hook_frames);
    // 315 / 5 words -> 63 frames each.
    assert_eq!(global_start(&t, "script/subtitles/2"), c.hook_frames + 126);
    // Stored frames stay local to the script segment.
    assert_eq!(t.find("script/subtitles/0").unwrap().start_frame, FrameIndex(0));
}

#[test]
fn ambient_audio_sits_at_root() {
    let ambient = AmbientAudio {
        src: "music/lofi.mp3".to_string(),
        volume: 0.2,
    };
    let t = tree(Some(&ambient));
    let node = &t.children[1];
    assert_eq!(node.id, "ambient");
    assert_eq!(node.duration_in_frames, 405);
    assert_eq!(
        node.kind,
        NodeKind::Audio {
            src: "music/lofi.mp3".to_string(),
            volume: 0.2,
        }
    );
    assert!(t.find("script/ambient").is_none());
}

#[test]
fn background_clips_become_looped_clip_nodes() {
    let t = tree(None);
    let bg = t.find("background").unwrap();
    assert_eq!(bg.children.len(), 2);
    assert_eq!(bg.children[1].start_frame, FrameIndex(202));
    assert_eq!(bg.children[1].duration_in_frames, 203);
    assert!(matches!(bg.children[0].kind, NodeKind::Clip { looped: true, .. }));
}

#[test]
fn build_is_idempotent() {
    assert_eq!(tree(None), tree(None));
}

#[test]
fn word_by_word_hook_splits_caption() {
    let c = counts();
    let t = CompositionBuilder::new(c)
        .background(background(c.total_frames))
        .hook(HookAssets {
            animation: HookAnimation::WordByWord,
            overlay: Some("hook/flash.mp4".to_string()),
            ..hook()
        })
        .words(words())
        .narration(narration())
        .build()
        .unwrap();
    let seq = t.find("hook/words").unwrap();
    assert_eq!(seq.children.len(), 4);
    assert_eq!(seq.children[3].start_frame, FrameIndex(69));
    assert!(t.find("hook/text").is_none());
    assert!(matches!(
        t.find("hook/overlay").unwrap().kind,
        NodeKind::Clip { looped: false, .. }
    ));
}

#[test]
fn style_is_passed_through() {
    let c = counts();
    let style = SubtitleStyle {
        text_size_px: 90.0,
        stroke_size_px: 3.5,
    };
    let t = CompositionBuilder::new(c)
        .background(background(c.total_frames))
        .hook(hook())
        .words(words())
        .narration(narration())
        .style(style)
        .build()
        .unwrap();
    let NodeKind::Text { style: got, role, .. } = &t.find("script/subtitles/1").unwrap().kind
    else {
        panic!("expected text node");
    };
    assert_eq!(*got, style);
    assert_eq!(*role, TextRole::Word);
}

#[test]
fn empty_script_is_valid() {
    let c = counts();
    let t = build_tree(&c, &background(c.total_frames), &hook(), &[], &narration(), None).unwrap();
    assert!(t.find("script/subtitles").unwrap().children.is_empty());
    assert!(t.find("script/narration").is_some());
}

#[test]
fn inverted_words_are_rejected() {
    let c = counts();
    let bad = vec![WordTiming {
        text: "oops".to_string(),
        start_frame: FrameIndex(40),
        end_frame: FrameIndex(30),
        color: None,
    }];
    let err = build_tree(&c, &background(c.total_frames), &hook(), &bad, &narration(), None)
        .unwrap_err();
    assert!(err.to_string().contains("end_frame"));
}

#[test]
fn zero_length_words_are_skipped() {
    let c = counts();
    let words = resolve_word_timings("silent words", &[], 0, None);
    let t = build_tree(&c, &background(c.total_frames), &hook(), &words, &narration(), None).unwrap();
    assert!(t.find("script/subtitles").unwrap().children.is_empty());
}

#[test]
fn background_must_cover_timeline() {
    let c = counts();
    let short = background(c.total_frames - 1);
    assert!(matches!(
        build_tree(&c, &short, &hook(), &words(), &narration(), None),
        Err(HookreelError::Timing(_))
    ));
    assert!(build_tree(&c, &[], &hook(), &words(), &narration(), None).is_err());

    let mut gapped = background(c.total_frames);
    gapped[1].start_frame = FrameIndex(gapped[1].start_frame.0 + 1);
    gapped[1].duration_in_frames -= 1;
    assert!(build_tree(&c, &gapped, &hook(), &words(), &narration(), None).is_err());
}

#[test]
fn inconsistent_counts_are_rejected() {
    let mut c = counts();
    c.total_frames += 1;
    assert!(build_tree(&c, &background(c.total_frames), &hook(), &words(), &narration(), None).is_err());
}

#[test]
fn bad_audio_inputs_are_rejected() {
    let c = counts();
    let bg = background(c.total_frames);
    let loud = NarrationRefs {
        volume: f64::NAN,
        ..narration()
    };
    assert!(build_tree(&c, &bg, &hook(), &words(), &loud, None).is_err());

    let silent_src = NarrationRefs {
        script: " ".to_string(),
        ..narration()
    };
    assert!(build_tree(&c, &bg, &hook(), &words(), &silent_src, None).is_err());

    let neg = AmbientAudio {
        src: "m.mp3".to_string(),
        volume: -1.0,
    };
    assert!(build_tree(&c, &bg, &hook(), &words(), &narration(), Some(&neg)).is_err());

    assert!(
        CompositionBuilder::new(c)
            .background(bg)
            .build()
            .is_err()
    );
}

#[test]
fn built_tree_passes_structural_validation() {
    tree(None).validate().unwrap();
}

use super::*;

fn default_timeline() -> Timeline {
    Timeline::from_config(&ReelConfig::default()).unwrap()
}

fn sweep() -> impl Iterator<Item = ScrollRatio> {
    (0..=10_000).map(|i| ScrollRatio::new(f64::from(i) / 10_000.0))
}

fn in_crossfade(r: f64, t: &Timeline) -> bool {
    t.sections()
        .iter()
        .skip(1)
        .any(|s| r > s.start() - t.fade() && r < s.start())
}

#[test]
fn endpoints_show_only_first_and_last_sections() {
    let t = default_timeline();

    let at0 = t.map(ScrollRatio::START);
    assert_eq!(at0[0].opacity, 1.0);
    assert!(at0[1..].iter().all(|s| s.opacity == 0.0));

    let at1 = t.map(ScrollRatio::END);
    assert_eq!(at1[4].opacity, 1.0);
    assert!(at1[..4].iter().all(|s| s.opacity == 0.0));
}

#[test]
fn at_most_two_layers_and_complementary_in_crossfades() {
    let t = default_timeline();
    for r in sweep() {
        let states = t.map(r);
        let visible: Vec<_> = states.iter().filter(|s| s.opacity > 0.0).collect();
        assert!(!visible.is_empty(), "nothing visible at {r:?}");
        assert!(visible.len() <= 2, "more than two layers at {r:?}");

        let sum: f64 = states.iter().map(|s| s.opacity).sum();
        assert!((sum - 1.0).abs() < 1e-9, "opacity sum {sum} at {r:?}");

        if !in_crossfade(r.get(), &t) {
            assert_eq!(visible.len(), 1, "expected a single layer at {r:?}");
            assert!((visible[0].opacity - 1.0).abs() < 1e-9);
        }
    }
}

#[test]
fn crossfade_midpoint_is_half_and_half() {
    let t = default_timeline();
    let states = t.map(ScrollRatio::new(0.39));
    assert_eq!(states[1].section, SectionId::Camera);
    assert!((states[1].opacity - 0.5).abs() < 1e-6);
    assert!((states[2].opacity - 0.5).abs() < 1e-6);
}

#[test]
fn frame_index_is_monotonic_and_bounded() {
    let t = default_timeline();
    for s in t.sections() {
        let mut prev = FrameNumber(0);
        for r in sweep() {
            let f = s.frame_at(r);
            assert!(f >= FrameNumber(1) && f <= FrameNumber(240));
            assert!(f >= prev, "frame went backwards in {} at {r:?}", s.id());
            prev = f;
        }
    }
}

#[test]
fn frame_index_spans_sequence_within_section() {
    let t = default_timeline();
    let camera = t.get(SectionId::Camera).unwrap();
    assert_eq!(camera.frame_at(ScrollRatio::new(0.0)), FrameNumber(1));
    assert_eq!(camera.frame_at(ScrollRatio::new(0.2)), FrameNumber(1));
    assert_eq!(camera.frame_at(ScrollRatio::new(0.35)), FrameNumber(180));
    assert_eq!(camera.frame_at(ScrollRatio::new(0.4)), FrameNumber(240));
    assert_eq!(camera.frame_at(ScrollRatio::new(0.9)), FrameNumber(240));
}

#[test]
fn section_at_uses_primary_ranges() {
    let t = default_timeline();
    assert_eq!(t.section_at(ScrollRatio::new(0.0)), SectionId::Hero);
    assert_eq!(t.section_at(ScrollRatio::new(0.199)), SectionId::Hero);
    assert_eq!(t.section_at(ScrollRatio::new(0.2)), SectionId::Camera);
    assert_eq!(t.section_at(ScrollRatio::new(0.79)), SectionId::Stylus);
    assert_eq!(t.section_at(ScrollRatio::new(1.0)), SectionId::Ai);
}

#[test]
fn single_section_is_always_opaque() {
    let cfg = SectionConfig {
        id: SectionId::Hero,
        dir: "seq".to_string(),
        start: 0.0,
        end: 1.0,
        frame_count: 10,
        placement: Placement::Cover,
    };
    let t = Timeline::new(&[cfg], 0.02).unwrap();
    for r in [0.0, 0.5, 1.0] {
        assert_eq!(t.map(ScrollRatio::new(r))[0].opacity, 1.0);
    }
}

#[test]
fn rejects_invalid_layouts() {
    let mut cfg = ReelConfig::default();
    cfg.sections[1].start = 0.25;
    assert!(Timeline::from_config(&cfg).is_err());

    let mut cfg = ReelConfig::default();
    cfg.sections[4].end = 0.9;
    assert!(Timeline::from_config(&cfg).is_err());

    let mut cfg = ReelConfig::default();
    cfg.fade = 0.15;
    assert!(Timeline::from_config(&cfg).is_err());

    let mut cfg = ReelConfig::default();
    cfg.sections[2].frame_count = 0;
    assert!(Timeline::from_config(&cfg).is_err());

    let mut cfg = ReelConfig::default();
    cfg.sections[3].id = SectionId::Hero;
    assert!(Timeline::from_config(&cfg).is_err());

    let mut cfg = ReelConfig::default();
    let extra = cfg.sections[0].clone();
    cfg.sections.push(extra);
    assert!(Timeline::from_config(&cfg).is_err());

    let cfg = ReelConfig {
        sections: vec![],
        ..ReelConfig::default()
    };
    assert!(Timeline::from_config(&cfg).is_err());
}

#[test]
fn frame_count_is_bounded() {
    let mut cfg = ReelConfig::default();
    cfg.sections[0].frame_count = MAX_FRAME_COUNT;
    assert!(Timeline::from_config(&cfg).is_ok());

    cfg.sections[0].frame_count = u32::MAX;
    let err = Timeline::from_config(&cfg).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)), "{err}");
    assert!(cfg.validate().is_err());
}

#[test]
fn visible_frames_cover_both_crossfade_layers() {
    let t = default_timeline();
    let wanted = t.visible_frames([
        ScrollRatio::START,
        ScrollRatio::new(0.39),
        ScrollRatio::START,
    ]);

    assert_eq!(wanted[&SectionId::Hero], vec![FrameNumber(1)]);
    assert_eq!(wanted[&SectionId::Camera].len(), 1);
    assert_eq!(wanted[&SectionId::Performance], vec![FrameNumber(1)]);
    assert!(!wanted.contains_key(&SectionId::Ai));
}

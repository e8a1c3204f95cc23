use super::*;
use crate::{config::TrackConfig, frames::FrameImage};

fn config() -> ReelConfig {
    ReelConfig {
        vignette: false,
        clear_rgba: [0, 0, 0, 255],
        max_fps: 50,
        ..ReelConfig::default()
    }
}

fn solid_cache(section: SectionId, color: [u8; 4]) -> FrameCache {
    let mut cache = FrameCache::empty(section, 240);
    for n in 1..=240 {
        cache
            .insert(FrameNumber(n), FrameImage::solid(8, 4, color).unwrap())
            .unwrap();
    }
    cache
}

fn full_library() -> FrameLibrary {
    let mut lib = FrameLibrary::new();
    for (i, id) in SectionId::ALL.into_iter().enumerate() {
        lib.insert(solid_cache(id, [40 * (i as u8 + 1), 0, 0, 255]));
    }
    lib
}

fn source() -> ScrollProgressSource {
    // 1000px track over a 100px viewport: 900px of scroll.
    ScrollProgressSource::new(
        TrackConfig {
            top_px: 0.0,
            height_vh: 1000.0,
        },
        Viewport::new(16, 100).unwrap(),
    )
}

#[test]
fn throttle_caps_rate() {
    let t0 = Instant::now();
    let mut th = RedrawThrottle::new(50);
    assert!(th.is_open(t0));
    th.mark(t0);
    assert!(!th.is_open(t0 + Duration::from_millis(5)));
    assert!(th.is_open(t0 + Duration::from_millis(20)));

    let uncapped = RedrawThrottle::new(0);
    assert!(uncapped.is_open(t0));
}

#[test]
fn first_tick_paints_initial_snapshot() {
    let mut src = source();
    let mut player = SequencePlayer::attach(&mut src, config(), full_library()).unwrap();
    assert!(player.is_ready());

    let stats = player.tick(Instant::now()).unwrap().unwrap();
    assert_eq!(stats.drawn, 1);
    assert_eq!(player.surface().pixel(8, 50), Some([40, 0, 0, 255]));
    assert_eq!(player.state().sections[0].frame, FrameNumber(1));
    assert_eq!(player.hud().module, "TITANIUM.CORE");
}

#[test]
fn idle_ticks_do_nothing() {
    let mut src = source();
    let mut player = SequencePlayer::attach(&mut src, config(), full_library()).unwrap();
    let t0 = Instant::now();
    assert!(player.tick(t0).unwrap().is_some());
    assert!(player.tick(t0 + Duration::from_secs(1)).unwrap().is_none());
    assert_eq!(player.stats().redraws, 1);
}

#[test]
fn burst_of_scrolls_collapses_into_latest() {
    let mut src = source();
    let mut player = SequencePlayer::attach(&mut src, config(), full_library()).unwrap();
    let t0 = Instant::now();
    player.tick(t0).unwrap();

    src.on_scroll(90.0);
    src.on_scroll(270.0);
    src.on_scroll(450.0);

    // Inside the 20ms window: deferred.
    assert!(player.tick(t0 + Duration::from_millis(5)).unwrap().is_none());
    assert_eq!(player.stats().throttled, 1);

    let stats = player.tick(t0 + Duration::from_millis(25)).unwrap().unwrap();
    assert_eq!(stats.drawn, 1);
    assert_eq!(player.state().snapshot.ratio.get(), 0.5);
    assert_eq!(player.surface().pixel(8, 50), Some([120, 0, 0, 255]));
    assert_eq!(player.active_nav().map(|n| n.label.as_str()), Some("Performance"));
    assert_eq!(player.stats().redraws, 2);
}

#[test]
fn scrolling_past_track_end_is_idle() {
    let mut src = source();
    let mut player = SequencePlayer::attach(&mut src, config(), full_library()).unwrap();
    let t0 = Instant::now();
    player.tick(t0).unwrap();

    // Scroll is beyond the track end either way: ratio stays 1.
    src.on_scroll(900.0);
    assert!(player.tick(t0 + Duration::from_millis(30)).unwrap().is_some());
    src.on_resize(Viewport::new(16, 100).unwrap());
    src.on_scroll(950.0);
    assert!(src.snapshot().ratio.get() == 1.0);
    assert!(player.tick(t0 + Duration::from_millis(60)).unwrap().is_none());
    assert_eq!(player.stats().redraws, 2);
}

#[test]
fn tiny_scroll_within_one_frame_is_elided() {
    let mut src = source();
    let mut player = SequencePlayer::attach(&mut src, config(), full_library()).unwrap();
    let t0 = Instant::now();
    player.tick(t0).unwrap();

    // 0.0001 of the track: ratio changes but hero stays on frame 1 at opacity 1.
    src.on_scroll(0.09);
    assert!(src.snapshot().ratio.get() > 0.0);
    assert!(player.tick(t0 + Duration::from_millis(30)).unwrap().is_none());
    assert_eq!(player.stats().elided, 1);
}

#[test]
fn resize_changes_surface_not_frames() {
    let mut src = source();
    let mut player = SequencePlayer::attach(&mut src, config(), full_library()).unwrap();
    let t0 = Instant::now();
    src.on_scroll(300.0);
    player.tick(t0).unwrap();
    let before = player.state().sections.clone();

    src.on_resize(Viewport::new(32, 100).unwrap());
    player.tick(t0 + Duration::from_millis(30)).unwrap().unwrap();
    assert_eq!(player.surface().width(), 32);
    assert_eq!(player.state().sections, before);
}

#[test]
fn late_section_triggers_repaint() {
    let mut src = source();
    let mut lib = full_library();
    let mut partial = FrameLibrary::new();
    for id in [SectionId::Camera, SectionId::Performance, SectionId::Stylus, SectionId::Ai] {
        if let Some(c) = lib.cache(id) {
            partial.insert(c.clone());
        }
    }
    let hero = lib.cache(SectionId::Hero).cloned().unwrap();
    lib = partial;

    let mut player = SequencePlayer::attach(&mut src, config(), lib).unwrap();
    assert!(!player.is_ready());

    let t0 = Instant::now();
    let stats = player.tick(t0).unwrap().unwrap();
    assert_eq!(stats.missing, 1);
    assert_eq!(player.surface().pixel(8, 50), Some([0, 0, 0, 255]));

    player.insert_section(hero);
    assert!(player.is_ready());
    let stats = player.tick(t0 + Duration::from_millis(30)).unwrap().unwrap();
    assert_eq!(stats.drawn, 1);
    assert_eq!(player.surface().pixel(8, 50), Some([40, 0, 0, 255]));
}

#[test]
fn detach_unsubscribes() {
    let mut src = source();
    let player = SequencePlayer::attach(&mut src, config(), FrameLibrary::new()).unwrap();
    let lib = player.detach(&mut src);
    assert!(!lib.is_ready(SectionId::Hero));
    assert!(src.on_scroll(100.0).is_some());
}

#[test]
fn attach_rejects_invalid_config() {
    let mut src = source();
    let mut cfg = config();
    cfg.fade = 0.5;
    assert!(SequencePlayer::attach(&mut src, cfg, FrameLibrary::new()).is_err());
}

#[test]
fn zero_size_resize_keeps_ticking() {
    let mut src = source();
    let mut player = SequencePlayer::attach(&mut src, config(), full_library()).unwrap();
    let t0 = Instant::now();
    player.tick(t0).unwrap().unwrap();

    src.on_resize(Viewport {
        width: 0,
        height: 0,
    });
    assert!(player.tick(t0 + Duration::from_secs(1)).unwrap().is_none());
    assert_eq!(player.surface().width(), 16);

    src.on_scroll(450.0);
    let stats = player.tick(t0 + Duration::from_secs(2)).unwrap().unwrap();
    assert_eq!(stats.drawn, 1);
}

//! Scroll-driven playback: snapshot intake, per-tick state and throttled redraw.
//!
//! [`SequencePlayer`] subscribes to a [`ScrollProgressSource`] and parks each published snapshot
//! in a single-slot mailbox. The host calls [`SequencePlayer::tick`] from its frame loop; a tick
//! recomputes section and caption state from the newest snapshot and repaints the surface when
//! the redraw cap allows and the visible layers actually changed.

use std::time::{Duration, Instant};

use smallvec::SmallVec;

use crate::{
    captions::{CaptionController, CaptionState},
    config::{ReelConfig, SectionId},
    foundation::core::{FrameNumber, Viewport},
    foundation::error::ReelResult,
    frames::{FrameCache, FrameLibrary},
    hud::{Hud, HudReadout},
    nav::{NavItem, Navigator},
    progress::{LatestSlot, ScrollProgressSource, ScrollSnapshot, SubscriptionId},
    render::{ComposeStats, Compositor, Surface},
    timeline::{MAX_SECTIONS, SectionStates, Timeline},
};

/// Caps redraws at a maximum rate.
#[derive(Clone, Copy, Debug)]
pub struct RedrawThrottle {
    min_interval: Option<Duration>,
    last: Option<Instant>,
}

impl RedrawThrottle {
    /// Throttle allowing at most `max_fps` redraws per second. `0` disables the cap.
    pub fn new(max_fps: u32) -> Self {
        let min_interval = (max_fps > 0).then(|| Duration::from_secs(1) / max_fps);
        Self {
            min_interval,
            last: None,
        }
    }

    /// Return `true` when a redraw at `now` respects the cap.
    pub fn is_open(&self, now: Instant) -> bool {
        match (self.min_interval, self.last) {
            (Some(min), Some(last)) => now.saturating_duration_since(last) >= min,
            _ => true,
        }
    }

    /// Record a redraw at `now`.
    pub fn mark(&mut self, now: Instant) {
        self.last = Some(now);
    }
}

/// Everything derived from one scroll snapshot.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameState {
    /// Snapshot the state was computed from.
    pub snapshot: ScrollSnapshot,
    /// Section layers in z-order.
    pub sections: SectionStates,
    /// Caption blocks in declaration order.
    pub captions: Vec<CaptionState>,
}

impl FrameState {
    /// Evaluate `timeline` and `captions` at `snapshot`.
    pub fn compute(
        snapshot: ScrollSnapshot,
        timeline: &Timeline,
        captions: &CaptionController,
    ) -> Self {
        Self {
            snapshot,
            sections: timeline.map(snapshot.ratio),
            captions: captions.states(snapshot.ratio),
        }
    }
}

/// Counters accumulated across [`SequencePlayer::tick`] calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PlayerStats {
    /// Ticks received.
    pub ticks: u64,
    /// Surface repaints.
    pub redraws: u64,
    /// Ticks with pending work deferred by the redraw cap.
    pub throttled: u64,
    /// Repaints skipped because the visible layers did not change.
    pub elided: u64,
}

/// Identity of what a repaint would put on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
struct DrawKey {
    viewport: Viewport,
    library_gen: u64,
    layers: SmallVec<[(SectionId, FrameNumber, u64); MAX_SECTIONS]>,
}

impl DrawKey {
    fn of(state: &FrameState, library_gen: u64) -> Self {
        Self {
            viewport: state.snapshot.viewport,
            library_gen,
            layers: state
                .sections
                .iter()
                .filter(|s| s.opacity > 0.0)
                .map(|s| (s.section, s.frame, s.opacity.to_bits()))
                .collect(),
        }
    }
}

/// Plays the configured sequences against a scroll source.
#[derive(Debug)]
pub struct SequencePlayer {
    config: ReelConfig,
    timeline: Timeline,
    captions: CaptionController,
    compositor: Compositor,
    library: FrameLibrary,
    library_gen: u64,
    hud: Hud,
    mailbox: LatestSlot<ScrollSnapshot>,
    subscription: SubscriptionId,
    throttle: RedrawThrottle,
    state: FrameState,
    surface: Surface,
    dirty: bool,
    last_key: Option<DrawKey>,
    last_tick: Option<Instant>,
    stats: PlayerStats,
}

impl SequencePlayer {
    /// Validate `config`, subscribe to `source` and compute the initial state.
    ///
    /// The first [`SequencePlayer::tick`] paints the source's current snapshot.
    pub fn attach(
        source: &mut ScrollProgressSource,
        config: ReelConfig,
        library: FrameLibrary,
    ) -> ReelResult<Self> {
        config.validate()?;
        let timeline = Timeline::from_config(&config)?;
        let captions = CaptionController::new(&config.captions)?;
        let compositor = Compositor::from_config(&config);

        let mailbox = LatestSlot::new();
        let subscription = source.subscribe(mailbox.listener())?;

        let snapshot = source.snapshot();
        let state = FrameState::compute(snapshot, &timeline, &captions);
        let mut hud = Hud::new(&config);
        hud.on_snapshot(&snapshot, &timeline);

        Ok(Self {
            throttle: RedrawThrottle::new(config.max_fps),
            surface: Surface::new(snapshot.viewport),
            config,
            timeline,
            captions,
            compositor,
            library,
            library_gen: 0,
            hud,
            mailbox,
            subscription,
            state,
            dirty: true,
            last_key: None,
            last_tick: None,
            stats: PlayerStats::default(),
        })
    }

    /// Unsubscribe from `source` and hand back the frame library.
    pub fn detach(self, source: &mut ScrollProgressSource) -> FrameLibrary {
        source.unsubscribe(self.subscription);
        self.library
    }

    /// Advance the player to `now`.
    ///
    /// Returns compositor counters when the surface was repainted.
    pub fn tick(&mut self, now: Instant) -> ReelResult<Option<ComposeStats>> {
        self.stats.ticks += 1;
        if let Some(prev) = self.last_tick {
            self.hud.advance(now.saturating_duration_since(prev));
        }
        self.last_tick = Some(now);

        if !self.dirty && !self.mailbox.is_pending() {
            return Ok(None);
        }
        if !self.throttle.is_open(now) {
            self.stats.throttled += 1;
            return Ok(None);
        }

        if let Some(snapshot) = self.mailbox.take() {
            self.state = FrameState::compute(snapshot, &self.timeline, &self.captions);
            self.hud.on_snapshot(&snapshot, &self.timeline);
        }
        self.dirty = false;

        let key = DrawKey::of(&self.state, self.library_gen);
        if self.last_key.as_ref() == Some(&key) {
            self.stats.elided += 1;
            return Ok(None);
        }

        self.surface.resize(self.state.snapshot.viewport);
        let stats = self.compositor.compose(
            &self.state.sections,
            &self.timeline,
            &self.library,
            &mut self.surface,
        )?;
        self.throttle.mark(now);
        self.last_key = Some(key);
        self.stats.redraws += 1;

        tracing::debug!(
            tick = self.state.snapshot.tick,
            ratio = self.state.snapshot.ratio.get(),
            drawn = stats.drawn,
            missing = stats.missing,
            "redraw"
        );
        Ok(Some(stats))
    }

    /// Add a section that finished loading; the next tick repaints.
    pub fn insert_section(&mut self, cache: FrameCache) {
        tracing::info!(section = %cache.section(), loaded = cache.loaded_count(), "section inserted");
        self.library.insert(cache);
        self.library_gen += 1;
        self.dirty = true;
    }

    /// Return `true` once every configured section is loaded.
    pub fn is_ready(&self) -> bool {
        self.library.is_complete(&self.timeline)
    }

    /// State from the most recent processed snapshot.
    pub fn state(&self) -> &FrameState {
        &self.state
    }

    /// Surface as of the last repaint.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Section timeline in use.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Configuration in use.
    pub fn config(&self) -> &ReelConfig {
        &self.config
    }

    /// Frames available to the compositor.
    pub fn library(&self) -> &FrameLibrary {
        &self.library
    }

    /// Accumulated tick counters.
    pub fn stats(&self) -> PlayerStats {
        self.stats
    }

    /// Forward a pointer move to the HUD.
    pub fn on_pointer(&mut self, x: f64, y: f64) {
        self.hud.on_pointer(x, y);
    }

    /// Current HUD readout.
    pub fn hud(&self) -> HudReadout {
        self.hud.readout()
    }

    /// Navigation entry for the processed snapshot.
    pub fn active_nav(&self) -> Option<&NavItem> {
        Navigator::new(&self.config.nav, &self.timeline).active(self.state.snapshot.ratio)
    }
}

#[cfg(test)]
#[path = "../tests/unit/player.rs"]
mod tests;

use crate::{
    config::TrackConfig,
    foundation::core::{ScrollRatio, Viewport},
    foundation::error::ReelResult,
    progress::subject::{Subject, SubscriptionId},
};

/// Default bound on snapshot listeners.
pub const DEFAULT_MAX_LISTENERS: usize = 16;

/// Immutable scroll state handed to consumers once per change.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ScrollSnapshot {
    /// Progress through the track.
    pub ratio: ScrollRatio,
    /// Viewport at the time of the change.
    pub viewport: Viewport,
    /// Document scroll offset in pixels.
    pub scroll_y: f64,
    /// Monotonic change counter.
    pub tick: u64,
}

/// Turns raw scroll offsets and viewport sizes into [`ScrollSnapshot`]s.
///
/// The track spans `[top, top + track_height - viewport_height]` in document scroll space:
/// ratio `0` when the track's top meets the viewport's top, `1` when the bottoms meet.
#[derive(Debug)]
pub struct ScrollProgressSource {
    track: TrackConfig,
    current: ScrollSnapshot,
    subject: Subject<ScrollSnapshot>,
}

impl ScrollProgressSource {
    /// Source positioned at the top of the document.
    pub fn new(track: TrackConfig, viewport: Viewport) -> Self {
        Self::with_max_listeners(track, viewport, DEFAULT_MAX_LISTENERS)
    }

    /// Source with an explicit listener bound.
    pub fn with_max_listeners(track: TrackConfig, viewport: Viewport, max: usize) -> Self {
        let current = ScrollSnapshot {
            ratio: ratio_for(&track, viewport, 0.0),
            viewport,
            scroll_y: 0.0,
            tick: 0,
        };
        Self {
            track,
            current,
            subject: Subject::new(max),
        }
    }

    /// Latest snapshot.
    pub fn snapshot(&self) -> ScrollSnapshot {
        self.current
    }

    /// Track height in pixels for the current viewport.
    pub fn track_height_px(&self) -> f64 {
        track_height_px(&self.track, self.current.viewport)
    }

    /// Scroll distance over which the ratio moves from `0` to `1`.
    pub fn scrollable_px(&self) -> f64 {
        (self.track_height_px() - f64::from(self.current.viewport.height)).max(0.0)
    }

    /// Register a snapshot listener.
    pub fn subscribe(
        &mut self,
        f: impl FnMut(&ScrollSnapshot) + 'static,
    ) -> ReelResult<SubscriptionId> {
        self.subject.subscribe(f)
    }

    /// Remove a snapshot listener.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subject.unsubscribe(id)
    }

    /// Feed a new document scroll offset.
    pub fn on_scroll(&mut self, scroll_y: f64) -> Option<ScrollSnapshot> {
        let scroll_y = if scroll_y.is_finite() { scroll_y } else { 0.0 };
        self.update(scroll_y, self.current.viewport)
    }

    /// Feed a new viewport size. The track height follows the viewport height.
    ///
    /// Zero-area viewports are ignored; the previous size stays current.
    pub fn on_resize(&mut self, viewport: Viewport) -> Option<ScrollSnapshot> {
        if viewport.width == 0 || viewport.height == 0 {
            tracing::debug!(
                width = viewport.width,
                height = viewport.height,
                "ignored empty viewport"
            );
            return None;
        }
        self.update(self.current.scroll_y, viewport)
    }

    /// Document scroll offset that yields `ratio` at the current viewport.
    pub fn scroll_y_for(&self, ratio: ScrollRatio) -> f64 {
        self.track.top_px + ratio.get() * self.scrollable_px()
    }

    fn update(&mut self, scroll_y: f64, viewport: Viewport) -> Option<ScrollSnapshot> {
        let ratio = ratio_for(&self.track, viewport, scroll_y);
        let changed = ratio != self.current.ratio || viewport != self.current.viewport;
        self.current.scroll_y = scroll_y;
        if !changed {
            return None;
        }

        self.current = ScrollSnapshot {
            ratio,
            viewport,
            scroll_y,
            tick: self.current.tick + 1,
        };
        let snap = self.current;
        self.subject.publish(&snap);
        Some(snap)
    }
}

fn track_height_px(track: &TrackConfig, viewport: Viewport) -> f64 {
    track.height_vh / 100.0 * f64::from(viewport.height)
}

fn ratio_for(track: &TrackConfig, viewport: Viewport, scroll_y: f64) -> ScrollRatio {
    let scrollable = track_height_px(track, viewport) - f64::from(viewport.height);
    if scrollable <= 0.0 {
        return ScrollRatio::START;
    }
    ScrollRatio::new((scroll_y - track.top_px) / scrollable)
}

#[cfg(test)]
#[path = "../../tests/unit/progress/source.rs"]
mod tests;

//! Scrollreel plays numbered image sequences in sync with a page's scroll position.
//!
//! A normalized scroll ratio drives a fixed set of sections, each a sequence of raster frames.
//! Adjacent sections cross-fade at their boundaries and are composited onto a premultiplied RGBA8
//! surface with cover scaling (rotated or smart-scaled on narrow viewports). Caption, navigation
//! and HUD state are derived from the same ratio.
//!
//! - Build a [`ReelConfig`] (or load one from JSON)
//! - Load frames into a [`FrameLibrary`] through a [`FrameSource`]
//! - Attach a [`SequencePlayer`] to a [`ScrollProgressSource`] and call
//!   [`SequencePlayer::tick`] from the host frame loop
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Caption blocks and their scroll-driven fades.
pub mod captions;
/// Player configuration and the default section layout.
pub mod config;
/// Frame sequences and caches.
pub mod frames;
/// Heads-up readout.
pub mod hud;
/// Navigation entries and active-item resolution.
pub mod nav;
/// Scroll-driven playback loop.
pub mod player;
/// Scroll ratio source and subscriptions.
pub mod progress;
/// CPU compositing.
pub mod render;
/// Segment mapping.
pub mod timeline;

pub use crate::foundation::core::{
    Affine, FrameNumber, Point, Rect, Rgba8Premul, ScrollRatio, Vec2, Viewport,
};
pub use crate::foundation::error::{ReelError, ReelResult};

pub use crate::captions::{Align, CaptionBlock, CaptionController, CaptionState};
pub use crate::config::{
    FrameNaming, Placement, ReelConfig, SectionConfig, SectionId, TrackConfig,
};
pub use crate::frames::{
    FrameCache, FrameImage, FrameLibrary, FrameSource, FsFrameSource, LoadOpts, LoadReport,
};
pub use crate::hud::{Hud, HudReadout, Spring};
pub use crate::nav::{NavItem, Navigator};
pub use crate::player::{FrameState, PlayerStats, RedrawThrottle, SequencePlayer};
pub use crate::progress::{ScrollProgressSource, ScrollSnapshot, SubscriptionId};
pub use crate::render::{ComposeStats, Compositor, FitStrategy, Surface};
pub use crate::timeline::{SectionState, Timeline};

//! Player configuration.
//!
//! [`ReelConfig::default`] reproduces the five-section product page layout: five 240-frame
//! sequences across equal fifths of the scroll track, 0.02-wide crossfades, a 1200vh track and a
//! 768px narrow-viewport breakpoint. Config files are JSON; omitted fields take the defaults.

use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    captions::{Align, CaptionBlock},
    foundation::core::FrameNumber,
    foundation::error::{ReelError, ReelResult},
    nav::NavItem,
    timeline::Timeline,
};

/// Frames per section sequence on the product page.
pub const DEFAULT_FRAME_COUNT: u32 = 240;
/// Width of each crossfade window, in scroll ratio.
pub const DEFAULT_FADE: f64 = 0.02;
/// Viewports narrower than this use the mobile placement strategies.
pub const DEFAULT_MOBILE_BREAKPOINT: u32 = 768;
/// Blend factor toward height-fit for [`Placement::SmartScale`].
pub const DEFAULT_SMART_SCALE_WEIGHT: f64 = 0.6;

/// Identity of one of the page sections, in z-order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    /// Opening product shot.
    Hero,
    /// Camera feature sequence.
    Camera,
    /// Performance feature sequence.
    Performance,
    /// Stylus feature sequence.
    Stylus,
    /// On-device AI feature sequence.
    Ai,
}

impl SectionId {
    /// All sections in page order.
    pub const ALL: [SectionId; 5] = [
        SectionId::Hero,
        SectionId::Camera,
        SectionId::Performance,
        SectionId::Stylus,
        SectionId::Ai,
    ];

    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Camera => "camera",
            Self::Performance => "performance",
            Self::Stylus => "stylus",
            Self::Ai => "ai",
        }
    }

    /// Module code shown by the HUD while this section is active.
    pub fn module_code(self) -> &'static str {
        match self {
            Self::Hero => "TITANIUM.CORE",
            Self::Camera => "OPTICS.200MP",
            Self::Performance => "SNAPDRAGON.G8",
            Self::Stylus => "SPEN.DIGITIZER",
            Self::Ai => "NEURAL.ENGINE",
        }
    }

    fn default_dir(self) -> &'static str {
        match self {
            Self::Hero => "sequence",
            Self::Camera => "camera-sequence",
            Self::Performance => "third-sequence",
            Self::Stylus => "spen-sequence",
            Self::Ai => "ai-sequence",
        }
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a section's frames are placed on narrow viewports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Rotate landscape frames 90 degrees to fill a portrait screen.
    #[default]
    Rotate,
    /// No rotation; scale between width-fit and height-fit.
    SmartScale,
    /// Plain cover scaling on every viewport.
    Cover,
}

/// Static description of one section's sequence and scroll range.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SectionConfig {
    /// Section identity.
    pub id: SectionId,
    /// Directory holding the section's frames, relative to the asset root.
    pub dir: String,
    /// Scroll ratio where the section's sequence starts.
    pub start: f64,
    /// Scroll ratio where the section's sequence ends.
    pub end: f64,
    /// Number of frames in the sequence.
    #[serde(default = "default_frame_count")]
    pub frame_count: u32,
    /// Narrow-viewport placement.
    #[serde(default)]
    pub placement: Placement,
}

fn default_frame_count() -> u32 {
    DEFAULT_FRAME_COUNT
}

/// File naming for numbered frames: `<prefix><zero-padded number>.<extension>`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FrameNaming {
    /// File name prefix.
    pub prefix: String,
    /// File extension without the dot.
    pub extension: String,
    /// Minimum digits of the frame number.
    pub digits: usize,
}

impl Default for FrameNaming {
    fn default() -> Self {
        Self {
            prefix: "frame-".to_string(),
            extension: "jpg".to_string(),
            digits: 3,
        }
    }
}

impl FrameNaming {
    /// File name for `frame`.
    pub fn file_name(&self, frame: FrameNumber) -> String {
        format!(
            "{}{:0width$}.{}",
            self.prefix,
            frame.0,
            self.extension,
            width = self.digits
        )
    }
}

/// Geometry of the tall scroll container that drives the sequence.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Document offset of the track's top edge, in pixels.
    pub top_px: f64,
    /// Track height as a percentage of viewport height (`1200` = 12 screens).
    pub height_vh: f64,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            top_px: 0.0,
            height_vh: 1200.0,
        }
    }
}

/// Complete player configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ReelConfig {
    /// Sections in z-order.
    pub sections: Vec<SectionConfig>,
    /// Crossfade window width in scroll ratio.
    pub fade: f64,
    /// Frame file naming.
    pub naming: FrameNaming,
    /// Width below which the narrow placement strategies apply.
    pub mobile_breakpoint: u32,
    /// Height-fit weight for [`Placement::SmartScale`].
    pub smart_scale_weight: f64,
    /// Scroll track geometry.
    pub track: TrackConfig,
    /// Caption blocks over the sequence.
    pub captions: Vec<CaptionBlock>,
    /// Navigation entries.
    pub nav: Vec<NavItem>,
    /// Redraw cap in frames per second. `0` disables the cap.
    pub max_fps: u32,
    /// Straight-alpha RGBA clear color.
    pub clear_rgba: [u8; 4],
    /// Darken surface edges with a radial vignette.
    pub vignette: bool,
}

impl Default for ReelConfig {
    fn default() -> Self {
        const BOUNDS: [f64; 6] = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0];

        let sections = SectionId::ALL
            .iter()
            .enumerate()
            .map(|(i, &id)| SectionConfig {
                id,
                dir: id.default_dir().to_string(),
                start: BOUNDS[i],
                end: BOUNDS[i + 1],
                frame_count: DEFAULT_FRAME_COUNT,
                placement: if id == SectionId::Ai {
                    Placement::SmartScale
                } else {
                    Placement::Rotate
                },
            })
            .collect();

        Self {
            sections,
            fade: DEFAULT_FADE,
            naming: FrameNaming::default(),
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT,
            smart_scale_weight: DEFAULT_SMART_SCALE_WEIGHT,
            track: TrackConfig::default(),
            captions: default_captions(),
            nav: crate::nav::default_items(),
            max_fps: 60,
            clear_rgba: [5, 5, 5, 255],
            vignette: true,
        }
    }
}

impl ReelConfig {
    /// Read and validate a JSON config file.
    pub fn from_json_file(path: &Path) -> ReelResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| ReelError::serde(format!("parse config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a JSON config string.
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| ReelError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate cross-field invariants.
    pub fn validate(&self) -> ReelResult<()> {
        Timeline::from_config(self)?;

        if self.naming.extension.is_empty() {
            return Err(ReelError::validation("frame extension must be non-empty"));
        }
        if !(0.0..=1.0).contains(&self.smart_scale_weight) {
            return Err(ReelError::validation(
                "smart_scale_weight must be inside [0, 1]",
            ));
        }
        if !self.track.height_vh.is_finite() || self.track.height_vh <= 0.0 {
            return Err(ReelError::validation("track height_vh must be finite and > 0"));
        }
        if !self.track.top_px.is_finite() {
            return Err(ReelError::validation("track top_px must be finite"));
        }
        for c in &self.captions {
            c.validate()?;
        }
        for n in &self.nav {
            n.validate()?;
        }
        Ok(())
    }

    /// Section config by id.
    pub fn section(&self, id: SectionId) -> Option<&SectionConfig> {
        self.sections.iter().find(|s| s.id == id)
    }
}

/// Caption blocks of the product page.
pub fn default_captions() -> Vec<CaptionBlock> {
    fn block(id: &str, start: f64, end: f64, align: Align, title: &str, body: &str) -> CaptionBlock {
        CaptionBlock {
            id: id.to_string(),
            start,
            end,
            align,
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    vec![
        block(
            "hero",
            0.0,
            0.12,
            Align::Center,
            "Galaxy S25 Ultra",
            "The new standard of power.",
        ),
        block(
            "engineering",
            0.14,
            0.18,
            Align::Left,
            "Precision Engineered",
            "Titanium shell. Armor Aluminum frame. Designed to endure the extreme.",
        ),
        block(
            "camera",
            0.25,
            0.35,
            Align::Right,
            "200MP Clarity",
            "Capture the unseen with our most advanced sensor technology yet.",
        ),
        block(
            "performance",
            0.45,
            0.55,
            Align::Center,
            "Snapdragon 8 Gen 5",
            "Ray tracing, 8K video, and real-time AI translation at the speed of thought.",
        ),
        block(
            "stylus",
            0.65,
            0.75,
            Align::Left,
            "Integrated S Pen",
            "Write, sketch, and control with precision. The S Pen is built-in and ready when you are.",
        ),
        block(
            "ai",
            0.85,
            0.92,
            Align::Right,
            "Galaxy AI",
            "The most advanced AI on a smartphone. Live Translate, Note Assist, and Circle to Search.",
        ),
        block("order", 0.95, 1.0, Align::Center, "Order Now", ""),
    ]
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;

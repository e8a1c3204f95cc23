use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Normalized progress through the scroll track, always inside `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct ScrollRatio(f64);

impl ScrollRatio {
    /// Ratio at the top of the track.
    pub const START: Self = Self(0.0);
    /// Ratio at the bottom of the track.
    pub const END: Self = Self(1.0);

    /// Clamp `v` into `[0, 1]`. NaN maps to `0`; infinities clamp.
    pub fn new(v: f64) -> Self {
        if v.is_nan() {
            return Self::START;
        }
        Self(v.clamp(0.0, 1.0))
    }

    /// Raw value.
    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<f64> for ScrollRatio {
    fn from(v: f64) -> Self {
        Self::new(v)
    }
}

impl From<ScrollRatio> for f64 {
    fn from(r: ScrollRatio) -> Self {
        r.0
    }
}

/// Logical viewport size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in logical pixels.
    pub width: u32,
    /// Height in logical pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a viewport; both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> ReelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ReelError::validation("viewport width and height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Return `true` when the viewport is narrower than `breakpoint`.
    pub fn is_narrow(self, breakpoint: u32) -> bool {
        self.width < breakpoint
    }
}

/// 1-based frame number inside a section's image sequence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameNumber(pub u32);

impl FrameNumber {
    /// First frame of every sequence.
    pub const FIRST: Self = Self(1);

    /// Zero-based slot for array lookup. `None` for frame `0`.
    pub fn slot(self) -> Option<usize> {
        self.0.checked_sub(1).map(|v| v as usize)
    }

    /// Clamp into `[1, count]`. A zero `count` clamps to [`FrameNumber::FIRST`].
    pub fn clamp_to(self, count: u32) -> Self {
        Self(self.0.clamp(1, count.max(1)))
    }
}

impl std::fmt::Display for FrameNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Channels as an array in `[r, g, b, a]` order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

//! Caption blocks that fade in, drift upward and fade out over a scroll window.

use crate::{
    foundation::core::ScrollRatio,
    foundation::error::{ReelError, ReelResult},
    timeline::Ramp,
};

/// Fade-in and fade-out width of every caption, in scroll ratio.
pub const CAPTION_FADE: f64 = 0.02;
/// Vertical drift at the start of a caption's window, in pixels (negative is up).
pub const CAPTION_DRIFT_PX: f64 = 50.0;

/// Horizontal alignment of a caption block on wide viewports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    /// Centered.
    #[default]
    Center,
    /// Left column.
    Left,
    /// Right column.
    Right,
}

/// A caption shown between `start` and `end` of the scroll track.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CaptionBlock {
    /// Stable identifier.
    pub id: String,
    /// Ratio where the caption's window opens.
    pub start: f64,
    /// Ratio where the caption's window closes.
    pub end: f64,
    /// Alignment hint for the host.
    #[serde(default)]
    pub align: Align,
    /// Headline.
    pub title: String,
    /// Supporting copy.
    #[serde(default)]
    pub body: String,
}

impl CaptionBlock {
    /// Check window bounds.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(ReelError::validation(format!(
                "caption '{}' bounds must be finite",
                self.id
            )));
        }
        if !(0.0..=1.0).contains(&self.start) || !(0.0..=1.0).contains(&self.end) {
            return Err(ReelError::validation(format!(
                "caption '{}' bounds must be inside [0, 1]",
                self.id
            )));
        }
        let min_span = if self.opens_at_top() {
            CAPTION_FADE
        } else {
            2.0 * CAPTION_FADE
        };
        if self.end - self.start + 1e-9 < min_span {
            return Err(ReelError::validation(format!(
                "caption '{}' window is shorter than its fades",
                self.id
            )));
        }
        Ok(())
    }

    /// Captions opening at the very top start fully visible.
    fn opens_at_top(&self) -> bool {
        self.start == 0.0
    }

    fn opacity_ramp(&self) -> ReelResult<Ramp> {
        if self.opens_at_top() {
            let fall = (self.end - CAPTION_FADE).max(0.0);
            Ramp::new(&[(0.0, 1.0), (fall, 1.0), (self.end, 0.0)])
        } else {
            // Rounding can push the plateau edges past each other on minimal windows.
            let rise = (self.start + CAPTION_FADE).min(self.end);
            let fall = (self.end - CAPTION_FADE).max(rise);
            Ramp::new(&[
                (self.start, 0.0),
                (rise, 1.0),
                (fall, 1.0),
                (self.end, 0.0),
            ])
        }
    }

    fn offset_ramp(&self) -> ReelResult<Ramp> {
        let from = if self.opens_at_top() {
            0.0
        } else {
            CAPTION_DRIFT_PX
        };
        Ramp::new(&[(self.start, from), (self.end, -CAPTION_DRIFT_PX)])
    }
}

/// Per-tick state of one caption block.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CaptionState {
    /// Caption identifier.
    pub id: String,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Vertical offset in pixels.
    pub offset_y: f64,
    /// Whether the block accepts pointer input.
    pub interactive: bool,
}

#[derive(Clone, Debug)]
struct CompiledCaption {
    block: CaptionBlock,
    opacity: Ramp,
    offset: Ramp,
}

/// Evaluates every caption block against a scroll ratio.
#[derive(Clone, Debug)]
pub struct CaptionController {
    captions: Vec<CompiledCaption>,
}

impl CaptionController {
    /// Validate `blocks` and precompute their ramps.
    pub fn new(blocks: &[CaptionBlock]) -> ReelResult<Self> {
        let captions = blocks
            .iter()
            .map(|b| {
                b.validate()?;
                Ok(CompiledCaption {
                    opacity: b.opacity_ramp()?,
                    offset: b.offset_ramp()?,
                    block: b.clone(),
                })
            })
            .collect::<ReelResult<Vec<_>>>()?;
        Ok(Self { captions })
    }

    /// Caption blocks in declaration order.
    pub fn blocks(&self) -> impl Iterator<Item = &CaptionBlock> {
        self.captions.iter().map(|c| &c.block)
    }

    /// Evaluate all captions at `r`.
    pub fn states(&self, r: ScrollRatio) -> Vec<CaptionState> {
        let v = r.get();
        self.captions
            .iter()
            .map(|c| CaptionState {
                id: c.block.id.clone(),
                opacity: c.opacity.sample(v).clamp(0.0, 1.0),
                offset_y: c.offset.sample(v),
                interactive: v >= c.block.start && v <= c.block.end,
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/unit/captions.rs"]
mod tests;

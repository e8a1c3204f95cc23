use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::{
    config::{Placement, ReelConfig, SectionConfig, SectionId},
    foundation::core::{FrameNumber, ScrollRatio},
    foundation::error::{ReelError, ReelResult},
    foundation::math::{lerp, progress_in},
    timeline::ramp::Ramp,
};

/// Upper bound on simultaneously configured sections.
pub const MAX_SECTIONS: usize = 5;
/// Upper bound on frames per section sequence. Every slot is allocated up front.
pub const MAX_FRAME_COUNT: u32 = 10_000;

const BOUNDARY_EPS: f64 = 1e-9;

/// Per-tick state of one section.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SectionState {
    /// Section identity.
    pub section: SectionId,
    /// Frame to show.
    pub frame: FrameNumber,
    /// Layer opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Section states in z-order.
pub type SectionStates = SmallVec<[SectionState; MAX_SECTIONS]>;

/// Immutable scroll range, frame count and crossfade ramp of one section.
#[derive(Clone, Debug)]
pub struct SectionTimeline {
    id: SectionId,
    start: f64,
    end: f64,
    frame_count: u32,
    placement: Placement,
    opacity: Ramp,
}

impl SectionTimeline {
    /// Section identity.
    pub fn id(&self) -> SectionId {
        self.id
    }

    /// Ratio where the sequence starts.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Ratio where the sequence ends.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Frames in the sequence.
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Narrow-viewport placement.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Crossfade ramp.
    pub fn opacity_ramp(&self) -> &Ramp {
        &self.opacity
    }

    /// Frame shown at `r`: `clamp(round(lerp(1, N, t)), 1, N)`.
    pub fn frame_at(&self, r: ScrollRatio) -> FrameNumber {
        let t = progress_in(r.get(), self.start, self.end);
        let n = f64::from(self.frame_count);
        let idx = lerp(1.0, n, t).round().clamp(1.0, n);
        FrameNumber(idx as u32)
    }

    /// Layer opacity at `r`.
    pub fn opacity_at(&self, r: ScrollRatio) -> f64 {
        self.opacity.sample(r.get()).clamp(0.0, 1.0)
    }

    /// Frame and opacity at `r`.
    pub fn state_at(&self, r: ScrollRatio) -> SectionState {
        SectionState {
            section: self.id,
            frame: self.frame_at(r),
            opacity: self.opacity_at(r),
        }
    }
}

/// Ordered, contiguous set of section timelines covering `[0, 1]`.
#[derive(Clone, Debug)]
pub struct Timeline {
    sections: SmallVec<[SectionTimeline; MAX_SECTIONS]>,
    fade: f64,
}

impl Timeline {
    /// Build the timeline described by `cfg`.
    pub fn from_config(cfg: &ReelConfig) -> ReelResult<Self> {
        Self::new(&cfg.sections, cfg.fade)
    }

    /// Validate `sections` and derive each section's crossfade ramp.
    pub fn new(sections: &[SectionConfig], fade: f64) -> ReelResult<Self> {
        if sections.is_empty() {
            return Err(ReelError::validation("timeline needs at least one section"));
        }
        if sections.len() > MAX_SECTIONS {
            return Err(ReelError::validation(format!(
                "timeline supports at most {MAX_SECTIONS} sections, got {}",
                sections.len()
            )));
        }
        if !fade.is_finite() || fade <= 0.0 {
            return Err(ReelError::validation("fade must be finite and > 0"));
        }

        for (i, s) in sections.iter().enumerate() {
            if sections[..i].iter().any(|p| p.id == s.id) {
                return Err(ReelError::validation(format!(
                    "section '{}' is listed twice",
                    s.id
                )));
            }
            if !s.start.is_finite() || !s.end.is_finite() || s.end <= s.start {
                return Err(ReelError::validation(format!(
                    "section '{}' must have finite start < end",
                    s.id
                )));
            }
            if s.frame_count == 0 || s.frame_count > MAX_FRAME_COUNT {
                return Err(ReelError::validation(format!(
                    "section '{}' must have between 1 and {MAX_FRAME_COUNT} frames, got {}",
                    s.id, s.frame_count
                )));
            }
            if fade > (s.end - s.start) / 2.0 + BOUNDARY_EPS {
                return Err(ReelError::validation(format!(
                    "fade {fade} is wider than half of section '{}'",
                    s.id
                )));
            }
        }

        let first = &sections[0];
        let last = &sections[sections.len() - 1];
        if first.start.abs() > BOUNDARY_EPS {
            return Err(ReelError::validation("first section must start at 0"));
        }
        if (last.end - 1.0).abs() > BOUNDARY_EPS {
            return Err(ReelError::validation("last section must end at 1"));
        }
        for w in sections.windows(2) {
            if (w[0].end - w[1].start).abs() > BOUNDARY_EPS {
                return Err(ReelError::validation(format!(
                    "sections '{}' and '{}' are not contiguous",
                    w[0].id, w[1].id
                )));
            }
        }

        let n = sections.len();
        let mut out = SmallVec::new();
        for (i, s) in sections.iter().enumerate() {
            let opacity = match (i == 0, i + 1 == n) {
                (true, true) => Ramp::constant(1.0),
                (true, false) => Ramp::new(&[(s.end - fade, 1.0), (s.end, 0.0)])?,
                (false, true) => Ramp::new(&[(s.start - fade, 0.0), (s.start, 1.0)])?,
                (false, false) => Ramp::new(&[
                    (s.start - fade, 0.0),
                    (s.start, 1.0),
                    ((s.end - fade).max(s.start), 1.0),
                    (s.end, 0.0),
                ])?,
            };
            out.push(SectionTimeline {
                id: s.id,
                start: s.start,
                end: s.end,
                frame_count: s.frame_count,
                placement: s.placement,
                opacity,
            });
        }

        Ok(Self {
            sections: out,
            fade,
        })
    }

    /// Crossfade width.
    pub fn fade(&self) -> f64 {
        self.fade
    }

    /// Sections in z-order.
    pub fn sections(&self) -> &[SectionTimeline] {
        &self.sections
    }

    /// Timeline of `id`, if configured.
    pub fn get(&self, id: SectionId) -> Option<&SectionTimeline> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Frame and opacity of every section at `r`, in z-order.
    pub fn map(&self, r: ScrollRatio) -> SectionStates {
        self.sections.iter().map(|s| s.state_at(r)).collect()
    }

    /// Frames with non-zero opacity at any of `ratios`, per section, ascending.
    pub fn visible_frames(
        &self,
        ratios: impl IntoIterator<Item = ScrollRatio>,
    ) -> BTreeMap<SectionId, Vec<FrameNumber>> {
        let mut out: BTreeMap<SectionId, Vec<FrameNumber>> = BTreeMap::new();
        for r in ratios {
            for s in self.map(r).iter().filter(|s| s.opacity > 0.0) {
                out.entry(s.section).or_default().push(s.frame);
            }
        }
        for frames in out.values_mut() {
            frames.sort_unstable();
            frames.dedup();
        }
        out
    }

    /// Section whose primary range contains `r`. Boundaries belong to the later section.
    pub fn section_at(&self, r: ScrollRatio) -> SectionId {
        self.sections
            .iter()
            .find(|s| r.get() < s.end)
            .unwrap_or(&self.sections[self.sections.len() - 1])
            .id
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/section.rs"]
mod tests;

//! Segment mapping from the global scroll ratio to per-section frame and opacity.

/// Piecewise-linear ratio ramps.
pub mod ramp;
/// Section timelines and the segment mapper.
pub mod section;

pub use ramp::{Ramp, Stop};
pub use section::{
    MAX_FRAME_COUNT, MAX_SECTIONS, SectionState, SectionStates, SectionTimeline, Timeline,
};

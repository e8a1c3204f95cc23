use smallvec::SmallVec;

use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::{lerp, progress_in};

/// One control point of a [`Ramp`]: `value` at scroll position `at`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stop {
    /// Scroll ratio of the stop.
    pub at: f64,
    /// Output value at `at`.
    pub value: f64,
}

/// Piecewise-linear mapping from scroll ratio to a scalar.
///
/// Inputs before the first stop hold the first value, inputs after the last stop hold the last
/// value.
#[derive(Clone, Debug, PartialEq)]
pub struct Ramp {
    stops: SmallVec<[Stop; 4]>,
}

impl Ramp {
    /// Build a ramp from `(at, value)` pairs. Positions must be finite and non-decreasing.
    pub fn new(points: &[(f64, f64)]) -> ReelResult<Self> {
        if points.is_empty() {
            return Err(ReelError::validation("ramp needs at least one stop"));
        }
        if points.iter().any(|(a, v)| !a.is_finite() || !v.is_finite()) {
            return Err(ReelError::validation("ramp stops must be finite"));
        }
        if !points.windows(2).all(|w| w[0].0 <= w[1].0) {
            return Err(ReelError::validation(
                "ramp stops must be sorted by position",
            ));
        }
        Ok(Self {
            stops: points
                .iter()
                .map(|&(at, value)| Stop { at, value })
                .collect(),
        })
    }

    /// A ramp that always yields `value`.
    pub fn constant(value: f64) -> Self {
        let mut stops = SmallVec::new();
        stops.push(Stop { at: 0.0, value });
        Self { stops }
    }

    /// Control points in order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Sample the ramp at `x`.
    pub fn sample(&self, x: f64) -> f64 {
        let idx = self.stops.partition_point(|s| s.at <= x);
        if idx == 0 {
            return self.stops[0].value;
        }
        if idx >= self.stops.len() {
            return self.stops[self.stops.len() - 1].value;
        }

        let a = self.stops[idx - 1];
        let b = self.stops[idx];
        lerp(a.value, b.value, progress_in(x, a.at, b.at))
    }

    /// Span `[first, last]` over which the ramp output changes.
    pub fn domain(&self) -> (f64, f64) {
        (self.stops[0].at, self.stops[self.stops.len() - 1].at)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/ramp.rs"]
mod tests;

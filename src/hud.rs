//! Heads-up readout: active module code, smoothed scroll percent and pointer position.

use std::time::Duration;

use crate::{
    config::{ReelConfig, SectionId},
    foundation::core::{Point, Viewport},
    progress::ScrollSnapshot,
    timeline::Timeline,
};

/// Module code shown before the first scroll snapshot arrives.
pub const BOOT_MODULE: &str = "SYSTEM.INIT";

const SPRING_SUBSTEP: f64 = 1.0 / 240.0;
const REST_DELTA: f64 = 1e-4;
const REST_SPEED: f64 = 1e-3;

/// Damped harmonic spring chasing a target value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    stiffness: f64,
    damping: f64,
    mass: f64,
    value: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    /// Spring at rest on `value`.
    pub fn new(stiffness: f64, damping: f64, mass: f64, value: f64) -> Self {
        Self {
            stiffness,
            damping,
            mass: mass.max(f64::EPSILON),
            value,
            velocity: 0.0,
            target: value,
        }
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Value being chased.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Change the target; the value follows on subsequent [`Spring::advance`] calls.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Return `true` when settled on the target.
    pub fn is_at_rest(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Integrate `dt` of motion in fixed sub-steps.
    pub fn advance(&mut self, dt: Duration) {
        let mut remaining = dt.as_secs_f64();
        while remaining > 0.0 && !self.is_at_rest() {
            let h = remaining.min(SPRING_SUBSTEP);
            let accel = (-self.stiffness * (self.value - self.target) - self.damping * self.velocity)
                / self.mass;
            self.velocity += accel * h;
            self.value += self.velocity * h;
            remaining -= h;

            if (self.value - self.target).abs() < REST_DELTA && self.velocity.abs() < REST_SPEED {
                self.value = self.target;
                self.velocity = 0.0;
            }
        }
    }
}

/// Snapshot of what the HUD displays.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct HudReadout {
    /// Module code for the active section.
    pub module: &'static str,
    /// Smoothed scroll progress, `0..=100`.
    pub scroll_percent: u32,
    /// Last pointer position, if any.
    pub pointer: Option<(i64, i64)>,
    /// The HUD is hidden on narrow viewports.
    pub visible: bool,
}

/// HUD state fed by scroll snapshots, pointer moves and elapsed time.
#[derive(Clone, Debug)]
pub struct Hud {
    spring: Spring,
    section: Option<SectionId>,
    pointer: Option<Point>,
    viewport: Option<Viewport>,
    breakpoint: u32,
}

impl Hud {
    /// HUD with the page's spring (stiffness 100, damping 30, mass 1).
    pub fn new(cfg: &ReelConfig) -> Self {
        Self {
            spring: Spring::new(100.0, 30.0, 1.0, 0.0),
            section: None,
            pointer: None,
            viewport: None,
            breakpoint: cfg.mobile_breakpoint,
        }
    }

    /// Apply a scroll snapshot.
    pub fn on_snapshot(&mut self, snap: &ScrollSnapshot, timeline: &Timeline) {
        self.section = Some(timeline.section_at(snap.ratio));
        self.viewport = Some(snap.viewport);
        self.spring.set_target(snap.ratio.get());
    }

    /// Record a pointer move in viewport coordinates.
    pub fn on_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Some(Point::new(x, y));
    }

    /// Advance the percent smoothing by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.spring.advance(dt);
    }

    /// Current readout.
    pub fn readout(&self) -> HudReadout {
        HudReadout {
            module: self.section.map_or(BOOT_MODULE, SectionId::module_code),
            scroll_percent: (self.spring.value().clamp(0.0, 1.0) * 100.0).round() as u32,
            pointer: self
                .pointer
                .map(|p| (p.x.round() as i64, p.y.round() as i64)),
            visible: self
                .viewport
                .is_none_or(|v| !v.is_narrow(self.breakpoint)),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/hud.rs"]
mod tests;

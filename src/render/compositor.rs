use crate::{
    config::ReelConfig,
    foundation::core::Rgba8Premul,
    foundation::error::ReelResult,
    frames::FrameLibrary,
    render::composite::{apply_vignette, draw_image},
    render::fit::{choose_strategy, fit_transform},
    render::surface::Surface,
    timeline::{SectionState, Timeline},
};

/// Inner radius of the edge vignette, as a fraction of the farthest-corner distance.
const VIGNETTE_INNER: f64 = 0.5;

/// Counters from one [`Compositor::compose`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ComposeStats {
    /// Layers painted.
    pub drawn: usize,
    /// Layers skipped at zero opacity.
    pub hidden: usize,
    /// Visible layers whose frame was not loaded.
    pub missing: usize,
}

/// Paints section frames onto a surface in z-order.
#[derive(Clone, Debug)]
pub struct Compositor {
    breakpoint: u32,
    smart_weight: f64,
    clear: Rgba8Premul,
    vignette: Option<Rgba8Premul>,
}

impl Compositor {
    /// Compositor using the placement, clear color and vignette settings of `cfg`.
    pub fn from_config(cfg: &ReelConfig) -> Self {
        let [r, g, b, a] = cfg.clear_rgba;
        let clear = Rgba8Premul::from_straight_rgba(r, g, b, a);
        Self {
            breakpoint: cfg.mobile_breakpoint,
            smart_weight: cfg.smart_scale_weight,
            clear,
            vignette: cfg
                .vignette
                .then(|| Rgba8Premul::from_straight_rgba(5, 5, 5, 255)),
        }
    }

    /// Clear `surface`, then paint every visible section at its opacity.
    ///
    /// Missing frames are skipped silently; the rest of the stack still renders. A zero-area
    /// surface draws nothing.
    pub fn compose(
        &self,
        states: &[SectionState],
        timeline: &Timeline,
        library: &FrameLibrary,
        surface: &mut Surface,
    ) -> ReelResult<ComposeStats> {
        let mut stats = ComposeStats::default();
        if surface.width() == 0 || surface.height() == 0 {
            return Ok(stats);
        }
        surface.clear(self.clear);
        let viewport = surface.viewport();

        for state in states {
            if state.opacity <= 0.0 {
                stats.hidden += 1;
                continue;
            }
            let Some(image) = library.get(state.section, state.frame) else {
                stats.missing += 1;
                continue;
            };
            let Some(section) = timeline.get(state.section) else {
                stats.missing += 1;
                continue;
            };

            let strategy = choose_strategy(
                section.placement(),
                viewport,
                self.breakpoint,
                self.smart_weight,
            );
            let transform = fit_transform(strategy, image.width, image.height, viewport);
            if draw_image(surface, image, transform, state.opacity)? {
                stats.drawn += 1;
            }
        }

        if let Some(color) = self.vignette {
            apply_vignette(surface, color, VIGNETTE_INNER);
        }
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;

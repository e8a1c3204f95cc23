use std::f64::consts::FRAC_PI_2;

use crate::{
    config::Placement,
    foundation::core::{Affine, Viewport},
};

/// Concrete placement used for one draw.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FitStrategy {
    /// Fill the surface preserving aspect ratio, cropping overflow.
    Cover,
    /// Rotate 90 degrees clockwise, then cover.
    RotatedCover,
    /// Scale `weight` of the way from width-fit to height-fit, centered.
    SmartScale {
        /// Blend factor toward height-fit.
        weight: f64,
    },
}

/// Pick the strategy for a section's `placement` on `viewport`.
///
/// Wide viewports always use [`FitStrategy::Cover`].
pub fn choose_strategy(
    placement: Placement,
    viewport: Viewport,
    breakpoint: u32,
    smart_weight: f64,
) -> FitStrategy {
    if !viewport.is_narrow(breakpoint) {
        return FitStrategy::Cover;
    }
    match placement {
        Placement::Rotate => FitStrategy::RotatedCover,
        Placement::SmartScale => FitStrategy::SmartScale {
            weight: smart_weight,
        },
        Placement::Cover => FitStrategy::Cover,
    }
}

/// Transform mapping image pixel space onto a surface of size `viewport`.
pub fn fit_transform(strategy: FitStrategy, img_w: u32, img_h: u32, viewport: Viewport) -> Affine {
    let (iw, ih) = (f64::from(img_w), f64::from(img_h));
    let (w, h) = (f64::from(viewport.width), f64::from(viewport.height));

    match strategy {
        FitStrategy::RotatedCover => {
            // After a quarter turn the image's height spans the surface width.
            let s = (w / ih).max(h / iw);
            Affine::translate((w / 2.0, h / 2.0))
                * Affine::rotate(FRAC_PI_2)
                * Affine::translate((-iw * s / 2.0, -ih * s / 2.0))
                * Affine::scale(s)
        }
        FitStrategy::Cover | FitStrategy::SmartScale { .. } => {
            let ws = w / iw;
            let hs = h / ih;
            let s = match strategy {
                FitStrategy::SmartScale { weight } => ws + (hs - ws) * weight,
                _ => ws.max(hs),
            };
            let x = w / 2.0 - iw / 2.0 * s;
            let y = h / 2.0 - ih / 2.0 * s;
            Affine::translate((x, y)) * Affine::scale(s)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/fit.rs"]
mod tests;

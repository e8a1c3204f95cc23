use crate::{
    foundation::core::{Affine, Point, Rgba8Premul},
    foundation::error::{ReelError, ReelResult},
    foundation::math::{mul_div255_u8, unit_to_u8},
    frames::FrameImage,
    render::surface::Surface,
};

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Source-over blend of `src` onto `dst` with an extra layer `opacity`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f64) -> PremulRgba8 {
    let op = unit_to_u8(opacity);
    if op == 0 || src[3] == 0 {
        return dst;
    }

    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Draw `image` onto `surface` through `transform` (image space to surface space).
///
/// Returns `false` when the transformed image misses the surface entirely.
pub fn draw_image(
    surface: &mut Surface,
    image: &FrameImage,
    transform: Affine,
    opacity: f64,
) -> ReelResult<bool> {
    let det = transform.determinant();
    if !det.is_finite() || det.abs() < 1e-12 {
        return Err(ReelError::render("image transform is not invertible"));
    }
    if opacity <= 0.0 {
        return Ok(false);
    }
    let inv = transform.inverse();

    let (iw, ih) = (f64::from(image.width), f64::from(image.height));
    let corners = [
        transform * Point::new(0.0, 0.0),
        transform * Point::new(iw, 0.0),
        transform * Point::new(0.0, ih),
        transform * Point::new(iw, ih),
    ];
    let (sw, sh) = (surface.width(), surface.height());
    let min_x = corners.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_x = corners.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let min_y = corners.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_y = corners.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

    let x0 = min_x.floor().max(0.0) as u32;
    let y0 = min_y.floor().max(0.0) as u32;
    let x1 = (max_x.ceil().min(f64::from(sw))).max(0.0) as u32;
    let y1 = (max_y.ceil().min(f64::from(sh))).max(0.0) as u32;
    if x0 >= x1 || y0 >= y1 {
        return Ok(false);
    }

    let stride = sw as usize * 4;
    let data = surface.data_mut();
    for y in y0..y1 {
        let row = y as usize * stride;
        for x in x0..x1 {
            let p = inv * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            if p.x < 0.0 || p.y < 0.0 || p.x >= iw || p.y >= ih {
                continue;
            }
            let src = sample_bilinear(image, p.x, p.y);
            let i = row + x as usize * 4;
            let dst = [data[i], data[i + 1], data[i + 2], data[i + 3]];
            data[i..i + 4].copy_from_slice(&over(dst, src, opacity));
        }
    }
    Ok(true)
}

/// Bilinear sample at continuous image coordinates (pixel centers at `n + 0.5`).
fn sample_bilinear(image: &FrameImage, u: f64, v: f64) -> PremulRgba8 {
    let max_x = image.width - 1;
    let max_y = image.height - 1;
    let sx = (u - 0.5).max(0.0);
    let sy = (v - 0.5).max(0.0);
    let x0 = (sx.floor() as u32).min(max_x);
    let y0 = (sy.floor() as u32).min(max_y);
    let x1 = (x0 + 1).min(max_x);
    let y1 = (y0 + 1).min(max_y);
    let fx = (sx - f64::from(x0)).clamp(0.0, 1.0);
    let fy = (sy - f64::from(y0)).clamp(0.0, 1.0);

    let p00 = image.pixel(x0, y0);
    let p10 = image.pixel(x1, y0);
    let p01 = image.pixel(x0, y1);
    let p11 = image.pixel(x1, y1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = f64::from(p00[c]) * (1.0 - fx) + f64::from(p10[c]) * fx;
        let bottom = f64::from(p01[c]) * (1.0 - fx) + f64::from(p11[c]) * fx;
        out[c] = (top * (1.0 - fy) + bottom * fy).round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Darken the surface toward `color` outside `inner` of the farthest-corner radius.
///
/// Alpha ramps linearly from `0` at `inner * R` to `1` at `R`, where `R` is the distance from the
/// center to a corner.
pub fn apply_vignette(surface: &mut Surface, color: Rgba8Premul, inner: f64) {
    let (w, h) = (surface.width(), surface.height());
    let cx = f64::from(w) / 2.0;
    let cy = f64::from(h) / 2.0;
    let radius = (cx * cx + cy * cy).sqrt();
    if radius <= 0.0 {
        return;
    }
    let inner = inner.clamp(0.0, 1.0);
    let band = (1.0 - inner).max(f64::EPSILON);
    let c = color.to_array();

    let stride = w as usize * 4;
    let data = surface.data_mut();
    for y in 0..h {
        let dy = f64::from(y) + 0.5 - cy;
        for x in 0..w {
            let dx = f64::from(x) + 0.5 - cx;
            let t = (((dx * dx + dy * dy).sqrt() / radius - inner) / band).clamp(0.0, 1.0);
            if t <= 0.0 {
                continue;
            }
            let i = y as usize * stride + x as usize * 4;
            let dst = [data[i], data[i + 1], data[i + 2], data[i + 3]];
            data[i..i + 4].copy_from_slice(&over(dst, c, t));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;

//! CPU compositing of section frames onto an RGBA surface.
//!
//! Frames are drawn back to front in section order. Each draw maps the frame through a placement
//! transform (cover, rotated cover or smart scale), samples it bilinearly and blends it `over`
//! the surface at the section's opacity.

/// Pixel-level blending and transformed image drawing.
pub mod composite;
/// Section compositor.
pub mod compositor;
/// Placement strategies and their transforms.
pub mod fit;
/// Premultiplied RGBA8 drawing surface.
pub mod surface;

pub use compositor::{ComposeStats, Compositor};
pub use fit::{FitStrategy, choose_strategy, fit_transform};
pub use surface::Surface;

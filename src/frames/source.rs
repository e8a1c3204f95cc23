use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    config::FrameNaming,
    foundation::core::FrameNumber,
    foundation::error::{ReelError, ReelResult},
};

#[derive(Clone, Debug)]
/// Decoded frame in premultiplied RGBA8 form.
pub struct FrameImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl FrameImage {
    /// Wrap an existing premultiplied buffer, checking its length.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> ReelResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| ReelError::asset("frame buffer size overflow"))?;
        if width == 0 || height == 0 || rgba8_premul.len() != expected {
            return Err(ReelError::asset(
                "frame buffer must be non-empty and match width*height*4",
            ));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Solid-color frame, mostly useful for tests and placeholders.
    pub fn solid(width: u32, height: u32, premul: [u8; 4]) -> ReelResult<Self> {
        let px = (width as usize).saturating_mul(height as usize);
        Self::from_premul(width, height, premul.repeat(px))
    }

    /// Premultiplied pixel at `(x, y)`; callers keep coordinates in bounds.
    pub(crate) fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let p = &self.rgba8_premul[i..i + 4];
        [p[0], p[1], p[2], p[3]]
    }
}

/// Loads individual frames of a section's sequence.
///
/// Implementations are shared across loader threads.
pub trait FrameSource: Send + Sync {
    /// Load frame `frame` of the sequence stored under `dir`.
    fn load(&self, dir: &str, frame: FrameNumber) -> ReelResult<FrameImage>;
}

/// Reads numbered frame files from a directory tree.
#[derive(Clone, Debug)]
pub struct FsFrameSource {
    root: PathBuf,
    naming: FrameNaming,
}

impl FsFrameSource {
    /// Source rooted at `root`, naming files with `naming`.
    pub fn new(root: impl Into<PathBuf>, naming: FrameNaming) -> Self {
        Self {
            root: root.into(),
            naming,
        }
    }

    /// Root directory used when resolving section directories.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `frame` inside `dir`.
    pub fn path_for(&self, dir: &str, frame: FrameNumber) -> ReelResult<PathBuf> {
        let dir = normalize_rel_path(dir)?;
        Ok(self
            .root
            .join(Path::new(&dir))
            .join(self.naming.file_name(frame)))
    }
}

impl FrameSource for FsFrameSource {
    fn load(&self, dir: &str, frame: FrameNumber) -> ReelResult<FrameImage> {
        let path = self.path_for(dir, frame)?;
        let bytes = std::fs::read(&path)
            .map_err(|e| ReelError::asset(format!("read '{}': {e}", path.display())))?;
        decode_frame(&bytes)
            .map_err(|e| ReelError::asset(format!("decode '{}': {e}", path.display())))
    }
}

/// Decode an encoded image (JPEG, PNG, ...) into a premultiplied frame.
pub fn decode_frame(bytes: &[u8]) -> ReelResult<FrameImage> {
    let dyn_img = image::load_from_memory(bytes).map_err(|e| ReelError::asset(e.to_string()))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    FrameImage::from_premul(width, height, rgba8_premul)
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 255 {
            continue;
        }
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

/// Normalize and validate asset-root-relative directory paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> ReelResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(ReelError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(ReelError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(ReelError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(ReelError::validation("asset path must name a directory"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/frames/source.rs"]
mod tests;

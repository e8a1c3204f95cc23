//! Frame sequences: decoding, per-section caches and the multi-section library.

/// Per-section frame slots and the section library.
pub mod cache;
/// Frame loading seam and the filesystem implementation.
pub mod source;

pub use cache::{FrameCache, FrameLibrary, LoadOpts, LoadReport};
pub use source::{FrameImage, FrameSource, FsFrameSource, decode_frame, normalize_rel_path};

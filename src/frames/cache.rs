use std::{collections::BTreeMap, sync::Arc};

use rayon::prelude::*;

use crate::{
    config::{ReelConfig, SectionConfig, SectionId},
    foundation::core::FrameNumber,
    foundation::error::{ReelError, ReelResult},
    frames::source::{FrameImage, FrameSource},
    timeline::Timeline,
};

/// Outcome of loading one section's sequence.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct LoadReport {
    /// Section that was loaded.
    pub section: SectionId,
    /// Frames that decoded successfully.
    pub loaded: usize,
    /// Frames whose load failed, in ascending order.
    pub failed: Vec<FrameNumber>,
}

/// Random-access frames of one section. Failed loads leave empty slots.
#[derive(Clone, Debug)]
pub struct FrameCache {
    section: SectionId,
    slots: Vec<Option<Arc<FrameImage>>>,
}

impl FrameCache {
    /// Cache with `frame_count` empty slots.
    pub fn empty(section: SectionId, frame_count: u32) -> Self {
        Self {
            section,
            slots: vec![None; frame_count as usize],
        }
    }

    /// Load every frame of `section` concurrently and wait for all attempts to finish.
    ///
    /// Individual failures are logged and leave their slot empty; they are not retried.
    pub fn load(source: &dyn FrameSource, section: &SectionConfig) -> (Self, LoadReport) {
        let all: Vec<FrameNumber> = (1..=section.frame_count).map(FrameNumber).collect();
        Self::load_frames(source, section, &all)
    }

    /// Load only `frames` of `section`, concurrently. Other slots stay empty.
    ///
    /// Frames outside `[1, frame_count]` and duplicates are ignored.
    #[tracing::instrument(skip(source, section, frames), fields(section = %section.id, frames = frames.len()))]
    pub fn load_frames(
        source: &dyn FrameSource,
        section: &SectionConfig,
        frames: &[FrameNumber],
    ) -> (Self, LoadReport) {
        let mut wanted: Vec<FrameNumber> = frames
            .iter()
            .copied()
            .filter(|f| f.0 >= 1 && f.0 <= section.frame_count)
            .collect();
        wanted.sort_unstable();
        wanted.dedup();

        let results: Vec<(FrameNumber, ReelResult<FrameImage>)> = wanted
            .into_par_iter()
            .map(|frame| (frame, source.load(&section.dir, frame)))
            .collect();

        let mut cache = Self::empty(section.id, section.frame_count);
        let mut failed = Vec::new();
        for (frame, res) in results {
            match res {
                Ok(img) => {
                    if let Some(slot) = frame.slot().and_then(|i| cache.slots.get_mut(i)) {
                        *slot = Some(Arc::new(img));
                    }
                }
                Err(e) => {
                    tracing::warn!(section = %section.id, frame = frame.0, error = %e, "frame failed to load");
                    failed.push(frame);
                }
            }
        }

        let report = LoadReport {
            section: section.id,
            loaded: cache.loaded_count(),
            failed,
        };
        tracing::info!(
            section = %section.id,
            loaded = report.loaded,
            failed = report.failed.len(),
            "section ready"
        );
        (cache, report)
    }

    /// Section this cache belongs to.
    pub fn section(&self) -> SectionId {
        self.section
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Return `true` when the cache has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of filled slots.
    pub fn loaded_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Frame `frame`, or `None` for an empty or out-of-range slot.
    pub fn get(&self, frame: FrameNumber) -> Option<&FrameImage> {
        frame
            .slot()
            .and_then(|i| self.slots.get(i))
            .and_then(|s| s.as_deref())
    }

    /// Fill slot `frame`.
    pub fn insert(&mut self, frame: FrameNumber, image: FrameImage) -> ReelResult<()> {
        let (section, len) = (self.section, self.slots.len());
        let slot = frame
            .slot()
            .and_then(|i| self.slots.get_mut(i))
            .ok_or_else(|| {
                ReelError::validation(format!(
                    "frame {} is outside section '{section}' ({len} frames)",
                    frame.0
                ))
            })?;
        *slot = Some(Arc::new(image));
        Ok(())
    }
}

/// Loader settings.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoadOpts {
    /// Worker threads for decoding. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

/// Frame caches of every section that has finished loading.
#[derive(Clone, Debug, Default)]
pub struct FrameLibrary {
    caches: BTreeMap<SectionId, FrameCache>,
}

impl FrameLibrary {
    /// Library with no sections loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load all sections in `cfg`. Sections load in parallel and independently of each other.
    #[tracing::instrument(skip(source, cfg), fields(sections = cfg.sections.len()))]
    pub fn load_all(
        source: &dyn FrameSource,
        cfg: &ReelConfig,
        opts: LoadOpts,
    ) -> ReelResult<(Self, Vec<LoadReport>)> {
        let pool = build_thread_pool(opts.threads)?;
        let loaded: Vec<(FrameCache, LoadReport)> = pool.install(|| {
            cfg.sections
                .par_iter()
                .map(|s| FrameCache::load(source, s))
                .collect()
        });

        Ok(Self::from_loaded(loaded))
    }

    /// Load only the listed frames of each section in `cfg`, sections in parallel.
    ///
    /// Every configured section gets a cache, empty when `wanted` lists nothing for it.
    #[tracing::instrument(skip(source, cfg, wanted), fields(sections = cfg.sections.len()))]
    pub fn load_selected(
        source: &dyn FrameSource,
        cfg: &ReelConfig,
        wanted: &BTreeMap<SectionId, Vec<FrameNumber>>,
        opts: LoadOpts,
    ) -> ReelResult<(Self, Vec<LoadReport>)> {
        let pool = build_thread_pool(opts.threads)?;
        let loaded: Vec<(FrameCache, LoadReport)> = pool.install(|| {
            cfg.sections
                .par_iter()
                .map(|s| {
                    let frames = wanted.get(&s.id).map_or(&[][..], Vec::as_slice);
                    FrameCache::load_frames(source, s, frames)
                })
                .collect()
        });

        Ok(Self::from_loaded(loaded))
    }

    fn from_loaded(loaded: Vec<(FrameCache, LoadReport)>) -> (Self, Vec<LoadReport>) {
        let mut lib = Self::new();
        let mut reports = Vec::with_capacity(loaded.len());
        for (cache, report) in loaded {
            lib.insert(cache);
            reports.push(report);
        }
        (lib, reports)
    }

    /// Add or replace a section's cache.
    pub fn insert(&mut self, cache: FrameCache) {
        self.caches.insert(cache.section(), cache);
    }

    /// Cache of `section`, if loaded.
    pub fn cache(&self, section: SectionId) -> Option<&FrameCache> {
        self.caches.get(&section)
    }

    /// Frame lookup across sections.
    pub fn get(&self, section: SectionId, frame: FrameNumber) -> Option<&FrameImage> {
        self.caches.get(&section).and_then(|c| c.get(frame))
    }

    /// Return `true` once `section` has been inserted.
    pub fn is_ready(&self, section: SectionId) -> bool {
        self.caches.contains_key(&section)
    }

    /// Return `true` when every section of `timeline` is loaded.
    pub fn is_complete(&self, timeline: &Timeline) -> bool {
        timeline.sections().iter().all(|s| self.is_ready(s.id()))
    }
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ReelError::validation(
            "frame loader 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::asset(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/frames/cache.rs"]
mod tests;

//! Navigation labels driven by the same ratio thresholds as the sequence.

use crate::{
    config::SectionId,
    foundation::core::ScrollRatio,
    foundation::error::{ReelError, ReelResult},
    timeline::Timeline,
};

/// One navigation entry.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NavItem {
    /// Label shown to the user.
    pub label: String,
    /// Section the entry highlights for.
    pub section: SectionId,
    /// Ratio to scroll to when the entry is selected.
    pub offset: f64,
}

impl NavItem {
    /// Check that the jump offset is a valid ratio.
    pub fn validate(&self) -> ReelResult<()> {
        if !(0.0..=1.0).contains(&self.offset) {
            return Err(ReelError::validation(format!(
                "nav item '{}' offset must be inside [0, 1]",
                self.label
            )));
        }
        Ok(())
    }

    /// Document scroll position for this entry, given the scrollable height in pixels.
    pub fn scroll_target(&self, scrollable_px: f64) -> f64 {
        self.offset * scrollable_px.max(0.0)
    }
}

/// Entries of the product page navigation.
pub fn default_items() -> Vec<NavItem> {
    [
        ("Overview", SectionId::Hero, 0.0),
        ("Camera", SectionId::Camera, 0.23),
        ("Performance", SectionId::Performance, 0.43),
        ("S Pen", SectionId::Stylus, 0.63),
        ("Galaxy AI", SectionId::Ai, 0.83),
    ]
    .into_iter()
    .map(|(label, section, offset)| NavItem {
        label: label.to_string(),
        section,
        offset,
    })
    .collect()
}

/// Resolves the highlighted navigation entry.
pub struct Navigator<'a> {
    items: &'a [NavItem],
    timeline: &'a Timeline,
}

impl<'a> Navigator<'a> {
    /// Navigator over `items`, using `timeline` section ranges as thresholds.
    pub fn new(items: &'a [NavItem], timeline: &'a Timeline) -> Self {
        Self { items, timeline }
    }

    /// Entry for the section whose primary range contains `r`.
    pub fn active(&self, r: ScrollRatio) -> Option<&'a NavItem> {
        let section = self.timeline.section_at(r);
        self.items.iter().find(|i| i.section == section)
    }
}

#[cfg(test)]
#[path = "../tests/unit/nav.rs"]
mod tests;

//! Document geometry of a laid-out page.

use serde::Serialize;

use super::section::SectionId;
use crate::reveal::ElementRect;

/// Geometry of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionLayout {
    /// Which section
    pub id: SectionId,
    /// First unit of the section
    pub top: u32,
    /// Total height including header and items
    pub height: u32,
    /// Section heading block
    pub header: ElementRect,
    /// Staggered items, indexed by ordinal
    pub items: Vec<ElementRect>,
}

impl SectionLayout {
    /// Creates an empty section starting at `top`.
    #[must_use]
    pub const fn new(id: SectionId, top: u32) -> Self {
        Self {
            id,
            top,
            height: 0,
            header: ElementRect::new(top, 0),
            items: Vec::new(),
        }
    }

    /// Unit just past the section.
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.top.saturating_add(self.height)
    }
}

/// Geometry of the whole page, sections in page order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PageLayout {
    /// Sections in page order
    pub sections: Vec<SectionLayout>,
    /// Height of the whole document
    pub total_height: u32,
}

impl PageLayout {
    /// Builds a layout, deriving the total height from the last section.
    #[must_use]
    pub fn new(sections: Vec<SectionLayout>) -> Self {
        let total_height = sections.iter().map(SectionLayout::bottom).max().unwrap_or(0);
        Self {
            sections,
            total_height,
        }
    }

    /// Geometry of `id`, if laid out.
    #[must_use]
    pub fn section(&self, id: SectionId) -> Option<&SectionLayout> {
        self.sections.iter().find(|section| section.id == id)
    }

    /// Top of `id` (0 if it is missing).
    #[must_use]
    pub fn top_of(&self, id: SectionId) -> u32 {
        self.section(id).map_or(0, |section| section.top)
    }

    /// Item rects of `id`.
    #[must_use]
    pub fn items(&self, id: SectionId) -> &[ElementRect] {
        match self.section(id) {
            Some(section) => &section.items,
            None => &[],
        }
    }

    /// Header rects in page order.
    #[must_use]
    pub fn headers(&self) -> Vec<ElementRect> {
        self.sections.iter().map(|section| section.header).collect()
    }

    /// Section containing document unit `offset` (last one if past the end).
    #[must_use]
    pub fn section_at(&self, offset: u32) -> Option<SectionId> {
        self.sections
            .iter()
            .rev()
            .find(|section| section.top <= offset)
            .map(|section| section.id)
    }
}

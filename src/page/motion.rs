//! Animation timing resolved from configuration.

use crate::config::MotionConfig;
use crate::reveal::{Millis, RevealSettings, RootMargin};

use super::section::SectionId;

/// Bottom margin applied to section headers, so a header only reveals once
/// it is clear of the bottom edge.
pub const HEADER_ROOT_MARGIN: RootMargin = RootMargin::new(0, -50);

/// Timing and threshold values used by a mounted page.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionSettings {
    /// Animations on; when off every item is shown at mount time
    pub enabled: bool,
    /// Stagger steps for skills, experience, projects, certifications, contact
    pub intervals: [Millis; 5],
    /// Visible fraction that reveals an item
    pub item_threshold: f32,
    /// Visible fraction that reveals a section header
    pub header_threshold: f32,
    /// Root margin used for section headers
    pub header_margin: RootMargin,
    /// Delay between typed hero characters
    pub typing_interval: Millis,
    /// Offset at which the back-to-top control appears
    pub scroll_top_threshold: u32,
    /// Length of the entering transition
    pub transition: Millis,
    /// Length of smooth scroll jumps
    pub scroll_duration: Millis,
}

impl MotionSettings {
    /// Stagger step for `section` (0 for the hero).
    #[must_use]
    pub fn interval(&self, section: SectionId) -> Millis {
        SectionId::STAGGERED
            .iter()
            .position(|id| *id == section)
            .map_or(0, |idx| self.intervals[idx])
    }

    /// Reveal settings for the items of `section`.
    #[must_use]
    pub fn item_settings(&self, section: SectionId) -> RevealSettings {
        RevealSettings::new(self.interval(section)).with_threshold(self.item_threshold)
    }

    /// Reveal settings for the page-level header controller.
    #[must_use]
    pub const fn header_settings(&self) -> RevealSettings {
        RevealSettings::new(0)
            .with_threshold(self.header_threshold)
            .with_root_margin(self.header_margin)
    }

    /// Same settings with animation turned off.
    #[must_use]
    pub fn without_animation(mut self) -> Self {
        self.enabled = false;
        self
    }
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self::from(&MotionConfig::default())
    }
}

impl From<&MotionConfig> for MotionSettings {
    fn from(config: &MotionConfig) -> Self {
        Self {
            enabled: config.enabled,
            intervals: [
                config.skills_interval_ms,
                config.experience_interval_ms,
                config.projects_interval_ms,
                config.certifications_interval_ms,
                config.contact_interval_ms,
            ],
            item_threshold: config.item_threshold,
            header_threshold: config.header_threshold,
            header_margin: HEADER_ROOT_MARGIN,
            typing_interval: config.typing_interval_ms,
            scroll_top_threshold: config.scroll_top_threshold,
            transition: config.transition_ms,
            scroll_duration: config.scroll_duration_ms,
        }
    }
}

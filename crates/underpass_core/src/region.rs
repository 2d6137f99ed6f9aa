//! # Region Classification
//!
//! Two region ids are repurposed; every other id keeps its host meaning.
//!
//! ```text
//! region id ──► == underpass? ──yes──► Underpass  (walkable, drawn in front)
//!                    │ no
//!                    ▼
//!               == blocked?   ──yes──► Blocked    (solid, drawn in front)
//!                    │ no
//!                    ▼
//!                 Normal                          (baseline rules)
//! ```
//!
//! Underpass is tested first. If both settings hold the same id, that id is an
//! underpass.

use std::sync::Arc;

use crate::config::RegionConfig;

/// A region tag as stored in the map's region layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct RegionId(pub i32);

impl RegionId {
    /// Cells without a region.
    pub const NONE: Self = Self(0);

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl From<u16> for RegionId {
    fn from(raw: u16) -> Self {
        Self(i32::from(raw))
    }
}

/// How a region id is treated by rendering and passability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegionClass {
    /// Baseline rules apply.
    Normal,
    /// Always walkable; the whole tile stack is drawn over characters.
    Underpass,
    /// Never walkable; the whole tile stack is drawn over characters.
    Blocked,
}

impl RegionClass {
    /// Returns true if the cell's tiles are routed to the front layer.
    #[inline]
    #[must_use]
    pub const fn is_front_routed(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

/// Classifies `region` against the configured ids.
#[inline]
#[must_use]
pub fn classify(region: RegionId, config: &RegionConfig) -> RegionClass {
    if region == config.underpass_region_id {
        RegionClass::Underpass
    } else if region == config.blocked_region_id {
        RegionClass::Blocked
    } else {
        RegionClass::Normal
    }
}

/// Classifier bound to one immutable configuration.
///
/// Cheap to clone; every clone shares the same `Arc<RegionConfig>`.
#[derive(Clone, Debug)]
pub struct RegionClassifier {
    config: Arc<RegionConfig>,
}

impl RegionClassifier {
    /// Creates a classifier over `config`.
    #[must_use]
    pub fn new(config: Arc<RegionConfig>) -> Self {
        Self { config }
    }

    /// Classifies `region`.
    #[inline]
    #[must_use]
    pub fn classify(&self, region: RegionId) -> RegionClass {
        classify(region, &self.config)
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &RegionConfig {
        &self.config
    }
}

impl Default for RegionClassifier {
    fn default() -> Self {
        Self::new(Arc::new(RegionConfig::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ids() {
        let classifier = RegionClassifier::default();
        assert_eq!(classifier.classify(RegionId(252)), RegionClass::Underpass);
        assert_eq!(classifier.classify(RegionId(253)), RegionClass::Blocked);
        assert_eq!(classifier.classify(RegionId(5)), RegionClass::Normal);
        assert_eq!(classifier.classify(RegionId::NONE), RegionClass::Normal);
    }

    #[test]
    fn test_classify_is_total() {
        let config = RegionConfig::default();
        for raw in [i32::MIN, -1, 0, 251, 254, 255, 65_535, i32::MAX] {
            assert_eq!(classify(RegionId(raw), &config), RegionClass::Normal);
        }
    }

    #[test]
    fn test_custom_ids() {
        let config = RegionConfig::new(RegionId(10), RegionId(11));
        assert_eq!(classify(RegionId(10), &config), RegionClass::Underpass);
        assert_eq!(classify(RegionId(11), &config), RegionClass::Blocked);
        assert_eq!(classify(RegionId(252), &config), RegionClass::Normal);
    }

    #[test]
    fn test_equal_ids_resolve_as_underpass() {
        let config = RegionConfig::new(RegionId(7), RegionId(7));
        assert_eq!(classify(RegionId(7), &config), RegionClass::Underpass);
    }

    #[test]
    fn test_front_routing() {
        assert!(!RegionClass::Normal.is_front_routed());
        assert!(RegionClass::Underpass.is_front_routed());
        assert!(RegionClass::Blocked.is_front_routed());
    }
}

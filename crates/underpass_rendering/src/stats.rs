//! Paint statistics.

/// Counters from one paint pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaintStats {
    /// Slots visited.
    pub slots: u32,
    /// Lower-layer slot repaints.
    pub lower_repaints: u32,
    /// Upper-layer slot repaints.
    pub upper_repaints: u32,
    /// Layer lists skipped because the cache matched.
    pub cache_hits: u32,
}

impl PaintStats {
    /// Total layer repaints.
    #[must_use]
    pub const fn repaints(&self) -> u32 {
        self.lower_repaints + self.upper_repaints
    }

    /// Share of layer lists served from the cache, in 0..=1.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f32 {
        let total = self.cache_hits + self.repaints();
        if total > 0 {
            self.cache_hits as f32 / total as f32
        } else {
            0.0
        }
    }
}

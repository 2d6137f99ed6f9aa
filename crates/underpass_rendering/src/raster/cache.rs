//! Per-slot memory of the last draw list written to each layer.

use crate::draw_list::DrawPrimitive;
use crate::sink::LayerKind;

use super::Slot;

/// Change-detection cache keyed by (layer, slot).
///
/// Slots index the ring-buffer layer bitmaps, not the map. A missing entry
/// reads as an empty list, matching a freshly cleared bitmap.
#[derive(Debug, Clone)]
pub struct ChangeCache {
    cols: usize,
    rows: usize,
    entries: Vec<Vec<DrawPrimitive>>,
}

impl ChangeCache {
    /// Creates an empty cache for a `cols` x `rows` slot grid.
    #[must_use]
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            entries: vec![Vec::new(); cols * rows * LayerKind::ALL.len()],
        }
    }

    fn index(&self, layer: LayerKind, slot: Slot) -> usize {
        debug_assert!(slot.x < self.cols && slot.y < self.rows);
        (layer.index() * self.rows + slot.y) * self.cols + slot.x
    }

    /// The last list written to `slot` on `layer`.
    #[must_use]
    pub fn get(&self, layer: LayerKind, slot: Slot) -> &[DrawPrimitive] {
        &self.entries[self.index(layer, slot)]
    }

    /// Mutable entry, for swapping a freshly drawn list in.
    pub fn entry_mut(&mut self, layer: LayerKind, slot: Slot) -> &mut Vec<DrawPrimitive> {
        let index = self.index(layer, slot);
        &mut self.entries[index]
    }

    /// Forgets every entry. Pair with clearing the layer bitmaps.
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.clear();
        }
    }
}

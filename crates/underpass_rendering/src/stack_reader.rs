//! Reads everything a compositor needs about one cell.

use underpass_core::{Cell, MapData, RegionId, TileId, TileStack};

/// One cell's tiles, the table candidate above it, and its region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSample {
    /// The map cell as painted (not wrapped).
    pub cell: Cell,
    /// Layers 0..3 and shadow bits.
    pub stack: TileStack,
    /// Layer 1 of the cell directly above; drives table-edge drawing.
    pub above_layer1: TileId,
    /// Region tag.
    pub region: RegionId,
}

impl CellSample {
    /// Layer 0, which decides animation and shadowing.
    #[inline]
    #[must_use]
    pub const fn base_tile(&self) -> TileId {
        self.stack.layers[0]
    }
}

/// Samples `cell` from `map`. Looping axes wrap; off-map reads are empty.
#[inline]
pub fn read_cell<M: MapData>(map: &M, cell: Cell) -> CellSample {
    CellSample {
        cell,
        stack: map.tile_stack(cell),
        above_layer1: map.tile_id(cell.above(), 1),
        region: map.region_id(cell),
    }
}

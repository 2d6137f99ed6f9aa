//! # Map Data Access
//!
//! The host owns map storage. [`MapData`] is the read-only surface this crate
//! needs from it; [`GameMap`] is a flat in-memory implementation.
//!
//! ## Layout
//!
//! Six layers of `width * height` values, stored layer-major:
//!
//! ```text
//! index = (layer * height + y) * width + x
//!
//! layer 0..3  tile ids (bottom to top)
//! layer 4     shadow bits
//! layer 5     region id
//! ```

use std::collections::HashSet;

use crate::constants::{MAP_LAYERS, REGION_LAYER, SHADOW_LAYER, TILE_LAYERS};
use crate::grid::{Cell, MapGeometry};
use crate::region::RegionId;
use crate::tile::{ShadowBits, TileId, TileStack, TilesetFlags};

/// Read access to the host's map data.
pub trait MapData {
    /// Dimensions and looping mode.
    fn geometry(&self) -> MapGeometry;

    /// Raw value of `layer` at an on-map cell.
    ///
    /// Callers only pass cells returned by [`MapGeometry::wrap`].
    fn raw(&self, cell: Cell, layer: usize) -> u16;

    /// Flags of the active tileset.
    fn tileset_flags(&self) -> &TilesetFlags;

    /// Calls `f` with the tile id of every tile-graphic event standing on `cell`.
    fn for_each_tile_event<F>(&self, cell: Cell, f: F)
    where
        F: FnMut(TileId);

    /// Cells whose upper layers always draw above characters.
    ///
    /// The host reports none by default.
    fn is_overpass_position(&self, _cell: Cell) -> bool {
        false
    }

    /// Reads `layer` at `cell`, wrapping looping axes. Off-map reads are 0.
    #[inline]
    fn read(&self, cell: Cell, layer: usize) -> u16 {
        self.geometry()
            .wrap(cell)
            .map_or(0, |cell| self.raw(cell, layer))
    }

    /// Tile id on layer 0..3.
    #[inline]
    fn tile_id(&self, cell: Cell, layer: usize) -> TileId {
        TileId(self.read(cell, layer))
    }

    /// Autotile shadow bits.
    #[inline]
    fn shadow_bits(&self, cell: Cell) -> ShadowBits {
        ShadowBits::from_raw(self.read(cell, SHADOW_LAYER))
    }

    /// Region id, or [`RegionId::NONE`] off the map.
    #[inline]
    fn region_id(&self, cell: Cell) -> RegionId {
        RegionId::from(self.read(cell, REGION_LAYER))
    }

    /// The four tile layers and the shadow bits.
    #[inline]
    fn tile_stack(&self, cell: Cell) -> TileStack {
        TileStack::new(
            [
                self.tile_id(cell, 0),
                self.tile_id(cell, 1),
                self.tile_id(cell, 2),
                self.tile_id(cell, 3),
            ],
            self.shadow_bits(cell),
        )
    }
}

/// An event drawn with a tile graphic; it takes part in passage checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileEvent {
    /// Where the event stands.
    pub cell: Cell,
    /// The tile graphic.
    pub tile: TileId,
}

/// Flat in-memory map.
#[derive(Clone, Debug)]
pub struct GameMap {
    geometry: MapGeometry,
    data: Vec<u16>,
    flags: TilesetFlags,
    events: Vec<TileEvent>,
    overpass: HashSet<Cell>,
}

impl GameMap {
    /// Creates an empty map with an all-passable tileset.
    #[must_use]
    pub fn new(geometry: MapGeometry) -> Self {
        Self {
            geometry,
            data: vec![0; geometry.area() * MAP_LAYERS],
            flags: TilesetFlags::new(),
            events: Vec::new(),
            overpass: HashSet::new(),
        }
    }

    /// Replaces the tileset flags.
    #[must_use]
    pub fn with_flags(mut self, flags: TilesetFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Mutable access to the tileset flags.
    pub fn flags_mut(&mut self) -> &mut TilesetFlags {
        &mut self.flags
    }

    fn slot(&self, cell: Cell, layer: usize) -> Option<usize> {
        debug_assert!(layer < MAP_LAYERS);
        self.geometry
            .index(cell)
            .map(|index| layer * self.geometry.area() + index)
    }

    fn write(&mut self, cell: Cell, layer: usize, value: u16) {
        if let Some(slot) = self.slot(cell, layer) {
            self.data[slot] = value;
        }
    }

    /// Sets the tile on layer 0..3. Off-map writes are ignored.
    pub fn set_tile(&mut self, cell: Cell, layer: usize, tile: TileId) {
        assert!(layer < TILE_LAYERS, "tile layer {layer} out of range");
        self.write(cell, layer, tile.raw());
    }

    /// Sets the whole tile stack of a cell.
    pub fn set_stack(&mut self, cell: Cell, stack: TileStack) {
        for (layer, tile) in stack.layers.iter().enumerate() {
            self.write(cell, layer, tile.raw());
        }
        self.set_shadow(cell, stack.shadow);
    }

    /// Sets the shadow bits.
    pub fn set_shadow(&mut self, cell: Cell, shadow: ShadowBits) {
        self.write(cell, SHADOW_LAYER, u16::from(shadow.bits()));
    }

    /// Sets the region id. Values outside the region layer's range are clamped.
    pub fn set_region(&mut self, cell: Cell, region: RegionId) {
        let raw = u16::try_from(region.raw().max(0)).unwrap_or(u16::MAX);
        self.write(cell, REGION_LAYER, raw);
    }

    /// Places a tile-graphic event.
    pub fn add_tile_event(&mut self, event: TileEvent) {
        self.events.push(event);
    }

    /// Removes every event standing on `cell`.
    pub fn clear_tile_events(&mut self, cell: Cell) {
        self.events.retain(|e| e.cell != cell);
    }

    /// Marks `cell` as an overpass position.
    pub fn mark_overpass(&mut self, cell: Cell) {
        self.overpass.insert(cell);
    }
}

impl MapData for GameMap {
    fn geometry(&self) -> MapGeometry {
        self.geometry
    }

    fn raw(&self, cell: Cell, layer: usize) -> u16 {
        self.slot(cell, layer).map_or(0, |slot| self.data[slot])
    }

    fn tileset_flags(&self) -> &TilesetFlags {
        &self.flags
    }

    fn for_each_tile_event<F>(&self, cell: Cell, mut f: F)
    where
        F: FnMut(TileId),
    {
        let Some(cell) = self.geometry.wrap(cell) else {
            return;
        };
        for event in self.events.iter().filter(|e| e.cell == cell) {
            f(event.tile);
        }
    }

    fn is_overpass_position(&self, cell: Cell) -> bool {
        self.geometry
            .wrap(cell)
            .is_some_and(|cell| self.overpass.contains(&cell))
    }
}

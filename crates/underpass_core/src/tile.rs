//! # Tile Encoding
//!
//! Tile ids are 13-bit values whose range selects the tileset sheet:
//!
//! ```text
//!   0 ..  256  B      768 .. 1536  E (unused tail)   2816 .. 4352  A2 (ground, tables)
//! 256 ..  512  C     1536 .. 2048  A5                4352 .. 5888  A3 (roofs)
//! 512 ..  768  D     2048 .. 2816  A1 (animated)     5888 .. 8192  A4 (walls)
//! ```
//!
//! Only the autotile sheets (A1-A4) change how a tile is routed or animated.

/// First id of the A1 sheet (animated autotiles).
pub const TILE_ID_A1: u16 = 2048;
/// First id of the A2 sheet (ground autotiles).
pub const TILE_ID_A2: u16 = 2816;
/// First id of the A3 sheet (building roofs).
pub const TILE_ID_A3: u16 = 4352;
/// First id of the A4 sheet (walls).
pub const TILE_ID_A4: u16 = 5888;
/// One past the last valid tile id.
pub const TILE_ID_MAX: u16 = 8192;

/// A tile image identifier as stored in map data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TileId(pub u16);

impl TileId {
    /// The empty tile.
    pub const EMPTY: Self = Self(0);

    /// Creates a tile id from its raw value.
    #[inline]
    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Returns true if the tile has an image to draw.
    #[inline]
    #[must_use]
    pub const fn is_visible(self) -> bool {
        self.0 > 0 && self.0 < TILE_ID_MAX
    }

    /// Animated water/lava autotiles. These repaint on every animation frame.
    #[inline]
    #[must_use]
    pub const fn is_a1(self) -> bool {
        self.0 >= TILE_ID_A1 && self.0 < TILE_ID_A2
    }

    /// Ground autotiles, the only sheet that can hold table tiles.
    #[inline]
    #[must_use]
    pub const fn is_a2(self) -> bool {
        self.0 >= TILE_ID_A2 && self.0 < TILE_ID_A3
    }

    /// Roof autotiles.
    #[inline]
    #[must_use]
    pub const fn is_a3(self) -> bool {
        self.0 >= TILE_ID_A3 && self.0 < TILE_ID_A4
    }

    /// Wall autotiles.
    #[inline]
    #[must_use]
    pub const fn is_a4(self) -> bool {
        self.0 >= TILE_ID_A4 && self.0 < TILE_ID_MAX
    }

    /// Roof and wall tiles cast their own shadow, so no table edge is drawn on them.
    #[inline]
    #[must_use]
    pub const fn is_shadowing(self) -> bool {
        self.is_a3() || self.is_a4()
    }
}

impl From<u16> for TileId {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

/// Autotile shadow corners, one bit each.
///
/// Layout:
/// - Bit 0: upper-left
/// - Bit 1: upper-right
/// - Bit 2: lower-left
/// - Bit 3: lower-right
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct ShadowBits(u8);

impl ShadowBits {
    /// No shadow.
    pub const NONE: Self = Self(0);

    /// Mask of the four corner bits.
    pub const MASK: u8 = 0x0f;

    /// Creates shadow bits, discarding anything above the corner bits.
    #[inline]
    #[must_use]
    pub const fn new(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    /// Creates shadow bits from a raw map-data value.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u16) -> Self {
        Self::new((raw & Self::MASK as u16) as u8)
    }

    /// Returns the corner bits.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if no corner is shadowed.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if corner `index` (0..4, row-major) is shadowed.
    #[inline]
    #[must_use]
    pub const fn has_corner(self, index: u8) -> bool {
        index < 4 && self.0 & (1 << index) != 0
    }
}

/// Tileset flags for a single tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct TileFlags(pub u16);

impl TileFlags {
    /// Impassable when leaving/entering downward.
    pub const BLOCK_DOWN: u16 = 0x01;
    /// Impassable to the left.
    pub const BLOCK_LEFT: u16 = 0x02;
    /// Impassable to the right.
    pub const BLOCK_RIGHT: u16 = 0x04;
    /// Impassable upward.
    pub const BLOCK_UP: u16 = 0x08;
    /// All four direction bits.
    pub const PASSAGE_MASK: u16 = 0x0f;
    /// Star tile: drawn above characters and ignored by passage checks.
    pub const HIGHER: u16 = 0x10;
    /// Counter: an A2 tile with this flag is a table.
    pub const COUNTER: u16 = 0x80;

    /// Returns the raw flags.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Returns true for star tiles.
    #[inline]
    #[must_use]
    pub const fn is_higher(self) -> bool {
        self.0 & Self::HIGHER != 0
    }

    /// Returns true for counter tiles.
    #[inline]
    #[must_use]
    pub const fn is_counter(self) -> bool {
        self.0 & Self::COUNTER != 0
    }
}

/// Flags for every tile id of the active tileset.
#[derive(Clone, Debug, Default)]
pub struct TilesetFlags {
    flags: Vec<u16>,
}

impl TilesetFlags {
    /// Creates a flag table with every tile fully passable.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flags: vec![0; TILE_ID_MAX as usize],
        }
    }

    /// Wraps an existing flag table indexed by tile id.
    #[must_use]
    pub fn from_vec(flags: Vec<u16>) -> Self {
        Self { flags }
    }

    /// Returns the flags of `tile`. Ids past the table read as 0.
    #[inline]
    #[must_use]
    pub fn get(&self, tile: TileId) -> TileFlags {
        TileFlags(self.flags.get(tile.0 as usize).copied().unwrap_or(0))
    }

    /// Overwrites the flags of `tile`, growing the table if needed.
    pub fn set(&mut self, tile: TileId, flags: u16) {
        let index = tile.0 as usize;
        if index >= self.flags.len() {
            self.flags.resize(index + 1, 0);
        }
        self.flags[index] = flags;
    }

    /// Returns true if `tile` is drawn above characters by the baseline.
    #[inline]
    #[must_use]
    pub fn is_higher_tile(&self, tile: TileId) -> bool {
        self.get(tile).is_higher()
    }

    /// Returns true if `tile` is a table (an A2 tile with the counter flag).
    #[inline]
    #[must_use]
    pub fn is_table_tile(&self, tile: TileId) -> bool {
        tile.is_a2() && self.get(tile).is_counter()
    }
}

/// The four stacked tiles and the shadow bits of one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TileStack {
    /// Layers 0 to 3, bottom first.
    pub layers: [TileId; 4],
    /// Autotile shadow corners.
    pub shadow: ShadowBits,
}

impl TileStack {
    /// Creates a tile stack.
    #[inline]
    #[must_use]
    pub const fn new(layers: [TileId; 4], shadow: ShadowBits) -> Self {
        Self { layers, shadow }
    }
}

//! # Draw Lists
//!
//! A [`CellPlan`] is what a compositor decides for one cell: an ordered list
//! of primitives for each layer. The raster backend caches these lists per
//! slot and compares them for equality, so order and values both matter.

use underpass_core::{ShadowBits, TileId};

use crate::sink::LayerKind;

/// Longest list either strategy produces (4 tiles + shadow + table edge).
pub const MAX_PRIMITIVES: usize = 6;

/// A single entry of a draw list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawPrimitive {
    /// A tile image.
    Tile(TileId),
    /// Autotile shadow corners.
    Shadow(ShadowBits),
    /// Edge of the table tile on the cell above.
    TableEdge(TileId),
}

/// The draw list of one layer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayerPlan {
    /// Primitives in draw order.
    pub primitives: Vec<DrawPrimitive>,
    /// Repaint on every new animation frame, even on a cache hit.
    pub animated: bool,
}

impl LayerPlan {
    /// Creates an empty plan with room for a full list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            primitives: Vec::with_capacity(MAX_PRIMITIVES),
            animated: false,
        }
    }

    /// Appends a primitive.
    #[inline]
    pub fn push(&mut self, primitive: DrawPrimitive) {
        self.primitives.push(primitive);
    }

    /// Appends a tile image.
    #[inline]
    pub fn push_tile(&mut self, tile: TileId) {
        self.push(DrawPrimitive::Tile(tile));
    }

    /// Empties the list, keeping its allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.primitives.clear();
        self.animated = false;
    }

    /// Returns true if nothing is drawn.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

/// Both draw lists of one cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellPlan {
    /// Under characters.
    pub lower: LayerPlan,
    /// Over characters.
    pub upper: LayerPlan,
}

impl CellPlan {
    /// Creates an empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lower: LayerPlan::new(),
            upper: LayerPlan::new(),
        }
    }

    /// Empties both lists.
    #[inline]
    pub fn clear(&mut self) {
        self.lower.clear();
        self.upper.clear();
    }

    /// Returns the plan for `layer`.
    #[inline]
    #[must_use]
    pub fn layer(&self, layer: LayerKind) -> &LayerPlan {
        match layer {
            LayerKind::Lower => &self.lower,
            LayerKind::Upper => &self.upper,
        }
    }

    /// Returns the plan for `layer` mutably.
    #[inline]
    pub fn layer_mut(&mut self, layer: LayerKind) -> &mut LayerPlan {
        match layer {
            LayerKind::Lower => &mut self.lower,
            LayerKind::Upper => &mut self.upper,
        }
    }

    /// Appends a tile to `layer`.
    #[inline]
    pub fn push_tile(&mut self, layer: LayerKind, tile: TileId) {
        self.layer_mut(layer).push_tile(tile);
    }

    /// Appends the shadow primitive to the lower layer.
    #[inline]
    pub fn push_shadow(&mut self, shadow: ShadowBits) {
        self.lower.push(DrawPrimitive::Shadow(shadow));
    }
}

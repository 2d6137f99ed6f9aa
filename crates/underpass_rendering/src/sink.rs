//! Drawing surface abstraction shared by both backends.

use underpass_core::{ShadowBits, TileId};

use crate::draw_list::DrawPrimitive;

/// One of the two tilemap passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Drawn under character sprites.
    Lower = 0,
    /// Drawn over character sprites.
    Upper = 1,
}

impl LayerKind {
    /// Both layers, lower first.
    pub const ALL: [Self; 2] = [Self::Lower, Self::Upper];

    /// Returns the layer index (0 or 1).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Receives tile drawing primitives at pixel offsets.
///
/// Implementations decide how invisible tiles and empty shadows are handled;
/// compositors pass every primitive of a draw list through unchanged.
pub trait TileSink {
    /// Draws the image of `tile` with its top-left corner at (`dx`, `dy`).
    fn draw_tile(&mut self, layer: LayerKind, tile: TileId, dx: i32, dy: i32);

    /// Draws the autotile shadow corners.
    fn draw_shadow(&mut self, layer: LayerKind, shadow: ShadowBits, dx: i32, dy: i32);

    /// Draws the lower edge of the table `tile` onto the cell below it.
    fn draw_table_edge(&mut self, layer: LayerKind, tile: TileId, dx: i32, dy: i32);

    /// Clears a rectangle.
    fn clear_rect(&mut self, layer: LayerKind, dx: i32, dy: i32, width: u32, height: u32);

    /// Dispatches one draw-list entry.
    #[inline]
    fn draw(&mut self, layer: LayerKind, primitive: DrawPrimitive, dx: i32, dy: i32) {
        match primitive {
            DrawPrimitive::Tile(tile) => self.draw_tile(layer, tile, dx, dy),
            DrawPrimitive::Shadow(shadow) => self.draw_shadow(layer, shadow, dx, dy),
            DrawPrimitive::TableEdge(tile) => self.draw_table_edge(layer, tile, dx, dy),
        }
    }
}

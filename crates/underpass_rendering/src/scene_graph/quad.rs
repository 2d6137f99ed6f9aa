//! Retained tile quads for the scene graph backend.

use bytemuck::{Pod, Zeroable};
use underpass_core::{ShadowBits, TileId};

use crate::sink::{LayerKind, TileSink};

/// One textured quad, laid out for direct upload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct TileQuad {
    /// One of the `KIND_*` constants.
    pub kind: u32,
    /// Tile id for images and table edges; corner index for shadows.
    pub tile_id: u32,
    /// Left edge in pixels.
    pub x: i32,
    /// Top edge in pixels.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl TileQuad {
    /// Size in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();
    /// A tile image.
    pub const KIND_TILE: u32 = 0;
    /// A shadow corner.
    pub const KIND_SHADOW: u32 = 1;
    /// Half of a table edge.
    pub const KIND_TABLE_EDGE: u32 = 2;

    /// Returns true if the quad's origin lies inside the rectangle.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn starts_in(&self, dx: i32, dy: i32, width: u32, height: u32) -> bool {
        self.x >= dx
            && self.y >= dy
            && self.x < dx + width as i32
            && self.y < dy + height as i32
    }
}

/// Lower and upper quad groups.
///
/// Invisible tiles are dropped, shadows expand to one half-size quad per set
/// corner and table edges are kept only for A2 tiles.
#[derive(Debug, Clone)]
pub struct TileGroups {
    tile_width: u32,
    tile_height: u32,
    lower: Vec<TileQuad>,
    upper: Vec<TileQuad>,
}

impl TileGroups {
    /// Creates empty groups for the given tile size.
    #[must_use]
    pub fn new(tile_width: u32, tile_height: u32) -> Self {
        Self {
            tile_width,
            tile_height,
            lower: Vec::new(),
            upper: Vec::new(),
        }
    }

    /// Quads of `layer` in draw order.
    #[must_use]
    pub fn quads(&self, layer: LayerKind) -> &[TileQuad] {
        match layer {
            LayerKind::Lower => &self.lower,
            LayerKind::Upper => &self.upper,
        }
    }

    /// Quads of `layer` as raw bytes.
    #[must_use]
    pub fn as_bytes(&self, layer: LayerKind) -> &[u8] {
        bytemuck::cast_slice(self.quads(layer))
    }

    /// Total quads in both groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lower.len() + self.upper.len()
    }

    /// Returns true if both groups are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lower.is_empty() && self.upper.is_empty()
    }

    /// Empties both groups.
    pub fn clear(&mut self) {
        self.lower.clear();
        self.upper.clear();
    }

    fn group_mut(&mut self, layer: LayerKind) -> &mut Vec<TileQuad> {
        match layer {
            LayerKind::Lower => &mut self.lower,
            LayerKind::Upper => &mut self.upper,
        }
    }
}

impl TileSink for TileGroups {
    fn draw_tile(&mut self, layer: LayerKind, tile: TileId, dx: i32, dy: i32) {
        if !tile.is_visible() {
            return;
        }
        let (width, height) = (self.tile_width, self.tile_height);
        self.group_mut(layer).push(TileQuad {
            kind: TileQuad::KIND_TILE,
            tile_id: u32::from(tile.raw()),
            x: dx,
            y: dy,
            width,
            height,
        });
    }

    #[allow(clippy::cast_possible_wrap)]
    fn draw_shadow(&mut self, layer: LayerKind, shadow: ShadowBits, dx: i32, dy: i32) {
        let (w, h) = (self.tile_width / 2, self.tile_height / 2);
        let group = self.group_mut(layer);
        for corner in 0..4u8 {
            if !shadow.has_corner(corner) {
                continue;
            }
            let column = u32::from(corner % 2);
            let row = u32::from(corner / 2);
            group.push(TileQuad {
                kind: TileQuad::KIND_SHADOW,
                tile_id: u32::from(corner),
                x: dx + (column * w) as i32,
                y: dy + (row * h) as i32,
                width: w,
                height: h,
            });
        }
    }

    #[allow(clippy::cast_possible_wrap)]
    fn draw_table_edge(&mut self, layer: LayerKind, tile: TileId, dx: i32, dy: i32) {
        if !tile.is_a2() {
            return;
        }
        let (w, h) = (self.tile_width / 2, self.tile_height / 2);
        let group = self.group_mut(layer);
        for half in 0..2u32 {
            group.push(TileQuad {
                kind: TileQuad::KIND_TABLE_EDGE,
                tile_id: u32::from(tile.raw()),
                x: dx + (half * w) as i32,
                y: dy,
                width: w,
                height: h / 2,
            });
        }
    }

    fn clear_rect(&mut self, layer: LayerKind, dx: i32, dy: i32, width: u32, height: u32) {
        self.group_mut(layer)
            .retain(|quad| !quad.starts_in(dx, dy, width, height));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_is_tightly_packed() {
        assert_eq!(TileQuad::SIZE, 24);
    }

    #[test]
    fn test_invisible_tiles_are_dropped() {
        let mut groups = TileGroups::new(48, 48);
        groups.draw_tile(LayerKind::Lower, TileId::EMPTY, 0, 0);
        groups.draw_tile(LayerKind::Lower, TileId(9000), 0, 0);
        assert!(groups.is_empty());
        groups.draw_tile(LayerKind::Upper, TileId(5), 48, 0);
        assert_eq!(groups.quads(LayerKind::Upper)[0].x, 48);
    }

    #[test]
    fn test_shadow_corners() {
        let mut groups = TileGroups::new(48, 48);
        groups.draw_shadow(LayerKind::Lower, ShadowBits::new(0b1001), 96, 48);
        let quads = groups.quads(LayerKind::Lower);
        assert_eq!(quads.len(), 2);
        assert_eq!((quads[0].x, quads[0].y), (96, 48));
        assert_eq!((quads[1].x, quads[1].y), (120, 72));
        assert_eq!(quads[1].width, 24);
    }

    #[test]
    fn test_table_edge_needs_a2() {
        let mut groups = TileGroups::new(48, 48);
        groups.draw_table_edge(LayerKind::Lower, TileId(4352), 0, 0);
        assert!(groups.is_empty());
        groups.draw_table_edge(LayerKind::Lower, TileId(2816 + 48), 0, 0);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.quads(LayerKind::Lower)[1].height, 12);
    }

    #[test]
    fn test_clear_rect_removes_only_that_cell() {
        let mut groups = TileGroups::new(48, 48);
        groups.draw_tile(LayerKind::Lower, TileId(1), 0, 0);
        groups.draw_shadow(LayerKind::Lower, ShadowBits::new(0b1111), 0, 0);
        groups.draw_tile(LayerKind::Lower, TileId(2), 48, 0);
        groups.clear_rect(LayerKind::Lower, 0, 0, 48, 48);
        assert_eq!(groups.quads(LayerKind::Lower).len(), 1);
        assert_eq!(groups.quads(LayerKind::Lower)[0].tile_id, 2);
    }

    #[test]
    fn test_bytes_view() {
        let mut groups = TileGroups::new(48, 48);
        groups.draw_tile(LayerKind::Upper, TileId(1), 0, 0);
        assert_eq!(groups.as_bytes(LayerKind::Upper).len(), TileQuad::SIZE);
        assert!(groups.as_bytes(LayerKind::Lower).is_empty());
    }
}

//! # Scene Graph Backend
//!
//! Rebuilds two retained quad groups from scratch on every repaint. There is
//! no change cache: each pass clears both groups and appends every visible
//! cell's lists at its screen-relative offset.
//!
//! ```text
//! paint_all(pass)
//!   ├─ groups.clear()
//!   └─ for (x, y) in pass: plan(cell) ─► lower / upper at (x * tw, y * th)
//! ```

mod quad;

pub use quad::{TileGroups, TileQuad};

use underpass_core::{Cell, MapData};

use crate::compositor::TileCompositor;
use crate::draw_list::CellPlan;
use crate::sink::{LayerKind, TileSink};
use crate::stack_reader::read_cell;
use crate::stats::PaintStats;
use crate::tilemap::{FramePass, Viewport};

/// Uncached compositor that paints into retained quad groups.
#[derive(Debug, Clone)]
pub struct SceneGraphCompositor<C> {
    compositor: C,
    scratch: CellPlan,
    groups: TileGroups,
    tile_width: u32,
    tile_height: u32,
    start: (i32, i32),
    stats: PaintStats,
}

impl<C: TileCompositor> SceneGraphCompositor<C> {
    /// Creates a compositor with empty groups.
    #[must_use]
    pub fn new(compositor: C, viewport: &Viewport) -> Self {
        Self {
            compositor,
            scratch: CellPlan::new(),
            groups: TileGroups::new(viewport.tile_width, viewport.tile_height),
            tile_width: viewport.tile_width,
            tile_height: viewport.tile_height,
            start: (0, 0),
            stats: PaintStats::default(),
        }
    }

    /// The compositing strategy.
    #[must_use]
    pub const fn compositor(&self) -> &C {
        &self.compositor
    }

    /// The retained quad groups.
    #[must_use]
    pub const fn groups(&self) -> &TileGroups {
        &self.groups
    }

    /// Counters from the last `paint_all`.
    #[must_use]
    pub const fn stats(&self) -> PaintStats {
        self.stats
    }

    /// Appends one cell's lists at pixel offset (`dx`, `dy`).
    pub fn paint<M: MapData>(&mut self, map: &M, cell: Cell, dx: i32, dy: i32) {
        let sample = read_cell(map, cell);
        self.scratch.clear();
        self.compositor.plan(map, &sample, &mut self.scratch);

        for layer in LayerKind::ALL {
            let plan = self.scratch.layer(layer);
            for &primitive in &plan.primitives {
                self.groups.draw(layer, primitive, dx, dy);
            }
        }
        self.stats.slots += 1;
        self.stats.lower_repaints += 1;
        self.stats.upper_repaints += 1;
    }

    /// Clears the groups and paints every cell of `pass`.
    #[allow(clippy::cast_possible_wrap)]
    pub fn paint_all<M: MapData>(&mut self, map: &M, pass: &FramePass) -> PaintStats {
        self.groups.clear();
        self.stats = PaintStats::default();
        self.start = (pass.start_x, pass.start_y);

        let (tw, th) = (self.tile_width as i32, self.tile_height as i32);
        for (x, y) in pass.cells() {
            let dx = (x - pass.start_x) * tw;
            let dy = (y - pass.start_y) * th;
            self.paint(map, Cell::new(x, y), dx, dy);
        }

        tracing::debug!(
            start_x = pass.start_x,
            start_y = pass.start_y,
            quads = self.groups.len(),
            "scene graph rebuilt"
        );
        self.stats
    }

    /// Screen position of both groups for scroll origin (`origin_x`, `origin_y`).
    ///
    /// Relative to the start cell of the last full repaint; scrolling within
    /// a tile only moves the groups.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn group_offset(&self, origin_x: i32, origin_y: i32) -> (i32, i32) {
        (
            self.start.0 * self.tile_width as i32 - origin_x,
            self.start.1 * self.tile_height as i32 - origin_y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::{BaselineCompositor, RegionOverrideCompositor};
    use underpass_core::{GameMap, MapGeometry, RegionClassifier, RegionId, TileId};

    const GRASS: TileId = TileId(2816);
    const ROOF: TileId = TileId(4352);

    fn map() -> GameMap {
        let mut map = GameMap::new(MapGeometry::new(4, 4));
        for y in 0..4 {
            for x in 0..4 {
                map.set_tile(Cell::new(x, y), 0, GRASS);
            }
        }
        map.set_tile(Cell::new(1, 1), 0, ROOF);
        map.set_region(Cell::new(1, 1), RegionId(252));
        map
    }

    fn pass() -> FramePass {
        FramePass { start_x: 0, start_y: 0, cols: 4, rows: 4, frame_updated: false }
    }

    #[test]
    fn test_repaint_replaces_previous_contents() {
        let map = map();
        let mut scene = SceneGraphCompositor::new(BaselineCompositor, &Viewport::default());
        scene.paint_all(&map, &pass());
        let first = scene.groups().len();
        scene.paint_all(&map, &pass());
        assert_eq!(scene.groups().len(), first);
        assert_eq!(first, 16);
    }

    #[test]
    fn test_front_routed_cell_lands_in_upper_group() {
        let map = map();
        let compositor = RegionOverrideCompositor::new(RegionClassifier::default());
        let mut scene = SceneGraphCompositor::new(compositor, &Viewport::default());
        scene.paint_all(&map, &pass());

        let upper = scene.groups().quads(LayerKind::Upper);
        assert_eq!(upper.len(), 1);
        assert_eq!(upper[0].tile_id, u32::from(ROOF.raw()));
        assert_eq!((upper[0].x, upper[0].y), (48, 48));
        assert_eq!(scene.groups().quads(LayerKind::Lower).len(), 15);
    }

    #[test]
    fn test_offsets_are_relative_to_start() {
        let map = map();
        let mut scene = SceneGraphCompositor::new(BaselineCompositor, &Viewport::default());
        let pass = FramePass { start_x: 1, start_y: 1, cols: 1, rows: 1, frame_updated: false };
        scene.paint_all(&map, &pass);
        let lower = scene.groups().quads(LayerKind::Lower);
        assert_eq!((lower[0].x, lower[0].y), (0, 0));
        assert_eq!(scene.group_offset(60, 40), (-12, 8));
    }
}

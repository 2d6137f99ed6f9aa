//! # Raster Backend
//!
//! Paints into two ring-buffer layer bitmaps, one slot per visible cell.
//! Each slot remembers the draw list it last received on each layer; a slot
//! is repainted only when its new list differs, or when the list animates and
//! the animation frame just changed.
//!
//! ```text
//! cell (x, y) ──► slot (x mod cols, y mod rows)
//!                   │
//!   new list == cached list && !(animated && frame_updated) ──► skip
//!                   │
//!                   └─► clear_rect, draw primitives, cache the list
//! ```

mod cache;

pub use cache::ChangeCache;

use underpass_core::{Cell, MapData};

use crate::compositor::TileCompositor;
use crate::draw_list::CellPlan;
use crate::sink::{LayerKind, TileSink};
use crate::stack_reader::read_cell;
use crate::stats::PaintStats;
use crate::tilemap::{FramePass, Viewport};

/// Position of a cell in the layer bitmap, in tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
}

/// Which layers a single `paint` call touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaintOutcome {
    /// The lower slot was cleared and redrawn.
    pub lower_repainted: bool,
    /// The upper slot was cleared and redrawn.
    pub upper_repainted: bool,
}

impl PaintOutcome {
    /// Returns true if neither layer was touched.
    #[must_use]
    pub const fn is_skip(&self) -> bool {
        !self.lower_repainted && !self.upper_repainted
    }
}

/// Cached ring-buffer compositor.
#[derive(Debug, Clone)]
pub struct RasterCompositor<C> {
    compositor: C,
    cache: ChangeCache,
    scratch: CellPlan,
    tile_width: u32,
    tile_height: u32,
    layer_width: i32,
    layer_height: i32,
    frame_updated: bool,
    stats: PaintStats,
}

impl<C: TileCompositor> RasterCompositor<C> {
    /// Creates a compositor sized for `viewport`, with an empty cache.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn new(compositor: C, viewport: &Viewport) -> Self {
        Self {
            compositor,
            cache: ChangeCache::new(viewport.cols() as usize, viewport.rows() as usize),
            scratch: CellPlan::new(),
            tile_width: viewport.tile_width,
            tile_height: viewport.tile_height,
            layer_width: viewport.layer_width() as i32,
            layer_height: viewport.layer_height() as i32,
            frame_updated: false,
            stats: PaintStats::default(),
        }
    }

    /// The compositing strategy.
    #[must_use]
    pub const fn compositor(&self) -> &C {
        &self.compositor
    }

    /// The change cache.
    #[must_use]
    pub const fn cache(&self) -> &ChangeCache {
        &self.cache
    }

    /// Counters since the last `paint_all` began.
    #[must_use]
    pub const fn stats(&self) -> PaintStats {
        self.stats
    }

    /// Marks whether the animation frame changed for upcoming paints.
    pub fn set_frame_updated(&mut self, frame_updated: bool) {
        self.frame_updated = frame_updated;
    }

    /// Pixel offset and slot of `cell` in the layer bitmaps.
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn slot_of(&self, cell: Cell) -> (i32, i32, Slot) {
        let dx = (cell.x * self.tile_width as i32).rem_euclid(self.layer_width);
        let dy = (cell.y * self.tile_height as i32).rem_euclid(self.layer_height);
        let slot = Slot {
            x: (dx / self.tile_width as i32) as usize,
            y: (dy / self.tile_height as i32) as usize,
        };
        (dx, dy, slot)
    }

    /// Paints one cell, repainting only the layers whose list changed.
    pub fn paint<M, S>(&mut self, map: &M, sink: &mut S, cell: Cell) -> PaintOutcome
    where
        M: MapData,
        S: TileSink,
    {
        let (dx, dy, slot) = self.slot_of(cell);
        let sample = read_cell(map, cell);

        let Self {
            compositor,
            cache,
            scratch,
            tile_width,
            tile_height,
            frame_updated,
            stats,
            ..
        } = self;

        scratch.clear();
        compositor.plan(map, &sample, scratch);

        let mut outcome = PaintOutcome::default();
        for layer in LayerKind::ALL {
            let plan = scratch.layer_mut(layer);
            let cached = cache.entry_mut(layer, slot);
            let forced = plan.animated && *frame_updated;
            if !forced && *cached == plan.primitives {
                stats.cache_hits += 1;
                continue;
            }

            sink.clear_rect(layer, dx, dy, *tile_width, *tile_height);
            for &primitive in &plan.primitives {
                sink.draw(layer, primitive, dx, dy);
            }
            std::mem::swap(cached, &mut plan.primitives);

            tracing::trace!(x = cell.x, y = cell.y, ?layer, forced, "slot repainted");
            match layer {
                LayerKind::Lower => {
                    outcome.lower_repainted = true;
                    stats.lower_repaints += 1;
                }
                LayerKind::Upper => {
                    outcome.upper_repainted = true;
                    stats.upper_repaints += 1;
                }
            }
        }
        stats.slots += 1;
        outcome
    }

    /// Paints every cell of `pass` and returns the pass counters.
    pub fn paint_all<M, S>(&mut self, map: &M, sink: &mut S, pass: &FramePass) -> PaintStats
    where
        M: MapData,
        S: TileSink,
    {
        self.frame_updated = pass.frame_updated;
        self.stats = PaintStats::default();
        for (x, y) in pass.cells() {
            self.paint(map, sink, Cell::new(x, y));
        }

        tracing::debug!(
            start_x = pass.start_x,
            start_y = pass.start_y,
            frame_updated = pass.frame_updated,
            repaints = self.stats.repaints(),
            cache_hits = self.stats.cache_hits,
            hit_rate = f64::from(self.stats.hit_rate()),
            "raster pass painted"
        );
        self.stats
    }

    /// Clears both layer bitmaps and forgets every cached list.
    ///
    /// Needed after map data changes under slots that will not be revisited
    /// with a different list, such as a map transfer.
    #[allow(clippy::cast_sign_loss)]
    pub fn invalidate<S: TileSink>(&mut self, sink: &mut S) {
        for layer in LayerKind::ALL {
            sink.clear_rect(
                layer,
                0,
                0,
                self.layer_width as u32,
                self.layer_height as u32,
            );
        }
        self.cache.reset();
    }
}

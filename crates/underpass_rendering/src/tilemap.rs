//! # Tilemap View
//!
//! Scroll and animation bookkeeping that decides when a full repaint is due.
//!
//! ```text
//!  screen + 2 * margin          layer bitmap (cols x rows slots)
//! ┌──────────────────────┐     ┌────────┬─────────────┐
//! │                      │     │ q3     │ q2          │
//! │    visible area      │ ◄── ├────────┼─────────────┤  four blits unwrap
//! │                      │     │ q1     │ q0          │  the ring buffer
//! └──────────────────────┘     └────────┴─────────────┘
//! ```
//!
//! A repaint is due when the scroll start cell moves, the animation frame
//! advances, or someone asked for a refresh.

/// Ticks per animation frame.
pub const ANIMATION_PERIOD: u32 = 30;

/// Screen and tile geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Screen width in pixels.
    pub screen_width: u32,
    /// Screen height in pixels.
    pub screen_height: u32,
    /// Tile width in pixels.
    pub tile_width: u32,
    /// Tile height in pixels.
    pub tile_height: u32,
    /// Extra pixels painted around the screen on every side.
    pub margin: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            screen_width: 816,
            screen_height: 624,
            tile_width: 48,
            tile_height: 48,
            margin: 20,
        }
    }
}

impl Viewport {
    /// Painted width in pixels, margins included.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.screen_width + 2 * self.margin
    }

    /// Painted height in pixels, margins included.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.screen_height + 2 * self.margin
    }

    /// Slot columns of a layer bitmap.
    #[inline]
    #[must_use]
    pub const fn cols(&self) -> u32 {
        self.width().div_ceil(self.tile_width) + 1
    }

    /// Slot rows of a layer bitmap.
    #[inline]
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.height().div_ceil(self.tile_height) + 1
    }

    /// Layer bitmap width in pixels.
    #[inline]
    #[must_use]
    pub const fn layer_width(&self) -> u32 {
        self.cols() * self.tile_width
    }

    /// Layer bitmap height in pixels.
    #[inline]
    #[must_use]
    pub const fn layer_height(&self) -> u32 {
        self.rows() * self.tile_height
    }

    /// First painted cell for a scroll origin in pixels.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn start_cell(&self, origin_x: i32, origin_y: i32) -> (i32, i32) {
        (
            (origin_x - self.margin as i32).div_euclid(self.tile_width as i32),
            (origin_y - self.margin as i32).div_euclid(self.tile_height as i32),
        )
    }

    /// The four blits that present the ring-buffer layer bitmap on screen.
    ///
    /// Blits with zero width or height draw nothing.
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn ring_blits(&self, origin_x: i32, origin_y: i32) -> [RingBlit; 4] {
        let margin = self.margin as i32;
        let x2 = (origin_x - margin).rem_euclid(self.layer_width() as i32) as u32;
        let y2 = (origin_y - margin).rem_euclid(self.layer_height() as i32) as u32;
        let w1 = (self.layer_width() - x2).min(self.width());
        let h1 = (self.layer_height() - y2).min(self.height());
        let w2 = self.width().saturating_sub(w1);
        let h2 = self.height().saturating_sub(h1);

        [
            RingBlit::new((0, 0), (x2, y2), w1, h1),
            RingBlit::new((w1, 0), (0, y2), w2, h1),
            RingBlit::new((0, h1), (x2, 0), w1, h2),
            RingBlit::new((w1, h1), (0, 0), w2, h2),
        ]
    }
}

/// One copy from a layer bitmap to the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingBlit {
    /// Destination x, relative to the painted area.
    pub dest_x: u32,
    /// Destination y, relative to the painted area.
    pub dest_y: u32,
    /// Source x in the layer bitmap.
    pub src_x: u32,
    /// Source y in the layer bitmap.
    pub src_y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl RingBlit {
    const fn new(dest: (u32, u32), src: (u32, u32), width: u32, height: u32) -> Self {
        Self {
            dest_x: dest.0,
            dest_y: dest.1,
            src_x: src.0,
            src_y: src.1,
            width,
            height,
        }
    }

    /// Returns true if the blit copies nothing.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A full repaint request: every visible cell from the start cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePass {
    /// First painted column.
    pub start_x: i32,
    /// First painted row.
    pub start_y: i32,
    /// Columns to paint.
    pub cols: i32,
    /// Rows to paint.
    pub rows: i32,
    /// True when the animation frame changed since the last pass.
    pub frame_updated: bool,
}

impl FramePass {
    /// Cells of the pass in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.rows).flat_map(move |y| {
            (0..self.cols).map(move |x| (self.start_x + x, self.start_y + y))
        })
    }

    /// Number of cells in the pass.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn len(&self) -> usize {
        (self.cols.max(0) * self.rows.max(0)) as usize
    }

    /// Returns true if the pass paints nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Scroll origin, animation clock and repaint triggers.
#[derive(Debug, Clone)]
pub struct TilemapView {
    viewport: Viewport,
    origin: (i32, i32),
    animation_count: u32,
    last_animation_frame: Option<u32>,
    last_start: Option<(i32, i32)>,
    needs_repaint: bool,
}

impl TilemapView {
    /// Creates a view at origin (0, 0). The first `prepare` always repaints.
    #[must_use]
    pub const fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            origin: (0, 0),
            animation_count: 0,
            last_animation_frame: None,
            last_start: None,
            needs_repaint: true,
        }
    }

    /// The geometry this view paints.
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Scroll origin in pixels.
    #[must_use]
    pub const fn origin(&self) -> (i32, i32) {
        self.origin
    }

    /// Moves the scroll origin.
    pub fn set_origin(&mut self, x: i32, y: i32) {
        self.origin = (x, y);
    }

    /// Advances the animation clock by one tick.
    pub fn update(&mut self) {
        self.animation_count = self.animation_count.wrapping_add(1);
    }

    /// Current animation frame.
    #[must_use]
    pub const fn animation_frame(&self) -> u32 {
        self.animation_count / ANIMATION_PERIOD
    }

    /// Requests a full repaint on the next `prepare`.
    ///
    /// The caller must also invalidate the backend, since map data may have
    /// changed under cached slots.
    pub fn refresh(&mut self) {
        self.needs_repaint = true;
    }

    /// Returns the pass to paint this frame, if any.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn prepare(&mut self) -> Option<FramePass> {
        let start = self.viewport.start_cell(self.origin.0, self.origin.1);
        let frame = self.animation_frame();
        let frame_updated = self.last_animation_frame != Some(frame);

        if !self.needs_repaint && !frame_updated && self.last_start == Some(start) {
            return None;
        }

        self.needs_repaint = false;
        self.last_animation_frame = Some(frame);
        self.last_start = Some(start);

        Some(FramePass {
            start_x: start.0,
            start_y: start.1,
            cols: self.viewport.cols() as i32,
            rows: self.viewport.rows() as i32,
            frame_updated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry() {
        let viewport = Viewport::default();
        // (816 + 40) / 48 = 17.83 -> 18, plus one spare column
        assert_eq!(viewport.cols(), 19);
        // (624 + 40) / 48 = 13.83 -> 14, plus one spare row
        assert_eq!(viewport.rows(), 15);
        assert_eq!(viewport.layer_width(), 19 * 48);
    }

    #[test]
    fn test_start_cell_accounts_for_margin() {
        let viewport = Viewport::default();
        assert_eq!(viewport.start_cell(0, 0), (-1, -1));
        assert_eq!(viewport.start_cell(20, 20), (0, 0));
        assert_eq!(viewport.start_cell(68, 67), (1, 0));
    }

    #[test]
    fn test_first_prepare_repaints_with_new_frame() {
        let mut view = TilemapView::new(Viewport::default());
        let pass = view.prepare().unwrap();
        assert!(pass.frame_updated);
        assert_eq!(pass.len(), 19 * 15);
        assert!(view.prepare().is_none());
    }

    #[test]
    fn test_scroll_within_cell_does_not_repaint() {
        let mut view = TilemapView::new(Viewport::default());
        view.set_origin(20, 20);
        let _ = view.prepare();
        view.set_origin(30, 20);
        assert!(view.prepare().is_none());
        view.set_origin(68, 20);
        let pass = view.prepare().unwrap();
        assert_eq!(pass.start_x, 1);
        assert!(!pass.frame_updated);
    }

    #[test]
    fn test_animation_frame_triggers_repaint() {
        let mut view = TilemapView::new(Viewport::default());
        let _ = view.prepare();
        for _ in 0..ANIMATION_PERIOD - 1 {
            view.update();
            assert!(view.prepare().is_none());
        }
        view.update();
        assert!(view.prepare().unwrap().frame_updated);
    }

    #[test]
    fn test_refresh_repaints_without_frame_change() {
        let mut view = TilemapView::new(Viewport::default());
        let _ = view.prepare();
        view.refresh();
        let pass = view.prepare().unwrap();
        assert!(!pass.frame_updated);
    }

    #[test]
    fn test_ring_blits_cover_painted_area() {
        let viewport = Viewport::default();
        for origin in [(0, 0), (20, 20), (500, 131), (-77, 9000)] {
            let blits = viewport.ring_blits(origin.0, origin.1);
            let area: u32 = blits.iter().map(|b| b.width * b.height).sum();
            assert_eq!(area, viewport.width() * viewport.height());
        }
    }

    #[test]
    fn test_aligned_origin_is_one_blit() {
        let viewport = Viewport::default();
        let blits = viewport.ring_blits(20, 20);
        assert_eq!(blits[0].src_x, 0);
        assert_eq!(blits[0].width, viewport.width());
        assert!(blits[1].is_empty());
        assert!(blits[2].is_empty());
        assert!(blits[3].is_empty());
    }
}

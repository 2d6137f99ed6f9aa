//! A sink that records every call, for tests and diagnostics.

use underpass_core::{ShadowBits, TileId};

use crate::sink::{LayerKind, TileSink};

/// One recorded sink call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkCall {
    /// `draw_tile`.
    Tile {
        /// Target layer.
        layer: LayerKind,
        /// Tile drawn.
        tile: TileId,
        /// Pixel x.
        dx: i32,
        /// Pixel y.
        dy: i32,
    },
    /// `draw_shadow`.
    Shadow {
        /// Target layer.
        layer: LayerKind,
        /// Corner bits.
        shadow: ShadowBits,
        /// Pixel x.
        dx: i32,
        /// Pixel y.
        dy: i32,
    },
    /// `draw_table_edge`.
    TableEdge {
        /// Target layer.
        layer: LayerKind,
        /// Table tile above.
        tile: TileId,
        /// Pixel x.
        dx: i32,
        /// Pixel y.
        dy: i32,
    },
    /// `clear_rect`.
    Clear {
        /// Target layer.
        layer: LayerKind,
        /// Pixel x.
        dx: i32,
        /// Pixel y.
        dy: i32,
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
}

impl SinkCall {
    /// The layer the call targeted.
    #[must_use]
    pub const fn layer(&self) -> LayerKind {
        match *self {
            Self::Tile { layer, .. }
            | Self::Shadow { layer, .. }
            | Self::TableEdge { layer, .. }
            | Self::Clear { layer, .. } => layer,
        }
    }

    /// Returns true for draw primitives (everything but clears).
    #[must_use]
    pub const fn is_draw(&self) -> bool {
        !matches!(self, Self::Clear { .. })
    }
}

/// Records sink calls in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    calls: Vec<SinkCall>,
}

impl RecordingSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls so far.
    #[must_use]
    pub fn calls(&self) -> &[SinkCall] {
        &self.calls
    }

    /// Number of draw primitive calls.
    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.calls.iter().filter(|c| c.is_draw()).count()
    }

    /// Number of clear calls.
    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.calls.len() - self.draw_count()
    }

    /// Calls that targeted `layer`.
    pub fn calls_on(&self, layer: LayerKind) -> impl Iterator<Item = &SinkCall> + '_ {
        self.calls.iter().filter(move |c| c.layer() == layer)
    }

    /// Returns and forgets the recorded calls.
    pub fn take(&mut self) -> Vec<SinkCall> {
        std::mem::take(&mut self.calls)
    }

    /// Forgets the recorded calls.
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl TileSink for RecordingSink {
    fn draw_tile(&mut self, layer: LayerKind, tile: TileId, dx: i32, dy: i32) {
        self.calls.push(SinkCall::Tile { layer, tile, dx, dy });
    }

    fn draw_shadow(&mut self, layer: LayerKind, shadow: ShadowBits, dx: i32, dy: i32) {
        self.calls.push(SinkCall::Shadow { layer, shadow, dx, dy });
    }

    fn draw_table_edge(&mut self, layer: LayerKind, tile: TileId, dx: i32, dy: i32) {
        self.calls.push(SinkCall::TableEdge { layer, tile, dx, dy });
    }

    fn clear_rect(&mut self, layer: LayerKind, dx: i32, dy: i32, width: u32, height: u32) {
        self.calls.push(SinkCall::Clear { layer, dx, dy, width, height });
    }
}

//! # UNDERPASS Rendering
//!
//! Per-cell tile compositing for a two-pass tilemap:
//! the lower layer is drawn under character sprites, the upper layer over them.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      PAINT PIPELINE                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MapData → read_cell → TileCompositor::plan → CellPlan      │
//! │                              │                              │
//! │          ┌───────────────────┴──────────────────┐           │
//! │          ▼                                      ▼           │
//! │  RasterCompositor                     SceneGraphCompositor  │
//! │  (ChangeCache, ring-buffer slots)     (TileGroups, no cache)│
//! │          │                                      │           │
//! │          └──────────────► TileSink ◄────────────┘           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! `TileCompositor` has two strategies: [`BaselineCompositor`] (the host's
//! routing) and [`RegionOverrideCompositor`], which sends the whole tile stack
//! of underpass and blocked cells to the upper layer and delegates every other
//! cell to its fallback.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod compositor;
pub mod draw_list;
pub mod raster;
pub mod recording;
pub mod scene_graph;
pub mod sink;
pub mod stack_reader;
pub mod stats;
pub mod tilemap;

pub use compositor::{BaselineCompositor, RegionOverrideCompositor, TileCompositor};
pub use draw_list::{CellPlan, DrawPrimitive, LayerPlan};
pub use raster::{ChangeCache, PaintOutcome, RasterCompositor, Slot};
pub use recording::{RecordingSink, SinkCall};
pub use scene_graph::{SceneGraphCompositor, TileGroups, TileQuad};
pub use sink::{LayerKind, TileSink};
pub use stack_reader::{read_cell, CellSample};
pub use stats::PaintStats;
pub use tilemap::{FramePass, RingBlit, TilemapView, Viewport, ANIMATION_PERIOD};

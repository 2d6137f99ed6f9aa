//! # Compositing Strategies
//!
//! A [`TileCompositor`] decides which layer each primitive of a cell goes to.
//! Backends own the strategy and apply its [`CellPlan`] to their surfaces.
//!
//! - [`BaselineCompositor`]: the host's routing, unchanged
//! - [`RegionOverrideCompositor`]: front-routes underpass and blocked cells,
//!   delegates the rest to an explicit fallback strategy

mod baseline;
mod region_override;

pub use baseline::BaselineCompositor;
pub use region_override::RegionOverrideCompositor;

use underpass_core::{MapData, TilesetFlags};

use crate::draw_list::{CellPlan, DrawPrimitive, LayerPlan};
use crate::stack_reader::CellSample;

/// Fills a cell plan from a cell sample.
pub trait TileCompositor {
    /// Writes the draw lists for `sample` into `plan`.
    ///
    /// `plan` arrives cleared.
    fn plan<M: MapData>(&self, map: &M, sample: &CellSample, plan: &mut CellPlan);
}

/// Appends the table-edge primitive when the cell above is a table.
///
/// The edge is drawn when the above layer-1 tile is a table, this cell's
/// layer-1 tile is not, and layer 0 does not cast its own shadow.
pub(crate) fn push_table_edge(flags: &TilesetFlags, sample: &CellSample, lower: &mut LayerPlan) {
    let above = sample.above_layer1;
    if flags.is_table_tile(above)
        && !flags.is_table_tile(sample.stack.layers[1])
        && !sample.base_tile().is_shadowing()
    {
        lower.push(DrawPrimitive::TableEdge(above));
    }
}

//! The host's tile routing.
//!
//! ```text
//! layer 0, 1      upper if star-flagged, else lower
//! shadow          lower
//! table edge      lower (see `push_table_edge`)
//! layer 2, 3      upper on overpass positions, else by star flag
//! ```
//!
//! Only the lower list animates: an A1 tile on layer 0 forces a lower repaint
//! on every new animation frame.

use underpass_core::MapData;

use super::{push_table_edge, TileCompositor};
use crate::draw_list::CellPlan;
use crate::sink::LayerKind;
use crate::stack_reader::CellSample;

/// Baseline compositing strategy.
#[derive(Clone, Copy, Debug, Default)]
pub struct BaselineCompositor;

impl TileCompositor for BaselineCompositor {
    fn plan<M: MapData>(&self, map: &M, sample: &CellSample, plan: &mut CellPlan) {
        let flags = map.tileset_flags();
        let [tile0, tile1, tile2, tile3] = sample.stack.layers;
        let route = |tile| {
            if flags.is_higher_tile(tile) {
                LayerKind::Upper
            } else {
                LayerKind::Lower
            }
        };

        plan.push_tile(route(tile0), tile0);
        plan.push_tile(route(tile1), tile1);

        plan.push_shadow(sample.stack.shadow);
        push_table_edge(flags, sample, &mut plan.lower);

        if map.is_overpass_position(sample.cell) {
            plan.push_tile(LayerKind::Upper, tile2);
            plan.push_tile(LayerKind::Upper, tile3);
        } else {
            plan.push_tile(route(tile2), tile2);
            plan.push_tile(route(tile3), tile3);
        }

        plan.lower.animated = tile0.is_a1();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw_list::DrawPrimitive::{Shadow, TableEdge, Tile};
    use crate::stack_reader::read_cell;
    use underpass_core::{Cell, GameMap, MapGeometry, ShadowBits, TileFlags, TileId};

    const GRASS: TileId = TileId(2816);
    const TABLE: TileId = TileId(2816 + 48);
    const ROOF: TileId = TileId(4352);
    const WATER: TileId = TileId(2048);
    const TREE_TOP: TileId = TileId(20);
    const POT: TileId = TileId(21);

    fn map() -> GameMap {
        let mut map = GameMap::new(MapGeometry::new(6, 6));
        let flags = map.flags_mut();
        flags.set(TABLE, TileFlags::COUNTER);
        flags.set(TREE_TOP, TileFlags::HIGHER);
        map
    }

    fn plan_for(map: &GameMap, cell: Cell) -> CellPlan {
        let mut plan = CellPlan::new();
        BaselineCompositor.plan(map, &read_cell(map, cell), &mut plan);
        plan
    }

    #[test]
    fn test_plain_floor_goes_under() {
        let mut map = map();
        let cell = Cell::new(2, 2);
        map.set_tile(cell, 0, GRASS);
        map.set_shadow(cell, ShadowBits::new(0b0101));

        let plan = plan_for(&map, cell);
        assert_eq!(
            plan.lower.primitives,
            vec![
                Tile(GRASS),
                Tile(TileId::EMPTY),
                Shadow(ShadowBits::new(0b0101)),
                Tile(TileId::EMPTY),
                Tile(TileId::EMPTY),
            ]
        );
        assert!(plan.upper.is_empty());
        assert!(!plan.lower.animated);
    }

    #[test]
    fn test_star_tiles_go_over() {
        let mut map = map();
        let cell = Cell::new(2, 2);
        map.set_tile(cell, 0, GRASS);
        map.set_tile(cell, 2, TREE_TOP);
        map.set_tile(cell, 3, POT);

        let plan = plan_for(&map, cell);
        assert_eq!(plan.upper.primitives, vec![Tile(TREE_TOP)]);
        assert_eq!(plan.lower.primitives.last(), Some(&Tile(POT)));
    }

    #[test]
    fn test_table_edge_below_table() {
        let mut map = map();
        map.set_tile(Cell::new(2, 1), 1, TABLE);
        map.set_tile(Cell::new(2, 2), 0, GRASS);

        let plan = plan_for(&map, Cell::new(2, 2));
        assert_eq!(plan.lower.primitives[3], TableEdge(TABLE));
    }

    #[test]
    fn test_no_table_edge_on_shadowing_tile() {
        let mut map = map();
        map.set_tile(Cell::new(2, 1), 1, TABLE);
        map.set_tile(Cell::new(2, 2), 0, ROOF);

        let plan = plan_for(&map, Cell::new(2, 2));
        assert!(!plan.lower.primitives.iter().any(|p| matches!(p, TableEdge(_))));
    }

    #[test]
    fn test_no_table_edge_between_tables() {
        let mut map = map();
        map.set_tile(Cell::new(2, 1), 1, TABLE);
        map.set_tile(Cell::new(2, 2), 1, TABLE);

        let plan = plan_for(&map, Cell::new(2, 2));
        assert!(!plan.lower.primitives.iter().any(|p| matches!(p, TableEdge(_))));
    }

    #[test]
    fn test_overpass_forces_upper_layers_over() {
        let mut map = map();
        let cell = Cell::new(3, 3);
        map.set_tile(cell, 2, POT);
        map.mark_overpass(cell);

        let plan = plan_for(&map, cell);
        assert_eq!(plan.upper.primitives, vec![Tile(POT), Tile(TileId::EMPTY)]);
    }

    #[test]
    fn test_water_animates_lower_only() {
        let mut map = map();
        let cell = Cell::new(1, 1);
        map.set_tile(cell, 0, WATER);

        let plan = plan_for(&map, cell);
        assert!(plan.lower.animated);
        assert!(!plan.upper.animated);
    }
}

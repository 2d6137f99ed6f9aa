//! Integration tests for compositing: normal cells match the baseline on both
//! backends, and the raster cache repaints exactly what changed.

use underpass::core::{
    Cell, GameMap, MapData, MapGeometry, RegionClassifier, RegionId, ShadowBits, TileFlags, TileId,
};
use underpass::rendering::{
    BaselineCompositor, FramePass, LayerKind, RasterCompositor, RecordingSink,
    RegionOverrideCompositor, SceneGraphCompositor, SinkCall, TileCompositor, Viewport,
};

const WIDTH: i32 = 12;
const HEIGHT: i32 = 10;

const WATER: TileId = TileId(2048);
const TABLE: TileId = TileId(2816 + 48);
const GRASS: TileId = TileId(2816);
const ROOF: TileId = TileId(4352);
const WALL: TileId = TileId(5888);
const TREE_TOP: TileId = TileId(40);
const CRATE: TileId = TileId(41);

fn viewport() -> Viewport {
    Viewport {
        screen_width: 576,
        screen_height: 480,
        tile_width: 48,
        tile_height: 48,
        margin: 0,
    }
}

fn full_pass(frame_updated: bool) -> FramePass {
    FramePass {
        start_x: 0,
        start_y: 0,
        cols: WIDTH,
        rows: HEIGHT,
        frame_updated,
    }
}

/// A map exercising every baseline rule, tagged with `region_at`.
fn busy_map(region_at: impl Fn(i32, i32) -> i32) -> GameMap {
    let mut map = GameMap::new(MapGeometry::new(WIDTH as u32, HEIGHT as u32));
    let flags = map.flags_mut();
    flags.set(TABLE, TileFlags::COUNTER);
    flags.set(TREE_TOP, TileFlags::HIGHER);

    let bases = [GRASS, WATER, ROOF, WALL, GRASS, TileId(7)];
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let cell = Cell::new(x, y);
            let seed = (x * 7 + y * 13) as usize;
            map.set_tile(cell, 0, bases[seed % bases.len()]);
            if seed % 4 == 0 {
                map.set_tile(cell, 1, TABLE);
            }
            if seed % 5 == 1 {
                map.set_tile(cell, 2, TREE_TOP);
            }
            if seed % 3 == 2 {
                map.set_tile(cell, 3, CRATE);
            }
            map.set_shadow(cell, ShadowBits::new((seed % 16) as u8));
            if seed % 9 == 0 {
                map.mark_overpass(cell);
            }
            map.set_region(cell, RegionId(region_at(x, y)));
        }
    }
    map
}

fn normal_regions(x: i32, y: i32) -> i32 {
    let r = (x * 31 + y * 17) % 256;
    if r == 252 || r == 253 {
        r - 10
    } else {
        r
    }
}

fn raster_calls<C: TileCompositor>(
    compositor: C,
    map: &GameMap,
) -> Vec<SinkCall> {
    let mut raster = RasterCompositor::new(compositor, &viewport());
    let mut sink = RecordingSink::new();
    raster.paint_all(map, &mut sink, &full_pass(true));
    raster.paint_all(map, &mut sink, &full_pass(false));
    raster.paint_all(map, &mut sink, &full_pass(true));
    sink.take()
}

#[test]
fn test_normal_regions_match_baseline_raster() {
    let map = busy_map(normal_regions);
    let baseline = raster_calls(BaselineCompositor, &map);
    let override_calls =
        raster_calls(RegionOverrideCompositor::new(RegionClassifier::default()), &map);
    assert!(!baseline.is_empty());
    assert_eq!(baseline, override_calls);
}

#[test]
fn test_normal_regions_match_baseline_scene_graph() {
    let map = busy_map(normal_regions);

    let mut baseline = SceneGraphCompositor::new(BaselineCompositor, &viewport());
    baseline.paint_all(&map, &full_pass(false));
    let mut region = SceneGraphCompositor::new(
        RegionOverrideCompositor::new(RegionClassifier::default()),
        &viewport(),
    );
    region.paint_all(&map, &full_pass(false));

    for layer in LayerKind::ALL {
        assert_eq!(baseline.groups().quads(layer), region.groups().quads(layer));
    }
}

#[test]
fn test_front_routed_cells_draw_no_tiles_under() {
    let map = busy_map(|x, _| if x % 2 == 0 { 252 } else { 253 });
    let mut raster = RasterCompositor::new(
        RegionOverrideCompositor::new(RegionClassifier::default()),
        &viewport(),
    );
    let mut sink = RecordingSink::new();
    raster.paint_all(&map, &mut sink, &full_pass(true));

    assert!(!sink
        .calls_on(LayerKind::Lower)
        .any(|call| matches!(call, SinkCall::Tile { .. })));
    assert!(sink
        .calls_on(LayerKind::Upper)
        .any(|call| matches!(call, SinkCall::Tile { tile, .. } if *tile == ROOF)));
}

#[test]
fn test_unchanged_map_repaints_nothing() {
    let map = busy_map(|x, y| if (x + y) % 3 == 0 { 252 } else { 1 });
    let mut raster = RasterCompositor::new(
        RegionOverrideCompositor::new(RegionClassifier::default()),
        &viewport(),
    );
    let mut sink = RecordingSink::new();
    raster.paint_all(&map, &mut sink, &full_pass(true));
    sink.clear();

    let stats = raster.paint_all(&map, &mut sink, &full_pass(false));
    assert_eq!(stats.repaints(), 0);
    assert!(sink.calls().is_empty());
}

#[test]
fn test_layer0_change_redraws_whole_slot() {
    let mut map = busy_map(|_, _| 0);
    let cell = Cell::new(4, 3);
    let mut raster = RasterCompositor::new(BaselineCompositor, &viewport());
    let mut sink = RecordingSink::new();
    raster.paint_all(&map, &mut sink, &full_pass(false));
    sink.clear();

    map.set_tile(cell, 0, TileId(3));
    let outcome = raster.paint(&map, &mut sink, cell);
    assert!(outcome.lower_repainted);

    let lower: Vec<_> = sink.calls_on(LayerKind::Lower).copied().collect();
    assert!(matches!(lower[0], SinkCall::Clear { dx: 192, dy: 144, .. }));
    assert_eq!(
        lower[1],
        SinkCall::Tile { layer: LayerKind::Lower, tile: TileId(3), dx: 192, dy: 144 }
    );
    // Every primitive of the slot's lower list is redrawn, not just layer 0.
    assert_eq!(lower.len() - 1, raster.cache().get(LayerKind::Lower, raster.slot_of(cell).2).len());
}

#[test]
fn test_layer0_change_redraws_front_routed_slot() {
    let mut map = busy_map(|_, _| 252);
    let cell = Cell::new(4, 3);
    for (layer, tile) in [GRASS, TABLE, TREE_TOP, CRATE].into_iter().enumerate() {
        map.set_tile(cell, layer, tile);
    }
    let mut raster = RasterCompositor::new(
        RegionOverrideCompositor::new(RegionClassifier::default()),
        &viewport(),
    );
    let mut sink = RecordingSink::new();
    raster.paint_all(&map, &mut sink, &full_pass(false));
    sink.clear();

    map.set_tile(cell, 0, ROOF);
    let outcome = raster.paint(&map, &mut sink, cell);
    assert!(outcome.upper_repainted);
    assert!(!outcome.lower_repainted);

    let upper: Vec<_> = sink.calls_on(LayerKind::Upper).copied().collect();
    let tile = |tile| SinkCall::Tile { layer: LayerKind::Upper, tile, dx: 192, dy: 144 };
    assert_eq!(
        upper,
        vec![
            SinkCall::Clear { layer: LayerKind::Upper, dx: 192, dy: 144, width: 48, height: 48 },
            tile(ROOF),
            tile(TABLE),
            tile(TREE_TOP),
            tile(CRATE),
        ]
    );
    assert_eq!(sink.calls_on(LayerKind::Lower).count(), 0);
}

#[test]
fn test_new_frame_repaints_only_animated_slots() {
    let map = busy_map(|_, _| 0);
    let mut raster = RasterCompositor::new(BaselineCompositor, &viewport());
    let mut sink = RecordingSink::new();
    raster.paint_all(&map, &mut sink, &full_pass(false));

    let water_cells = (0..HEIGHT)
        .flat_map(|y| (0..WIDTH).map(move |x| Cell::new(x, y)))
        .filter(|&cell| map.tile_id(cell, 0) == WATER)
        .count();

    let stats = raster.paint_all(&map, &mut sink, &full_pass(true));
    assert_eq!(stats.lower_repaints as usize, water_cells);
    assert_eq!(stats.upper_repaints, 0);
}

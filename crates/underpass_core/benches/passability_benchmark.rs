//! # Passability Benchmark
//!
//! Movement asks once per proposed step per entity, so the oracle has to stay
//! in the same cost class as the baseline check it wraps.
//!
//! Run with: `cargo bench --package underpass_core --bench passability_benchmark`

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use underpass_core::{
    can_pass, BaselinePassage, Cell, Direction, GameMap, MapGeometry, Passability,
    PassabilityOracle, RegionClassifier, RegionId, TileFlags, TileId,
};

const WIDTH: i32 = 64;
const HEIGHT: i32 = 64;

fn build_map() -> GameMap {
    let mut map = GameMap::new(MapGeometry::new(WIDTH as u32, HEIGHT as u32));
    map.flags_mut().set(TileId::EMPTY, TileFlags::HIGHER);
    map.flags_mut().set(TileId(2), TileFlags::PASSAGE_MASK);

    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let cell = Cell::new(x, y);
            map.set_tile(cell, 0, TileId(1 + ((x + y) % 2) as u16));
            let region = match (x + y * 3) % 7 {
                0 => 252,
                1 => 253,
                _ => x % 8,
            };
            map.set_region(cell, RegionId(region));
        }
    }
    map
}

fn bench_baseline(c: &mut Criterion) {
    let map = build_map();
    c.bench_function("baseline_is_passable_full_map", |b| {
        b.iter(|| {
            let mut open = 0u32;
            for y in 0..HEIGHT {
                for x in 0..WIDTH {
                    if BaselinePassage.is_passable(&map, Cell::new(x, y), Direction::Down) {
                        open += 1;
                    }
                }
            }
            black_box(open)
        });
    });
}

fn bench_oracle(c: &mut Criterion) {
    let map = build_map();
    let oracle = PassabilityOracle::new(RegionClassifier::default());
    c.bench_function("oracle_is_passable_full_map", |b| {
        b.iter(|| {
            let mut open = 0u32;
            for y in 0..HEIGHT {
                for x in 0..WIDTH {
                    if oracle.is_passable(&map, Cell::new(x, y), Direction::Down) {
                        open += 1;
                    }
                }
            }
            black_box(open)
        });
    });
}

fn bench_can_pass(c: &mut Criterion) {
    let map = build_map();
    let oracle = PassabilityOracle::new(RegionClassifier::default());
    c.bench_function("can_pass_all_directions", |b| {
        b.iter(|| {
            let mut open = 0u32;
            for y in 0..HEIGHT {
                for x in 0..WIDTH {
                    for d in Direction::ALL {
                        if can_pass(&map, &oracle, Cell::new(x, y), d) {
                            open += 1;
                        }
                    }
                }
            }
            black_box(open)
        });
    });
}

criterion_group!(benches, bench_baseline, bench_oracle, bench_can_pass);
criterion_main!(benches);

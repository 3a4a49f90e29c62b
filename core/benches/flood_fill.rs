use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use tilesweep_core::{Board, BoardConfig, Coord2, TileKind};

const TIERS: [(&str, BoardConfig); 3] = [
    ("beginner", BoardConfig::new(9, 9, 10)),
    ("expert", BoardConfig::new(30, 16, 99)),
    ("huge", BoardConfig::new(1000, 1000, 1000)),
];

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, config) in TIERS {
        let config = config.with_seed(0x5eed);
        group.bench_function(name, |b| {
            b.iter(|| Board::from_config(black_box(&config)).unwrap())
        });
    }
    group.finish();
}

/// Start of the largest empty region, found by opening every region once on a scratch copy.
fn largest_opening(board: &Board) -> Option<Coord2> {
    let mut scratch = board.clone();
    let mut best: Option<(usize, Coord2)> = None;
    for (coords, view) in board.views() {
        if view.kind != TileKind::Empty || scratch[coords].is_revealed() {
            continue;
        }
        let Ok(reveal) = scratch.reveal(coords) else {
            break;
        };
        if best.is_none_or(|(size, _)| reveal.revealed.len() > size) {
            best = Some((reveal.revealed.len(), coords));
        }
    }
    best.map(|(_, coords)| coords)
}

fn bench_flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");
    for (name, config) in TIERS {
        let board = Board::from_config(&config.with_seed(0x5eed)).unwrap();
        let Some(start) = largest_opening(&board) else {
            continue;
        };

        group.bench_function(name, |b| {
            b.iter_batched(
                || board.clone(),
                |mut board| board.reveal(black_box(start)).unwrap(),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_flood_fill);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use chessy::core::{candidates, Board, Game, MovementDetector};
use chessy::types::Position;

fn bench_opening_candidates(c: &mut Criterion) {
    let board = Board::new();

    c.bench_function("candidates_all_squares_opening", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for origin in Position::all() {
                total += candidates(black_box(&board), origin).len();
            }
            total
        })
    });
}

fn bench_open_queen(c: &mut Criterion) {
    let board = Board::from_rows(["", "", "", "   Q", "", "", "", ""]);
    let centre = Position::new(3, 3).unwrap();

    c.bench_function("candidates_lone_queen", |b| {
        b.iter(|| candidates(black_box(&board), black_box(centre)))
    });
}

fn bench_detector(c: &mut Criterion) {
    let board = Board::new();
    let start = board.occupancy();
    let mut lifted = start;
    lifted.toggle(Position::from_algebraic("e2").unwrap());
    let mut detector = MovementDetector::new();

    c.bench_function("detector_observe_toggle", |b| {
        b.iter(|| {
            detector.observe(black_box(lifted));
            detector.observe(black_box(start))
        })
    });
}

fn bench_select_commit(c: &mut Criterion) {
    let e2 = Position::from_algebraic("e2").unwrap();
    let e4 = Position::from_algebraic("e4").unwrap();

    c.bench_function("game_select_commit", |b| {
        b.iter(|| {
            let mut game = Game::new();
            game.select(black_box(e2));
            game.select(black_box(e4))
        })
    });
}

criterion_group!(
    benches,
    bench_opening_candidates,
    bench_open_queen,
    bench_detector,
    bench_select_commit
);
criterion_main!(benches);

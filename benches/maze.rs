use backdrop::maze::{Maze, MazeScene};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn benchmark_generate(c: &mut Criterion) {
    c.bench_function("maze_generate_9", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| black_box(Maze::generate(9, &mut rng)))
    });

    c.bench_function("maze_generate_32", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| black_box(Maze::generate(32, &mut rng)))
    });
}

fn benchmark_trace_frame(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let mut scene = MazeScene::new(9, &mut rng);
    scene.step(0.5, &mut rng);

    c.bench_function("maze_trace_frame_256", |b| {
        b.iter(|| black_box(scene.trace_frame(256)))
    });

    c.bench_function("maze_trace_frame_1024", |b| {
        b.iter(|| black_box(scene.trace_frame(1024)))
    });
}

criterion_group!(benches, benchmark_generate, benchmark_trace_frame);
criterion_main!(benches);

use backdrop::metaballs::{
    ContourSolver, LocalSolver, MetaBall, Simulation, ThreadPoolSolver, CELL_SIZE, THRESHOLD,
};
use backdrop::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn simulated_balls(seed: u64, steps: usize) -> Vec<MetaBall> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut sim = Simulation::new(&mut rng);
    for _ in 0..steps {
        sim.step(1.0 / 60.0);
    }
    sim.balls().to_vec()
}

#[test]
fn test_pool_matches_local_over_simulation() {
    let mut local = LocalSolver::new(CELL_SIZE, THRESHOLD);
    let mut pool = ThreadPoolSolver::new(CELL_SIZE, THRESHOLD, 4);

    let cell_count = 24usize;
    let dim = cell_count as f64 * CELL_SIZE;
    for seed in 0..4 {
        let balls = simulated_balls(seed, 30);

        local.start_frame(&balls, seed % 2 == 1);
        pool.start_frame(&balls, seed % 2 == 1);

        let expected = local.solve(cell_count, [3.0, 3.0], [dim - 6.0, dim - 6.0]);
        let actual = pool.solve(cell_count, [3.0, 3.0], [dim - 6.0, dim - 6.0]);
        assert_eq!(expected, actual, "frame mismatch for seed {}", seed);
    }
}

#[test]
fn test_rows_outside_canvas_are_skipped() {
    let balls = vec![MetaBall {
        id: 0,
        pos: Vec2::new(50.0, 12.5),
        velocity: Vec2::ZERO,
        radius: 5.0,
    }];
    let mut solver = LocalSolver::new(CELL_SIZE, THRESHOLD);
    solver.start_frame(&balls, false);

    // A short canvas: rows past its bottom edge must not contribute.
    let cell_count = 16usize;
    let polys = solver.solve(cell_count, [0.0, 0.0], [16.0 * CELL_SIZE, 3.0 * CELL_SIZE]);
    assert!(!polys.is_empty());
    for poly in &polys {
        for point in poly {
            assert!(point.y <= 4.0 * CELL_SIZE);
        }
    }
}

#[test]
fn test_simulation_feeds_solver() {
    let mut rng = StdRng::seed_from_u64(12);
    let mut sim = Simulation::new(&mut rng);
    let mut solver = LocalSolver::new(CELL_SIZE, THRESHOLD);

    let cell_count = 24usize;
    let dim = cell_count as f64 * CELL_SIZE;
    let mut nonempty = 0;
    for _ in 0..10 {
        sim.step(1.0 / 60.0);
        solver.start_frame(sim.balls(), false);
        if !solver.solve(cell_count, [0.0, 0.0], [dim, dim]).is_empty() {
            nonempty += 1;
        }
    }
    assert_eq!(nonempty, 10);
}

use backdrop::metaballs::{ContourSolver, LocalSolver, Simulation, CELL_SIZE, THRESHOLD};
use plotters::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const CELL_COUNT: usize = 40;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut sim = Simulation::new(&mut rng);
    // Settle the balls into a blob before taking the snapshot.
    for _ in 0..180 {
        sim.step(1.0 / 60.0);
    }

    let dim = CELL_COUNT as f64 * CELL_SIZE;
    let mut solver = LocalSolver::new(CELL_SIZE, THRESHOLD);
    solver.start_frame(sim.balls(), false);
    let polys = solver.solve(CELL_COUNT, [0.0, 0.0], [dim, dim]);

    let root = SVGBackend::new("metaballs.svg", (1024, 1024)).into_drawing_area();
    root.fill(&BLACK)?;

    let mut chart = ChartBuilder::on(&root).build_cartesian_2d(0.0..dim, dim..0.0)?;

    chart.draw_series(
        polys
            .iter()
            .map(|poly| Polygon::new(poly.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>(), &CYAN)),
    )?;

    // Ball centers for reference, in world -> canvas scale.
    let scale = dim / 100.0;
    chart.draw_series(sim.balls().iter().map(|ball| {
        Circle::new(
            (ball.pos.x * scale, ball.pos.y * scale),
            3,
            WHITE.filled(),
        )
    }))?;

    root.present()?;
    println!("wrote metaballs.svg ({} polygons)", polys.len());
    Ok(())
}

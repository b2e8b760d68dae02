use backdrop::maze::raycast::{CAM_SIZE, Z_NEAR};
use backdrop::maze::MazeScene;
use plotters::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const SIZE: u32 = 9;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(1337);
    let mut scene = MazeScene::new(SIZE, &mut rng);
    // Let the walker wander away from the center cell.
    for _ in 0..240 {
        scene.step(1.0 / 60.0, &mut rng);
    }

    let root = SVGBackend::new("maze_map.svg", (1024, 1024)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart =
        ChartBuilder::on(&root).build_cartesian_2d(0.0..SIZE as f64, 0.0..SIZE as f64)?;

    chart.draw_series(scene.maze().walls().iter().map(|wall| {
        let (a, b) = wall.endpoints();
        PathElement::new(vec![(a.x, a.y), (b.x, b.y)], BLACK.stroke_width(2))
    }))?;

    // View cone plus eye dot, the mini-map overlay.
    let eye = scene.walker().eye_pos();
    let angle = scene.walker().eye_angle();
    let fov = ((0.5 * CAM_SIZE) / Z_NEAR).atan();
    let reach = 2.0;
    let cone = vec![
        (eye.x, eye.y),
        (
            eye.x + (angle - fov).cos() * reach,
            eye.y + (angle - fov).sin() * reach,
        ),
        (
            eye.x + (angle + fov).cos() * reach,
            eye.y + (angle + fov).sin() * reach,
        ),
    ];
    chart.draw_series(std::iter::once(Polygon::new(cone, GREEN.mix(0.4))))?;
    chart.draw_series(std::iter::once(Circle::new(
        (eye.x, eye.y),
        6,
        GREEN.filled(),
    )))?;

    root.present()?;
    println!("wrote maze_map.svg");

    // Side view: traced column heights across one frame.
    let frame = scene.trace_frame(512);
    let root = SVGBackend::new("maze_columns.svg", (1024, 512)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root).build_cartesian_2d(0.0..512.0, 0.0..512.0)?;
    chart.draw_series(frame.iter().enumerate().filter_map(|(x, column)| {
        column.as_ref().map(|column| {
            let top = (512.0 - column.height) / 2.0;
            let shade = (column.light * 255.0) as u8;
            PathElement::new(
                vec![(x as f64, top), (x as f64, top + column.height)],
                RGBColor(shade, shade, shade).stroke_width(2),
            )
        })
    }))?;

    root.present()?;
    println!("wrote maze_columns.svg");
    Ok(())
}

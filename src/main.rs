use granular_sand::{NormalizedPoint, SimulationError, SimulatorBuilder};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Frames spent pouring sand from the cursor
const POUR_FRAMES: usize = 240;
/// Frames left for the pile to settle afterwards
const SETTLE_FRAMES: usize = 400;

fn main() -> Result<(), SimulationError> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut sim = SimulatorBuilder::new()
        .width(80)
        .height(48)
        .brush_radius(2)
        .seed(0x5a4d)
        .build()?;

    // Sweep the cursor back and forth across the top like a hand dragging the mouse
    for frame in 0..POUR_FRAMES {
        let phase = (frame as f32 / 60.0) * std::f32::consts::PI;
        let cursor = NormalizedPoint::new(0.5 + 0.3 * phase.sin(), 0.05);
        sim.deposit_default(cursor);
        let summary = sim.step();
        if frame % 60 == 0 {
            info!(
                frame,
                grains = sim.grain_count(),
                moved = summary.moved(),
                "Pouring"
            );
        }
    }

    let mut settled_at = None;
    for frame in 0..SETTLE_FRAMES {
        if sim.step().moved() == 0 {
            settled_at = Some(frame);
            break;
        }
    }
    info!(
        grains = sim.grain_count(),
        settled_after = ?settled_at,
        elapsed = ?sim.clock().get_current_time(),
        "Done"
    );

    // A rough picture of the pile
    for y in 0..sim.height() {
        let row: String = (0..sim.width())
            .map(|x| match sim.is_occupied(x, y) {
                Some(true) => '#',
                _ => '.',
            })
            .collect();
        println!("{row}");
    }
    Ok(())
}

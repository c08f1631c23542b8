use tiltbar::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cfg = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)?;
            SimConfig::from_json_str(&text)?
        }
        None => SimConfig::default(),
    };

    let mut sim = Simulation::new(cfg, SimConfig::DEFAULT_WIDTH, SimConfig::DEFAULT_HEIGHT)?;
    let dt = 1.0 / 120.0;

    // Tilt clockwise for a quarter second, then let the ball play out.
    for frame in 0..600u32 {
        if frame == 0 {
            sim.set_intent(Intent::ClockwiseTilt);
        } else if frame == 30 {
            sim.clear_intent(Intent::ClockwiseTilt);
        }
        sim.tick(dt);

        if frame % 30 == 0 {
            let s = sim.snapshot();
            println!(
                "frame={:4} ball=({:7.2},{:7.2}) ball_angle={:8.1} bar_angle={:6.1} contact={}",
                frame, s.body.position.x, s.body.position.y, s.body.angle, s.bar.angle, s.in_contact
            );
        }
    }

    let st = sim.stats();
    println!(
        "ticks={} contact_ticks={} restitution_applied={} clamped_dt={}",
        st.ticks, st.contact_ticks, st.restitution_applied, st.clamped_dt
    );
    Ok(())
}

use arena_pathfinding::{SimConfig, Simulation};
use std::env;

// Runs the simulation without a window and prints the arena every few ticks.
//
//     RUST_LOG=debug cargo run --example headless -- demos/arena.toml
//
// In the printed grid
// - # marks an obstacle
// - * marks a waypoint of the current path
// - A marks the agent
// - G marks the destination

const MAX_TICKS: u64 = 5000;
const PRINT_EVERY: u64 = 50;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/arena.toml".to_owned());
    let config = SimConfig::load(&path)?;
    let mut simulation = Simulation::from_config(&config)?;
    println!("{}", simulation);
    while !simulation.arrived() && simulation.ticks() < MAX_TICKS {
        simulation.tick(1.0);
        if simulation.ticks() % PRINT_EVERY == 0 {
            let agent = simulation.agent();
            println!(
                "tick {}: agent at {} heading {:.0} deg",
                simulation.ticks(),
                agent.position(),
                agent.heading_degrees()
            );
            println!("{}", simulation);
        }
    }
    println!(
        "{} after {} ticks",
        if simulation.arrived() { "Arrived" } else { "Gave up" },
        simulation.ticks()
    );
    Ok(())
}

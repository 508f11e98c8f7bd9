use life_engine::{Simulation, SimulationConfig};
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

fn main() {
    let pattern_file =
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/test_data/gosper_glider_gun.rle");
    let pattern = match fs::read_to_string(pattern_file) {
        Ok(contents) => contents,
        Err(e) => panic!("Error reading pattern file: {}", e),
    };

    let mut simulation = match Simulation::from_rle(&pattern, SimulationConfig::new(60, 120)) {
        Ok(simulation) => simulation,
        Err(e) => panic!("Invalid pattern: {}", e),
    };

    let mut state = simulation.start().unwrap();
    simulation.draw().unwrap();
    while !state.finished {
        thread::sleep(Duration::from_millis(100));
        state = simulation.update().unwrap();
        simulation.draw().unwrap();
    }
}

use life_engine::{Simulation, SimulationConfig};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = SimulationConfig {
        seed: 42,
        alive_probability: 0.4,
        history_file: Some("/tmp/random_soup_history.json".to_string()),
        ..SimulationConfig::new(40, 200)
    };

    let mut simulation = Simulation::random(config).unwrap();
    let mut state = simulation.start().unwrap();
    while !state.finished {
        state = simulation.update().unwrap();
    }

    println!(
        "\nFinished after {} generations with {} live cells",
        state.generation, state.population
    );
    println!("\nStarting state:\n{}", simulation.starting_rle());
}

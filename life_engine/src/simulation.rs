use crate::config::SimulationConfig;
use crate::error::{ConfigError, Error, SimulationError};
use crate::grid::Grid;
use crate::history::{create_history_logger, HistoryLogger};
use crate::rle;
use crate::rules::step_into;
use std::io;
use tracing::{info, trace};

/// A run of Conway's Game of Life.
/// Main entry point for evolving a grid over a number of generations.
pub struct Simulation {
    config: SimulationConfig,
    starting_grid: Grid,
    grid: Grid,
    next: Grid,
    generation: usize,
    started: bool,
    finished: bool,
    history: Box<dyn HistoryLogger>,
}

/// Represents the state of the simulation after a generation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GenerationState {
    /// The current generation, 0 for the starting grid.
    pub generation: usize,
    /// The number of live cells.
    pub population: usize,
    /// Whether the last generation was reached.
    pub finished: bool,
    /// A snapshot of the whole grid.
    pub grid: Grid,
}

impl Simulation {
    /// Creates a new simulation.
    ///
    /// # Arguments
    /// * `starting_grid` - The grid to evolve. It is kept unchanged so it can be encoded later.
    /// * `config` - The display size, number of generations and history settings.
    pub fn new(starting_grid: Grid, config: SimulationConfig) -> Result<Simulation, ConfigError> {
        config.validate()?;

        let history = create_history_logger(
            config.history_file.clone(),
            starting_grid.width(),
            starting_grid.height(),
            rle::encode_grid(&starting_grid),
        );

        Ok(Simulation {
            grid: starting_grid.clone(),
            next: Grid::new(0, 0),
            starting_grid,
            config,
            generation: 0,
            started: false,
            finished: false,
            history,
        })
    }

    /// Creates a new simulation from an RLE pattern.
    pub fn from_rle(pattern: &str, config: SimulationConfig) -> Result<Simulation, Error> {
        let grid = rle::decode(pattern)?;
        Ok(Simulation::new(grid, config)?)
    }

    /// Creates a new simulation from a random square grid of `grid_size` cells per side.
    pub fn random(config: SimulationConfig) -> Result<Simulation, ConfigError> {
        config.validate()?;
        let grid = Grid::random(config.grid_size, config.alive_probability, config.seed);
        Simulation::new(grid, config)
    }

    /// Replaces the history logger, for example with one that feeds a renderer.
    pub fn with_history_logger(mut self, history: Box<dyn HistoryLogger>) -> Simulation {
        self.history = history;
        self
    }

    /// Starts the simulation.
    ///
    /// Must be called once before updating. Calling it again restarts from the starting grid.
    pub fn start(&mut self) -> Result<GenerationState, SimulationError> {
        self.generation = 0;
        self.started = true;
        self.finished = false;
        self.grid = self.starting_grid.resize_to(self.config.grid_size);
        self.history.clear();
        self.history.log_generation(self.generation, &self.grid);

        if self.config.generations == 0 {
            self.finish()?;
        }

        Ok(self.state())
    }

    /// Advances the simulation by one generation.
    pub fn update(&mut self) -> Result<GenerationState, SimulationError> {
        if !self.started {
            return Err(SimulationError::NotStarted);
        }

        if self.finished {
            return Err(SimulationError::Finished);
        }

        step_into(&self.grid, &mut self.next);
        std::mem::swap(&mut self.grid, &mut self.next);
        self.generation += 1;

        trace!(
            generation = self.generation,
            population = self.grid.population(),
            "Computed generation"
        );
        self.history.log_generation(self.generation, &self.grid);

        if self.generation == self.config.generations {
            self.finish()?;
        }

        Ok(self.state())
    }

    /// Runs every generation from the start and returns the grid of each, starting grid included.
    pub fn run(&mut self) -> Result<Vec<Grid>, SimulationError> {
        let mut state = self.start()?;
        let mut frames = Vec::with_capacity(self.config.generations + 1);

        while !state.finished {
            frames.push(state.grid);
            state = self.update()?;
        }
        frames.push(state.grid);

        Ok(frames)
    }

    /// Draws the current generation to the console.
    pub fn draw(&self) -> io::Result<()> {
        self.grid.draw(&format!(
            "Generation ({}/{})... Population: {}",
            self.generation,
            self.config.generations,
            self.grid.population()
        ))
    }

    /// The pre-simulation grid, as given when the simulation was created.
    pub fn starting_grid(&self) -> &Grid {
        &self.starting_grid
    }

    /// Encodes the starting grid as an RLE pattern.
    pub fn starting_rle(&self) -> String {
        rle::encode_grid(&self.starting_grid)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

impl Simulation {
    fn finish(&mut self) -> Result<(), SimulationError> {
        self.finished = true;
        info!(
            generations = self.generation,
            population = self.grid.population(),
            "Simulation finished"
        );

        self.history.log_finished(self.generation);
        self.history.save()?;
        Ok(())
    }

    fn state(&self) -> GenerationState {
        GenerationState {
            generation: self.generation,
            population: self.grid.population(),
            finished: self.finished,
            grid: self.grid.clone(),
        }
    }
}

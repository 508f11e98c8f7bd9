//! # life_engine
//!
//! Conway's Game of Life on a bounded grid, with reading and writing of patterns
//! in the RLE format used by the cellular automaton community.
//!
//! ```
//! use life_engine::{Simulation, SimulationConfig};
//!
//! let mut simulation =
//!     Simulation::from_rle("x = 3, y = 1\n3o!", SimulationConfig::new(5, 2)).unwrap();
//! let frames = simulation.run().unwrap();
//!
//! assert_eq!(frames.len(), 3);
//! assert_eq!(frames[2], frames[0]);
//! assert_eq!(simulation.starting_rle(), "x = 3, y = 1\n3o!\n");
//! ```

pub mod error;
pub mod rle;
pub mod rules;

pub use boundary::find_boundary;
pub use boundary::BoundingBox;
pub use cell::Cell;
pub use config::SimulationConfig;
pub use error::Error;
pub use grid::resize_rings;
pub use grid::Grid;
pub use history::HistoryLogger;
pub use simulation::GenerationState;
pub use simulation::Simulation;

mod boundary;
mod cell;
mod config;
mod grid;
mod history;
mod simulation;

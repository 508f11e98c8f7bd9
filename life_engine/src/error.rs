//! Error types for life_engine.

use crate::boundary::BoundingBox;
use thiserror::Error;

/// Errors that can occur while decoding an RLE pattern.
///
/// Lines, columns and rows are 1-based. Columns are counted from the first non-blank character
/// of the line.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DecodeError {
    /// The text ended without an `x = <width>, y = <height>` header.
    #[error("missing `x = <width>, y = <height>` header")]
    MissingHeader,

    /// The header declares a grid with more cells than a pattern may hold.
    #[error("line {line}: a {width}x{height} pattern is too large")]
    PatternTooLarge {
        /// Line number.
        line: usize,
        /// Declared width.
        width: usize,
        /// Declared height.
        height: usize,
    },

    /// A pattern line was found before the header.
    #[error("line {line}: expected the `x = <width>, y = <height>` header, found `{text}`")]
    HeaderExpected {
        /// Line number.
        line: usize,
        /// The offending line.
        text: String,
    },

    /// The header could not be parsed.
    #[error("line {line}: invalid header `{text}`")]
    InvalidHeader {
        /// Line number.
        line: usize,
        /// The offending line.
        text: String,
    },

    /// A character outside of `b`, `o`, `$`, `!` and digits was found in the pattern.
    #[error("line {line}, column {column}: unexpected character `{character}`")]
    UnexpectedCharacter {
        /// Line number.
        line: usize,
        /// Column number.
        column: usize,
        /// The offending character.
        character: char,
    },

    /// A run count was followed by something that cannot be repeated.
    #[error("line {line}, column {column}: a count cannot precede `{character}`")]
    MisplacedCount {
        /// Line number.
        line: usize,
        /// Column number.
        column: usize,
        /// The character following the count.
        character: char,
    },

    /// A run count was zero or too large to represent.
    #[error("line {line}, column {column}: invalid run count")]
    InvalidCount {
        /// Line number where the count starts.
        line: usize,
        /// Column where the count starts.
        column: usize,
    },

    /// A row holds more cells than the declared width.
    #[error("line {line}, column {column}: row {row} is longer than the declared width {width}")]
    RowTooLong {
        /// Line number.
        line: usize,
        /// Column number.
        column: usize,
        /// Row number.
        row: usize,
        /// Declared width.
        width: usize,
    },

    /// The pattern holds more rows than the declared height.
    #[error("line {line}, column {column}: pattern has more rows than the declared height {height}")]
    TooManyRows {
        /// Line number.
        line: usize,
        /// Column number.
        column: usize,
        /// Declared height.
        height: usize,
    },

    /// The number of rows does not match the declared height.
    #[error("pattern has {found} rows but the header declares {expected}")]
    RowCountMismatch {
        /// Declared height.
        expected: usize,
        /// Rows found.
        found: usize,
    },
}

/// Errors when a bounding box cannot be applied to a grid.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum BoundaryError {
    /// The box does not fit inside the grid.
    #[error("bounding box {bbox:?} does not fit in a {width}x{height} grid")]
    OutOfBounds {
        /// The offending box.
        bbox: BoundingBox,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },

    /// The box has its top below its bottom or its left edge past its right edge.
    #[error("bounding box {bbox:?} is inverted")]
    Inverted {
        /// The offending box.
        bbox: BoundingBox,
    },
}

/// Errors in a simulation configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The display grid must hold at least one cell.
    #[error("grid size must be at least 1")]
    InvalidGridSize,

    /// The alive probability is not in `[0, 1]`.
    #[error("alive probability must be between 0 and 1, got {0}")]
    InvalidProbability(f64),

    /// The configuration could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors while saving the generation history.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The history file could not be written.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The history could not be serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors while driving a simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// `update` was called before `start`.
    #[error("simulation has not started, call `start` first")]
    NotStarted,

    /// `update` was called after the last generation.
    #[error("simulation is finished, call `start` to run it again")]
    Finished,

    /// The generation history could not be saved.
    #[error("history error: {0}")]
    History(#[from] HistoryError),
}

/// Any error produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Boundary(#[from] BoundaryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

use thiserror::Error;

use crate::domain::validate::SolveInputError;

/// Errors that can occur while building a slideshow
#[derive(Error, Debug)]
pub enum SlideshowError {
    /// Malformed photo catalog. `line` is 1-based.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The optimizer produced no usable ordering
    #[error("optimization infeasible: {0}")]
    OptimizationInfeasible(String),

    /// The solver backend rejected the model
    #[error(transparent)]
    Solver(#[from] SolveInputError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SlideshowError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        SlideshowError::Parse {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SlideshowError>;

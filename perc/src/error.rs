use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("grid side length must be positive and fit in memory, got {0}")]
    InvalidSize(usize),
    #[error("trial count must be positive, got {0}")]
    InvalidTrialCount(usize),
    #[error("site ({row}, {col}) is outside of the {side}x{side} grid")]
    CoordinateOutOfRange { row: usize, col: usize, side: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

use std::fmt;

use jiff::civil::Date;

/// Errors raised while validating parameters, simulating paths or
/// aggregating a finished path matrix.
#[derive(Debug, Clone)]
pub enum SimulationError {
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// A supplied path matrix does not have a usable shape
    InvalidShape {
        rows: usize,
        columns: usize,
        reason: &'static str,
    },
    /// A price that should be strictly positive and finite is not
    NumericDegeneracy { path: usize, step: usize, value: f64 },
}

impl SimulationError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        SimulationError::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidParameter {
                name,
                value,
                reason,
            } => write!(f, "invalid parameter {name}={value}: {reason}"),
            SimulationError::InvalidShape {
                rows,
                columns,
                reason,
            } => write!(f, "invalid path matrix ({rows}x{columns}): {reason}"),
            SimulationError::NumericDegeneracy { path, step, value } => write!(
                f,
                "degenerate price {value} at path {path}, step {step}; prices must be positive and finite"
            ),
        }
    }
}

impl std::error::Error for SimulationError {}

/// Errors related to historical price data and the estimation window
#[derive(Debug, Clone)]
pub enum HistoryError {
    InsufficientHistory { required: usize, available: usize },
    NonPositiveClose { date: Date, close: f64 },
    DuplicateDate(Date),
    InvalidWindow {
        window_years: u32,
        reason: &'static str,
    },
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::InsufficientHistory {
                required,
                available,
            } => write!(
                f,
                "not enough price history: need {required} observations, have {available}"
            ),
            HistoryError::NonPositiveClose { date, close } => {
                write!(f, "close on {date} must be positive and finite, got {close}")
            }
            HistoryError::DuplicateDate(date) => {
                write!(f, "price series contains {date} more than once")
            }
            HistoryError::InvalidWindow {
                window_years,
                reason,
            } => write!(f, "invalid estimation window of {window_years} years: {reason}"),
        }
    }
}

impl std::error::Error for HistoryError {}

/// Top-level error for the history → simulation pipeline
#[derive(Debug, Clone)]
pub enum Error {
    History(HistoryError),
    Simulation(SimulationError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::History(e) => write!(f, "{e}"),
            Error::Simulation(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::History(e) => Some(e),
            Error::Simulation(e) => Some(e),
        }
    }
}

impl From<HistoryError> for Error {
    fn from(err: HistoryError) -> Self {
        Error::History(err)
    }
}

impl From<SimulationError> for Error {
    fn from(err: SimulationError) -> Self {
        Error::Simulation(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

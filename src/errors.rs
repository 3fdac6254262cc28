//! Error types for the orbitcore library
//!
//! Every fallible operation in the crate returns [`AstroError`]. None of them
//! perform side effects, so an error always means "no result", never a
//! partially updated state.

use thiserror::Error;

/// Main error type for orbitcore
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AstroError {
    /// An iteration exceeded its budget without meeting the stopping criterion.
    ///
    /// This is an expected outcome for ill-conditioned inputs. Callers recover
    /// by picking another strategy, a larger budget or another orbit model.
    #[error("No convergence after {iterations} iterations (last value {last})")]
    NonConvergence {
        /// The last value produced by the iteration
        last: f64,
        /// Number of iterations performed
        iterations: usize,
    },

    /// An input violated a documented precondition
    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),

    /// A root search interval does not contain a sign change
    #[error("Interval [{lower}, {upper}] does not bracket a root")]
    InvalidBracket {
        /// Lower bound of the interval
        lower: f64,
        /// Upper bound of the interval
        upper: f64,
    },

    /// A strict interpolation query fell outside the tabulated range
    #[error("Value {value} outside of table range ({min}..{max})")]
    OutOfRange {
        /// The rejected query value
        value: f64,
        /// Lower limit of the valid range
        min: f64,
        /// Upper limit of the valid range
        max: f64,
    },

    /// The extremum of the fitted polynomial lies outside the table
    #[error("Extremum falls outside of table")]
    ExtremumOutside,

    /// The zero of the fitted polynomial lies outside the table
    #[error("Zero falls outside of table")]
    ZeroOutside,

    /// A sample or series table has the wrong shape
    #[error("Invalid table: {0}")]
    InvalidTable(String),
}

/// Result type for orbitcore operations
pub type Result<T> = std::result::Result<T, AstroError>;

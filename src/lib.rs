//! Orbitcore: numeric core for solar-system positions and events
//!
//! This crate computes where solar-system bodies are at a given instant and
//! when events such as apsides, node passages and conjunctions happen. It is
//! built from a few layers:
//!
//! - [`iterate`]: fixed-budget convergence and bisection root finding
//! - [`kepler`]: solvers for Kepler's equation
//! - [`interpolation`]: three- and five-point tables, Lagrange interpolation,
//!   extremum and zero finding
//! - [`orbit`]: true anomaly and distance for elliptical, parabolic and
//!   near-parabolic orbits
//! - [`series`]: VSOP87-style periodic series, with the Earth bundled
//! - [`events`]: refinement of apsides, nodes and conjunctions
//!
//! All times are Julian Ephemeris Days and all angles radians. The crate does
//! no I/O, calendar conversion or formatting.
//!
//! ```
//! use orbitcore::orbit::{AnomalyDistanceModel, EllipticalElements};
//!
//! // Halley's comet
//! let halley = EllipticalElements::new(17.940_078_2, 0.967_274_26, 2_446_470.958_91)?;
//! let ad = halley.anomaly_distance(2_446_470.958_91 + 30.0)?;
//! assert!(ad.distance > halley.perihelion_distance());
//! # Ok::<(), orbitcore::AstroError>(())
//! ```

pub mod constants;
pub mod coordinates;
pub mod errors;
pub mod events;
pub mod interpolation;
pub mod iterate;
pub mod kepler;
pub mod orbit;
pub mod series;
pub mod time;

// Re-export commonly used types
pub use coordinates::{Equatorial, Spherical};
pub use errors::{AstroError, Result};
pub use iterate::{ConvergenceBudget, Tolerance};
pub use kepler::{solve_kepler, KeplerStrategy};
pub use orbit::{AnomalyDistance, AnomalyDistanceModel, Orbit};
pub use series::{evaluate_series, SeriesBody, SeriesTable};

#![deny(missing_docs)]

//! Marginal giver/recipient probabilities for a sequential gift exchange draw.
//!
//! Small groups are enumerated exactly; large groups are estimated by Monte
//! Carlo simulation of the same draw. [`dispatch::Dispatcher`] picks the path
//! from the group size.

/// Reduction of distributions and sample counts to probability matrices.
pub mod aggregate;
/// Engine configuration schema and defaults.
pub mod config;
/// Size-based routing between the exact and simulated paths.
pub mod dispatch;
/// Exact enumeration of every reachable assignment.
pub mod enumerate;
/// Monte Carlo simulation of the draw.
pub mod monte_carlo;
/// Draw procedures shared by both paths.
pub mod procedure;

pub use config::EngineConfig;
pub use dispatch::{compute_matrix, compute_matrix_seeded, Dispatcher, MatrixReport, Method, Route};
pub use enumerate::{enumerate, AssignmentDistribution, MAX_EXACT_GROUP};
pub use monte_carlo::{draw_assignment, simulate, CountTable};
pub use procedure::Procedure;

#![deny(missing_docs)]
#![doc = "Core vocabulary for the gift exchange probability engine: validated inputs, assignments, probability matrices, errors and deterministic randomness."]

pub mod errors;
pub mod rng;
mod group;
mod matrix;

pub use errors::{ErrorInfo, SantaError};
pub use group::{Assignment, GroupSize, TrialCount};
pub use matrix::ProbabilityMatrix;
pub use rng::{derive_substream_seed, RngHandle};

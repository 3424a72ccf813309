#![doc = include_str!("../README.md")]

/// Faults (the abnormal-termination signal), interception, and logging setup
pub mod diagnostics;
/// Two-case outcome of an operation which can fail in an expected way
pub mod outcome;
/// The closed `Shape` variant and exhaustive dispatch over it
pub mod shape;
/// Study planner: fallible operations which return outcomes
pub mod planner;

pub use diagnostics::{exhaustive_check, fail, intercept, Fault};
pub use outcome::*;
pub use shape::*;

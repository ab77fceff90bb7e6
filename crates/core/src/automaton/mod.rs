//! Transition rules of the wildfire automaton

pub mod ignition;
pub mod stepper;

pub use ignition::{try_ignite, SpreadCoefficients};
pub use stepper::{progress, step};

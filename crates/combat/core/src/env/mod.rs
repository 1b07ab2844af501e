//! Environment services injected into the combat core.

pub mod rng;

pub use rng::{PcgRng, RngOracle, RollContext, ScriptedRng, compute_seed};

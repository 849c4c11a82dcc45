//! Sources of randomness.

mod minimal_pcg;
mod minisat;

pub use minimal_pcg::MinimalPCG32;
pub use minisat::MiniRNG;

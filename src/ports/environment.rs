//! Environment port - the opaque oracle agents interact with

use crate::Result;

/// What the environment returns after an action
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub next_state: usize,
    pub reward: f64,
    pub done: bool,
}

/// Discrete-state, discrete-action episodic environment
pub trait Environment: Send {
    /// Start a new episode and return its initial state.
    fn reset(&mut self) -> usize;

    /// Apply an action to the current state.
    ///
    /// # Errors
    ///
    /// Returns an error if the action is outside the action space.
    fn step(&mut self, action: usize) -> Result<StepOutcome>;

    /// Seed the environment's random number generator.
    fn set_rng_seed(&mut self, _seed: u64) {}
}

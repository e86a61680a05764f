//! Common test utilities for the taxi-decomp test suite.
//!
//! Provides a deterministic two-state, two-action environment with known
//! optimal action values.

#![allow(dead_code)]

use taxi_decomp::{
    Error, Result,
    ports::{Environment, StepOutcome},
    taxi::{Position, TaxiState},
};

/// Discount used for the known optimal values below
pub const TOY_GAMMA: f64 = 0.9;

/// `(next_state, reward)` for each `(state, action)`
///
/// - state 0: action 0 stays (reward 0), action 1 moves to 1 (reward 1)
/// - state 1: action 0 moves to 0 (reward 2), action 1 stays (reward 0)
pub const TOY_DYNAMICS: [[(usize, f64); 2]; 2] = [[(0, 0.0), (1, 1.0)], [(0, 2.0), (1, 0.0)]];

/// Optimal action per state under [`TOY_GAMMA`]
pub const TOY_OPTIMAL_ACTIONS: [usize; 2] = [1, 0];

/// Q* under [`TOY_GAMMA`], by solving V0 = 1 + γV1, V1 = 2 + γV0
pub fn toy_optimal_q() -> [[f64; 2]; 2] {
    let g = TOY_GAMMA;
    let v0 = (1.0 + 2.0 * g) / (1.0 - g * g);
    let v1 = 2.0 + g * v0;
    [[g * v0, 1.0 + g * v1], [2.0 + g * v0, g * v1]]
}

/// Episodic wrapper around [`TOY_DYNAMICS`] that ends after a fixed number
/// of steps
pub struct ToyEnv {
    state: usize,
    steps: usize,
    episode_length: usize,
}

impl ToyEnv {
    pub fn new(episode_length: usize) -> Self {
        Self {
            state: 0,
            steps: 0,
            episode_length,
        }
    }
}

impl Environment for ToyEnv {
    fn reset(&mut self) -> usize {
        self.state = 0;
        self.steps = 0;
        self.state
    }

    fn step(&mut self, action: usize) -> Result<StepOutcome> {
        let &(next_state, reward) = TOY_DYNAMICS[self.state]
            .get(action)
            .ok_or(Error::ActionOutOfRange { action, limit: 2 })?;
        self.state = next_state;
        self.steps += 1;
        Ok(StepOutcome {
            next_state,
            reward,
            done: self.steps >= self.episode_length,
        })
    }
}

/// Encode a full taxi state from its fields
pub fn taxi_state(row: usize, col: usize, passenger: usize, destination: usize) -> usize {
    TaxiState::new(Position::new(row, col), passenger, destination)
        .unwrap()
        .encode()
}

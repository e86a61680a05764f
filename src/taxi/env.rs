//! Taxi grid world environment
//!
//! ```text
//! +---------+
//! |R: | : :G|
//! | : | : : |
//! | : : : : |
//! | | : | : |
//! |Y| : |B: |
//! +---------+
//! ```
//!
//! `|` is a wall between two cells, `:` is open. Each move costs -1, an
//! illegal pickup or dropoff costs -10, and delivering the passenger pays
//! +20 and ends the episode. Episodes are cut off after
//! [`DEFAULT_MAX_STEPS`] steps.

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::codec::{Action, GRID_SIZE, NUM_LOCATIONS, PASSENGER_IN_TAXI, Position, TaxiState};
use crate::{
    Result,
    ports::{Environment, StepOutcome},
};

pub const DEFAULT_MAX_STEPS: usize = 200;

const MAP: [&[u8]; 7] = [
    b"+---------+",
    b"|R: | : :G|",
    b"| : | : : |",
    b"| : : : : |",
    b"| | : | : |",
    b"|Y| : |B: |",
    b"+---------+",
];

const STEP_REWARD: f64 = -1.0;
const ILLEGAL_ACTION_REWARD: f64 = -10.0;
const DELIVERY_REWARD: f64 = 20.0;

/// Whether the map has an opening between `(row, col)` and its neighbour
/// `offset` characters to the side (`0` = west, `2` = east).
fn open_towards(row: usize, col: usize, offset: usize) -> bool {
    MAP[row + 1][2 * col + offset] == b':'
}

#[derive(Debug, Clone)]
pub struct TaxiEnv {
    state: TaxiState,
    steps: usize,
    max_steps: usize,
    rng: StdRng,
}

impl TaxiEnv {
    pub fn new() -> Self {
        let mut rng = StdRng::from_rng(&mut rand::rng());
        let state = Self::initial_state(&mut rng);
        Self {
            state,
            steps: 0,
            max_steps: DEFAULT_MAX_STEPS,
            rng,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Current state identifier
    pub fn state(&self) -> usize {
        self.state.encode()
    }

    /// Put the environment in an arbitrary state, e.g. to replay a scenario
    pub fn set_state(&mut self, state: usize) -> Result<()> {
        self.state = TaxiState::decode(state)?;
        self.steps = 0;
        Ok(())
    }

    /// Uniform over taxi positions and over passenger/destination pairs with
    /// the passenger waiting somewhere other than the destination.
    fn initial_state<R: Rng>(rng: &mut R) -> TaxiState {
        let row = rng.random_range(0..GRID_SIZE);
        let col = rng.random_range(0..GRID_SIZE);
        let passenger = rng.random_range(0..NUM_LOCATIONS);
        let mut destination = rng.random_range(0..NUM_LOCATIONS - 1);
        if destination >= passenger {
            destination += 1;
        }
        TaxiState {
            taxi: Position::new(row, col),
            passenger,
            destination,
        }
    }

    fn transition(&self, action: Action) -> (TaxiState, f64, bool) {
        let mut next = self.state;
        let taxi = self.state.taxi;
        let mut reward = STEP_REWARD;
        let mut done = false;

        match action {
            Action::South => next.taxi.row = (taxi.row + 1).min(GRID_SIZE - 1),
            Action::North => next.taxi.row = taxi.row.saturating_sub(1),
            Action::East => {
                if open_towards(taxi.row, taxi.col, 2) {
                    next.taxi.col = (taxi.col + 1).min(GRID_SIZE - 1);
                }
            }
            Action::West => {
                if open_towards(taxi.row, taxi.col, 0) {
                    next.taxi.col = taxi.col.saturating_sub(1);
                }
            }
            Action::Pickup => {
                if self.state.can_pick_up() {
                    next.passenger = PASSENGER_IN_TAXI;
                } else {
                    reward = ILLEGAL_ACTION_REWARD;
                }
            }
            Action::Dropoff => match (self.state.passenger_in_taxi(), taxi.landmark()) {
                (true, Some(landmark)) if landmark == self.state.destination => {
                    next.passenger = landmark;
                    reward = DELIVERY_REWARD;
                    done = true;
                }
                (true, Some(landmark)) => next.passenger = landmark,
                _ => reward = ILLEGAL_ACTION_REWARD,
            },
        }
        (next, reward, done)
    }
}

impl Default for TaxiEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for TaxiEnv {
    fn reset(&mut self) -> usize {
        self.state = Self::initial_state(&mut self.rng);
        self.steps = 0;
        self.state.encode()
    }

    fn step(&mut self, action: usize) -> Result<StepOutcome> {
        let action = Action::from_index(action)?;
        let (next, reward, delivered) = self.transition(action);
        self.state = next;
        self.steps += 1;

        Ok(StepOutcome {
            next_state: next.encode(),
            reward,
            done: delivered || self.steps >= self.max_steps,
        })
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

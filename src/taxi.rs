//! Taxi grid world: state codec and environment adapter

pub mod codec;
pub mod env;

pub use codec::{
    Action, GRID_SIZE, LOCATIONS, NUM_ACTIONS, NUM_LOCATIONS, NUM_NAVIGATION_ACTIONS, NUM_STATES,
    NUM_SUB_STATES, PASSENGER_IN_TAXI, Position, SubState, TaxiState,
};
pub use env::TaxiEnv;

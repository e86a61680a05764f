//! Tabular Q-learning agents for the taxi grid world
//!
//! This crate provides:
//! - State encoding for the 500-state taxi problem and its 100-state
//!   navigation sub-problem
//! - Dense and sparse Q-tables behind one interface
//! - A flat ε-greedy Q-learning agent with decaying hyperparameters
//! - Agents that pick up and drop off by rule and learn only to navigate,
//!   either over the full state space or over the reduced sub-problem
//! - An episode driver with observers, and a taxi environment to drive it

pub mod agents;
pub mod app;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod taxi;

pub use agents::{DecomposedAgent, HeuristicAgent};
pub use error::{Error, Result};
pub use ports::{Agent, Environment, Transition};
pub use q_learning::{Decay, Hyperparameters, QLearningAgent};

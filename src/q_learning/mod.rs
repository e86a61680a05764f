//! Tabular Q-learning
//!
//! This module implements the off-policy temporal difference control
//! algorithm the taxi agents are built on:
//!
//! ```text
//! Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
//! ```
//!
//! ## Usage Example
//!
//! ```no_run
//! use taxi_decomp::q_learning::{Decay, Hyperparameters, QLearningAgent};
//!
//! let hyperparameters = Hyperparameters::new(
//!     Decay::new(0.1, 0.99999, 0.01), // alpha: value, decay, min
//!     Decay::constant(1.0),           // gamma
//!     Decay::new(0.1, 0.999, 0.0),    // epsilon
//! );
//!
//! // 500 states, 6 actions, rows allocated on first visit
//! let agent = QLearningAgent::sparse(6, hyperparameters).unwrap().with_seed(7);
//! ```

pub mod agent;
pub mod hyperparameters;
pub mod q_table;

// Public re-exports
pub use agent::QLearningAgent;
pub use hyperparameters::{Decay, Hyperparameters};
pub use q_table::{DenseQTable, QTable, SparseQTable};

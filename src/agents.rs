//! Taxi agents built on the flat Q-learning agent
//!
//! - [`HeuristicAgent`]: picks up and drops off by rule, learns only movement
//!   over the full 500-state problem.
//! - [`DecomposedAgent`]: same rules, but movement is learned on the
//!   100-state navigation sub-problem.

pub mod decomposed;
pub mod heuristic;

pub use decomposed::{DEFAULT_STEP_COST, DEFAULT_TERMINAL_BONUS, DecomposedAgent};
pub use heuristic::{HeuristicAgent, can_drop_off, can_pick_up, forced_action};

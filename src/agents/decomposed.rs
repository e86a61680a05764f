//! Decomposed agent: rules for pickup/dropoff, Q-learning for navigation
//!
//! The full problem has 500 states and 6 actions. Pickup and dropoff are
//! handled by rule, and the remaining decision is always the same one: drive
//! to a landmark. Which landmark depends only on whether the passenger is
//! aboard, so the navigator sees `(taxi row, taxi col, effective
//! destination)`, 100 states over the 4 movement actions. It never observes
//! whether the passenger is aboard.
//!
//! Experience is rewritten before it reaches the navigator:
//!
//! | full-problem transition                   | navigator sees             |
//! |-------------------------------------------|----------------------------|
//! | action is pickup/dropoff                  | nothing                    |
//! | next state allows pickup or dropoff       | `terminal_bonus`, done     |
//! | anything else                             | `step_cost`, not done      |

use crate::{
    Error, Result,
    agents::heuristic::forced_action,
    ports::{Agent, Transition},
    q_learning::{DenseQTable, Hyperparameters, QLearningAgent},
    taxi::{Action, NUM_NAVIGATION_ACTIONS, NUM_SUB_STATES, TaxiState},
};

/// Navigator reward for reaching a square where pickup or dropoff is legal
pub const DEFAULT_TERMINAL_BONUS: f64 = 20.0;

/// Navigator reward for every other move
pub const DEFAULT_STEP_COST: f64 = -1.0;

#[derive(Debug, Clone)]
pub struct DecomposedAgent {
    navigator: QLearningAgent<DenseQTable>,
    terminal_bonus: f64,
    step_cost: f64,
}

impl DecomposedAgent {
    pub fn new(hyperparameters: Hyperparameters) -> Result<Self> {
        let navigator =
            QLearningAgent::dense(NUM_SUB_STATES, NUM_NAVIGATION_ACTIONS, hyperparameters)?
                .with_name("Decomposed Q-Learning");
        Ok(Self {
            navigator,
            terminal_bonus: DEFAULT_TERMINAL_BONUS,
            step_cost: DEFAULT_STEP_COST,
        })
    }

    pub fn with_rewards(mut self, terminal_bonus: f64, step_cost: f64) -> Self {
        self.terminal_bonus = terminal_bonus;
        self.step_cost = step_cost;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.navigator = self.navigator.with_seed(seed);
        self
    }

    /// The embedded navigation agent
    pub fn navigator(&self) -> &QLearningAgent<DenseQTable> {
        &self.navigator
    }

    pub fn terminal_bonus(&self) -> f64 {
        self.terminal_bonus
    }

    pub fn step_cost(&self) -> f64 {
        self.step_cost
    }

    /// Project a full state onto the navigation sub-problem
    pub fn transform_state(&self, state: usize) -> Result<usize> {
        Ok(TaxiState::decode(state)?.sub_state().encode())
    }

    /// Movement actions map to themselves; pickup and dropoff have no
    /// counterpart in the sub-problem.
    pub fn transform_action(&self, action: usize) -> Result<usize> {
        if Action::from_index(action)?.is_navigation() {
            Ok(action)
        } else {
            Err(Error::HeuristicAction { action })
        }
    }

    /// The navigator's view of a full-problem transition, or `None` if the
    /// transition was a pickup or dropoff.
    pub fn transform_transition(&self, transition: &Transition) -> Result<Option<Transition>> {
        if !Action::from_index(transition.action)?.is_navigation() {
            return Ok(None);
        }

        let next = TaxiState::decode(transition.next_state)?;
        let (reward, done) = if forced_action(&next).is_some() {
            (self.terminal_bonus, true)
        } else {
            (self.step_cost, false)
        };

        Ok(Some(Transition {
            state: self.transform_state(transition.state)?,
            action: self.transform_action(transition.action)?,
            reward,
            next_state: next.sub_state().encode(),
            done,
        }))
    }
}

impl Agent for DecomposedAgent {
    fn select_action(&mut self, state: usize) -> Result<usize> {
        let decoded = TaxiState::decode(state)?;
        match forced_action(&decoded) {
            Some(action) => Ok(action.index()),
            None => self.navigator.select_action(decoded.sub_state().encode()),
        }
    }

    fn step(&mut self, transition: &Transition) -> Result<()> {
        match self.transform_transition(transition)? {
            Some(sub_transition) => self.navigator.step(&sub_transition),
            None => Ok(()),
        }
    }

    fn greedy_action(&self, state: usize) -> Result<usize> {
        let decoded = TaxiState::decode(state)?;
        match forced_action(&decoded) {
            Some(action) => Ok(action.index()),
            None => self.navigator.greedy_action(decoded.sub_state().encode()),
        }
    }

    fn hyperparameters(&self) -> Hyperparameters {
        self.navigator.hyperparameters()
    }

    fn name(&self) -> &str {
        Agent::name(&self.navigator)
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.navigator.set_rng_seed(seed);
    }
}

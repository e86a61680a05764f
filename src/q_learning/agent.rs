//! Flat Q-learning agent
//!
//! The agent owns its Q-table and hyperparameters. It optionally restricts
//! itself to a subset of the table's actions: only those are ever chosen by
//! the policy or considered in the bootstrap maximum.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Error, Result,
    ports::{Agent, Transition},
    q_learning::{
        hyperparameters::Hyperparameters,
        q_table::{DenseQTable, QTable, SparseQTable},
    },
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Q-learning agent (off-policy TD control)
///
/// Learns by moving Q(s, a) toward `r + γ max_a' Q(s', a')` after every
/// transition, then decays α, γ and ε.
///
/// The bootstrap term is always added, also when the transition ended the
/// episode; callers that want terminal states to be worth nothing have to
/// shape the reward accordingly.
#[derive(Debug, Clone)]
pub struct QLearningAgent<T: QTable> {
    name: String,
    q_table: T,
    hyperparameters: Hyperparameters,
    actions: Vec<usize>,
    rng: StdRng,
}

impl QLearningAgent<DenseQTable> {
    /// Agent backed by a preallocated `num_states × num_actions` table
    pub fn dense(
        num_states: usize,
        num_actions: usize,
        hyperparameters: Hyperparameters,
    ) -> Result<Self> {
        Self::new(DenseQTable::new(num_states, num_actions), hyperparameters)
    }
}

impl QLearningAgent<SparseQTable> {
    /// Agent backed by a table that grows with the visited states
    pub fn sparse(num_actions: usize, hyperparameters: Hyperparameters) -> Result<Self> {
        Self::new(SparseQTable::new(num_actions), hyperparameters)
    }
}

impl<T: QTable> QLearningAgent<T> {
    /// Create a new Q-learning agent acting over every action of the table
    pub fn new(q_table: T, hyperparameters: Hyperparameters) -> Result<Self> {
        hyperparameters.validate()?;
        if q_table.num_actions() == 0 {
            return Err(Error::NoActionsAvailable);
        }
        tracing::info!(
            alpha = hyperparameters.alpha.value,
            alpha_decay = hyperparameters.alpha.decay,
            alpha_min = hyperparameters.alpha.min,
            gamma = hyperparameters.gamma.value,
            gamma_decay = hyperparameters.gamma.decay,
            gamma_min = hyperparameters.gamma.min,
            epsilon = hyperparameters.epsilon.value,
            epsilon_decay = hyperparameters.epsilon.decay,
            epsilon_min = hyperparameters.epsilon.min,
            "created Q-learning agent"
        );
        Ok(Self {
            name: "Q-Learning".to_string(),
            actions: (0..q_table.num_actions()).collect(),
            q_table,
            hyperparameters,
            rng: build_rng(None),
        })
    }

    /// Restrict the policy and the bootstrap maximum to `actions`
    pub fn with_actions(mut self, actions: Vec<usize>) -> Result<Self> {
        if actions.is_empty() {
            return Err(Error::NoActionsAvailable);
        }
        for &action in &actions {
            self.check_action(action)?;
        }
        self.actions = actions;
        Ok(self)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn q_table(&self) -> &T {
        &self.q_table
    }

    pub fn actions(&self) -> &[usize] {
        &self.actions
    }

    pub fn hyperparameters(&self) -> Hyperparameters {
        self.hyperparameters
    }

    /// ε-greedy action selection
    pub fn select_action(&mut self, state: usize) -> Result<usize> {
        self.check_state(state)?;
        if self.rng.random::<f64>() < self.hyperparameters.epsilon.value {
            // Explore: random action
            self.actions
                .choose(&mut self.rng)
                .copied()
                .ok_or(Error::NoActionsAvailable)
        } else {
            // Exploit: greedy action based on Q-values
            self.greedy_action(state)
        }
    }

    /// Highest-valued allowed action, lowest index on ties
    pub fn greedy_action(&self, state: usize) -> Result<usize> {
        self.check_state(state)?;
        self.q_table
            .greedy_action(state, &self.actions)
            .ok_or(Error::NoActionsAvailable)
    }

    /// Q-learning update followed by hyperparameter decay
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    pub fn step(&mut self, transition: &Transition) -> Result<()> {
        let Transition {
            state,
            action,
            reward,
            next_state,
            ..
        } = *transition;
        self.check_state(state)?;
        self.check_state(next_state)?;
        self.check_action(action)?;

        let Hyperparameters { alpha, gamma, .. } = self.hyperparameters;
        let current_q = self.q_table.get(state, action);
        let max_next_q = self.q_table.max_q(next_state, &self.actions);
        let td_target = reward + gamma.value * max_next_q;
        let td_error = td_target - current_q;
        self.q_table.update(state, action, alpha.value * td_error);

        self.hyperparameters = self.hyperparameters.decayed();
        Ok(())
    }

    fn check_state(&self, state: usize) -> Result<()> {
        if self.q_table.contains_state(state) {
            Ok(())
        } else {
            Err(Error::StateOutOfRange {
                state,
                limit: self.q_table.stored_states(),
            })
        }
    }

    fn check_action(&self, action: usize) -> Result<()> {
        let limit = self.q_table.num_actions();
        if action < limit {
            Ok(())
        } else {
            Err(Error::ActionOutOfRange { action, limit })
        }
    }
}

impl<T: QTable> Agent for QLearningAgent<T> {
    fn select_action(&mut self, state: usize) -> Result<usize> {
        QLearningAgent::select_action(self, state)
    }

    fn step(&mut self, transition: &Transition) -> Result<()> {
        QLearningAgent::step(self, transition)
    }

    fn greedy_action(&self, state: usize) -> Result<usize> {
        QLearningAgent::greedy_action(self, state)
    }

    fn hyperparameters(&self) -> Hyperparameters {
        self.hyperparameters
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = build_rng(Some(seed));
    }
}

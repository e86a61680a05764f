//! Q-table implementations for temporal difference learning
//!
//! Two layouts share the [`QTable`] interface:
//!
//! - [`DenseQTable`]: a flat `states × actions` array, for small state spaces
//!   that are known up front (the 100-state navigation sub-problem).
//! - [`SparseQTable`]: rows allocated on first update, for state spaces that
//!   are discovered while visiting (the 500-state full problem).
//!
//! Both read unseen entries as `0.0`. Reading never allocates.

use std::{borrow::Cow, collections::HashMap};

/// Mapping from (state, action) to an estimated return
pub trait QTable: Send {
    /// Width of every row
    fn num_actions(&self) -> usize;

    /// Whether the table can hold the given state
    fn contains_state(&self, state: usize) -> bool;

    /// All action values for a state, zeros if the state was never updated
    fn row(&self, state: usize) -> Cow<'_, [f64]>;

    /// Add `delta` to the value of (state, action) in place
    fn update(&mut self, state: usize, action: usize, delta: f64);

    /// Number of rows physically stored
    fn stored_states(&self) -> usize;

    /// Get Q-value for a state-action pair
    fn get(&self, state: usize, action: usize) -> f64 {
        self.row(state)[action]
    }

    /// Get maximum Q-value over the given actions
    fn max_q(&self, state: usize, actions: &[usize]) -> f64 {
        let row = self.row(state);
        actions
            .iter()
            .map(|&action| row[action])
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Highest-valued action among `actions`, first one wins on ties
    fn greedy_action(&self, state: usize, actions: &[usize]) -> Option<usize> {
        let row = self.row(state);
        let mut best: Option<(usize, f64)> = None;
        for &action in actions {
            let value = row[action];
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((action, value)),
            }
        }
        best.map(|(action, _)| action)
    }
}

/// Fixed-size table over a fully enumerable state space
#[derive(Debug, Clone, PartialEq)]
pub struct DenseQTable {
    values: Vec<f64>,
    num_states: usize,
    num_actions: usize,
}

impl DenseQTable {
    pub fn new(num_states: usize, num_actions: usize) -> Self {
        Self {
            values: vec![0.0; num_states * num_actions],
            num_states,
            num_actions,
        }
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    fn offset(&self, state: usize) -> usize {
        state * self.num_actions
    }
}

impl QTable for DenseQTable {
    fn num_actions(&self) -> usize {
        self.num_actions
    }

    fn contains_state(&self, state: usize) -> bool {
        state < self.num_states
    }

    fn row(&self, state: usize) -> Cow<'_, [f64]> {
        let start = self.offset(state);
        Cow::Borrowed(&self.values[start..start + self.num_actions])
    }

    fn update(&mut self, state: usize, action: usize, delta: f64) {
        let index = self.offset(state) + action;
        self.values[index] += delta;
    }

    fn stored_states(&self) -> usize {
        self.num_states
    }
}

/// Lazily populated table keyed by visited states
#[derive(Debug, Clone, PartialEq)]
pub struct SparseQTable {
    rows: HashMap<usize, Vec<f64>>,
    num_actions: usize,
}

impl SparseQTable {
    pub fn new(num_actions: usize) -> Self {
        Self {
            rows: HashMap::new(),
            num_actions,
        }
    }
}

impl QTable for SparseQTable {
    fn num_actions(&self) -> usize {
        self.num_actions
    }

    fn contains_state(&self, _state: usize) -> bool {
        true
    }

    fn row(&self, state: usize) -> Cow<'_, [f64]> {
        match self.rows.get(&state) {
            Some(row) => Cow::Borrowed(row.as_slice()),
            None => Cow::Owned(vec![0.0; self.num_actions]),
        }
    }

    fn update(&mut self, state: usize, action: usize, delta: f64) {
        let num_actions = self.num_actions;
        let row = self
            .rows
            .entry(state)
            .or_insert_with(|| vec![0.0; num_actions]);
        row[action] += delta;
    }

    fn stored_states(&self) -> usize {
        self.rows.len()
    }
}

//! Pickup/dropoff rules and the agent that applies them over a flat Q-table

use crate::{
    Result,
    ports::{Agent, Transition},
    q_learning::{Hyperparameters, QLearningAgent, SparseQTable},
    taxi::{Action, NUM_ACTIONS, NUM_NAVIGATION_ACTIONS, TaxiState},
};

/// Whether picking up is legal in the given full state
pub fn can_pick_up(state: usize) -> Result<bool> {
    Ok(TaxiState::decode(state)?.can_pick_up())
}

/// Whether dropping off is legal in the given full state
pub fn can_drop_off(state: usize) -> Result<bool> {
    Ok(TaxiState::decode(state)?.can_drop_off())
}

/// The action the rules dictate, if any: pickup takes precedence over dropoff
pub fn forced_action(state: &TaxiState) -> Option<Action> {
    if state.can_pick_up() {
        Some(Action::Pickup)
    } else if state.can_drop_off() {
        Some(Action::Dropoff)
    } else {
        None
    }
}

pub(crate) fn navigation_actions() -> Vec<usize> {
    (0..NUM_NAVIGATION_ACTIONS).collect()
}

/// Flat Q-learning with hard-coded pickup and dropoff
///
/// Whenever pickup or dropoff is legal the agent takes it, so it never pays
/// the penalty for an illegal attempt. Everywhere else it follows an ε-greedy
/// policy over the four movement actions of a sparse 6-action table; the
/// pickup/dropoff columns are never chosen, learned or bootstrapped from.
#[derive(Debug, Clone)]
pub struct HeuristicAgent {
    inner: QLearningAgent<SparseQTable>,
}

impl HeuristicAgent {
    pub fn new(hyperparameters: Hyperparameters) -> Result<Self> {
        let inner = QLearningAgent::sparse(NUM_ACTIONS, hyperparameters)?
            .with_actions(navigation_actions())?
            .with_name("Heuristic Q-Learning");
        Ok(Self { inner })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.inner = self.inner.with_seed(seed);
        self
    }

    pub fn q_table(&self) -> &SparseQTable {
        self.inner.q_table()
    }
}

impl Agent for HeuristicAgent {
    fn select_action(&mut self, state: usize) -> Result<usize> {
        match forced_action(&TaxiState::decode(state)?) {
            Some(action) => Ok(action.index()),
            None => self.inner.select_action(state),
        }
    }

    fn step(&mut self, transition: &Transition) -> Result<()> {
        TaxiState::decode(transition.state)?;
        TaxiState::decode(transition.next_state)?;
        if !Action::from_index(transition.action)?.is_navigation() {
            return Ok(());
        }
        self.inner.step(transition)
    }

    fn greedy_action(&self, state: usize) -> Result<usize> {
        match forced_action(&TaxiState::decode(state)?) {
            Some(action) => Ok(action.index()),
            None => self.inner.greedy_action(state),
        }
    }

    fn hyperparameters(&self) -> Hyperparameters {
        self.inner.hyperparameters()
    }

    fn name(&self) -> &str {
        Agent::name(&self.inner)
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.inner.set_rng_seed(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Error,
        q_learning::{Decay, QTable},
        taxi::{LOCATIONS, PASSENGER_IN_TAXI, Position},
    };

    fn exploring() -> Hyperparameters {
        Hyperparameters::new(
            Decay::constant(0.5),
            Decay::constant(1.0),
            Decay::constant(1.0),
        )
    }

    fn encode(row: usize, col: usize, passenger: usize, destination: usize) -> usize {
        TaxiState::new(Position::new(row, col), passenger, destination)
            .unwrap()
            .encode()
    }

    #[test]
    fn test_forced_pickup_in_state_zero() {
        let mut agent = HeuristicAgent::new(exploring()).unwrap().with_seed(5);
        for _ in 0..20 {
            assert_eq!(agent.select_action(0).unwrap(), Action::Pickup.index());
        }
    }

    #[test]
    fn test_forced_dropoff_at_destination() {
        let state = encode(LOCATIONS[3].row, LOCATIONS[3].col, PASSENGER_IN_TAXI, 3);
        assert!(can_drop_off(state).unwrap());
        let mut agent = HeuristicAgent::new(exploring()).unwrap().with_seed(5);
        assert_eq!(agent.select_action(state).unwrap(), Action::Dropoff.index());
        assert_eq!(agent.greedy_action(state).unwrap(), Action::Dropoff.index());
    }

    #[test]
    fn test_learned_policy_never_picks_heuristic_actions() {
        let mut agent = HeuristicAgent::new(exploring()).unwrap().with_seed(9);
        let state = encode(2, 2, 0, 1);
        for _ in 0..300 {
            let action = agent.select_action(state).unwrap();
            assert!(action < NUM_NAVIGATION_ACTIONS);
        }
    }

    #[test]
    fn test_heuristic_actions_are_not_learned() {
        let mut agent = HeuristicAgent::new(exploring()).unwrap();
        agent.step(&Transition::new(0, 4, -10.0, 16, false)).unwrap();
        agent.step(&Transition::new(16, 5, -10.0, 16, false)).unwrap();
        assert_eq!(agent.q_table().stored_states(), 0);
        assert_eq!(agent.hyperparameters(), exploring());
    }

    #[test]
    fn test_navigation_is_learned() {
        let mut agent = HeuristicAgent::new(exploring()).unwrap();
        let state = encode(2, 2, 0, 1);
        let next = encode(1, 2, 0, 1);
        agent.step(&Transition::new(state, 1, -1.0, next, false)).unwrap();
        assert!((agent.q_table().get(state, 1) + 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_step_rejects_invalid_states() {
        let mut agent = HeuristicAgent::new(Hyperparameters::default()).unwrap();
        assert!(matches!(
            agent.step(&Transition::new(10_000, 0, -1.0, 123_456, false)),
            Err(Error::StateOutOfRange { state: 10_000, limit: 500 })
        ));
        assert!(matches!(
            agent.step(&Transition::new(16, 0, -1.0, 500, false)),
            Err(Error::StateOutOfRange { state: 500, .. })
        ));
        assert!(matches!(
            agent.step(&Transition::new(16, 4, -10.0, 700, false)),
            Err(Error::StateOutOfRange { state: 700, .. })
        ));
        assert_eq!(agent.q_table().stored_states(), 0);
        assert_eq!(agent.hyperparameters(), Hyperparameters::default());
    }

    #[test]
    fn test_rule_helpers_reject_invalid_states() {
        assert!(can_pick_up(500).is_err());
        assert!(can_drop_off(usize::MAX).is_err());
    }
}

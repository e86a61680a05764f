//! Agent port - abstraction over the different taxi agents

use crate::{Result, q_learning::Hyperparameters};

/// One environment interaction as seen by an agent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub state: usize,
    pub action: usize,
    pub reward: f64,
    pub next_state: usize,
    pub done: bool,
}

impl Transition {
    pub fn new(state: usize, action: usize, reward: f64, next_state: usize, done: bool) -> Self {
        Self {
            state,
            action,
            reward,
            next_state,
            done,
        }
    }
}

/// Agent trait - unified interface for the flat, heuristic and decomposed agents
///
/// The episode driver calls [`Agent::select_action`] and then, once the
/// environment has answered, [`Agent::step`] with the full transition.
///
/// # Examples
///
/// ```no_run
/// use taxi_decomp::ports::{Agent, Environment, Transition};
///
/// fn run_episode(env: &mut dyn Environment, agent: &mut dyn Agent) -> taxi_decomp::Result<f64> {
///     let mut state = env.reset();
///     let mut total = 0.0;
///     loop {
///         let action = agent.select_action(state)?;
///         let outcome = env.step(action)?;
///         agent.step(&Transition::new(state, action, outcome.reward, outcome.next_state, outcome.done))?;
///         total += outcome.reward;
///         state = outcome.next_state;
///         if outcome.done {
///             return Ok(total);
///         }
///     }
/// }
/// ```
pub trait Agent: Send {
    /// Choose an action for the given state using the behaviour policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the state is outside the agent's state space.
    fn select_action(&mut self, state: usize) -> Result<usize>;

    /// Learn from a completed transition.
    fn step(&mut self, transition: &Transition) -> Result<()>;

    /// Choose an action with exploration switched off.
    fn greedy_action(&self, state: usize) -> Result<usize>;

    /// Current hyperparameters, read from whichever component owns them.
    fn hyperparameters(&self) -> Hyperparameters;

    /// Get the agent's name.
    fn name(&self) -> &str;

    /// Seed the agent's internal random number generator.
    ///
    /// # Default Implementation
    ///
    /// Does nothing, for agents without randomness.
    fn set_rng_seed(&mut self, _seed: u64) {}
}

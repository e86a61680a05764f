//! Construction of agents from an [`AgentConfig`].

use super::config::{AgentConfig, AgentKind};
use crate::{
    Result,
    agents::{DecomposedAgent, HeuristicAgent},
    ports::Agent,
    q_learning::QLearningAgent,
    taxi::{NUM_ACTIONS, NUM_STATES},
};

/// Build the agent described by `config`, seeded if the config has a seed.
pub fn create_agent(config: &AgentConfig) -> Result<Box<dyn Agent>> {
    config.validate()?;
    let hyperparameters = config.hyperparameters();

    let mut agent: Box<dyn Agent> = match config.kind {
        AgentKind::Flat => Box::new(QLearningAgent::dense(
            NUM_STATES,
            NUM_ACTIONS,
            hyperparameters,
        )?),
        AgentKind::Heuristic => Box::new(HeuristicAgent::new(hyperparameters)?),
        AgentKind::Decomposed => Box::new(
            DecomposedAgent::new(hyperparameters)?
                .with_rewards(config.terminal_bonus, config.step_cost),
        ),
    };

    if let Some(seed) = config.seed {
        agent.set_rng_seed(seed);
    }
    Ok(agent)
}

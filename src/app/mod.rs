//! Application layer: agent configuration and construction.
//!
//! The CLI and tests describe an agent with an [`AgentConfig`] and obtain a
//! boxed [`Agent`](crate::ports::Agent) from [`create_agent`].
//!
//! ```
//! use taxi_decomp::app::{AgentConfig, AgentKind, create_agent};
//!
//! let config = AgentConfig::new(AgentKind::Decomposed).with_seed(42);
//! let agent = create_agent(&config)?;
//! assert_eq!(agent.name(), "Decomposed Q-Learning");
//! # Ok::<(), taxi_decomp::Error>(())
//! ```

pub mod config;
pub mod factory;

pub use config::{AgentConfig, AgentKind};
pub use factory::create_agent;

//! Ports (trait boundaries) between agents, environments and the driver.
//!
//! Agents only ever see an environment through [`Environment`], and the
//! training pipeline only ever sees an agent through [`Agent`].

pub mod agent;
pub mod environment;
pub mod observer;

pub use agent::{Agent, Transition};
pub use environment::{Environment, StepOutcome};
pub use observer::Observer;

//! Subcommands of the `taxi` binary

pub mod decode;
pub mod train;

//! CLI infrastructure for the taxi toolkit
//!
//! This module provides the command-line interface for training agents and
//! inspecting the state encoding.

pub mod commands;
pub mod output;

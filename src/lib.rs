//! bb-run-bot - build-bot dispatcher
//!
//! Maps a bot id to its build and test steps, formats them into commands and
//! runs them sequentially, reporting step boundaries to buildbot.

pub mod bots;
pub mod cli;
pub mod commands;
pub mod common;
pub mod runner;
pub mod steps;

// Re-export commonly used types for tests
pub use bots::{BotConfig, BotTable, TestSpec};
pub use common::{Error, Result};
pub use steps::Command;

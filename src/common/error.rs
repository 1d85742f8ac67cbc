//! Error types for the bot dispatcher
//!
//! Configuration and resolution failures exit with 1, usage failures with the
//! same code clap uses for bad flags.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Exit code clap uses for usage errors
pub const USAGE_EXIT_CODE: i32 = 2;

/// Main error type for the dispatcher
#[derive(Error, Debug)]
pub enum Error {
    // === Resolution Errors ===
    #[error("config for id=\"{0}\" cannot be inferred.")]
    BotNotFound(String),

    #[error("A bot id must be specified through option or factory_props.")]
    MissingBotId,

    // === Table Construction Errors ===
    #[error("Bot id '{0}' is declared more than once")]
    DuplicateBot(String),

    #[error("Alias '{alias}' refers to '{from_id}', which is not declared before it")]
    UnknownAliasSource { alias: String, from_id: String },

    // === Execution Errors ===
    #[error("Step '{0}' has an empty command")]
    EmptyCommand(String),

    #[error("Failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Cannot shell-quote argument: {0}")]
    Quote(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a spawn error for a program
    pub fn spawn(program: &str, source: io::Error) -> Self {
        Self::Spawn {
            program: program.to_string(),
            source,
        }
    }

    /// Whether this error belongs to the usage layer rather than configuration
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::MissingBotId)
    }

    /// Process exit code reported for this error
    pub fn exit_code(&self) -> i32 {
        if self.is_usage() {
            USAGE_EXIT_CODE
        } else {
            1
        }
    }
}

//! Step commands: formatting, quoting and CI annotations

pub mod annotation;
mod command;
mod quote;

pub use command::{
    BuildProperties, Command, CommandFormatter, PropertyMap, HOST_STEP_NAME, TEST_STEP_NAME,
};
pub use quote::{command_line, quote};

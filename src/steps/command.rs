//! Step commands and their formatting
//!
//! Every command has two argv forms: the shell-wrapped one that runs on a real
//! bot, and the bare one used in testing mode.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

use super::quote::{command_line, quote};
use crate::bots::BotConfig;
use crate::common::config::Scripts;
use crate::common::{Config, Result};

/// Decoded JSON object passed on the command line
pub type PropertyMap = Map<String, Value>;

pub const HOST_STEP_NAME: &str = "Host steps";
pub const TEST_STEP_NAME: &str = "Run tests";

/// Properties handed over by the CI orchestrator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildProperties {
    pub factory: PropertyMap,
    pub build: PropertyMap,
}

/// One unit of work for the execution driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Label for the CI step marker
    pub step_name: Option<String>,
    /// Argv executed on a real bot
    pub command: Vec<String>,
    /// Bare argv executed in testing mode, if the command supports it
    pub testing_command: Option<Vec<String>>,
}

/// Builds the command sequence for a bot
pub struct CommandFormatter<'a> {
    scripts: &'a Scripts,
    default_slave_props: &'a BTreeMap<String, String>,
    src_root: &'a Path,
}

impl<'a> CommandFormatter<'a> {
    pub fn new(config: &'a Config, src_root: &'a Path) -> Self {
        Self {
            scripts: &config.scripts,
            default_slave_props: &config.slave_properties,
            src_root,
        }
    }

    /// Format the host and test commands for `bot`, in that order
    pub fn commands(&self, bot: &BotConfig, props: &BuildProperties) -> Result<Vec<Command>> {
        let mut slave_props = self.default_slave_props.clone();
        slave_props.extend(bot.slave_props.clone());
        let slave_json = serde_json::to_string(&slave_props)?;

        let property_args = vec![
            format!("--factory-properties={}", serde_json::to_string(&props.factory)?),
            format!("--build-properties={}", serde_json::to_string(&props.build)?),
            format!("--slave-properties={}", slave_json),
        ];

        let mut commands = Vec::with_capacity(2);

        if !bot.host_opts.is_empty() {
            let mut host_cmd = vec![self.scripts.host_steps.clone()];
            host_cmd.extend(bot.host_opts.iter().cloned());
            host_cmd.extend(property_args.iter().cloned());
            commands.push(self.wrapped(HOST_STEP_NAME, host_cmd, &slave_json)?);
        }

        if let Some(test_spec) = &bot.test_spec {
            let mut test_cmd = vec![self.scripts.device_steps.clone(), "--reboot".to_string()];
            test_cmd.extend(property_args.iter().cloned());
            for test in &test_spec.tests {
                test_cmd.push("-f".to_string());
                test_cmd.push(test.clone());
            }
            test_cmd.extend(test_spec.extra_args.iter().cloned());
            commands.push(self.wrapped(TEST_STEP_NAME, test_cmd, &slave_json)?);
        }

        Ok(commands)
    }

    /// Wrap `argv` in a shell that sources the buildbot environment first
    fn wrapped(&self, step_name: &str, argv: Vec<String>, slave_json: &str) -> Result<Command> {
        let src_root = self.src_root.to_string_lossy();
        let script = [
            format!(". {}", quote(&self.scripts.functions)?),
            format!(
                "bb_baseline_setup {} --slave-properties={}",
                quote(&src_root)?,
                quote(slave_json)?
            ),
            command_line(&argv)?,
        ]
        .join("; ");

        Ok(Command {
            step_name: Some(step_name.to_string()),
            command: vec![self.scripts.shell.clone(), "-exc".to_string(), script],
            testing_command: Some(argv),
        })
    }
}

//! CLI command handling
//!
//! Resolves the bot, formats its steps and hands them to the runner.

use std::io::Write;

use crate::bots::{BotTable, MatchKind};
use crate::commands::Cli;
use crate::common::{Config, Error, Result};
use crate::runner::{Mode, Runner};
use crate::steps::{BuildProperties, CommandFormatter};

/// Run the bot described by `cli`, writing the CI log to `out`
///
/// Returns the exit code of the first failed step, or 0.
pub fn run<W: Write>(cli: Cli, mut out: W) -> Result<i32> {
    let bot_id = cli.bot_id().ok_or(Error::MissingBotId)?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let src_root = config.src_root()?;

    let table = BotTable::standard()?;
    let resolution = table.resolve(&bot_id)?;
    if resolution.kind == MatchKind::Substring {
        writeln!(
            out,
            "Using config from id=\"{}\" (substring match).",
            resolution.key
        )?;
    }
    writeln!(out, "Using config: {}", serde_json::to_string(resolution.config)?)?;
    tracing::info!(bot_id = %bot_id, config = resolution.key, "Resolved bot");

    let props = BuildProperties {
        factory: cli.factory_properties,
        build: cli.build_properties,
    };
    let commands = CommandFormatter::new(&config, &src_root).commands(resolution.config, &props)?;

    let mode = if cli.testing { Mode::Testing } else { Mode::Normal };
    Runner::new(&src_root, mode, out).run(&commands)
}

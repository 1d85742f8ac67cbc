//! CLI argument definitions
//!
//! Flags follow the buildbot slave conventions: properties arrive as JSON
//! objects and `--TESTING` switches to dry execution.

use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;

use crate::steps::PropertyMap;

/// Factory property that names the bot when `--bot-id` is absent
pub const BOT_ID_PROPERTY: &str = "android_bot_id";

#[derive(Parser, Debug, Clone)]
#[command(name = "bb-run-bot", about = "Run the build and test steps configured for a bot")]
#[command(version, long_about = None)]
pub struct Cli {
    /// Build properties in JSON format
    #[arg(long, value_name = "JSON", value_parser = parse_properties, default_value = "{}")]
    pub build_properties: PropertyMap,

    /// Factory properties in JSON format
    #[arg(long, value_name = "JSON", value_parser = parse_properties, default_value = "{}")]
    pub factory_properties: PropertyMap,

    /// Specify bot id directly
    #[arg(long)]
    pub bot_id: Option<String>,

    /// For testing: run the bare step commands with BUILDBOT_TESTING=1
    #[arg(long = "TESTING")]
    pub testing: bool,

    /// Configuration file (default: <config dir>/bb-run-bot/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Bot id from `--bot-id`, else from the factory properties
    pub fn bot_id(&self) -> Option<String> {
        self.bot_id
            .clone()
            .filter(|id| !id.is_empty())
            .or_else(|| {
                self.factory_properties
                    .get(BOT_ID_PROPERTY)
                    .and_then(Value::as_str)
                    .filter(|id| !id.is_empty())
                    .map(str::to_string)
            })
    }
}

fn parse_properties(s: &str) -> Result<PropertyMap, String> {
    serde_json::from_str(s).map_err(|e| format!("expected a JSON object: {e}"))
}

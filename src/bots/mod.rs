//! Bot configuration table and id resolution

mod config;
mod resolve;
mod table;

pub use config::{BotConfig, TestSpec};
pub use resolve::{MatchKind, Resolution};
pub use table::{BotTable, FLAKINESS_SERVER};

//! Bot id resolution
//!
//! Exact match first. Otherwise every table key that occurs literally inside
//! the requested id is a candidate, and the longest one wins. Among keys of
//! equal length the first declared wins.

use super::config::BotConfig;
use super::table::BotTable;
use crate::common::{Error, Result};

/// How a requested id was matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Substring,
}

/// A resolved bot config
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    /// Table key that matched
    pub key: &'a str,
    pub kind: MatchKind,
    pub config: &'a BotConfig,
}

impl BotTable {
    /// Resolve a caller-supplied bot id
    pub fn resolve(&self, bot_id: &str) -> Result<Resolution<'_>> {
        if let Some(config) = self.get(bot_id) {
            return Ok(Resolution {
                key: &config.bot_id,
                kind: MatchKind::Exact,
                config,
            });
        }

        let mut best: Option<&str> = None;
        for key in self.ids().filter(|key| bot_id.contains(*key)) {
            if best.map_or(true, |b| key.len() > b.len()) {
                best = Some(key);
            }
        }

        let key = best.ok_or_else(|| Error::BotNotFound(bot_id.to_string()))?;
        let config = self
            .get(key)
            .ok_or_else(|| Error::BotNotFound(bot_id.to_string()))?;
        tracing::debug!(requested = bot_id, matched = key, "Substring match");

        Ok(Resolution {
            key,
            kind: MatchKind::Substring,
            config,
        })
    }
}

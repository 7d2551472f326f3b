//! Run-level defaults and the per-raid plan an executor works from.

use serde::{Deserialize, Serialize};

use crate::{CompiledScript, RaidBlock, RaidId, TurnBlock};

/// Fallbacks applied when a raid block does not name a summon or repeat count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunDefaults {
    /// Support summons to try, in preference order.
    pub summons: Vec<String>,
    /// Times to run each raid.
    pub repeat: u32,
}

impl Default for RunDefaults {
    fn default() -> Self {
        Self {
            summons: Vec::new(),
            repeat: 1,
        }
    }
}

/// A raid block with its optional fields resolved against [`RunDefaults`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaidPlan<'a> {
    pub id: RaidId,
    pub url: Option<&'a str>,
    pub summons: Vec<&'a str>,
    pub repeat: u32,
    pub turns: &'a TurnBlock,
}

impl RaidBlock {
    /// Resolve this block for execution. The raid's own summon replaces the
    /// default list entirely; its own repeat count replaces the default count.
    pub fn resolve<'a>(&'a self, id: RaidId, defaults: &'a RunDefaults) -> RaidPlan<'a> {
        let summons = match &self.info.summon {
            Some(summon) => vec![summon.as_str()],
            None => defaults.summons.iter().map(String::as_str).collect(),
        };
        RaidPlan {
            id,
            url: self.info.url.as_deref(),
            summons,
            repeat: self.info.repeat.unwrap_or(defaults.repeat),
            turns: &self.turns,
        }
    }
}

impl CompiledScript {
    /// Resolved plans in raid id order.
    pub fn plans<'a>(&'a self, defaults: &'a RunDefaults) -> Vec<RaidPlan<'a>> {
        self.iter().map(|(id, block)| block.resolve(id, defaults)).collect()
    }
}

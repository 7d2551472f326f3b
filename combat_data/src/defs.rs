use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Party characters that can be selected in a turn (shown in game as 1-4).
pub const CHARACTER_SLOTS: u8 = 4;
/// Skills available per character.
pub const SKILL_SLOTS: u8 = 4;
/// Enemy positions a skill can be aimed at.
pub const TARGET_SLOTS: u8 = 6;
/// Summon slots on the battle screen.
pub const SUMMON_SLOTS: u8 = 6;

/// 1-based raid identifier, assigned in URL-encounter order.
pub type RaidId = usize;
/// 1-based turn number as written in the script.
pub type TurnNumber = u32;

/// Ordered actions keyed by the turn they run on.
pub type TurnBlock = BTreeMap<TurnNumber, Vec<Action>>;

/// One primitive step the executor performs on the battle screen.
///
/// All indices are zero-based; the script language uses the 1-based numbers the
/// game displays and the compiler shifts them down.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    SelectCharacter { index: u8 },
    ChangeCharacter { index: u8 },
    UseSkill { index: u8 },
    /// Aim the skill used immediately before this action.
    Target { index: u8 },
    UseSummon { index: u8 },
    DeselectCharacter,
    Attack,
    EnableFullAuto,
    Wait { seconds: u32 },
    /// Command the compiler does not understand, passed to the executor verbatim.
    Custom { raw_text: String },
}

impl Action {
    /// Stable camelCase tag used by emitters and diagnostics.
    pub fn keyword(&self) -> &'static str {
        match self {
            Action::SelectCharacter { .. } => "selectCharacter",
            Action::ChangeCharacter { .. } => "changeCharacter",
            Action::UseSkill { .. } => "useSkill",
            Action::Target { .. } => "target",
            Action::UseSummon { .. } => "useSummon",
            Action::DeselectCharacter => "deselectCharacter",
            Action::Attack => "attack",
            Action::EnableFullAuto => "enableFullAuto",
            Action::Wait { .. } => "wait",
            Action::Custom { .. } => "custom",
        }
    }

    /// Zero-based slot index carried by indexed actions.
    pub fn index(&self) -> Option<u8> {
        match self {
            Action::SelectCharacter { index }
            | Action::ChangeCharacter { index }
            | Action::UseSkill { index }
            | Action::Target { index }
            | Action::UseSummon { index } => Some(*index),
            _ => None,
        }
    }

    /// Number of slots the index of this action may address.
    pub fn slot_count(&self) -> Option<u8> {
        match self {
            Action::SelectCharacter { .. } | Action::ChangeCharacter { .. } => Some(CHARACTER_SLOTS),
            Action::UseSkill { .. } => Some(SKILL_SLOTS),
            Action::Target { .. } => Some(TARGET_SLOTS),
            Action::UseSummon { .. } => Some(SUMMON_SLOTS),
            _ => None,
        }
    }
}

/// Raid-level metadata collected from `http...`, `summon:` and `repeat:` lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaidInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<u32>,
}

/// A single raid: where to go and what to do on each turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaidBlock {
    pub info: RaidInfo,
    #[serde(default)]
    pub turns: TurnBlock,
}

impl RaidBlock {
    pub fn is_empty(&self) -> bool {
        self.info == RaidInfo::default() && self.turns.is_empty()
    }

    /// Total number of actions across every turn.
    pub fn action_count(&self) -> usize {
        self.turns.values().map(Vec::len).sum()
    }
}

/// Compiled output of a combat script: raid blocks keyed by 1-based id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledScript {
    #[serde(default)]
    pub raids: BTreeMap<RaidId, RaidBlock>,
}

impl CompiledScript {
    /// Id the next pushed raid will receive.
    pub fn next_id(&self) -> RaidId {
        self.raids.len() + 1
    }

    /// Append a raid block, assigning it the next sequential id.
    pub fn push(&mut self, block: RaidBlock) -> RaidId {
        let id = self.next_id();
        self.raids.insert(id, block);
        id
    }

    pub fn get(&self, id: RaidId) -> Option<&RaidBlock> {
        self.raids.get(&id)
    }

    pub fn len(&self) -> usize {
        self.raids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raids.is_empty()
    }

    /// Raid blocks in id order.
    pub fn iter(&self) -> impl Iterator<Item = (RaidId, &RaidBlock)> {
        self.raids.iter().map(|(id, block)| (*id, block))
    }
}

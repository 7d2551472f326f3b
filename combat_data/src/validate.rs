use std::fmt;

use crate::*;

/// Structural problem found in a `CompiledScript`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    RaidIdGap { expected: RaidId, found: RaidId },
    InvalidValue { context: String },
    IndexOutOfRange { kind: &'static str, index: u8, slots: u8, context: String },
    OutOfOrder { kind: &'static str, reason: &'static str, context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::RaidIdGap { expected, found } => {
                write!(f, "raid ids not contiguous: expected {expected}, found {found}")
            },
            ValidationError::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
            ValidationError::IndexOutOfRange {
                kind,
                index,
                slots,
                context,
            } => {
                write!(f, "{kind} index {index} outside 0..{slots} ({context})")
            },
            ValidationError::OutOfOrder { kind, reason, context } => {
                write!(f, "{kind} {reason} ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Unselected,
    Selected,
}

/// Check a script that did not necessarily come from the compiler.
///
/// Every violation is reported, not only the first one.
///
/// ```
/// use combat_data::{Action, CompiledScript, RaidBlock, validate_script};
///
/// let mut block = RaidBlock::default();
/// block.turns.insert(1, vec![Action::SelectCharacter { index: 0 }, Action::UseSkill { index: 2 }]);
/// let mut script = CompiledScript::default();
/// script.push(block);
/// assert!(validate_script(&script).is_empty());
/// ```
pub fn validate_script(script: &CompiledScript) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (expected, found) in (1..).zip(script.raids.keys()) {
        if expected != *found {
            errors.push(ValidationError::RaidIdGap {
                expected,
                found: *found,
            });
            break;
        }
    }

    for (raid, block) in script.iter() {
        if block.info.repeat == Some(0) {
            errors.push(ValidationError::InvalidValue {
                context: format!("raid {raid} repeat count is zero"),
            });
        }
        if block.info.summon.as_deref().is_some_and(|s| s.trim().is_empty()) {
            errors.push(ValidationError::InvalidValue {
                context: format!("raid {raid} summon name is empty"),
            });
        }
        for (turn, actions) in &block.turns {
            if *turn == 0 {
                errors.push(ValidationError::InvalidValue {
                    context: format!("raid {raid} has turn 0"),
                });
            }
            validate_turn(raid, *turn, actions, &mut errors);
        }
    }

    errors
}

fn validate_turn(raid: RaidId, turn: TurnNumber, actions: &[Action], errors: &mut Vec<ValidationError>) {
    let mut selection = Selection::Unselected;
    let mut previous: Option<&Action> = None;

    for (pos, action) in actions.iter().enumerate() {
        let context = || format!("raid {raid}, turn {turn}, action {}", pos + 1);
        if let (Some(index), Some(slots)) = (action.index(), action.slot_count())
            && index >= slots
        {
            errors.push(ValidationError::IndexOutOfRange {
                kind: action.keyword(),
                index,
                slots,
                context: context(),
            });
        }
        let mut out_of_order = |reason: &'static str| {
            errors.push(ValidationError::OutOfOrder {
                kind: action.keyword(),
                reason,
                context: context(),
            });
        };
        match action {
            // merged duplicate turns may select again without a deselect
            Action::SelectCharacter { .. } => selection = Selection::Selected,
            Action::ChangeCharacter { .. } => {
                if selection == Selection::Unselected {
                    out_of_order("with no character selected");
                }
                selection = Selection::Selected;
            },
            Action::UseSkill { .. } => {
                if selection == Selection::Unselected {
                    out_of_order("with no character selected");
                }
            },
            Action::Target { .. } => {
                if !matches!(previous, Some(Action::UseSkill { .. })) {
                    out_of_order("not directly after a skill");
                }
            },
            Action::DeselectCharacter => {
                if selection == Selection::Unselected {
                    out_of_order("with no character selected");
                }
                selection = Selection::Unselected;
            },
            Action::UseSummon { .. } | Action::Attack | Action::EnableFullAuto => {
                selection = Selection::Unselected;
            },
            Action::Wait { .. } | Action::Custom { .. } => {},
        }
        previous = Some(action);
    }
}

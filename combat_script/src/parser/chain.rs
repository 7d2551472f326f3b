//! `character<n>.useskill(<k>).target(<t>)` chains.

use combat_data::{Action, CHARACTER_SLOTS, SKILL_SLOTS, TARGET_SLOTS};
use pest::Parser;
use pest::iterators::Pair;

use super::helpers::slot_index;
use super::turn::Selection;
use super::{DslParser, Rule};
use crate::ScriptErrorKind;

/// Whether a `useskill` is waiting for its optional `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Arming {
    #[default]
    Unarmed,
    Armed,
}

/// Parse one chain line, appending its actions to `out`.
///
/// The first chain in a turn selects its character; later chains change to
/// theirs. Returns the selection state after the line, which is always
/// `Selected`.
pub(super) fn parse_chain(
    text: &str,
    selection: Selection,
    out: &mut Vec<Action>,
) -> Result<Selection, ScriptErrorKind> {
    let chain = DslParser::parse(Rule::character_chain, text)
        .map_err(|_| ScriptErrorKind::MalformedCharacterChain)?
        .next()
        .ok_or(ScriptErrorKind::MalformedCharacterChain)?;
    let mut parts = chain.into_inner();

    let raw = parts.next().ok_or(ScriptErrorKind::MalformedCharacterChain)?.as_str().trim();
    let index = slot_index(raw, CHARACTER_SLOTS).ok_or_else(|| ScriptErrorKind::InvalidCharacterIndex {
        value: raw.to_string(),
    })?;
    out.push(match selection {
        Selection::Unselected => Action::SelectCharacter { index },
        Selection::Selected => Action::ChangeCharacter { index },
    });

    let mut arming = Arming::Unarmed;
    for seg in parts {
        match seg.as_rule() {
            Rule::use_skill => {
                let raw = arg_text(seg);
                let index = slot_index(raw, SKILL_SLOTS).ok_or_else(|| ScriptErrorKind::InvalidSkillIndex {
                    value: raw.to_string(),
                })?;
                out.push(Action::UseSkill { index });
                arming = Arming::Armed;
            },
            Rule::target => {
                if arming != Arming::Armed {
                    return Err(ScriptErrorKind::TargetWithoutSkillArmed);
                }
                let raw = arg_text(seg);
                let index = slot_index(raw, TARGET_SLOTS).ok_or_else(|| ScriptErrorKind::InvalidTargetIndex {
                    value: raw.to_string(),
                })?;
                out.push(Action::Target { index });
                arming = Arming::Unarmed;
            },
            Rule::unknown_segment => {
                return Err(ScriptErrorKind::UnknownChainSegment {
                    segment: seg.as_str().to_string(),
                });
            },
            Rule::EOI => {},
            _ => return Err(ScriptErrorKind::MalformedCharacterChain),
        }
    }

    Ok(Selection::Selected)
}

/// Text between the parentheses of a `useskill(..)` or `target(..)` segment.
fn arg_text<'i>(seg: Pair<'i, Rule>) -> &'i str {
    seg.into_inner().next().map_or("", |arg| arg.as_str().trim())
}

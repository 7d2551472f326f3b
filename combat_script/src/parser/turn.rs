//! `turn N: ... end` blocks.

use combat_data::{Action, RaidId, SUMMON_SLOTS, TurnNumber};
use pest::Parser;

use super::helpers::{LineCursor, first_int, slot_index};
use super::{DslParser, Rule, ScriptLine, chain};
use crate::{CompileError, ScriptErrorKind};

/// Whether a character portrait is open on the battle screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) enum Selection {
    #[default]
    Unselected,
    Selected,
}

pub(super) fn is_turn_header(text: &str) -> bool {
    text.starts_with("turn")
}

/// Parse one turn block. `header` is the already consumed `turn N:` line;
/// body lines are consumed up to and including `end`, or to end of input.
pub(super) fn parse_turn(
    header: &ScriptLine,
    cursor: &mut LineCursor<'_>,
    raid: RaidId,
) -> Result<(TurnNumber, Vec<Action>), CompileError> {
    let turn = parse_turn_number(&header.text)
        .ok_or_else(|| CompileError::at(header, raid, None, ScriptErrorKind::InvalidTurnNumber))?;

    let mut selection = Selection::Unselected;
    let mut actions = Vec::new();
    while let Some(line) = cursor.advance() {
        if line.text == "end" {
            break;
        }
        selection = parse_action_line(&line.text, selection, &mut actions)
            .map_err(|kind| CompileError::at(line, raid, Some(turn), kind))?;
    }
    Ok((turn, actions))
}

fn parse_turn_number(text: &str) -> Option<TurnNumber> {
    let pair = DslParser::parse(Rule::turn_header, text).ok()?.next()?;
    let turn: TurnNumber = first_int(pair)?.parse().ok()?;
    (turn > 0).then_some(turn)
}

/// Dispatch a single body line by keyword.
fn parse_action_line(text: &str, selection: Selection, out: &mut Vec<Action>) -> Result<Selection, ScriptErrorKind> {
    if text.starts_with("character") {
        return chain::parse_chain(text, selection, out);
    }
    if is_wait(text) {
        out.push(parse_wait(text)?);
        return Ok(selection);
    }
    if is_summon(text) {
        let index = parse_summon(text)?;
        if selection == Selection::Selected {
            out.push(Action::DeselectCharacter);
        }
        out.push(Action::UseSummon { index });
        return Ok(Selection::Unselected);
    }
    match text {
        "attack" => {
            out.push(Action::Attack);
            Ok(Selection::Unselected)
        },
        "enablefullauto" => {
            if selection == Selection::Selected {
                out.push(Action::DeselectCharacter);
            }
            out.push(Action::EnableFullAuto);
            Ok(Selection::Unselected)
        },
        _ => {
            out.push(Action::Custom {
                raw_text: text.to_string(),
            });
            Ok(selection)
        },
    }
}

fn is_wait(text: &str) -> bool {
    text.strip_prefix("wait").is_some_and(|rest| rest.trim_start().starts_with('('))
}

fn parse_wait(text: &str) -> Result<Action, ScriptErrorKind> {
    let pair = DslParser::parse(Rule::wait_cmd, text)
        .map_err(|_| ScriptErrorKind::MalformedWait)?
        .next()
        .ok_or(ScriptErrorKind::MalformedWait)?;
    let seconds = first_int(pair)
        .and_then(|raw| raw.parse().ok())
        .ok_or(ScriptErrorKind::MalformedWait)?;
    Ok(Action::Wait { seconds })
}

/// `summon` followed by a digit or `(`; `summon:` and `quicksummon` are not summon commands.
fn is_summon(text: &str) -> bool {
    text.strip_prefix("summon")
        .and_then(|rest| rest.trim_start().chars().next())
        .is_some_and(|c| c.is_ascii_digit() || c == '(')
}

fn parse_summon(text: &str) -> Result<u8, ScriptErrorKind> {
    let invalid = || {
        let value = text["summon".len()..].trim().trim_start_matches('(').trim_end_matches(')');
        ScriptErrorKind::InvalidSummonIndex {
            value: value.trim().to_string(),
        }
    };
    let pair = DslParser::parse(Rule::summon_cmd, text)
        .map_err(|_| invalid())?
        .next()
        .ok_or_else(invalid)?;
    first_int(pair)
        .and_then(|raw| slot_index(raw, SUMMON_SLOTS))
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(texts: &[&str]) -> Result<(TurnNumber, Vec<Action>), CompileError> {
        let lines: Vec<ScriptLine> = texts.iter().enumerate().map(|(i, t)| ScriptLine::new(i + 1, *t)).collect();
        let mut cur = LineCursor::new(&lines);
        let header = cur.advance().expect("header line");
        parse_turn(header, &mut cur, 1)
    }

    #[test]
    fn header_numbers() {
        assert_eq!(parse_turn_number("turn 1:"), Some(1));
        assert_eq!(parse_turn_number("turn 12:"), Some(12));
        assert_eq!(parse_turn_number("turn 3"), Some(3));
        assert_eq!(parse_turn_number("turn0:"), None);
        assert_eq!(parse_turn_number("turn x:"), None);
        assert_eq!(parse_turn_number("turnip"), None);
    }

    #[test]
    fn second_chain_changes_character() {
        let (n, actions) = turn(&["turn 2:", "character1.useskill(1)", "character3.useskill(2)", "end"]).expect("ok");
        assert_eq!(n, 2);
        assert_eq!(
            actions,
            vec![
                Action::SelectCharacter { index: 0 },
                Action::UseSkill { index: 0 },
                Action::ChangeCharacter { index: 2 },
                Action::UseSkill { index: 1 },
            ]
        );
    }

    #[test]
    fn summon_deselects_and_resets_selection() {
        let (_, actions) = turn(&["turn 1:", "character2", "summon3", "character1", "end"]).expect("ok");
        assert_eq!(
            actions,
            vec![
                Action::SelectCharacter { index: 1 },
                Action::DeselectCharacter,
                Action::UseSummon { index: 2 },
                Action::SelectCharacter { index: 0 },
            ]
        );
    }

    #[test]
    fn summon_without_selection_does_not_deselect() {
        let (_, actions) = turn(&["turn 1:", "summon(6)", "end"]).expect("ok");
        assert_eq!(actions, vec![Action::UseSummon { index: 5 }]);
    }

    #[test]
    fn attack_and_full_auto_reset_selection() {
        let (_, actions) = turn(&[
            "turn 4:",
            "character1",
            "attack",
            "character2",
            "enablefullauto",
            "character3",
            "end",
        ])
        .expect("ok");
        assert_eq!(
            actions,
            vec![
                Action::SelectCharacter { index: 0 },
                Action::Attack,
                Action::SelectCharacter { index: 1 },
                Action::DeselectCharacter,
                Action::EnableFullAuto,
                Action::SelectCharacter { index: 2 },
            ]
        );
    }

    #[test]
    fn wait_and_custom_lines() {
        let (_, actions) = turn(&["turn 1:", "wait(10)", "quicksummon", "summon:kaguya", "end"]).expect("ok");
        assert_eq!(
            actions,
            vec![
                Action::Wait { seconds: 10 },
                Action::Custom {
                    raw_text: "quicksummon".into()
                },
                Action::Custom {
                    raw_text: "summon:kaguya".into()
                },
            ]
        );
    }

    #[test]
    fn custom_line_keeps_selection() {
        let (_, actions) = turn(&["turn 1:", "character1", "subback", "character2", "end"]).expect("ok");
        assert_eq!(actions[2], Action::ChangeCharacter { index: 1 });
    }

    #[test]
    fn block_stops_at_end_and_leaves_rest() {
        let lines: Vec<ScriptLine> = ["turn 1:", "attack", "end", "turn 2:"]
            .iter()
            .enumerate()
            .map(|(i, t)| ScriptLine::new(i + 1, *t))
            .collect();
        let mut cur = LineCursor::new(&lines);
        let header = cur.advance().expect("header");
        let (_, actions) = parse_turn(header, &mut cur, 1).expect("ok");
        assert_eq!(actions, vec![Action::Attack]);
        assert_eq!(cur.peek().map(|l| l.text.as_str()), Some("turn 2:"));
    }

    #[test]
    fn unterminated_block_runs_to_end_of_input() {
        let (_, actions) = turn(&["turn 1:", "attack"]).expect("ok");
        assert_eq!(actions, vec![Action::Attack]);
    }

    #[test]
    fn errors_carry_turn_context() {
        let err = turn(&["turn 7:", "wait(1)", "summon7", "end"]).expect_err("bad summon");
        assert_eq!(err.line, 3);
        assert_eq!(err.turn, Some(7));
        assert_eq!(err.kind, ScriptErrorKind::InvalidSummonIndex { value: "7".into() });

        let err = turn(&["turn 1:", "wait(soon)", "end"]).expect_err("bad wait");
        assert_eq!(err.kind, ScriptErrorKind::MalformedWait);

        let err = turn(&["turn x:", "end"]).expect_err("bad header");
        assert_eq!((err.line, err.turn), (1, None));
        assert_eq!(err.kind, ScriptErrorKind::InvalidTurnNumber);
    }
}

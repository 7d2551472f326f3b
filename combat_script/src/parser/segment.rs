//! Top-level driver: splits the script into raid blocks.

use combat_data::{Action, CompiledScript, RaidBlock, RaidId, TurnNumber};
use log::{debug, warn};

use super::ScriptLine;
use super::fields::{take_repeat, take_summon, take_url};
use super::helpers::LineCursor;
use super::turn::{is_turn_header, parse_turn};
use crate::{Compilation, CompileError, CompileOptions, ScriptErrorKind};

/// Compile normalized lines into raid blocks.
///
/// Each cycle tries, in order, a URL, a `summon:` line, a `repeat:` line and
/// a run of turn blocks at the cursor. A URL arriving while the current raid
/// already has one closes that raid first. A cycle that consumes nothing
/// drops the line under the cursor (or fails, in strict mode), so the loop
/// always terminates.
pub(crate) fn segment_raids(lines: &[ScriptLine], options: &CompileOptions) -> Result<Compilation, CompileError> {
    let mut cursor = LineCursor::new(lines);
    let mut script = CompiledScript::default();
    let mut current = RaidBlock::default();
    let mut discarded = Vec::new();

    while !cursor.is_at_end() {
        let start = cursor.position();

        if let Some(url) = take_url(&mut cursor) {
            if current.info.url.is_some() {
                finish_raid(&mut script, &mut current);
            }
            current.info.url = Some(url.text.clone());
        }
        let raid = script.next_id();

        if let Some(summon) = take_summon(&mut cursor).flatten() {
            current.info.summon = Some(summon.to_string());
        }
        if let Some(repeat) = take_repeat(&mut cursor, raid)? {
            current.info.repeat = Some(repeat);
        }
        while let Some(header) = cursor.next_if(is_turn_header) {
            let (turn, actions) = parse_turn(header, &mut cursor, raid)?;
            merge_turn(&mut current, raid, turn, actions);
        }

        if cursor.position() == start {
            let Some(line) = cursor.advance() else { break };
            if options.strict {
                return Err(CompileError::at(line, raid, None, ScriptErrorKind::UnclassifiedLine));
            }
            warn!("line {}: discarding unrecognized line '{}'", line.number, line.text);
            discarded.push(line.clone());
        }
    }
    finish_raid(&mut script, &mut current);

    Ok(Compilation { script, discarded })
}

fn finish_raid(script: &mut CompiledScript, current: &mut RaidBlock) {
    let block = std::mem::take(current);
    let turns = block.turns.len();
    let id = script.push(block);
    debug!("raid {id} finalized with {turns} turn(s)");
}

fn merge_turn(current: &mut RaidBlock, raid: RaidId, turn: TurnNumber, actions: Vec<Action>) {
    let slot = current.turns.entry(turn).or_default();
    if !slot.is_empty() {
        warn!("raid {raid}: turn {turn} appears more than once, appending its actions");
    }
    slot.extend(actions);
}

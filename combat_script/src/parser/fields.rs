//! Raid-info field extractors. Each looks only at the next line and consumes
//! it when it matches.

use combat_data::RaidId;
use log::warn;

use super::ScriptLine;
use super::helpers::LineCursor;
use crate::{CompileError, ScriptErrorKind};

pub(super) fn take_url<'a>(cursor: &mut LineCursor<'a>) -> Option<&'a ScriptLine> {
    cursor.next_if(|text| text.starts_with("http"))
}

/// Summon name after `summon:`. An empty name consumes the line but yields
/// nothing.
pub(super) fn take_summon<'a>(cursor: &mut LineCursor<'a>) -> Option<Option<&'a str>> {
    let line = cursor.next_if(|text| text.starts_with("summon:"))?;
    let name = line.text["summon:".len()..].trim();
    if name.is_empty() {
        warn!("line {}: `summon:` without a summon name, ignoring", line.number);
        return Some(None);
    }
    Some(Some(name))
}

pub(super) fn take_repeat(cursor: &mut LineCursor<'_>, raid: RaidId) -> Result<Option<u32>, CompileError> {
    let Some(line) = cursor.next_if(|text| text.starts_with("repeat:")) else {
        return Ok(None);
    };
    let raw = line.text["repeat:".len()..].trim();
    match raw.parse::<u32>() {
        Ok(count) if count > 0 => Ok(Some(count)),
        _ => Err(CompileError::at(
            line,
            raid,
            None,
            ScriptErrorKind::MalformedRepeatValue { value: raw.to_string() },
        )),
    }
}

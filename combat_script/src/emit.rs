//! Serialized forms of a compiled script.

use combat_data::{Action, CompiledScript, RaidId};
use ron::ser::PrettyConfig;
use thiserror::Error;
use toml_edit::{Array, ArrayOfTables, Document, InlineTable, Item, Table, value};

/// Errors raised while serializing a compiled script.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("ron serialization failed: {0}")]
    Ron(#[from] ron::Error),
    #[error("raid id {id} does not fit in a TOML integer")]
    RaidIdOutOfRange { id: RaidId },
}

/// Emit the script as TOML: one `[[raids]]` table per raid, each with a
/// `[[raids.turns]]` array holding inline action tables.
///
/// # Errors
/// Returns an error if a raid id exceeds the TOML integer range.
pub fn compile_script_to_toml(script: &CompiledScript) -> Result<String, EmitError> {
    Ok(compile_script_to_doc(script)?.to_string())
}

/// Emit the script as pretty-printed RON, which deserializes straight back
/// into a `CompiledScript`.
///
/// # Errors
/// Returns an error if RON serialization fails.
pub fn compile_script_to_ron(script: &CompiledScript) -> Result<String, EmitError> {
    Ok(ron::ser::to_string_pretty(script, PrettyConfig::default())?)
}

fn compile_script_to_doc(script: &CompiledScript) -> Result<Document, EmitError> {
    let mut doc = Document::new();
    let mut raids = ArrayOfTables::new();

    for (id, block) in script.iter() {
        let mut raid = Table::new();
        raid.decor_mut().set_prefix(format!("# raid {id}\n"));
        raid["id"] = value(i64::try_from(id).map_err(|_| EmitError::RaidIdOutOfRange { id })?);
        if let Some(url) = &block.info.url {
            raid["url"] = value(url.clone());
        }
        if let Some(summon) = &block.info.summon {
            raid["summon"] = value(summon.clone());
        }
        if let Some(repeat) = block.info.repeat {
            raid["repeat"] = value(i64::from(repeat));
        }

        let mut turns = ArrayOfTables::new();
        for (turn, actions) in &block.turns {
            let mut t = Table::new();
            t["turn"] = value(i64::from(*turn));
            let mut list = Array::default();
            for action in actions {
                list.push(action_to_value(action));
            }
            t["actions"] = value(list);
            turns.push(t);
        }
        if !turns.is_empty() {
            raid.insert("turns", Item::ArrayOfTables(turns));
        }
        raids.push(raid);
    }

    doc["raids"] = Item::ArrayOfTables(raids);
    Ok(doc)
}

fn action_to_value(action: &Action) -> toml_edit::Value {
    let mut t = InlineTable::new();
    t.insert("type", toml_edit::Value::from(action.keyword()));
    match action {
        Action::SelectCharacter { index }
        | Action::ChangeCharacter { index }
        | Action::UseSkill { index }
        | Action::Target { index }
        | Action::UseSummon { index } => {
            t.insert("index", toml_edit::Value::from(i64::from(*index)));
        },
        Action::Wait { seconds } => {
            t.insert("seconds", toml_edit::Value::from(i64::from(*seconds)));
        },
        Action::Custom { raw_text } => {
            t.insert("text", toml_edit::Value::from(raw_text.clone()));
        },
        Action::DeselectCharacter | Action::Attack | Action::EnableFullAuto => {},
    }
    toml_edit::Value::from(t)
}

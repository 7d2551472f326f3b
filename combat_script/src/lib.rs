//! combat_script: line-oriented DSL and compiler for raid combat scripts.
//!
//! A script lists raids and, inside each raid, numbered turns:
//!
//! ```text
//! https://game.granbluefantasy.jp/#quest/supporter/800021/22
//! summon:kaguya
//! repeat:3
//!
//! turn 1:
//!     character1.useskill(2).target(3)
//!     summon2
//!     attack
//! end
//! ```
//!
//! Compilation runs the lines through a preprocessor (comments, blank lines,
//! case), then a raid segmenter that splits the script on URLs and hands each
//! `turn N:` run to the turn parser. The result is a [`CompiledScript`] from
//! `combat_data`, which is what the raid executor consumes.

mod emit;
mod format;
mod parser;
pub mod settings;

use std::fmt;

use thiserror::Error;

pub use combat_data::{Action, CompiledScript, RaidBlock, RaidId, RaidInfo, RunDefaults, TurnBlock, TurnNumber};
pub use emit::{EmitError, compile_script_to_ron, compile_script_to_toml};
pub use format::render_script;
pub use parser::{ScriptLine, preprocess, preprocess_lines};
pub use settings::{Settings, SettingsError};

/// The constraint a script line violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptErrorKind {
    #[error("character number must be 1-4, got '{value}'")]
    InvalidCharacterIndex { value: String },
    #[error("skill number must be 1-4, got '{value}'")]
    InvalidSkillIndex { value: String },
    #[error("target number must be 1-6, got '{value}'")]
    InvalidTargetIndex { value: String },
    #[error("target(...) must directly follow useskill(...)")]
    TargetWithoutSkillArmed,
    #[error("summon number must be 1-6, got '{value}'")]
    InvalidSummonIndex { value: String },
    #[error("repeat count must be a positive integer, got '{value}'")]
    MalformedRepeatValue { value: String },
    #[error("turn header must be `turn <number>:` with a number of at least 1")]
    InvalidTurnNumber,
    #[error("wait expects whole seconds, e.g. `wait(5)`")]
    MalformedWait,
    #[error("character line must look like `character<n>.useskill(<k>).target(<t>)`")]
    MalformedCharacterChain,
    #[error("unknown chained command '{segment}'")]
    UnknownChainSegment { segment: String },
    #[error("line is not a url, summon:, repeat: or turn line")]
    UnclassifiedLine,
}

/// A fatal compile error, located at the offending source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    /// 1-based line number in the original source.
    pub line: usize,
    /// Normalized text of the offending line.
    pub text: String,
    /// Raid block being built when the error occurred.
    pub raid: RaidId,
    /// Turn being parsed, if the error happened inside a turn block.
    pub turn: Option<TurnNumber>,
    /// Constraint the line violated.
    pub kind: ScriptErrorKind,
}

impl CompileError {
    pub(crate) fn at(line: &ScriptLine, raid: RaidId, turn: Option<TurnNumber>, kind: ScriptErrorKind) -> Self {
        Self {
            line: line.number,
            text: line.text.clone(),
            raid,
            turn,
            kind,
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.turn {
            Some(turn) => write!(f, "line {} (raid {}, turn {turn}): {}: '{}'", self.line, self.raid, self.kind, self.text),
            None => write!(f, "line {} (raid {}): {}: '{}'", self.line, self.raid, self.kind, self.text),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

/// Knobs for a single compile call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Fail on top-level lines that match no field or block instead of
    /// dropping them with a warning.
    pub strict: bool,
}

/// A successful compile: the script plus the lines that were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compilation {
    pub script: CompiledScript,
    /// Top-level lines that matched nothing (always empty in strict mode).
    pub discarded: Vec<ScriptLine>,
}

/// Reusable compiler front end carrying its options.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> CompileOptions {
        self.options
    }

    /// Compile raw script text.
    ///
    /// # Errors
    /// Returns the first validation failure; no partial script is produced.
    pub fn compile(&self, source: &str) -> Result<Compilation, CompileError> {
        compile_lines(&preprocess(source), &self.options)
    }
}

/// Compile raw script text with default (lenient) options.
///
/// # Errors
/// Returns the first validation failure; no partial script is produced.
pub fn compile_script(source: &str) -> Result<CompiledScript, CompileError> {
    Compiler::default().compile(source).map(|c| c.script)
}

/// Compile lines that have already been through [`preprocess`].
///
/// # Errors
/// Returns the first validation failure, or `UnclassifiedLine` in strict mode.
pub fn compile_lines(lines: &[ScriptLine], options: &CompileOptions) -> Result<Compilation, CompileError> {
    parser::segment_raids(lines, options)
}

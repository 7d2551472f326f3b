//! Parser for the combat script DSL.
//!
//! The script is line oriented: [`preprocess`] normalizes the raw text, the
//! raid segmenter walks the lines with a [`LineCursor`](helpers::LineCursor),
//! and individual action lines are matched against the Pest grammar in
//! `grammar.pest`.

use pest_derive::Parser as PestParser;

mod chain;
mod fields;
mod helpers;
mod preprocess;
mod segment;
mod turn;

pub use preprocess::{ScriptLine, preprocess, preprocess_lines};
pub(crate) use segment::segment_raids;

#[derive(PestParser)]
#[grammar = "src/grammar.pest"]
struct DslParser;

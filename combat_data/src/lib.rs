//! Shared data model for compiled combat scripts.

pub mod defs;
pub mod plan;
pub mod validate;

pub use defs::*;
pub use plan::{RaidPlan, RunDefaults};
pub use validate::{ValidationError, validate_script};

//! Case script domain module.
//!
//! A case script is the static, authored definition of one hearing: its
//! ordered turns, decision options, scoring inputs, and verdict narrative.
//! Scripts are read-only input to the engine and are validated structurally
//! once, at load time.

mod script;
mod turn;

pub use script::{CaseMode, CaseScript};
pub use turn::{ChoiceOption, StrengthTag, Turn, TurnType};

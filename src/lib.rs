//! Conway's Game of Life on an unbounded plane.
//!
//! [`SparseGrid`] stores only live cells and the neighbour counts of the cells
//! around them; [`Automaton`] advances it one generation at a time. The `gui`
//! module is an egui viewer built on top of that public API.

mod automaton;
mod error;
mod grid;
pub mod gui;
mod utils;

pub use automaton::{Automaton, StepSummary};
pub use error::{GridError, PatternError};
pub use grid::{Cell, SparseGrid};
pub use gui::{App, Config};
pub use utils::{parse_rle, patterns, NiceInt, Pattern, MAX_PATTERN_AREA, PATTERNS};

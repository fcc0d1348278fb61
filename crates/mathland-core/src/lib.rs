//! Sudoku engine: board representation, backtracking solver,
//! diagonal-seeded generation, puzzle carving, and an interactive
//! session state machine that tracks per-blank correctness.
//!
//! The crate is pure and display-agnostic; presentation adapters
//! consume it through [`Generator`] and [`Session`].

mod board;
mod generator;
mod session;
mod solver;

pub use board::{Board, Position};
pub use generator::{Difficulty, GeneratedSudoku, Generator, MAX_CARVE_ATTEMPTS};
pub use session::{Blank, CompletionNotifier, Entry, EntryState, Session};
pub use solver::Solver;

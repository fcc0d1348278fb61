use crate::{Board, Position};

/// Recursive backtracking solver. Stateless; all state is per-call.
pub struct Solver;

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Create a new solver.
    pub fn new() -> Self {
        Self
    }

    /// Solve the board, returning the completed copy if a solution exists.
    pub fn solve(&self, board: &Board) -> Option<Board> {
        let mut working = *board;
        if self.solve_in_place(&mut working) {
            Some(working)
        } else {
            None
        }
    }

    /// Solve the board in place.
    ///
    /// Scans cells in row-major order and tries digits 1..=9 ascending
    /// at the first empty cell, recursing on each valid placement and
    /// resetting the cell on failure. Digit order is fixed, so the
    /// completion reached from a given partial board is reproducible.
    ///
    /// On success the board is fully solved; on failure it is restored
    /// to its pre-call state.
    pub fn solve_in_place(&self, board: &mut Board) -> bool {
        let pos = match board.first_empty() {
            Some(pos) => pos,
            None => return true,
        };

        for num in 1..=9 {
            if board.is_valid_placement(pos, num) {
                board.set(pos, num);
                if self.solve_in_place(board) {
                    return true;
                }
                board.set(pos, 0);
            }
        }

        false
    }
}

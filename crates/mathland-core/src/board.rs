use serde::{Deserialize, Serialize};

/// A cell coordinate on the 9x9 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(row: usize, col: usize) -> Self {
        debug_assert!(row < 9 && col < 9);
        Self { row, col }
    }

    /// Top-left corner of the 3x3 box containing this position.
    pub fn box_origin(&self) -> Position {
        Position::new((self.row / 3) * 3, (self.col / 3) * 3)
    }

    /// Box index 0-8, left to right then top to bottom.
    pub fn box_index(&self) -> usize {
        (self.row / 3) * 3 + self.col / 3
    }

    /// Iterate over all 81 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..9).flat_map(|row| (0..9).map(move |col| Position::new(row, col)))
    }
}

/// A 9x9 grid of digits 0-9 where 0 denotes an empty cell.
///
/// Serializes as a row-major 9x9 array, matching the wire shape a
/// rendering adapter consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[u8; 9]; 9],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// An all-empty board.
    pub fn empty() -> Self {
        Self { cells: [[0; 9]; 9] }
    }

    /// Get the digit at a position (0 = empty).
    pub fn get(&self, pos: Position) -> u8 {
        self.cells[pos.row][pos.col]
    }

    /// Set the digit at a position.
    pub fn set(&mut self, pos: Position, value: u8) {
        debug_assert!(value <= 9);
        self.cells[pos.row][pos.col] = value;
    }

    /// The underlying row-major cell array.
    pub fn cells(&self) -> &[[u8; 9]; 9] {
        &self.cells
    }

    /// Check whether placing `num` at `pos` would violate a row,
    /// column, or 3x3 box constraint: true iff `num` is in 1..=9 and
    /// does not already appear in the row, the column, or the box
    /// containing `pos`. Pure, O(9).
    pub fn is_valid_placement(&self, pos: Position, num: u8) -> bool {
        if !(1..=9).contains(&num) {
            return false;
        }

        for i in 0..9 {
            if self.cells[pos.row][i] == num {
                return false;
            }
            if self.cells[i][pos.col] == num {
                return false;
            }
        }

        let origin = pos.box_origin();
        for row in origin.row..origin.row + 3 {
            for col in origin.col..origin.col + 3 {
                if self.cells[row][col] == num {
                    return false;
                }
            }
        }

        true
    }

    /// The first empty cell in row-major order, if any.
    pub fn first_empty(&self) -> Option<Position> {
        Position::all().find(|&pos| self.get(pos) == 0)
    }

    /// True when no empty cells remain.
    pub fn is_filled(&self) -> bool {
        self.first_empty().is_none()
    }

    /// True when every row, column, and 3x3 box is a permutation of 1..=9.
    pub fn is_solved(&self) -> bool {
        const ALL: u16 = 0b11_1111_1110; // bits 1..=9

        for i in 0..9 {
            let mut row_seen = 0u16;
            let mut col_seen = 0u16;
            let mut box_seen = 0u16;
            let box_row = (i / 3) * 3;
            let box_col = (i % 3) * 3;

            for j in 0..9 {
                row_seen |= 1 << self.cells[i][j];
                col_seen |= 1 << self.cells[j][i];
                box_seen |= 1 << self.cells[box_row + j / 3][box_col + j % 3];
            }

            if row_seen != ALL || col_seen != ALL || box_seen != ALL {
                return false;
            }
        }

        true
    }

    /// Parse a board from an 81-character string of digits, row-major.
    /// `0` and `.` both denote empty cells.
    pub fn from_string(s: &str) -> Option<Self> {
        let digits: Vec<u8> = s
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .map(|c| if c == '.' { 0 } else { c as u8 - b'0' })
            .collect();

        if digits.len() != 81 {
            return None;
        }

        let mut board = Board::empty();
        for (i, &d) in digits.iter().enumerate() {
            board.cells[i / 9][i % 9] = d;
        }
        Some(board)
    }

    /// Compact 81-character representation, row-major, `0` for empty.
    pub fn to_string_compact(&self) -> String {
        let mut s = String::with_capacity(81);
        for pos in Position::all() {
            s.push((b'0' + self.get(pos)) as char);
        }
        s
    }
}

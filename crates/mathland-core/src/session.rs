use crate::{Board, GeneratedSudoku, Position};
use serde::{Deserialize, Serialize};

/// A blank cell exposed to the player.
///
/// Indices are assigned by a single row-major scan over the puzzle,
/// contiguous starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blank {
    pub row: usize,
    pub col: usize,
    /// 1-based scan index.
    pub index: usize,
    /// The solution digit for this cell. Never shown to the player
    /// before the matching digit is entered.
    pub expected: u8,
}

impl Blank {
    /// The blank's grid position.
    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

/// Correctness state of a blank's current entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryState {
    Empty,
    Correct,
    Wrong,
}

/// A blank's entry: its state and the last entered digit (0 when empty).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub state: EntryState,
    pub value: u8,
}

impl Entry {
    /// The entry of an untouched blank.
    pub const EMPTY: Entry = Entry {
        state: EntryState::Empty,
        value: 0,
    };
}

impl Default for Entry {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// External collaborator fired when every blank is correct.
///
/// Completion is a level condition, not an edge trigger: clearing a
/// correct blank and re-entering it correctly fires the notifier again.
pub trait CompletionNotifier {
    fn notify_completion(&mut self);
}

/// One active game: a puzzle, its solution, and per-blank entry state.
///
/// A session is created whole and replaced whole; regeneration drops
/// the old session and builds a new one, so no blank index or entry
/// state ever leaks across puzzles.
pub struct Session {
    puzzle: Board,
    solution: Board,
    blanks: Vec<Blank>,
    entries: Vec<Entry>,
    correct_count: usize,
}

impl Session {
    /// Create a session from a generated puzzle.
    pub fn new(sudoku: GeneratedSudoku) -> Self {
        let blanks = scan_blanks(&sudoku.puzzle, &sudoku.solution);
        let entries = vec![Entry::EMPTY; blanks.len()];
        Self {
            puzzle: sudoku.puzzle,
            solution: sudoku.solution,
            blanks,
            entries,
            correct_count: 0,
        }
    }

    /// The puzzle board (given cells non-zero, blanks zero).
    pub fn puzzle(&self) -> &Board {
        &self.puzzle
    }

    /// The stored solution.
    pub fn solution(&self) -> &Board {
        &self.solution
    }

    /// All blanks in row-major scan order.
    pub fn blanks(&self) -> &[Blank] {
        &self.blanks
    }

    /// Number of blanks in the puzzle.
    pub fn total_blanks(&self) -> usize {
        self.blanks.len()
    }

    /// Number of blanks currently in the `Correct` state.
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    /// The entry for a 1-based blank index.
    pub fn entry(&self, index: usize) -> Option<Entry> {
        self.entries.get(index.checked_sub(1)?).copied()
    }

    /// The blank at a grid position, if that cell is a blank.
    pub fn blank_at(&self, pos: Position) -> Option<&Blank> {
        self.blanks
            .iter()
            .find(|b| b.row == pos.row && b.col == pos.col)
    }

    /// True when every blank is correct.
    pub fn is_complete(&self) -> bool {
        self.correct_count == self.blanks.len()
    }

    /// Process a raw input event for a blank.
    ///
    /// The raw characters are sanitized down to the first digit in
    /// 1-9; input with no such digit is a clear event. Unknown blank
    /// indices are ignored. Returns the blank's entry after the
    /// transition.
    ///
    /// After every transition the completion level condition is
    /// evaluated, invoking the notifier whenever all blanks are
    /// correct.
    pub fn handle_input(
        &mut self,
        index: usize,
        raw: &str,
        notifier: &mut dyn CompletionNotifier,
    ) -> Option<Entry> {
        let slot = index.checked_sub(1)?;
        let expected = self.blanks.get(slot)?.expected;
        let entry = &mut self.entries[slot];
        let was_correct = entry.state == EntryState::Correct;

        match sanitize(raw) {
            None => {
                if was_correct {
                    self.correct_count -= 1;
                }
                *entry = Entry::EMPTY;
            }
            Some(digit) if digit == expected => {
                if !was_correct {
                    self.correct_count += 1;
                }
                *entry = Entry {
                    state: EntryState::Correct,
                    value: digit,
                };
            }
            Some(digit) => {
                if was_correct {
                    self.correct_count -= 1;
                }
                *entry = Entry {
                    state: EntryState::Wrong,
                    value: digit,
                };
            }
        }

        let result = self.entries[slot];
        if self.correct_count == self.blanks.len() {
            notifier.notify_completion();
        }
        Some(result)
    }
}

/// Sanitize raw input characters: strip everything outside 1-9 and
/// keep only the first surviving digit. `None` means a clear event.
fn sanitize(raw: &str) -> Option<u8> {
    raw.chars()
        .find(|c| ('1'..='9').contains(c))
        .map(|c| c as u8 - b'0')
}

/// Collect the blanks of a puzzle in one row-major scan.
fn scan_blanks(puzzle: &Board, solution: &Board) -> Vec<Blank> {
    let mut blanks = Vec::new();
    for pos in Position::all() {
        if puzzle.get(pos) == 0 {
            blanks.push(Blank {
                row: pos.row,
                col: pos.col,
                index: blanks.len() + 1,
                expected: solution.get(pos),
            });
        }
    }
    blanks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Generator;

    /// Counts completion firings.
    #[derive(Default)]
    struct CountingNotifier {
        fired: usize,
    }

    impl CompletionNotifier for CountingNotifier {
        fn notify_completion(&mut self) {
            self.fired += 1;
        }
    }

    /// A session over a two-blank puzzle with expected digits 5 and 3.
    fn two_blank_session() -> Session {
        let solution = Board::from_string(
            "534678912672195348198342567859761423426853791713924856961537284287419635345286179",
        )
        .unwrap();
        let mut puzzle = solution;
        puzzle.set(Position::new(0, 0), 0); // expected 5
        puzzle.set(Position::new(0, 1), 0); // expected 3

        Session::new(GeneratedSudoku {
            puzzle,
            solution,
            blanks: 2,
        })
    }

    #[test]
    fn test_blank_indices_are_contiguous_in_scan_order() {
        let mut generator = Generator::with_seed(42);
        let session = Session::new(generator.generate(40));

        assert_eq!(session.total_blanks(), 40);
        let mut last_pos = 0;
        for (i, blank) in session.blanks().iter().enumerate() {
            assert_eq!(blank.index, i + 1);
            let scan = blank.row * 9 + blank.col + 1;
            assert!(scan > last_pos, "blanks out of row-major order");
            last_pos = scan;
            assert_eq!(session.puzzle().get(blank.position()), 0);
            assert_eq!(session.solution().get(blank.position()), blank.expected);
        }
    }

    #[test]
    fn test_completion_scenario_with_refire() {
        let mut session = two_blank_session();
        let mut notifier = CountingNotifier::default();

        let e = session.handle_input(1, "5", &mut notifier).unwrap();
        assert_eq!(e.state, EntryState::Correct);
        assert_eq!(session.correct_count(), 1);
        assert_eq!(notifier.fired, 0);

        let e = session.handle_input(2, "3", &mut notifier).unwrap();
        assert_eq!(e.state, EntryState::Correct);
        assert_eq!(session.correct_count(), 2);
        assert_eq!(notifier.fired, 1);

        let e = session.handle_input(1, "", &mut notifier).unwrap();
        assert_eq!(e.state, EntryState::Empty);
        assert_eq!(e.value, 0);
        assert_eq!(session.correct_count(), 1);
        assert_eq!(notifier.fired, 1);

        let e = session.handle_input(1, "5", &mut notifier).unwrap();
        assert_eq!(e.state, EntryState::Correct);
        assert_eq!(session.correct_count(), 2);
        assert_eq!(notifier.fired, 2);
    }

    #[test]
    fn test_wrong_then_correct_transition() {
        let mut session = two_blank_session();
        let mut notifier = CountingNotifier::default();

        let e = session.handle_input(1, "9", &mut notifier).unwrap();
        assert_eq!(e.state, EntryState::Wrong);
        assert_eq!(e.value, 9);
        assert_eq!(session.correct_count(), 0);

        let e = session.handle_input(1, "5", &mut notifier).unwrap();
        assert_eq!(e.state, EntryState::Correct);
        assert_eq!(session.correct_count(), 1);

        // Correct -> Wrong decrements
        let e = session.handle_input(1, "2", &mut notifier).unwrap();
        assert_eq!(e.state, EntryState::Wrong);
        assert_eq!(session.correct_count(), 0);
        assert_eq!(notifier.fired, 0);
    }

    #[test]
    fn test_clearing_an_empty_or_wrong_blank_is_harmless() {
        let mut session = two_blank_session();
        let mut notifier = CountingNotifier::default();

        session.handle_input(1, "", &mut notifier);
        assert_eq!(session.correct_count(), 0);

        session.handle_input(1, "4", &mut notifier);
        session.handle_input(1, "", &mut notifier);
        assert_eq!(session.entry(1).unwrap(), Entry::EMPTY);
        assert_eq!(session.correct_count(), 0);
        assert_eq!(notifier.fired, 0);
    }

    #[test]
    fn test_repeated_digit_event_is_idempotent_below_completion() {
        let mut session = two_blank_session();
        let mut notifier = CountingNotifier::default();

        session.handle_input(1, "5", &mut notifier);
        session.handle_input(1, "5", &mut notifier);
        session.handle_input(1, "5", &mut notifier);
        assert_eq!(session.correct_count(), 1);
        assert_eq!(notifier.fired, 0);
    }

    #[test]
    fn test_repeated_digit_refires_when_level_condition_holds() {
        let mut session = two_blank_session();
        let mut notifier = CountingNotifier::default();

        session.handle_input(1, "5", &mut notifier);
        session.handle_input(2, "3", &mut notifier);
        assert_eq!(notifier.fired, 1);

        // Level check, not edge trigger: the condition still holds
        session.handle_input(2, "3", &mut notifier);
        assert_eq!(session.correct_count(), 2);
        assert_eq!(notifier.fired, 2);
    }

    #[test]
    fn test_sanitization() {
        assert_eq!(sanitize("5"), Some(5));
        assert_eq!(sanitize("abc"), None);
        assert_eq!(sanitize("a7b"), Some(7));
        assert_eq!(sanitize(""), None);
        assert_eq!(sanitize("0"), None);
        assert_eq!(sanitize("0913"), Some(9));
        assert_eq!(sanitize("  42 "), Some(4));
    }

    #[test]
    fn test_malformed_input_sanitizes_to_clear() {
        let mut session = two_blank_session();
        let mut notifier = CountingNotifier::default();

        session.handle_input(1, "5", &mut notifier);
        let e = session.handle_input(1, "x!#", &mut notifier).unwrap();
        assert_eq!(e.state, EntryState::Empty);
        assert_eq!(session.correct_count(), 0);
    }

    #[test]
    fn test_out_of_range_indices_are_ignored() {
        let mut session = two_blank_session();
        let mut notifier = CountingNotifier::default();

        assert!(session.handle_input(0, "5", &mut notifier).is_none());
        assert!(session.handle_input(3, "5", &mut notifier).is_none());
        assert_eq!(session.correct_count(), 0);
        assert_eq!(notifier.fired, 0);
    }

    #[test]
    fn test_regeneration_discards_prior_state() {
        let mut generator = Generator::with_seed(42);
        let mut session = Session::new(generator.generate(40));
        let mut notifier = CountingNotifier::default();

        let first = session.blanks()[0];
        session.handle_input(first.index, &first.expected.to_string(), &mut notifier);
        assert_eq!(session.correct_count(), 1);
        let old_puzzle = *session.puzzle();

        // Atomic replacement: build a fresh session, drop the old one
        session = Session::new(generator.generate(40));
        assert_eq!(session.correct_count(), 0);
        assert_ne!(*session.puzzle(), old_puzzle);
        for blank in session.blanks() {
            assert_eq!(session.entry(blank.index).unwrap(), Entry::EMPTY);
        }
    }

    #[test]
    fn test_given_cells_have_no_entry_state() {
        let mut generator = Generator::with_seed(7);
        let session = Session::new(generator.generate(30));

        // Only blanks carry entries: indices beyond the blank count
        // resolve to nothing, and every given cell maps to no blank.
        assert!(session.entry(session.total_blanks() + 1).is_none());
        for pos in Position::all() {
            if session.puzzle().get(pos) != 0 {
                assert!(session.blank_at(pos).is_none());
            }
        }
    }
}

use crate::animations::WinScreen;
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use mathland_core::{CompletionNotifier, Difficulty, Generator, Session};
use std::time::{Duration, Instant};

/// Delay before the second celebratory confetti burst.
const SECOND_BURST_DELAY: Duration = Duration::from_millis(500);

/// Result of handling a key press.
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Normal gameplay
    Playing,
    /// Completion celebration screen
    Win,
}

/// Records whether the session fired its completion signal while an
/// input event was being processed.
#[derive(Default)]
struct CompletionFlag {
    fired: bool,
}

impl CompletionNotifier for CompletionFlag {
    fn notify_completion(&mut self) {
        self.fired = true;
    }
}

/// The main application state.
pub struct App {
    /// The active session; replaced wholesale on regeneration
    pub session: Session,
    /// Puzzle source, carried across regenerations
    generator: Generator,
    /// Current difficulty preset
    pub difficulty: Difficulty,
    /// CLI override for the preset blank count
    blank_override: Option<usize>,
    /// Currently selected blank (1-based index)
    pub cursor: usize,
    /// Color theme
    pub theme: Theme,
    /// Transient status message
    pub message: Option<String>,
    /// Message timer (ticks)
    message_timer: u32,
    /// Current screen state
    pub screen_state: ScreenState,
    /// Win celebration animation
    pub win_screen: WinScreen,
    /// When to fire the delayed second confetti burst
    second_burst_at: Option<Instant>,
}

impl App {
    /// Create the app with an initial puzzle.
    pub fn new(difficulty: Difficulty, blank_override: Option<usize>, seed: Option<u64>) -> Self {
        let mut generator = match seed {
            Some(seed) => Generator::with_seed(seed),
            None => Generator::new(),
        };
        let requested = blank_override.unwrap_or(difficulty.blank_count());
        let session = Session::new(generator.generate(requested));

        Self {
            session,
            generator,
            difficulty,
            blank_override,
            cursor: 1,
            theme: Theme::dark(),
            message: None,
            message_timer: 0,
            screen_state: ScreenState::Playing,
            win_screen: WinScreen::new(),
            second_burst_at: None,
        }
    }

    /// Get the tick rate based on the current screen.
    pub fn get_tick_rate(&self) -> Duration {
        match self.screen_state {
            ScreenState::Win => Duration::from_millis(33), // 30 FPS for the celebration
            ScreenState::Playing => Duration::from_millis(100),
        }
    }

    /// Update animations and timers (called every tick).
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        if self.screen_state == ScreenState::Win {
            if let Some(at) = self.second_burst_at {
                if Instant::now() >= at {
                    self.win_screen.burst();
                    self.second_burst_at = None;
                }
            }
            self.win_screen.update();
        }
    }

    /// Show a temporary message.
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30; // ~3 seconds at 100ms poll
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen_state {
            ScreenState::Win => self.handle_win_key(key),
            ScreenState::Playing => self.handle_game_key(key),
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,

            // Blank selection
            KeyCode::Right | KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => {
                self.select_next_blank(1);
            }
            KeyCode::Left | KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => {
                self.select_next_blank(-1);
            }

            // Digit entry for the selected blank
            KeyCode::Char(c @ '1'..='9') => {
                self.send_input(&c.to_string());
            }

            // Clear the selected blank
            KeyCode::Char('0') | KeyCode::Delete | KeyCode::Backspace => {
                self.send_input("");
            }

            // New puzzle at the current difficulty
            KeyCode::Char('n') => {
                self.regenerate();
                self.show_message(&format!("New {} puzzle", self.difficulty));
            }

            // Cycle difficulty and regenerate
            KeyCode::Char('d') => {
                self.difficulty = next_difficulty(self.difficulty);
                self.regenerate();
                self.show_message(&format!("New {} puzzle", self.difficulty));
            }

            // Theme toggle
            KeyCode::Char('t') => {
                self.theme = if self.theme.is_dark {
                    Theme::light()
                } else {
                    Theme::dark()
                };
            }

            _ => {}
        }

        AppAction::Continue
    }

    fn handle_win_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('n') => {
                self.regenerate();
                self.show_message(&format!("New {} puzzle", self.difficulty));
            }
            KeyCode::Esc => {
                // Back to the (finished) board view
                self.screen_state = ScreenState::Playing;
            }
            _ => {}
        }
        AppAction::Continue
    }

    /// Forward a raw input event for the selected blank to the session
    /// and react to its completion signal.
    fn send_input(&mut self, raw: &str) {
        let mut flag = CompletionFlag::default();
        self.session.handle_input(self.cursor, raw, &mut flag);

        if flag.fired {
            self.screen_state = ScreenState::Win;
            self.win_screen.reset();
            self.win_screen.burst();
            self.second_burst_at = Some(Instant::now() + SECOND_BURST_DELAY);
        }
    }

    /// Discard the current session and start a fresh puzzle. The old
    /// puzzle, solution, and entry state are replaced atomically.
    pub fn regenerate(&mut self) {
        let requested = self
            .blank_override
            .unwrap_or(self.difficulty.blank_count());
        self.session = Session::new(self.generator.generate(requested));
        self.cursor = 1;
        self.screen_state = ScreenState::Playing;
        self.second_burst_at = None;
    }

    /// Move the blank selection forward or backward, wrapping around.
    fn select_next_blank(&mut self, delta: i64) {
        let total = self.session.total_blanks() as i64;
        if total == 0 {
            return;
        }
        let current = self.cursor as i64 - 1;
        let next = (current + delta).rem_euclid(total);
        self.cursor = next as usize + 1;
    }
}

fn next_difficulty(d: Difficulty) -> Difficulty {
    let levels = Difficulty::all_levels();
    let idx = levels.iter().position(|&x| x == d).unwrap_or(0);
    levels[(idx + 1) % levels.len()]
}

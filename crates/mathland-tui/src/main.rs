mod animations;
mod app;
mod render;
mod theme;

use app::App;
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mathland_core::Difficulty;
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Numbered-blanks Sudoku in the terminal.
#[derive(Parser)]
#[command(name = "mathland", version, about)]
struct Cli {
    /// Difficulty preset (sets the number of blanks)
    #[arg(short, long, value_enum, default_value = "medium")]
    difficulty: DifficultyArg,

    /// Override the preset blank count (0-81)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=81))]
    blanks: Option<u8>,

    /// Seed for reproducible puzzles
    #[arg(short, long)]
    seed: Option<u64>,
}

/// CLI-facing difficulty names. Anything outside this enumeration is
/// rejected at parse time, before a game exists.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let result = run_app(
        &mut stdout,
        cli.difficulty.into(),
        cli.blanks.map(usize::from),
        cli.seed,
    );

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(
    stdout: &mut io::Stdout,
    difficulty: Difficulty,
    blanks: Option<usize>,
    seed: Option<u64>,
) -> io::Result<()> {
    let mut app = App::new(difficulty, blanks, seed);
    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.get_tick_rate();

        render::render(stdout, &mut app)?;
        stdout.flush()?;

        // Handle input with timeout so animations keep ticking
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            if let Event::Key(key) = event::read()? {
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }

                match app.handle_key(key) {
                    app::AppAction::Continue => {}
                    app::AppAction::Quit => break,
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

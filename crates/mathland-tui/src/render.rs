use crate::animations::particles::hue_to_rgb;
use crate::app::{App, ScreenState};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use mathland_core::{EntryState, Position};
use std::io;

const GRID_WIDTH: u16 = 37;
const GRID_HEIGHT: u16 = 19;

pub fn render(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide)?;

    match app.screen_state {
        // The win screen redraws every cell, no clear needed
        ScreenState::Win => render_win_screen(stdout, app, term_width, term_height)?,
        ScreenState::Playing => {
            execute!(stdout, Clear(ClearType::All))?;
            render_game_screen(stdout, app, term_width, term_height)?;
        }
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn render_game_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    // Grid plus gap plus info panel
    let total_width = GRID_WIDTH + 28;
    let start_x = if term_width > total_width {
        (term_width - total_width) / 2
    } else {
        1
    };
    let start_y = if term_height > GRID_HEIGHT + 8 { 2 } else { 1 };

    render_grid(stdout, app, start_x, start_y)?;

    let info_x = start_x + GRID_WIDTH + 3;
    render_info_panel(stdout, app, info_x, start_y)?;

    let controls_y = start_y + GRID_HEIGHT + 1;
    render_controls(stdout, app, start_x, controls_y)?;

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }

    Ok(())
}

fn render_grid(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    // Each cell is 3 chars wide; thick separators at 3x3 boundaries
    execute!(stdout, SetBackgroundColor(theme.bg))?;
    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.box_border),
        Print("+===+===+===+===+===+===+===+===+===+")
    )?;

    for row in 0..9 {
        let cell_y = y + 1 + row as u16 * 2;
        execute!(stdout, MoveTo(x, cell_y))?;

        for col in 0..9 {
            let (border, color) = if col % 3 == 0 {
                ("║", theme.box_border)
            } else {
                ("│", theme.border)
            };
            execute!(stdout, SetForegroundColor(color), Print(border))?;
            render_cell(stdout, app, Position::new(row, col))?;
        }
        execute!(stdout, SetForegroundColor(theme.box_border), Print("║"))?;

        // Horizontal separator
        execute!(stdout, MoveTo(x, cell_y + 1))?;
        if (row + 1) % 3 == 0 {
            execute!(
                stdout,
                SetForegroundColor(theme.box_border),
                Print("+===+===+===+===+===+===+===+===+===+")
            )?;
        } else {
            execute!(
                stdout,
                SetForegroundColor(theme.border),
                Print("+---+---+---+---+---+---+---+---+---+")
            )?;
        }
    }

    Ok(())
}

fn render_cell(stdout: &mut io::Stdout, app: &App, pos: Position) -> io::Result<()> {
    let theme = &app.theme;
    let given = app.session.puzzle().get(pos);

    // Given cells are immutable labeled values
    if given != 0 {
        execute!(
            stdout,
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.given),
            Print(format!(" {} ", given))
        )?;
        return Ok(());
    }

    // Blank cells show the last entered digit with a correctness
    // background, or their 1-based scan index while empty. The
    // expected digit is never rendered.
    let blank = match app.session.blank_at(pos) {
        Some(b) => *b,
        None => return Ok(()),
    };
    let entry = app.session.entry(blank.index).unwrap_or_default();

    let bg = if blank.index == app.cursor {
        theme.selected_bg
    } else {
        match entry.state {
            EntryState::Correct => theme.correct_bg,
            EntryState::Wrong => theme.wrong_bg,
            EntryState::Empty => theme.bg,
        }
    };

    execute!(stdout, SetBackgroundColor(bg))?;
    if entry.state == EntryState::Empty {
        execute!(
            stdout,
            SetForegroundColor(theme.badge),
            Print(format!("{:>2} ", blank.index))
        )?;
    } else {
        execute!(
            stdout,
            SetForegroundColor(theme.fg),
            Print(format!(" {} ", entry.value))
        )?;
    }

    Ok(())
}

fn render_info_panel(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let session = &app.session;

    execute!(stdout, SetBackgroundColor(theme.bg))?;
    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.fg),
        Print("MATHLAND SUDOKU")
    )?;
    execute!(
        stdout,
        MoveTo(x, y + 2),
        SetForegroundColor(theme.info),
        Print(format!("Difficulty: {}", app.difficulty))
    )?;
    execute!(
        stdout,
        MoveTo(x, y + 3),
        SetForegroundColor(theme.info),
        Print(format!("Blanks: {}", session.total_blanks()))
    )?;
    execute!(
        stdout,
        MoveTo(x, y + 4),
        SetForegroundColor(theme.info),
        Print(format!(
            "Correct: {}/{}",
            session.correct_count(),
            session.total_blanks()
        ))
    )?;

    if let Some(blank) = session.blanks().get(app.cursor.wrapping_sub(1)) {
        execute!(
            stdout,
            MoveTo(x, y + 6),
            SetForegroundColor(theme.fg),
            Print(format!(
                "Selected: #{} (row {}, col {})",
                blank.index,
                blank.row + 1,
                blank.col + 1
            ))
        )?;
    }

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let lines = [
        "Tab/arrows select blank   1-9 enter digit   0/Backspace clear",
        "n new puzzle   d cycle difficulty   t theme   q quit",
    ];

    execute!(stdout, SetBackgroundColor(theme.bg))?;
    for (i, line) in lines.iter().enumerate() {
        execute!(
            stdout,
            MoveTo(x, y + i as u16),
            SetForegroundColor(theme.key),
            Print(line)
        )?;
    }

    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
) -> io::Result<()> {
    let x = term_width.saturating_sub(msg.len() as u16) / 2;
    execute!(
        stdout,
        MoveTo(x, 0),
        SetBackgroundColor(app.theme.selected_bg),
        SetForegroundColor(app.theme.fg),
        Print(format!(" {} ", msg))
    )?;
    Ok(())
}

fn render_win_screen(
    stdout: &mut io::Stdout,
    app: &mut App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    app.win_screen.resize(term_width, term_height);

    let bg_base = Color::Rgb { r: 8, g: 12, b: 20 };
    execute!(stdout, SetBackgroundColor(bg_base), Clear(ClearType::All))?;

    // Particles
    for particle in app.win_screen.particles() {
        if particle.is_visible(term_width, term_height) {
            execute!(
                stdout,
                MoveTo(particle.x as u16, particle.y as u16),
                SetForegroundColor(particle.color),
                SetBackgroundColor(bg_base),
                Print(particle.char)
            )?;
        }
    }

    // Banner
    let lines: Vec<&str> = app
        .win_screen
        .banner()
        .lines()
        .filter(|l| !l.is_empty())
        .collect();
    let banner_width = lines.iter().map(|l| l.len()).max().unwrap_or(40) as u16;
    let banner_x = term_width.saturating_sub(banner_width) / 2;
    let banner_y = 3;

    for (i, line) in lines.iter().enumerate() {
        let hue = (app.win_screen.rainbow_offset() + i as f32 * 0.1) % 1.0;
        execute!(
            stdout,
            MoveTo(banner_x, banner_y + i as u16),
            SetForegroundColor(hue_to_rgb(hue)),
            SetBackgroundColor(bg_base),
            Print(line)
        )?;
    }

    // Message
    let msg = app.win_screen.current_message();
    let msg_x = term_width.saturating_sub(msg.len() as u16) / 2;
    let msg_y = banner_y + lines.len() as u16 + 2;
    let hue = (app.win_screen.rainbow_offset() * 2.0) % 1.0;
    execute!(
        stdout,
        MoveTo(msg_x, msg_y),
        SetForegroundColor(hue_to_rgb(hue)),
        SetBackgroundColor(bg_base),
        Print(msg)
    )?;

    // Stats line
    let stats = format!(
        "Difficulty: {} | Blanks solved: {}",
        app.difficulty,
        app.session.total_blanks()
    );
    let stats_x = term_width.saturating_sub(stats.len() as u16) / 2;
    execute!(
        stdout,
        MoveTo(stats_x, msg_y + 2),
        SetForegroundColor(Color::White),
        SetBackgroundColor(bg_base),
        Print(stats)
    )?;

    let help = "Enter: new puzzle | Esc: view board | q: quit";
    let help_x = term_width.saturating_sub(help.len() as u16) / 2;
    execute!(
        stdout,
        MoveTo(help_x, msg_y + 4),
        SetForegroundColor(Color::Grey),
        SetBackgroundColor(bg_base),
        Print(help)
    )?;

    Ok(())
}

//! margin - terminal note pad with Vim-style modal editing
//!
//! Usage: `margin [NOTE_FILE]`. Without an argument the default note under
//! the user's data directory is opened. `Ctrl-e` toggles modal editing and
//! `Ctrl-q` quits; every change is saved as it happens.

mod app;
mod error;
mod keybindings;
mod note;
mod surface;
mod widgets;

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use note::NoteFile;
use surface::NotePad;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = note::data_dir()?;
    std::fs::create_dir_all(&data_dir)?;

    // Setup logging; stdout belongs to the terminal UI
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join("margin.log"))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("MARGIN_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir.join("note.txt"));
    let note = NoteFile::new(path);
    let pad = NotePad::new(note.read()?);
    let config = note::load_config();
    info!(path = %note.path().display(), "opening note");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(pad, note, config);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && app.handle_key(key.code, key.modifiers) {
                return Ok(());
            }
        }
    }
}

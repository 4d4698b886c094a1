use std::env;
use std::path::PathBuf;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::store::{self, Store};

mod event_loop;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let cli_path = env::args().nth(1).map(PathBuf::from);
    let data_path = store::resolve_data_path(cli_path, &settings.storage).ok_or(
        "no data file path: set HOME or XDG_DATA_HOME, configure storage.path, \
         or pass a path as the first argument",
    )?;

    // Open (and thereby validate) the store before taking over the terminal,
    // so load errors print as ordinary messages. A malformed data file aborts
    // here rather than being overwritten later by the write-through.
    let store = Store::open(data_path)?;
    let mut app = App::new(store);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new();
        event_loop::run(&mut terminal, &settings, &mut app, &mut state)
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}

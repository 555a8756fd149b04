use clap::{Parser, ValueEnum};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tabgrid::grid::{ColumnSpec, GridState};
use tabgrid::services::{dataset, export};
use tabgrid::tui::{App, KeyBindings, Theme};
use tracing::error;

/// Keyboard-first viewer for tabular JSON data
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON dataset: an array of row objects
    data: PathBuf,
    /// JSON column schema (array of column definitions); inferred from the
    /// data when omitted
    #[arg(long = "schema", value_name = "PATH")]
    schema: Option<PathBuf>,
    /// Rows per page
    #[arg(long = "page-size", value_name = "N", default_value_t = 25)]
    page_size: usize,
    /// Path to a keybindings JSON file (overrides defaults)
    #[arg(long = "keybindings", value_name = "PATH")]
    keybindings: Option<PathBuf>,
    /// Use the light theme
    #[arg(long = "light")]
    light: bool,
    /// Export the dataset as CSV to PATH and exit without starting the TUI
    #[arg(long = "export", value_name = "PATH")]
    export: Option<PathBuf>,
    /// Enable file logging at the given level (overrides RUST_LOG)
    #[arg(long = "logging", value_enum)]
    logging: Option<LogLevel>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging to file in current working directory
    let level = match args.logging {
        Some(LogLevel::Error) => tracing::Level::ERROR,
        Some(LogLevel::Warn) | None => tracing::Level::WARN,
        Some(LogLevel::Info) => tracing::Level::INFO,
        Some(LogLevel::Debug) => tracing::Level::DEBUG,
        Some(LogLevel::Trace) => tracing::Level::TRACE,
    };
    tabgrid::logging::init_with(None, Some(level))?;

    let rows = dataset::load_rows(&args.data)?;
    let columns = match &args.schema {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read schema {}", path.display()))?;
            serde_json::from_str::<Vec<ColumnSpec>>(&content)
                .wrap_err_with(|| format!("invalid schema in {}", path.display()))?
        }
        None => dataset::infer_columns(&rows),
    };

    let mut grid = GridState::new(columns, rows)?;
    grid.set_page_size(args.page_size);

    // Headless export path: write the CSV and skip the TUI entirely
    if let Some(path) = &args.export {
        export::write_csv(&grid.export_table(), path)?;
        println!("exported {}", path.display());
        return Ok(());
    }

    let mut app = App::new(grid);
    if let Some(path) = &args.keybindings {
        app.set_keybindings(KeyBindings::load_from_file(path)?);
    }
    if args.light {
        app.set_theme(Theme::light());
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // App loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    if let Err(e) = res {
        error!("Error: {e}");
    }
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                CEvent::Key(key) => app.handle_key_event(key)?,
                CEvent::Mouse(mouse) => app.handle_mouse_event(mouse)?,
                _ => {}
            }
        }
        app.drain_events();

        if app.should_quit() {
            break;
        }
    }
    Ok(())
}

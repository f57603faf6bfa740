//! keybind - interactive demo and tools for the key binding registry.

use std::io::{self, Stdout};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use keybind::app::App;
use keybind::config::Config;
use keybind::events::EventHandler;
use keybind::{keys, logging, ui, AppError, Binding};

/// Key binding registry demo.
#[derive(Debug, Parser)]
#[command(name = "keybind", version, about)]
struct Cli {
    /// Path to the config file (overrides KEYBIND_CONFIG).
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Directory for log files (defaults to the platform data directory).
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Dispatch live key presses through the configured keymap (default).
    Run,
    /// Print the canonical form of key strings.
    Decode {
        /// Key strings such as "ctrl+alt+x" or "shift+tab".
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Print the default configuration file.
    DefaultConfig,
}

type Tui = Terminal<CrosstermBackend<Stdout>>;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Command::Run) {
        Command::Run => load_config(cli.config).and_then(|config| {
            let _logging = logging::init(&config.settings, cli.log_dir).map_err(|e| {
                AppError::other(format!("Could not initialize logging: {e:#}"))
            })?;
            run(config)
        }),
        Command::Decode { keys } => decode(&keys),
        Command::DefaultConfig => Config::default()
            .to_toml()
            .map(|toml| print!("{toml}"))
            .map_err(AppError::from),
    };

    if let Err(err) = result {
        error!(error = %err, "Exiting with error");
        eprintln!("{}", err.user_message());
        if let Some(action) = err.suggested_action() {
            eprintln!("{action}");
        }
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> keybind::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(&path)?,
        None => Config::load()?,
    };
    Ok(config)
}

fn decode(key_strings: &[String]) -> keybind::Result<()> {
    let mut failed = None;

    for key in key_strings {
        match keys::decode(key) {
            Ok((modifiers, code)) => println!("{key}\t{}", Binding::new(modifiers, code)),
            Err(err) => {
                println!("{key}\terror: {err}");
                failed.get_or_insert(err);
            }
        }
    }

    match failed {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

fn run(config: Config) -> keybind::Result<()> {
    let mut app = App::new(&config)?;
    let events = EventHandler::with_tick_rate(config.settings.tick_rate_ms);

    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, &mut app, &events);
    restore_terminal(&mut terminal)?;

    info!(dispatched = app.history().count(), "Demo finished");
    result
}

fn run_loop(terminal: &mut Tui, app: &mut App, events: &EventHandler) -> keybind::Result<()> {
    while !app.should_quit() {
        terminal.draw(|frame| ui::render(frame, app))?;
        app.update(events.next()?);
    }
    Ok(())
}

fn setup_terminal() -> keybind::Result<Tui> {
    enable_raw_mode().map_err(|e| AppError::terminal(format!("could not enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui) -> keybind::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

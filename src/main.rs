use clap::{ArgAction, Parser};
use crossterm::event;
use dirscope::terminal::TerminalGuard;
use dirscope::{logging, ui, Command, FileTree, NavState, Result};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{stdout, Stdout};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

/// Browse a directory tree in the terminal
#[derive(Parser, Debug)]
#[command(name = "dirscope", version, disable_help_flag = true)]
struct Args {
    /// Directory to browse
    #[arg(value_name = "PATH", default_value = ".")]
    path: PathBuf,

    /// Show hidden files or directories
    #[arg(short = 'h', long)]
    hidden: bool,

    /// Write diagnostics to this file (filtered by RUST_LOG)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, tree: FileTree) -> Result<()> {
    let (width, height) = crossterm::terminal::size()?;
    let mut state = NavState::new(
        tree,
        usize::from(width),
        usize::from(height.saturating_sub(1)),
    );
    let mut last_error: Option<String> = None;

    loop {
        terminal.draw(|frame| ui::draw(frame, &state, last_error.as_deref()))?;

        // Block until something we have a binding for arrives.
        let command = loop {
            if let Some(command) = Command::from_event(&event::read()?) {
                break command;
            }
        };

        if command == Command::Quit {
            info!("quit requested");
            return Ok(());
        }

        match state.apply(command) {
            Ok(()) => last_error = None,
            Err(err) => {
                warn!(error = %err, ?command, "command failed");
                last_error = Some(err.to_string());
            }
        }
    }
}

fn run(args: Args) -> Result<()> {
    let tree = FileTree::open_root(&args.path, args.hidden)?;
    info!(root = %tree.entry(tree.root()).path().display(), hidden = args.hidden, "opened root");

    let _guard = TerminalGuard::enter()?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    run_app(&mut terminal, tree)
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(log_file) = args.log_file.as_deref() {
        if let Err(err) = logging::init_global(log_file) {
            eprintln!("dirscope: cannot open log file {}: {err}", log_file.display());
            return ExitCode::FAILURE;
        }
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("dirscope: {err}");
            ExitCode::FAILURE
        }
    }
}

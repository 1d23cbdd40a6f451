use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin, Write},
    path::PathBuf,
    time::Duration,
};
use tracing::{error, info};

use swiftype::{
    app::{App, Route},
    app_dirs::AppDirs,
    config::{ConfigStore, FileConfigStore},
    corpus::Corpus,
    dashboard::summarize,
    history::{FileStore, History, TestResult},
    logging,
    runtime::{CrosstermEventSource, FixedTicker, Runner},
    session::TestDuration,
    ui, TICK_RATE_MS,
};

/// typing speed practice in the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Timed typing tests with live WPM, accuracy and mistakes, a practice mode that keeps your record clean, and a local stats dashboard."
)]
pub struct Cli {
    /// length of the test in seconds, for this run only
    #[clap(short = 'd', long, value_enum)]
    duration: Option<TestDuration>,

    /// start in practice mode; results are not saved
    #[clap(long)]
    practice: bool,

    /// page to open on
    #[clap(long, value_enum, default_value_t = Route::Home)]
    page: Route,

    /// custom prompt to use instead of the built-in texts
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// directory for results, config and the log file
    #[clap(long)]
    data_dir: Option<PathBuf>,

    /// print a summary of the stored results and exit
    #[clap(long)]
    summary: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let dirs = cli
        .data_dir
        .as_ref()
        .map(AppDirs::in_dir)
        .unwrap_or_else(AppDirs::resolve);
    let config_store = FileConfigStore::with_path(dirs.config_path());
    let config = config_store.load();

    if let Err(e) = logging::init(&dirs.log_path(), &config.log_level) {
        eprintln!("swiftype: logging disabled: {e}");
    }

    let mut history = History::new(FileStore::new(dirs.data_dir()));

    if cli.summary {
        let results = history.load();
        write_summary(&mut io::stdout().lock(), &results)?;
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let corpus = match cli.prompt {
        Some(ref text) => Corpus::from_texts([text.as_str()])?,
        None => Corpus::builtin()?,
    };

    let mut app = App::new(corpus, history, Box::new(config_store));
    if let Some(duration) = cli.duration {
        app.override_duration(duration);
    }
    if cli.practice {
        app.start_practice();
    } else if cli.page != Route::Home {
        app.navigate(cli.page);
    }
    info!(page = %app.route, practice = app.practice, duration = %app.duration, "starting");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = start_tui(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = res {
        error!(error = %e, "event loop failed");
    }
    res
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let mut app = app.with_timer(runner.sender());

    while !app.should_quit() {
        terminal.draw(|f| ui::draw(&app, f))?;
        let event = runner.step();
        app.handle_event(event);
    }

    info!("quit");
    Ok(())
}

fn write_summary<W: Write>(out: &mut W, results: &[TestResult]) -> io::Result<()> {
    let summary = summarize(results);

    writeln!(out, "Tests completed: {}", summary.tests_completed)?;
    writeln!(out, "Average WPM: {}", summary.average_wpm)?;
    writeln!(out, "Average accuracy: {}%", summary.average_accuracy)?;
    match summary.best {
        Some(best) => writeln!(
            out,
            "Best score: {} WPM ({}% accuracy, {}s test)",
            best.wpm, best.accuracy, best.duration
        ),
        None => writeln!(out, "Best score: -"),
    }
}

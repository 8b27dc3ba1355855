use clap::{Parser, ValueEnum};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::process;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use hgantt_chart::{Controller, DEFAULT_PAN_STEP, ExpandedSet, Task, load_forest, sample_forest};
use hgantt_tui::{App, CellSize, TuiResult};

/// Environment variable name for the task forest file
const HGANTT_TASKS_ENV: &str = "HGANTT_TASKS";

/// Environment variable name for the log file
const HGANTT_LOG_FILE_ENV: &str = "HGANTT_LOG_FILE";

/// Which groups start expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ExpandMode {
    /// Every root is expanded
    Roots,
    /// Every group is expanded
    All,
    /// Everything is collapsed
    #[value(name = "none")]
    Collapsed,
}

impl ExpandMode {
    fn expanded_set(self, forest: &[Task]) -> ExpandedSet {
        match self {
            Self::Roots => ExpandedSet::with_roots(forest),
            Self::All => ExpandedSet::with_all_groups(forest),
            Self::Collapsed => ExpandedSet::new(),
        }
    }
}

/// hgantt - A hierarchical Gantt chart viewer for the terminal
#[derive(Parser, Debug)]
#[command(name = "hgantt")]
#[command(version = "0.1.0")]
#[command(about = "A hierarchical Gantt chart viewer for the terminal", long_about = None)]
struct Args {
    /// JSON task forest to show (can also be set via HGANTT_TASKS env var).
    /// Without one, a built-in sample project is shown.
    #[arg(long)]
    tasks: Option<PathBuf>,

    /// Which groups start expanded
    #[arg(long, value_enum, default_value_t = ExpandMode::Roots)]
    expand: ExpandMode,

    /// Pixel width of one terminal cell
    #[arg(long, default_value_t = 8.0, value_parser = parse_positive)]
    cell_width: f64,

    /// Pixel height of one terminal cell
    #[arg(long, default_value_t = 16.0, value_parser = parse_positive)]
    cell_height: f64,

    /// Pixels moved per pan step
    #[arg(long, default_value_t = DEFAULT_PAN_STEP, value_parser = parse_positive)]
    pan_step: f64,

    /// Log file (can also be set via HGANTT_LOG_FILE env var)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Parse a finite, strictly positive number.
fn parse_positive(value: &str) -> Result<f64, String> {
    let number: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if !number.is_finite() || number <= 0.0 {
        return Err(format!("'{}' must be a positive number", value));
    }
    Ok(number)
}

/// Read a path from an environment variable, ignoring empty values.
fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Get the forest file from command line or environment variable.
///
/// Priority:
/// 1. Command line --tasks argument
/// 2. HGANTT_TASKS environment variable (if non-empty)
/// 3. None (use the sample forest)
fn resolve_tasks_path(cli_tasks: Option<PathBuf>) -> Option<PathBuf> {
    cli_tasks.or_else(|| env_path(HGANTT_TASKS_ENV))
}

/// Get the log file from command line, environment variable, or default.
///
/// Priority:
/// 1. Command line --log-file argument
/// 2. HGANTT_LOG_FILE environment variable (if non-empty)
/// 3. `hgantt/hgantt.log` under the user cache directory
fn resolve_log_path(cli_log: Option<PathBuf>) -> Option<PathBuf> {
    cli_log
        .or_else(|| env_path(HGANTT_LOG_FILE_ENV))
        .or_else(|| dirs::cache_dir().map(|dir| dir.join("hgantt").join("hgantt.log")))
}

/// Initialize logging based on the RUST_LOG environment variable.
///
/// The terminal is owned by the UI, so records go to a file. When no file
/// can be opened they are discarded.
fn init_logging(log_path: Option<PathBuf>) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let file = log_path.as_ref().and_then(|path| {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok()?;
        }
        OpenOptions::new().create(true).append(true).open(path).ok()
    });
    let writer = match file {
        Some(file) => BoxMakeWriter::new(Mutex::new(file)),
        None => BoxMakeWriter::new(std::io::sink),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(resolve_log_path(args.log_file.clone()));

    if let Err(e) = run_app(&args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

/// Main application logic - separated for testability
fn run_app(args: &Args) -> TuiResult<()> {
    let mut app = build_app(args)?;
    app.run()
}

/// Load the forest and assemble the app from the arguments.
fn build_app(args: &Args) -> TuiResult<App> {
    let forest = match resolve_tasks_path(args.tasks.clone()) {
        Some(path) => load_forest(&path)?,
        None => sample_forest(),
    };
    info!("Loaded {} root tasks", forest.len());

    let expanded = args.expand.expanded_set(&forest);
    let controller = Controller::new(forest, expanded).with_pan_step(args.pan_step);
    let cell = CellSize {
        width: args.cell_width,
        height: args.cell_height,
    };

    Ok(App::new(controller, cell))
}

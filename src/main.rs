use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use desk_wm::config::ShellConfig;
use desk_wm::desktop::Desktop;
use desk_wm::drivers::OutputDriver;
use desk_wm::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use desk_wm::error::ShellError;
use desk_wm::host::ShellHost;
use desk_wm::runner::run_desktop;
use desk_wm::tracing_sub;
use desk_wm::window::WindowContent;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "desk-wm",
    version = env!("CARGO_PKG_VERSION"),
    about = "A mouse-driven desktop in the terminal: icons, stacked windows and a taskbar"
)]
struct Cli {
    /// Width of one icon cell, in columns.
    #[arg(long, value_name = "COLS", default_value_t = 10)]
    cell_width: i32,

    /// Height of one icon cell, in rows.
    #[arg(long, value_name = "ROWS", default_value_t = 3)]
    cell_height: i32,

    /// Space between icon cells.
    #[arg(long, value_name = "CELLS", default_value_t = 1)]
    gap: i32,

    /// Target frames per second.
    #[arg(short = 'f', long = "fps", value_name = "FPS", default_value_t = 60.0)]
    fps: f64,

    /// How long a marquee drag must last before it selects anything.
    #[arg(long, value_name = "MS", default_value_t = 150)]
    selection_threshold_ms: u64,

    /// Append debug logs to this file. Logging is off without it.
    #[arg(short = 'l', long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl TryFrom<&Cli> for ShellConfig {
    type Error = ShellError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        ShellConfig {
            cell_width: cli.cell_width,
            cell_height: cli.cell_height,
            gap: cli.gap,
            selection_threshold: Duration::from_millis(cli.selection_threshold_ms),
            log_file: cli.log_file.clone(),
            ..ShellConfig::default()
        }
        .with_fps(cli.fps)?
        .validate()
    }
}

fn main() -> Result<(), ShellError> {
    let cli = Cli::parse();
    let config = ShellConfig::try_from(&cli)?;
    tracing_sub::init(config.log_file.as_deref())?;

    let mut desktop = Desktop::new(&config);
    desktop.add_app("calc", "Calculator", WindowContent::App("calc".into()));
    desktop.add_app(
        "notes",
        "Notes",
        WindowContent::Text("Drag me by the title bar.\nResize me from any edge.".into()),
    );
    desktop.add_app(
        "about",
        "About",
        WindowContent::Text(format!(
            "desk-wm {}\n\nDouble-click an icon to open it.\nDrag on the background to select icons.\nCtrl-Q quits.",
            env!("CARGO_PKG_VERSION")
        )),
    );
    let mut host = ShellHost::new();

    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    info!("desktop started");
    let result = run_desktop(
        &mut output,
        ConsoleInputDriver::new(),
        &mut desktop,
        &mut host,
        &config,
    );
    output.exit()?;
    info!("desktop stopped");
    result
}

use anyhow::{Context, Result};
use clap::Parser;
use selmenu::app::AppState;
use selmenu::cli::Cli;
use selmenu::config::Config;
use selmenu::ui;
use selmenu::utils::paths::{ensure_directories_exist, get_log_path};
use selmenu::utils::unicode::expand_tabs;
use std::fs::{self, OpenOptions};
use std::io::{self, IsTerminal, Read};
use std::path::Path;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

const TAB_WIDTH: usize = 4;

const SAMPLE: &str = "selmenu\n\
\n\
Drag with the left mouse button to select some of this text, then\n\
right-click inside the highlighted region. A small menu offers Copy.\n\
\n\
Right-clicking anywhere else shows the regular menu instead. Scrolling,\n\
resizing the terminal, pressing Esc or clicking outside all close the\n\
Copy menu.\n\
\n\
Press Tab to type into the find bar. Text selected there with\n\
Shift+Left/Right can be copied the same way.\n";

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let mut config = Config::load()?;
    if cli.no_system_clipboard {
        config.clipboard.system = false;
    }

    let (title, content) = load_content(cli.file.as_deref())?;
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let (width, height) = crossterm::terminal::size().context("Failed to read terminal size")?;

    info!(
        title = %title,
        chars = content.len(),
        system_clipboard = config.clipboard.system,
        "opening viewer"
    );

    let state = AppState::new(
        &expand_tabs(&content, TAB_WIDTH),
        title,
        &config,
        runtime.handle().clone(),
        width,
        height,
    );

    ui::run_tui(state)
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            ensure_directories_exist()?;
            get_log_path()?
        }
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn load_content(file: Option<&Path>) -> Result<(String, String)> {
    if let Some(path) = file {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        return Ok((path.display().to_string(), content));
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(("sample".to_string(), SAMPLE.to_string()));
    }

    let mut content = String::new();
    stdin
        .lock()
        .read_to_string(&mut content)
        .context("Failed to read stdin")?;
    Ok(("stdin".to_string(), content))
}

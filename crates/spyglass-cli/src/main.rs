//! Spyglass - terminal Markdown viewer with a scroll-spy outline
//!
//! Renders a Markdown document next to a live outline sidebar: the section
//! under the viewport stays highlighted while you scroll, a sliding marker
//! tracks the active subsection, and clicking an outline entry glides the
//! document to that heading.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use spyglass_core::{paths, ViewerConfig};

mod tui;

/// Spyglass - Markdown viewer
#[derive(Parser)]
#[command(name = "spyglass")]
#[command(about = "Terminal Markdown viewer with a scroll-spy outline", long_about = None)]
struct Cli {
    /// Markdown file to view
    #[arg(required_unless_present = "list_themes")]
    file: Option<PathBuf>,

    /// Theme name
    #[arg(short, long)]
    theme: Option<String>,

    /// List available themes and exit
    #[arg(long)]
    list_themes: bool,

    /// Hide the outline sidebar
    #[arg(long)]
    no_outline: bool,

    /// Smooth-scroll duration in milliseconds
    #[arg(long)]
    duration_ms: Option<u64>,

    /// Reset the scroll position to the top on startup
    #[arg(long)]
    reset_scroll: bool,

    /// Read configuration from this file instead of ~/.spyglass/spyglass.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Restore terminal state - called on panic or unexpected exit
fn restore_terminal() {
    use crossterm::{
        event::DisableMouseCapture,
        execute,
        terminal::{disable_raw_mode, LeaveAlternateScreen},
    };
    let _ = disable_raw_mode();
    let _ = execute!(std::io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

#[tokio::main]
async fn main() -> Result<()> {
    // Set up panic hook to restore terminal state
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    // Initialize logging to file (not stdout/stderr which would mess up the TUI)
    let log_dir = paths::logs_dir();
    std::fs::create_dir_all(&log_dir).ok();

    #[cfg(unix)]
    let null_device = "/dev/null";
    #[cfg(windows)]
    let null_device = "NUL";

    let log_file = std::fs::File::create(log_dir.join("spyglass.log"))
        .unwrap_or_else(|_| std::fs::File::create(null_device).unwrap());

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    if cli.list_themes {
        println!("Available themes:");
        for theme in tui::themes::THEME_REGISTRY.list() {
            println!("  {} - {}", theme.name, theme.display_name);
        }
        return Ok(());
    }

    // Config file first, command line on top
    let mut config = match &cli.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::load_or_default(),
    };
    if let Some(theme) = &cli.theme {
        config.theme = Some(theme.clone());
    }
    if cli.no_outline {
        config.hide_outline = true;
    }
    if let Some(ms) = cli.duration_ms {
        config.navigator.scroll_duration_ms = Some(ms);
    }
    if cli.reset_scroll {
        config.navigator.reset_scroll = Some(true);
    }

    let Some(file) = cli.file else {
        anyhow::bail!("missing file argument");
    };
    let text = std::fs::read_to_string(&file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let title = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    tracing::info!(file = %file.display(), bytes = text.len(), "opening document");

    let mut app = tui::App::new(title, text, config);
    app.run().await
}

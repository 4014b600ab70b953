//! Health Fact Checker terminal UI.
//!
//! A chat pane that forwards questions to the fact-checking service and shows
//! its answers with their citations.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use factcheck_client::{ClientConfig, DeploymentMode, HttpChatClient, RequestCycle, MODE_ENV_VAR};

mod app;
mod backend;
mod event;
mod input;
mod state;
mod ui;

use app::App;
use event::{BackendCommand, UiEvent};

#[derive(Parser)]
#[command(name = "factcheck-tui")]
#[command(about = "Health Fact Checker terminal UI")]
#[command(version)]
struct Cli {
    /// Base URL of the fact-checking service (overrides the mode's default)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Deployment mode: development targets http://127.0.0.1:8000
    #[arg(short, long, env = MODE_ENV_VAR, default_value = "development")]
    mode: DeploymentMode,

    /// Log file (the terminal is owned by the UI)
    #[arg(long, default_value = "/tmp/factcheck-tui.log")]
    log_file: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    // Write logs to a file to avoid terminal interference
    if let Ok(file) = std::fs::File::create(&cli.log_file) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("factcheck_tui=debug,factcheck_client=debug"));
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_env_filter(filter)
            .with_ansi(false)
            .init();
    }

    let config = ClientConfig::new(cli.mode, cli.endpoint);
    let client = HttpChatClient::from_config(&config)?;
    let endpoint = client.base_url().to_string();
    info!(endpoint = %endpoint, mode = %config.mode, "Starting fact checker TUI");

    // Create channels for UI <-> request thread communication
    let (ui_tx, ui_rx) = mpsc::channel::<UiEvent>(16);
    let (cmd_tx, cmd_rx) = mpsc::channel::<BackendCommand>(16);

    // Spawn background thread with its own tokio runtime
    let bg_handle = std::thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                error!(error = %e, "Failed to create tokio runtime");
                return;
            }
        };
        rt.block_on(backend::run_backend(RequestCycle::new(client), ui_tx, cmd_rx));
    });

    // Initialize terminal (enters alternate screen, enables raw mode)
    let terminal = ratatui::init();

    let mut app = App::new(endpoint, ui_rx, cmd_tx);
    let result = app.run(terminal);

    // Restore terminal (exits alternate screen, disables raw mode)
    ratatui::restore();

    // Wait for background thread to finish
    let _ = bg_handle.join();

    info!("TUI shutdown complete");

    result.map_err(|e| e.into())
}

//! Health Fact Checker CLI - ask the fact-checking service from a shell.

use std::process::ExitCode;

use chrono::Local;
use clap::{Parser, Subcommand};
use futures_util::{pin_mut, StreamExt};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use factcheck_client::{
    ClientConfig, DeploymentMode, HttpChatClient, RequestCycle, StreamEvent, MODE_ENV_VAR,
};
use factcheck_core::{ConversationStore, Message, Role};

/// Health Fact Checker CLI
#[derive(Parser)]
#[command(name = "factcheck")]
#[command(about = "Fact-check health and nutrition claims from the command line", long_about = None)]
#[command(version)]
struct Cli {
    /// Base URL of the fact-checking service (overrides the mode's default)
    #[arg(short, long, global = true)]
    endpoint: Option<String>,

    /// Deployment mode: development targets http://127.0.0.1:8000
    #[arg(short, long, global = true, env = MODE_ENV_VAR, default_value = "development")]
    mode: DeploymentMode,

    /// Log request details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask one question and print the answer with its sources
    Ask {
        /// The question or claim to fact-check
        question: String,
    },

    /// Ask one question and print progress events as they arrive
    Stream {
        /// The question or claim to fact-check
        question: String,
    },

    /// Check whether the service is up
    Health,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let config = ClientConfig::new(cli.mode, cli.endpoint);
    let client = HttpChatClient::from_config(&config)?;
    debug!(endpoint = %client.base_url(), mode = %config.mode, "Client configured");

    match cli.command {
        Commands::Ask { question } => ask(client, &question).await,
        Commands::Stream { question } => stream(&client, &question).await,
        Commands::Health => Ok(health(&client).await),
    }
}

async fn ask(
    client: HttpChatClient,
    question: &str,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cycle = RequestCycle::new(client);
    let mut store = ConversationStore::new();

    cycle.submit(&mut store, question).await?;

    for message in store.messages().iter().filter(|m| m.role() == Role::Assistant) {
        println!("{}", format_message(message));
    }
    if let Some(banner) = store.last_error() {
        eprintln!("{}", banner);
    }

    Ok(ExitCode::SUCCESS)
}

async fn stream(
    client: &HttpChatClient,
    question: &str,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    if question.trim().is_empty() {
        return Err(factcheck_core::CoreError::EmptyUtterance.into());
    }

    let events = client.chat_stream(question).await?;
    pin_mut!(events);

    while let Some(event) = events.next().await {
        match event? {
            StreamEvent::Message { content, node } => match node {
                Some(node) => println!("[{}] {}", node, content),
                None => println!("{}", content),
            },
            StreamEvent::Done => break,
            StreamEvent::Error { message } => {
                eprintln!("Error: {}", message);
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn health(client: &HttpChatClient) -> ExitCode {
    match client.health().await {
        Ok(true) => {
            println!("healthy");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            println!("unhealthy");
            ExitCode::FAILURE
        }
        Err(e) => {
            warn!(error = %e, "Health check failed");
            println!("unhealthy");
            ExitCode::FAILURE
        }
    }
}

/// Render one assistant entry: timestamp header, content, then sources.
fn format_message(message: &Message) -> String {
    let mut out = format!(
        "Assistant ({}):\n{}",
        message.timestamp().with_timezone(&Local).format("%H:%M:%S"),
        message.content()
    );
    if let Some(sources) = message.sources() {
        out.push_str("\n\nSources used: ");
        out.push_str(&sources.join(", "));
    }
    out
}

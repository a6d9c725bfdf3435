use std::future::Future;
use std::io;

use anyhow::Result;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod chat;

use crate::core::AppConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// OpenAI model to use (defaults to $ASKGPT_MODEL or gpt-4-turbo)
    #[arg(long)]
    model: Option<String>,
}

/// Exit status used when the user insists on leaving mid-request.
pub const FORCED_EXIT_CODE: i32 = 130;

/// The first interrupt cancels `cancel` so the current turn can wind
/// down. Returns `Ok` on the second interrupt, at which point the
/// caller should give up on the turn entirely.
pub async fn watch_interrupts<F, Fut>(
    mut interrupted: F,
    cancel: CancellationToken,
) -> io::Result<()>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    interrupted().await?;
    tracing::debug!("Received Ctrl-C, finishing the current turn");
    cancel.cancel();

    interrupted().await?;
    tracing::debug!("Received a second Ctrl-C, exiting");
    Ok(())
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Logs go to stderr and stay quiet by default so they don't
    // trample the conversation
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=warn", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = AppConfig::default();
    if let Some(model) = args.model {
        config.openai_model = model;
    }

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        match watch_interrupts(tokio::signal::ctrl_c, on_interrupt).await {
            Ok(()) => std::process::exit(FORCED_EXIT_CODE),
            Err(e) => tracing::debug!("Failed to listen for Ctrl-C: {}", e),
        }
    });

    chat::run(&config, cancel).await
}

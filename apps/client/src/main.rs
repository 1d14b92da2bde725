mod cli;
mod config;
mod confirm;
mod errors;
mod gateway;
mod models;
mod notify;
mod state;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::commands::run;
use crate::cli::render::Renderer;
use crate::cli::Cli;
use crate::config::{normalize_base_url, Config};
use crate::confirm::{AssumeYes, ConfirmPresenter, ConfirmationBroker, TerminalPresenter};
use crate::gateway::Gateway;
use crate::notify::NotificationQueue;
use crate::state::Services;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Logs go to stderr so command output on stdout stays pipeable
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!("Starting client v{}", env!("CARGO_PKG_VERSION"));

    let base_url = match cli.base_url.as_deref() {
        Some(raw) => normalize_base_url(raw)?,
        None => config.api_base_url.clone(),
    };
    let gateway = Gateway::with_defaults(&base_url)?;
    debug!("Gateway ready (base: {})", gateway.base_url());

    let presenter: Arc<dyn ConfirmPresenter> = if cli.yes {
        Arc::new(AssumeYes)
    } else {
        Arc::new(TerminalPresenter::new())
    };

    let services = Services {
        gateway,
        notifications: NotificationQueue::new(),
        confirmations: ConfirmationBroker::spawn(presenter),
    };

    let renderer = Renderer::spawn(&services.notifications);
    let outcome = run(cli.command, &services).await;
    let shown = renderer.finish().await;
    debug!("Rendered {shown} notification(s)");

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            error!("{e:#}");
            Ok(ExitCode::FAILURE)
        }
    }
}

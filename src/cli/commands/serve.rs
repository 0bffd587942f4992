//! Serve command implementation

use crate::config::load_config;
use crate::server;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override the listening port from `[server] port`
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command, returning once `shutdown_signal` fires
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        let port = self.port.unwrap_or(config.server.port);
        println!(
            "🌐 Serving reports on http://{}:{}",
            config.server.bind_address, port
        );

        match server::serve(&config, port, shutdown_signal).await {
            Ok(()) => {
                println!("✅ Server stopped");
                Ok(0)
            }
            Err(e @ crate::domain::ReportError::Configuration(_)) => {
                eprintln!("Configuration error: {e}");
                Ok(2)
            }
            Err(e) => Err(e.into()),
        }
    }
}

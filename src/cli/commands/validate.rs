//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Farmu Reports configuration file.

use crate::adapters::database::create_order_source;
use crate::config::{load_config, ReportsConfig};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug, Default)]
pub struct ValidateArgs {
    /// Also open a database connection and run a trivial query
    #[arg(long)]
    pub check_connection: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates after applying overrides
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Database Engine: {}", config.database.engine);
        println!("  Database: {}", config.database.connection_string_safe());
        println!("  SSL Mode: {}", config.database.ssl_mode);
        println!("  Max Connections: {}", config.database.max_connections);
        println!(
            "  Statement Timeout: {}s",
            config.database.statement_timeout_seconds
        );
        println!("  Output Directory: {}", config.report.output_dir);
        println!("  File Prefix: {}", config.report.file_prefix);
        println!("  Archive Name: {}", config.report.archive_name);
        println!(
            "  Server: {}:{}",
            config.server.bind_address, config.server.port
        );
        let usernames: Vec<&str> = config
            .server
            .users
            .iter()
            .map(|u| u.username.as_str())
            .collect();
        println!("  Server Users: {usernames:?}");
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                format!("{} ({})", config.logging.local_path, config.logging.local_rotation)
            } else {
                "disabled".to_string()
            }
        );
        println!();

        if self.check_connection {
            return Ok(check_connection(&config).await);
        }
        Ok(0)
    }
}

/// Connection failures are reported as fatal, unlike report runs where an
/// unreachable database only means "no data"
async fn check_connection(config: &ReportsConfig) -> i32 {
    println!("🔌 Checking database connection...");
    let result = match create_order_source(config) {
        Ok(source) => source.test_connection().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => {
            println!("✅ Database reachable");
            0
        }
        Err(e) => {
            println!("❌ Database connection failed");
            println!("   Error: {e}");
            5
        }
    }
}

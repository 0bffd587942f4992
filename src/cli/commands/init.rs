//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "farmu-reports.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Farmu Reports configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - Set FARMU_DATABASE_USER and FARMU_DATABASE_PASSWORD");
                println!("     - Set FARMU_IQVIA_PASSWORD and FARMU_CLOSEUP_PASSWORD");
                println!("  3. Validate configuration: farmu-reports validate-config");
                println!("  4. Write this month's files: farmu-reports generate");
                println!("  5. Or serve them over HTTP: farmu-reports serve");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    fn sample_config() -> &'static str {
        r#"# Farmu Reports Configuration File
# Monthly sales reports for IQVIA and CLOSEUP

[application]
log_level = "info"

# Operational database holding orders, customers and products
# Values can also come from FARMU_DATABASE_* (or, for mysql, legacy MYSQL_*) variables
[database]
engine = "mysql"  # mysql or postgresql
host = "localhost"
port = 3306
user = "${FARMU_DATABASE_USER}"
password = "${FARMU_DATABASE_PASSWORD}"
name = "farmu"
max_connections = 4
connection_timeout_seconds = 30
statement_timeout_seconds = 120
ssl_mode = "disable"  # disable or require

[report]
output_dir = "reports"
file_prefix = "Data Farmu"
archive_name = "Reportes_Farmu.zip"

[server]
bind_address = "0.0.0.0"
port = 5000

# HTTP Basic accounts allowed to download reports
[[server.users]]
username = "iqvia"
password = "${FARMU_IQVIA_PASSWORD}"

[[server.users]]
username = "closeup"
password = "${FARMU_CLOSEUP_PASSWORD}"

[logging]
local_enabled = true
local_path = "logs"
local_rotation = "daily"  # daily, hourly or never
"#
    }
}

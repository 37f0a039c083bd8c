use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

mod import;

#[derive(Debug, Parser)]
#[command(name = "mpo-cli")]
#[command(about = "Import the HK Post mobile office JSON dataset into MySQL")]
struct Cli {
    /// Path to the JSON dataset file
    #[arg(short, long, default_value = "mobile-office.json")]
    file: PathBuf,

    /// MySQL server host
    #[arg(long, default_value = "localhost")]
    host: String,

    /// MySQL user
    #[arg(long, default_value = "root")]
    user: String,

    /// MySQL password
    #[arg(long, default_value = "")]
    password: String,

    /// Target database name
    #[arg(long, default_value = "hkpo_mobile")]
    database: String,

    /// Parse and validate only; never write to the database
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    // stdout is reserved for the single JSON report; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    import::run(&cli).await
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;

//! CLI configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use coupon_engine::timestamps::parse_timestamp;
use jiff::Timestamp;

/// Coupon CLI configuration
#[derive(Debug, Parser)]
#[command(name = "coupon-cli", about = "Coupon eligibility and best-offer selection", long_about = None)]
pub(crate) struct CliConfig {
    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings. Logs go to stderr so stdout stays machine-readable.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// List every coupon in a catalog
    List(CatalogArgs),

    /// Print the best coupon for a request as JSON
    Best(RequestArgs),

    /// Show the eligibility verdict of every coupon for a request
    Explain(RequestArgs),
}

/// Catalog selection.
#[derive(Debug, Args)]
pub(crate) struct CatalogArgs {
    /// Coupon catalog YAML file
    #[arg(short, long, env = "COUPON_CATALOG")]
    pub catalog: PathBuf,
}

/// Catalog, request and evaluation instant.
#[derive(Debug, Args)]
pub(crate) struct RequestArgs {
    /// Catalog selection.
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Request YAML file holding `user` and `cart`
    #[arg(short, long)]
    pub request: PathBuf,

    /// Evaluate at this instant instead of the current time
    #[arg(long, value_parser = parse_timestamp)]
    pub now: Option<Timestamp>,
}

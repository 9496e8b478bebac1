//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// roomcast - dispatch commands to rooms of computers over AMQP
#[derive(Parser, Debug)]
#[command(
    name = "roomcast",
    author,
    version,
    about = "Room/computer command dispatch over AMQP",
    long_about = "Dispatches commands to individual computers or whole rooms of computers \n\
                  through an AMQP broker, using computed routing keys, persistent delivery, \n\
                  and declarative topology bootstrap."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "ROOMCAST_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "ROOMCAST_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    /// Prometheus metrics port (disabled when omitted)
    #[arg(long, global = true, env = "ROOMCAST_METRICS_PORT")]
    pub metrics_port: Option<u16>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dispatch a command to a computer, room, or queue
    Send(SendArgs),

    /// Validate configuration file without connecting
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),

    /// Connect to the broker, bootstrap the topology, and disconnect
    Check(CheckArgs),
}

/// Arguments for the `send` command
#[derive(Parser, Debug, Clone)]
pub struct SendArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(short, long, default_value = "roomcast.toml", env = "ROOMCAST_CONFIG")]
    pub config: PathBuf,

    /// Override broker host from configuration
    #[arg(long, env = "ROOMCAST_BROKER_HOST")]
    pub host: Option<String>,

    /// Override broker port from configuration
    #[arg(long, env = "ROOMCAST_BROKER_PORT")]
    pub port: Option<u16>,

    /// Command payload: JSON is sent structured, anything else as raw text
    #[arg(short = 'm', long)]
    pub payload: String,

    /// Treat the payload as raw text even if it parses as JSON
    #[arg(long)]
    pub raw: bool,

    #[command(subcommand)]
    pub target: TargetArgs,
}

/// Dispatch target
#[derive(Subcommand, Debug, Clone)]
pub enum TargetArgs {
    /// A single computer in a room
    Computer {
        /// Room identifier
        #[arg(long)]
        room: String,

        /// Computer identifier
        #[arg(long)]
        computer: String,
    },

    /// Every computer in a room
    Room {
        /// Room identifier
        #[arg(long)]
        room: String,
    },

    /// A named queue (declared before publish)
    Queue {
        /// Queue name
        #[arg(long)]
        name: String,
    },
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "roomcast.toml", env = "ROOMCAST_CONFIG")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "roomcast.toml", env = "ROOMCAST_CONFIG")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show detailed exchange information
    #[arg(long)]
    pub exchanges: bool,
}

/// Arguments for the `check` command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "roomcast.toml", env = "ROOMCAST_CONFIG")]
    pub config: PathBuf,

    /// Override broker host from configuration
    #[arg(long, env = "ROOMCAST_BROKER_HOST")]
    pub host: Option<String>,

    /// Override broker port from configuration
    #[arg(long, env = "ROOMCAST_BROKER_PORT")]
    pub port: Option<u16>,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => observability::LogFormat::Json,
            LogFormat::Pretty => observability::LogFormat::Pretty,
            LogFormat::Compact => observability::LogFormat::Compact,
        }
    }
}

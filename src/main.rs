// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use truelist_mcp::app_config::{self, Config};
use truelist_mcp::mcp::{McpServer, ToolRouter};
use truelist_mcp::providers::Truelist;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the MCP protocol over stdio (default command)
    Serve(ServeArgs),

    /// Generate shell completions for truelist-mcp
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ServeArgs {
    /// Truelist API key (required)
    #[arg(long, env = "TRUELIST_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Truelist API endpoint override
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// truelist-mcp - Truelist email verification over MCP
///
/// An MCP server that lets agent hosts validate email addresses through the
/// Truelist API, one at a time or in rate-limited batches of up to 50.
#[derive(Parser, Debug)]
#[command(name = "truelist-mcp")]
#[command(version)]
#[command(about = "MCP server for Truelist email verification")]
#[command(long_about = "truelist-mcp exposes the Truelist email verification API as MCP tools
over stdio: validate_email, validate_emails (batches of up to 50), and
check_account.

EXAMPLES:
    TRUELIST_API_KEY=tl_... truelist-mcp             # Serve with defaults
    truelist-mcp serve --endpoint http://localhost:8080
    truelist-mcp --log-level debug                   # Verbose logging on stderr
    truelist-mcp completions bash > truelist-mcp.bash

CONFIGURATION:
    Optional settings (endpoint, timeouts, batch tuning, log level) are read
    from conf.json when present; command-line flags take precedence. The API
    key is only ever read from the TRUELIST_API_KEY environment variable.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    serve: ServeArgs,
}

// Logger writing to stderr so stdout stays reserved for the protocol
struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    fn new(level: LevelFilter) -> Self {
        StderrLogger { level }
    }

    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(StderrLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    StderrLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "truelist-mcp", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Serve(args)) => run_serve(args).await,
        None => run_serve(cli.serve).await,
    }
}

async fn run_serve(options: ServeArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // The credential comes from the environment only; absence is fatal before
    // any tool becomes callable
    let api_key = options
        .api_key
        .ok_or_else(|| anyhow!("TRUELIST_API_KEY environment variable is required"))?;

    // Load configuration when the file exists, otherwise run on defaults
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        serde_json::from_reader::<_, Config>(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        Config::default()
    };

    // Override config with CLI options if provided
    if let Some(endpoint) = &options.endpoint {
        config.api.endpoint = endpoint.clone();
    }

    if let Some(timeout_secs) = options.timeout_secs {
        config.api.timeout_secs = timeout_secs;
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    if config.api.endpoint.is_empty() {
        info!("No endpoint configured, using the public Truelist API");
    }

    let client = Truelist::with_timeout(api_key, config.api.endpoint.clone(), config.timeout());
    let router = ToolRouter::new(Arc::new(client), &config);

    McpServer::new(router).serve().await
}

pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "apictl")]
#[command(about = "Command-line client for the Comprehensive API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List the built-in demonstration API keys")]
    Keys,

    #[command(about = "Check a key against the built-in registry without a server")]
    Check {
        #[arg(help = "API key to check")]
        key: String,
        #[arg(long, default_value = "", help = "Comma separated capabilities, any of which suffices (read,write,admin)")]
        require: String,
    },

    #[command(about = "Check server health")]
    Health {
        #[arg(long, help = "Server URL (defaults to saved config)")]
        url: Option<String>,
    },

    #[command(about = "Validate an API key against a running server")]
    Validate {
        #[arg(long, help = "Server URL (defaults to saved config)")]
        url: Option<String>,
        #[arg(long, help = "API key (defaults to saved config)")]
        key: Option<String>,
        #[arg(long, help = "Header carrying the key (defaults to saved config, then X-API-Key)")]
        header: Option<String>,
    },

    #[command(about = "Saved CLI settings")]
    Config {
        #[command(subcommand)]
        cmd: commands::config::ConfigCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Run a command. `Ok(false)` means the command completed but the answer
/// was negative (key denied, server unhealthy).
pub async fn run(cli: Cli) -> anyhow::Result<bool> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Keys => commands::keys::list(output_format).map(|_| true),
        Commands::Check { key, require } => commands::keys::check(&key, &require, output_format),
        Commands::Health { url } => commands::remote::health(url, output_format).await,
        Commands::Validate { url, key, header } => commands::remote::validate(url, key, header, output_format).await,
        Commands::Config { cmd } => commands::config::handle(cmd, output_format).map(|_| true),
    }
}

use clap::Subcommand;
use serde_json::json;

use crate::cli::config::{load_config, save_config};
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ConfigCommands {
    #[command(about = "Show saved server URL and API key")]
    Show,

    #[command(about = "Set the default server URL")]
    SetUrl {
        #[arg(help = "Server URL, e.g. http://127.0.0.1:5000")]
        url: String,
    },

    #[command(about = "Set the default API key")]
    SetKey {
        #[arg(help = "API key sent in the configured header")]
        key: String,
    },

    #[command(about = "Set the header that carries the API key")]
    SetHeader {
        #[arg(help = "Header name, e.g. X-API-Key")]
        header: String,
    },
}

pub fn handle(cmd: ConfigCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let mut config = load_config()?;

    match cmd {
        ConfigCommands::Show => match output_format {
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({
                        "url": config.url,
                        "api_key": config.masked_key(),
                        "api_key_header": config.header_name(),
                        "updated_at": config.updated_at
                    }))?
                );
                Ok(())
            }
            OutputFormat::Text => {
                println!("URL: {}", config.url);
                println!("API key: {}", config.masked_key().unwrap_or_else(|| "(none)".to_string()));
                println!("Header: {}", config.header_name());
                Ok(())
            }
        },
        ConfigCommands::SetUrl { url } => {
            config.url = url.trim_end_matches('/').to_string();
            config.touch();
            save_config(&config)?;
            output_success(&output_format, &format!("Server URL set to {}", config.url), None)
        }
        ConfigCommands::SetKey { key } => {
            if key.is_empty() {
                anyhow::bail!("API key must not be empty");
            }
            config.api_key = Some(key);
            config.touch();
            save_config(&config)?;
            output_success(&output_format, "API key saved", None)
        }
        ConfigCommands::SetHeader { header } => {
            let header = header.trim();
            if reqwest::header::HeaderName::from_bytes(header.as_bytes()).is_err() {
                anyhow::bail!("'{}' is not a valid header name", header);
            }
            config.api_key_header = Some(header.to_string());
            config.touch();
            save_config(&config)?;
            output_success(&output_format, &format!("API key header set to {}", header), None)
        }
    }
}

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_API_KEY_HEADER: &str = "X-API-Key";

/// Persisted CLI settings: which server to talk to and which key to send
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    pub url: String,
    pub api_key: Option<String>,
    /// Header name, for servers that set `SECURITY_API_KEY_HEADER`
    #[serde(default)]
    pub api_key_header: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            api_key: None,
            api_key_header: None,
            updated_at: None,
        }
    }
}

impl CliConfig {
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }

    pub fn header_name(&self) -> &str {
        self.api_key_header.as_deref().unwrap_or(DEFAULT_API_KEY_HEADER)
    }

    /// Key with the last four characters left visible
    pub fn masked_key(&self) -> Option<String> {
        self.api_key.as_ref().map(|key| {
            let visible: String = key.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
            format!("****{}", visible)
        })
    }
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("API_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("comprehensive-api").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn load_config() -> anyhow::Result<CliConfig> {
    load_from(&get_config_dir()?)
}

pub fn save_config(config: &CliConfig) -> anyhow::Result<()> {
    save_to(&get_config_dir()?, config)
}

fn load_from(dir: &std::path::Path) -> anyhow::Result<CliConfig> {
    let file = dir.join("cli.json");

    if !file.exists() {
        return Ok(CliConfig::default());
    }

    let content = fs::read_to_string(file)?;
    let config: CliConfig = serde_json::from_str(&content)?;
    Ok(config)
}

fn save_to(dir: &std::path::Path, config: &CliConfig) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(config)?;
    fs::write(dir.join("cli.json"), content)?;
    Ok(())
}

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown APP_ENV '{0}' (expected development, staging or production)")]
    UnknownEnvironment(String),

    #[error("invalid value '{value}' for {name}: expected {expected}")]
    InvalidValue {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Resolve an `APP_ENV` value; unset or empty means development
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::UnknownEnvironment(name.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    /// Header carrying the API key
    pub api_key_header: String,
    /// List the demonstration keys on the home route
    pub expose_sample_keys: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Pick the preset named by `APP_ENV`, then apply the individual overrides
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::from_name(lookup("APP_ENV").as_deref().unwrap_or(""))?;
        Self::for_environment(environment).with_overrides(lookup)
    }

    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
    }

    /// Apply overrides from a variable lookup; any unparsable value is an error
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some(v) = lookup("API_HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("API_PORT") {
            self.server.port = parse_value("API_PORT", &v, "a port number (0-65535)")?;
        } else if let Some(v) = lookup("PORT") {
            self.server.port = parse_value("PORT", &v, "a port number (0-65535)")?;
        }

        // API overrides
        if let Some(v) = lookup("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = parse_value("API_ENABLE_REQUEST_LOGGING", &v, "true or false")?;
        }
        if let Some(v) = lookup("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = parse_value("API_MAX_REQUEST_SIZE_BYTES", &v, "a size in bytes")?;
        }

        // Security overrides
        if let Some(v) = lookup("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = parse_value("SECURITY_ENABLE_CORS", &v, "true or false")?;
        }
        if let Some(v) = lookup("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(v) = lookup("SECURITY_API_KEY_HEADER") {
            if !v.trim().is_empty() {
                self.security.api_key_header = v.trim().to_string();
            }
        }
        if let Some(v) = lookup("SECURITY_EXPOSE_SAMPLE_KEYS") {
            self.security.expose_sample_keys = parse_value("SECURITY_EXPOSE_SAMPLE_KEYS", &v, "true or false")?;
        }

        Ok(self)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: Vec::new(), // permissive
                api_key_header: "X-API-Key".to_string(),
                expose_sample_keys: true,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 5 * 1024 * 1024, // 5MB
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
                api_key_header: "X-API-Key".to_string(),
                expose_sample_keys: true,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            api: ApiConfig {
                enable_request_logging: false,
                max_request_size_bytes: 2 * 1024 * 1024, // 2MB
            },
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
                api_key_header: "X-API-Key".to_string(),
                expose_sample_keys: false,
            },
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::development()
    }
}

fn parse_value<T: FromStr>(name: &'static str, value: &str, expected: &'static str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
        expected,
    })
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<Result<AppConfig, ConfigError>> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> Result<&'static AppConfig, ConfigError> {
    match &*CONFIG {
        Ok(config) => Ok(config),
        Err(err) => Err(err.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn overrides(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.security.api_key_header, "X-API-Key");
        assert!(config.security.expose_sample_keys);
        assert!(config.security.cors_origins.is_empty());
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(!config.security.expose_sample_keys);
        assert!(!config.api.enable_request_logging);
        assert_eq!(config.security.cors_origins, vec!["https://app.example.com"]);
    }

    #[test]
    fn environment_names() {
        assert_eq!(Environment::from_name("prod"), Ok(Environment::Production));
        assert_eq!(Environment::from_name("Stage"), Ok(Environment::Staging));
        assert_eq!(Environment::from_name(""), Ok(Environment::Development));
    }

    #[test]
    fn mistyped_environment_is_rejected() {
        let err = AppConfig::from_lookup(overrides(&[("APP_ENV", "prodution")])).unwrap_err();
        assert_eq!(err, ConfigError::UnknownEnvironment("prodution".to_string()));
        assert!(err.to_string().contains("prodution"));
    }

    #[test]
    fn lookup_selects_preset_before_overrides() {
        let config = AppConfig::from_lookup(overrides(&[("APP_ENV", "production"), ("API_PORT", "8443")])).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert!(!config.security.expose_sample_keys);
        assert_eq!(config.server.port, 8443);

        let config = AppConfig::from_lookup(overrides(&[])).unwrap();
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn overrides_apply() {
        let config = AppConfig::development()
            .with_overrides(overrides(&[
                ("API_PORT", "8080"),
                ("API_HOST", "127.0.0.1"),
                ("API_ENABLE_REQUEST_LOGGING", "false"),
                ("SECURITY_CORS_ORIGINS", "https://a.test, ,https://b.test"),
                ("SECURITY_EXPOSE_SAMPLE_KEYS", "false"),
            ]))
            .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert!(!config.api.enable_request_logging);
        assert_eq!(config.security.cors_origins, vec!["https://a.test", "https://b.test"]);
        assert!(!config.security.expose_sample_keys);
    }

    #[test]
    fn bad_values_are_reported() {
        let err = AppConfig::production()
            .with_overrides(overrides(&[("SECURITY_ENABLE_CORS", "no")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                name: "SECURITY_ENABLE_CORS",
                value: "no".to_string(),
                expected: "true or false",
            }
        );

        let err = AppConfig::production()
            .with_overrides(overrides(&[("API_PORT", "99999")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "API_PORT", .. }));

        let err = AppConfig::development()
            .with_overrides(overrides(&[("API_MAX_REQUEST_SIZE_BYTES", "10MB")]))
            .unwrap_err();
        assert!(err.to_string().contains("API_MAX_REQUEST_SIZE_BYTES"));
    }

    #[test]
    fn port_falls_back_to_port_variable() {
        let config = AppConfig::development().with_overrides(overrides(&[("PORT", "9000")])).unwrap();
        assert_eq!(config.server.port, 9000);

        let config = AppConfig::development()
            .with_overrides(overrides(&[("API_PORT", "7000"), ("PORT", "9000")]))
            .unwrap();
        assert_eq!(config.server.port, 7000);
    }
}

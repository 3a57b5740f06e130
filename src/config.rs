use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Mail transport settings. Credentials are deployment configuration and are
/// sourced from the config file or environment, never from source.
#[derive(Debug, Deserialize, Clone)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_smtp_tls")]
    pub tls: bool,
    /// Bound on the blocking transport call, in seconds.
    #[serde(default = "default_smtp_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_from_email")]
    pub from_email: String,
    #[serde(default = "default_from_name")]
    pub from_name: String,
    #[serde(default = "default_to_email")]
    pub to_email: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            tls: default_smtp_tls(),
            timeout_seconds: default_smtp_timeout_seconds(),
            from_email: default_from_email(),
            from_name: default_from_name(),
            to_email: default_to_email(),
        }
    }
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_smtp_tls() -> bool {
    true
}

fn default_smtp_timeout_seconds() -> u64 {
    30
}

fn default_from_email() -> String {
    "noreply@marigoldweddings.com".to_string()
}

fn default_from_name() -> String {
    "Wedding Inquiry Form".to_string()
}

fn default_to_email() -> String {
    "hello@marigoldweddings.com".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (MARIGOLD__SMTP__PASSWORD, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Config file is optional
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("MARIGOLD")
                .separator("__")
                .try_parsing(true),
        );

        // Also support bare environment variables for the secrets
        if let Ok(username) = env::var("SMTP_USERNAME") {
            builder = builder.set_override("smtp.username", username)?;
        }
        if let Ok(password) = env::var("SMTP_PASSWORD") {
            builder = builder.set_override("smtp.password", password)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.smtp.host.is_empty() {
            return Err("SMTP host must not be empty".to_string());
        }
        if self.smtp.port == 0 {
            return Err("SMTP port must be greater than 0".to_string());
        }
        if !self.smtp.to_email.contains('@') {
            return Err("SMTP recipient address must be a valid email".to_string());
        }
        if !self.smtp.from_email.contains('@') {
            return Err("SMTP sender address must be a valid email".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            smtp: SmtpConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validation_zero_port() {
        let mut config = valid_config();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_smtp_host() {
        let mut config = valid_config();
        config.smtp.host = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_recipient() {
        let mut config = valid_config();
        config.smtp.to_email = "not-an-address".to_string();
        assert!(config.validate().is_err());
    }
}

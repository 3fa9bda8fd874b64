//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub reconciler: ReconcilerConfig,
    pub economy: EconomyConfig,
    pub discord: DiscordConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            _ => Err(()),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Punishment reconciliation loop settings
#[derive(Debug, Clone, Deserialize)]
pub struct ReconcilerConfig {
    /// Sweep period in milliseconds
    #[serde(default = "default_reconciler_period_ms")]
    pub period_ms: u64,
    /// Failed lift attempts tolerated before a record is dropped
    #[serde(default = "default_max_lift_attempts")]
    pub max_lift_attempts: u32,
}

impl ReconcilerConfig {
    #[must_use]
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

/// Economy and moderation policy knobs used by the command-facing services
#[derive(Debug, Clone, Deserialize)]
pub struct EconomyConfig {
    #[serde(default = "default_daily_reward")]
    pub daily_reward: i64,
    #[serde(default = "default_max_sanction_duration_ms")]
    pub max_sanction_duration_ms: i64,
    #[serde(default = "default_dangerous_enabled")]
    pub dangerous_commands_enabled: bool,
}

/// Discord REST API settings
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordConfig {
    #[serde(default = "default_discord_api_base")]
    pub api_base: String,
    pub bot_token: String,
    #[serde(default = "default_discord_timeout_secs")]
    pub timeout_secs: u64,
}

// Default value functions
fn default_app_name() -> String {
    "warden".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_database_url() -> String {
    "sqlite://data.sqlite".to_string()
}

fn default_max_connections() -> u32 {
    1
}

fn default_reconciler_period_ms() -> u64 {
    60_000
}

fn default_max_lift_attempts() -> u32 {
    1
}

fn default_daily_reward() -> i64 {
    250
}

fn default_max_sanction_duration_ms() -> i64 {
    warden_core::MAX_SANCTION_DURATION_MS
}

fn default_dangerous_enabled() -> bool {
    true
}

fn default_discord_api_base() -> String {
    "https://discord.com/api/v10".to_string()
}

fn default_discord_timeout_secs() -> u64 {
    10
}

/// Read an optional variable, falling back to `default` when unset
fn optional<T, F>(lookup: &F, name: &'static str, default: impl FnOnce() -> T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        None => Ok(default()),
    }
}

/// Read a required variable
fn required<T, F>(lookup: &F, name: &'static str) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(name).ok_or(ConfigError::MissingVar(name))?;
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(name, raw))
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or unparsable
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    ///
    /// # Errors
    /// Returns an error if required variables are missing or unparsable
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: optional(&lookup, "APP_ENV", default_env)?,
            },
            api: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(default_host),
                port: required(&lookup, "API_PORT")?,
            },
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").unwrap_or_else(default_database_url),
                max_connections: optional(&lookup, "DATABASE_MAX_CONNECTIONS", default_max_connections)?,
            },
            reconciler: ReconcilerConfig {
                period_ms: optional(&lookup, "RECONCILER_PERIOD_MS", default_reconciler_period_ms)?,
                max_lift_attempts: optional(
                    &lookup,
                    "RECONCILER_MAX_LIFT_ATTEMPTS",
                    default_max_lift_attempts,
                )?,
            },
            economy: EconomyConfig {
                daily_reward: optional(&lookup, "DAILY_REWARD", default_daily_reward)?,
                max_sanction_duration_ms: optional(
                    &lookup,
                    "MAX_SANCTION_DURATION_MS",
                    default_max_sanction_duration_ms,
                )?,
                dangerous_commands_enabled: optional(
                    &lookup,
                    "DANGEROUS_COMMANDS_ENABLED",
                    default_dangerous_enabled,
                )?,
            },
            discord: DiscordConfig {
                api_base: lookup("DISCORD_API_BASE").unwrap_or_else(default_discord_api_base),
                bot_token: lookup("DISCORD_BOT_TOKEN")
                    .ok_or(ConfigError::MissingVar("DISCORD_BOT_TOKEN"))?,
                timeout_secs: optional(&lookup, "DISCORD_TIMEOUT_SECS", default_discord_timeout_secs)?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.reconciler.period_ms == 0 {
            return Err(ConfigError::InvalidValue("RECONCILER_PERIOD_MS", "0".to_string()));
        }
        if self.reconciler.max_lift_attempts == 0 {
            return Err(ConfigError::InvalidValue(
                "RECONCILER_MAX_LIFT_ATTEMPTS",
                "0".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS", "0".to_string()));
        }
        if self.economy.max_sanction_duration_ms <= 0 {
            return Err(ConfigError::InvalidValue(
                "MAX_SANCTION_DURATION_MS",
                self.economy.max_sanction_duration_ms.to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn minimal() -> Vec<(&'static str, &'static str)> {
        vec![("API_PORT", "8080"), ("DISCORD_BOT_TOKEN", "token")]
    }

    #[test]
    fn test_environment_is_production() {
        assert!(!Environment::Development.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_environment_is_development() {
        assert!(Environment::Development.is_development());
        assert!(!Environment::Staging.is_development());
        assert!(!Environment::Production.is_development());
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_defaults_applied() {
        let config = AppConfig::from_lookup(lookup_from(&minimal())).unwrap();
        assert_eq!(config.app.name, "warden");
        assert_eq!(config.app.env, Environment::Development);
        assert_eq!(config.api.address(), "127.0.0.1:8080");
        assert_eq!(config.database.url, "sqlite://data.sqlite");
        assert_eq!(config.database.max_connections, 1);
        assert_eq!(config.reconciler.period(), Duration::from_secs(60));
        assert_eq!(config.reconciler.max_lift_attempts, 1);
        assert_eq!(config.economy.daily_reward, 250);
        assert_eq!(config.economy.max_sanction_duration_ms, 28 * 24 * 60 * 60 * 1000);
        assert!(config.economy.dangerous_commands_enabled);
        assert_eq!(config.discord.api_base, "https://discord.com/api/v10");
    }

    #[test]
    fn test_overrides() {
        let mut vars = minimal();
        vars.extend([
            ("APP_ENV", "production"),
            ("RECONCILER_PERIOD_MS", "5000"),
            ("RECONCILER_MAX_LIFT_ATTEMPTS", "3"),
            ("DAILY_REWARD", "100"),
            ("DANGEROUS_COMMANDS_ENABLED", "false"),
        ]);
        let config = AppConfig::from_lookup(lookup_from(&vars)).unwrap();
        assert!(config.app.env.is_production());
        assert_eq!(config.reconciler.period_ms, 5000);
        assert_eq!(config.reconciler.max_lift_attempts, 3);
        assert_eq!(config.economy.daily_reward, 100);
        assert!(!config.economy.dangerous_commands_enabled);
    }

    #[test]
    fn test_missing_required() {
        let err = AppConfig::from_lookup(lookup_from(&[("API_PORT", "8080")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("DISCORD_BOT_TOKEN")));

        let err = AppConfig::from_lookup(lookup_from(&[("DISCORD_BOT_TOKEN", "t")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("API_PORT")));
    }

    #[test]
    fn test_invalid_values() {
        let mut vars = minimal();
        vars.push(("RECONCILER_PERIOD_MS", "soon"));
        let err = AppConfig::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("RECONCILER_PERIOD_MS", _)));

        let mut vars = minimal();
        vars.push(("RECONCILER_MAX_LIFT_ATTEMPTS", "0"));
        let err = AppConfig::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("RECONCILER_MAX_LIFT_ATTEMPTS", _)));
    }
}

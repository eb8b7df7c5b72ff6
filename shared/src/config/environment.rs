//! Environment configuration module

use serde::{Deserialize, Serialize};
use std::env;

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    Development,
    /// Staging/test environment
    Staging,
    /// Production environment
    Production,
}

impl Environment {
    /// Check if running in production
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Check if running in development
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    /// Get environment from the ENV variable
    ///
    /// Anything that is not explicitly local/staging is treated as
    /// production, so an unset variable never runs with debug settings.
    pub fn from_env() -> Self {
        env::var("ENV")
            .or_else(|_| env::var("ENVIRONMENT"))
            .unwrap_or_default()
            .parse()
            .unwrap_or(Environment::Production)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" | "local" | "test" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("Invalid environment: {}", other)),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default log directive when RUST_LOG is not set
    pub level: String,

    /// Emit logs as single-line JSON (production) instead of pretty text
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Logging defaults appropriate for the given environment
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                level: String::from("debug"),
                json: false,
            },
            Environment::Staging => Self {
                level: String::from("debug"),
                json: true,
            },
            Environment::Production => Self {
                level: String::from("info"),
                json: true,
            },
        }
    }

    /// Install the global tracing subscriber
    ///
    /// Loads `.env` first so RUST_LOG from the env file is honored. Safe to
    /// call once per process; a second call is ignored.
    pub fn init(&self) {
        dotenvy::dotenv().ok();

        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(self.level.clone()));

        let builder = tracing_subscriber::fmt().with_env_filter(filter);
        let result = if self.json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };

        if result.is_ok() {
            tracing::info!(level = %self.level, json = self.json, "Logging initialized");
        }
    }
}

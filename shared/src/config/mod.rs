//! Configuration module
//!
//! - `api` - Member-API endpoint configuration
//! - `environment` - Environment detection and logging configuration

pub mod api;
pub mod environment;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use api::MemberApiConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};

/// Complete portal configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PortalConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Member-API configuration
    pub api: MemberApiConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl PortalConfig {
    /// Load configuration from an optional environment-specific file plus
    /// `SODAM_`-prefixed environment variables
    ///
    /// File values come from `config/<environment-file>` when present; env
    /// vars override them (e.g. `SODAM_API__BASE_URL`).
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        let environment = Environment::from_env();

        let settings = config::Config::builder()
            .add_source(
                config::File::with_name(&format!("config/{}", environment.config_file()))
                    .required(false),
            )
            .add_source(config::Environment::with_prefix("SODAM").separator("__"))
            .build()?;

        let mut portal: PortalConfig = settings.try_deserialize()?;
        portal.environment = environment;
        Ok(portal)
    }

    /// Create configuration from plain environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let environment = Environment::from_env();
        Self {
            environment,
            api: MemberApiConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Check if running in development
    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }
}

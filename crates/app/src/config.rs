//! Configuration
//!
//! Flattened into the CLI commands. Every option can also be set from the
//! environment or a `.env` file.

use std::path::PathBuf;

use clap::Args;

use crate::domain::discounts::data::ResolverOptions;

/// Log output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    #[default]
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        env = "LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact,
        global = true
    )]
    pub log_format: LogFormat,
}

/// Database settings.
#[derive(Debug, Clone, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,
}

/// Where discounts are read from.
#[derive(Debug, Clone, Args)]
pub struct CatalogConfig {
    /// YAML catalog file; takes precedence over the database
    #[arg(long, env = "REBATE_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

/// A resolved catalog source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// In-memory catalog loaded from a YAML file.
    File(PathBuf),

    /// `PostgreSQL` read model.
    Database(String),
}

impl CatalogConfig {
    /// The configured source, if any. A catalog file wins over a database URL.
    #[must_use]
    pub fn source(&self) -> Option<CatalogSource> {
        if let Some(path) = &self.catalog {
            return Some(CatalogSource::File(path.clone()));
        }

        self.database_url
            .as_ref()
            .filter(|url| !url.trim().is_empty())
            .map(|url| CatalogSource::Database(url.clone()))
    }
}

/// Resolver settings.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct ResolverConfig {
    /// Drop chained discounts that fail their own date, usage or minimum rules
    #[arg(long, env = "REBATE_VALIDATE_CHAINED_CONSTRAINTS")]
    pub validate_chained_constraints: bool,
}

impl From<ResolverConfig> for ResolverOptions {
    fn from(config: ResolverConfig) -> Self {
        Self {
            validate_chained_constraints: config.validate_chained_constraints,
        }
    }
}

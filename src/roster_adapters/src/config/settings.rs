use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, builder::DefaultState};
use secrecy::Secret;
use serde::Deserialize;

use crate::config::constants::{
    DEFAULT_CONFIG_PATH, DEFAULT_MAX_CONNECTIONS,
    env::{CONFIG_PATH_ENV_VAR, DATABASE_URL_ENV_VAR, ENV_PREFIX, ENV_SEPARATOR},
};

#[derive(Debug, Clone, Deserialize)]
pub struct RosterSettings {
    pub postgres: PostgresSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

impl RosterSettings {
    /// Load settings from the optional config file and the environment.
    ///
    /// A `.env` file is read first if present. Sources, lowest precedence
    /// first:
    /// * the JSON file at `$ROSTER_CONFIG` (default `config/roster.json`)
    /// * `ROSTER__*` variables, nested with `__` (e.g. `ROSTER__POSTGRES__URL`)
    /// * `DATABASE_URL`, which overrides `postgres.url`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let path =
            std::env::var(CONFIG_PATH_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let builder = Config::builder().add_source(File::with_name(&path).required(false));

        Self::finish(builder)
    }

    /// Load settings from a JSON document, still honouring environment
    /// overrides.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder().add_source(File::from_str(json, FileFormat::Json));

        Self::finish(builder)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let mut builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );
        if let Ok(url) = std::env::var(DATABASE_URL_ENV_VAR) {
            builder = builder.set_override("postgres.url", url)?;
        }

        builder.build()?.try_deserialize()
    }
}

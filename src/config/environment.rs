// Start of file: /src/config/environment.rs

// * Environment configuration, loaded once at startup and handed to the
// * application state explicitly.

use std::{borrow::Cow, collections::HashMap};
// * anyhow for convenient error handling
use anyhow::{Context, Result};
use tracing::warn;

// ! Default values for environment variables (used if variables aren't set):
const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_USER: &str = "postgres";
const DEFAULT_DB_PASSWORD: &str = "postgres";
const DEFAULT_DB_NAME: &str = "postgres";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_BODY_SIZE: usize = 2_097_152; // 2MB
const DEFAULT_TIMEOUT: u64 = 3; // 3 seconds
const DEFAULT_DB_PORT: u16 = 5432; // Default Postgres port
const DEFAULT_DB_CONNECT_TIMEOUT: u64 = 10; // 10 seconds

// * Named connection strings are read from `ConnectionStrings__<Name>`
const CONNECTION_STRINGS_PREFIX: &str = "connectionstrings__";

// * A struct containing all environment variables used by the app
#[derive(Clone, Debug)]
pub struct EnvironmentVariables {
    pub environment: Cow<'static, str>,
    pub host: Cow<'static, str>,
    pub port: u16,
    pub max_request_body_size: usize,
    pub default_timeout_seconds: u64,
    pub db_host: Cow<'static, str>,
    pub db_port: u16,
    pub db_user: Cow<'static, str>,
    pub db_password: Cow<'static, str>,
    pub db_name: Cow<'static, str>,
    pub db_connect_timeout_seconds: u64,
    // ! When set, a missing named connection string fails the request
    pub require_connection_string: bool,
    // ? Keys are lowercased connection string names
    connection_strings: HashMap<String, String>,
}

impl EnvironmentVariables {
    // * Loads environment variables from the process (and .env outside production).
    pub fn load() -> Result<Self> {
        // ? In non-production environments, attempt to load .env
        if std::env::var("ENVIRONMENT").unwrap_or_default() != "production" {
            dotenv::dotenv().ok();
        }

        // * Collect all environment vars from the system and .env
        let vars: HashMap<String, String> = std::env::vars()
            .chain(dotenv::vars())
            .collect();

        let config: EnvironmentVariables = Self::from_vars(&vars)?;

        if cfg!(debug_assertions) {
            tracing::debug!("Loaded environment configuration: {:#?}", config.redacted());
        }

        Ok(config)
    }

    // * Builds the configuration from an explicit key/value map, providing defaults if missing
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        // * A small helper closure to fetch a variable by key
        let get_var = |key: &str| vars.get(key).map(String::as_str);

        let connection_strings: HashMap<String, String> = vars
            .iter()
            .filter_map(|(key, value)| {
                let key: String = key.to_lowercase();
                key.strip_prefix(CONNECTION_STRINGS_PREFIX)
                    .filter(|name| !name.is_empty())
                    .map(|name| (name.to_string(), value.clone()))
            })
            .collect();

        Ok(Self {
            environment: get_var("ENVIRONMENT")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or_else(|| {
                    warn!("Missing ENVIRONMENT, defaulting to '{DEFAULT_ENVIRONMENT}'");
                    Cow::Borrowed(DEFAULT_ENVIRONMENT)
                }),

            host: get_var("HOST")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or(Cow::Borrowed(DEFAULT_HOST)),

            port: get_var("PORT")
                .map(|s| s.parse().context("Invalid PORT value"))
                .transpose()?
                .unwrap_or(DEFAULT_PORT),

            max_request_body_size: get_var("MAX_REQUEST_BODY_SIZE")
                .map(|s| s.parse().context("Invalid MAX_REQUEST_BODY_SIZE"))
                .transpose()?
                .unwrap_or(DEFAULT_MAX_BODY_SIZE),

            default_timeout_seconds: get_var("DEFAULT_TIMEOUT_SECONDS")
                .map(|s| s.parse().context("Invalid DEFAULT_TIMEOUT_SECONDS"))
                .transpose()?
                .unwrap_or(DEFAULT_TIMEOUT),

            db_host: get_var("DB_HOST")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or(Cow::Borrowed(DEFAULT_DB_HOST)),

            db_port: get_var("DB_PORT")
                .map(|s| s.parse().context("Invalid DB_PORT"))
                .transpose()?
                .unwrap_or(DEFAULT_DB_PORT),

            db_user: get_var("DB_USER")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or(Cow::Borrowed(DEFAULT_DB_USER)),

            db_password: get_var("DB_PASSWORD")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or(Cow::Borrowed(DEFAULT_DB_PASSWORD)),

            db_name: get_var("DB_NAME")
                .map(|s| Cow::Owned(s.into()))
                .unwrap_or(Cow::Borrowed(DEFAULT_DB_NAME)),

            db_connect_timeout_seconds: get_var("DB_CONNECT_TIMEOUT_SECONDS")
                .map(|s| s.parse().context("Invalid DB_CONNECT_TIMEOUT_SECONDS"))
                .transpose()?
                .unwrap_or(DEFAULT_DB_CONNECT_TIMEOUT),

            require_connection_string: get_var("REQUIRE_CONNECTION_STRING")
                .map(|s| s.parse().context("Invalid REQUIRE_CONNECTION_STRING"))
                .transpose()?
                .unwrap_or(false),

            connection_strings,
        })
    }

    // * Looks up a named connection string; names are case-insensitive
    pub fn connection_string(&self, name: &str) -> Option<&str> {
        self.connection_strings
            .get(&name.to_lowercase())
            .map(String::as_str)
    }

    // * Registers (or replaces) a named connection string
    pub fn with_connection_string(mut self, name: &str, value: impl Into<String>) -> Self {
        self.connection_strings.insert(name.to_lowercase(), value.into());
        self
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    // ! Connection strings and the DB password carry credentials; never log them
    fn redacted(&self) -> Self {
        let mut copy: Self = self.clone();
        copy.db_password = Cow::Borrowed("***");
        for value in copy.connection_strings.values_mut() {
            *value = "***".to_string();
        }
        copy
    }
}


// End of file: /src/config/environment.rs

//! Database settings read once at startup and handed to the persistence layer.

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result as AnyResult};
use sqlx::mysql::MySqlConnectOptions;

use crate::error::{LibraryError, Result};

pub const HOST_KEY: &str = "DB_HOST";
pub const USER_KEY: &str = "DB_USER";
pub const PASSWORD_KEY: &str = "DB_PASSWORD";
pub const DATABASE_KEY: &str = "DB_NAME";
pub const PORT_KEY: &str = "DB_PORT";

/// Port used when `DB_PORT` is not set.
pub const DEFAULT_PORT: u16 = 3306;

/// Connection settings for the MySQL store. The password is kept out of the
/// `Debug` output so the struct can be logged freely.
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl DbConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Blank values are
    /// treated the same as unset ones, and every missing key is reported at
    /// once rather than failing on the first.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut require = |key: &str| match lookup(key) {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                missing.push(key.to_string());
                String::new()
            }
        };

        let host = require(HOST_KEY);
        let user = require(USER_KEY);
        let password = require(PASSWORD_KEY);
        let database = require(DATABASE_KEY);

        if !missing.is_empty() {
            return Err(LibraryError::Configuration { missing });
        }

        let port = match lookup(PORT_KEY) {
            Some(raw) if !raw.trim().is_empty() => raw.trim().parse::<u16>().map_err(|_| {
                LibraryError::InvalidConfig(format!("{PORT_KEY} must be a port number, got '{raw}'"))
            })?,
            _ => DEFAULT_PORT,
        };

        Ok(Self {
            host: host.trim().to_string(),
            port,
            user,
            password,
            database: database.trim().to_string(),
        })
    }

    /// Options for reaching the server without selecting a database. Schema
    /// creation needs this because the target database may not exist yet.
    pub fn server_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
    }

    /// Options for a connection scoped to the configured database.
    pub fn database_options(&self) -> MySqlConnectOptions {
        self.server_options().database(&self.database)
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

/// Seed the environment from a `.env` file in the working directory, if one
/// exists. Variables that are already set keep their values.
pub fn load_dotenv() -> AnyResult<Option<PathBuf>> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(err).context("failed to parse .env file"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn complete() -> Vec<(&'static str, &'static str)> {
        vec![
            (HOST_KEY, "db.local"),
            (USER_KEY, "reader"),
            (PASSWORD_KEY, "s3cret"),
            (DATABASE_KEY, "personal_library"),
        ]
    }

    #[test]
    fn reads_all_required_values() {
        let config = DbConfig::from_lookup(lookup_from(&complete())).unwrap();
        assert_eq!(config.host, "db.local");
        assert_eq!(config.user, "reader");
        assert_eq!(config.password, "s3cret");
        assert_eq!(config.database, "personal_library");
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn reports_every_missing_key() {
        let err = DbConfig::from_lookup(lookup_from(&[(USER_KEY, "reader")])).unwrap_err();
        assert_eq!(
            err,
            LibraryError::Configuration {
                missing: vec![
                    HOST_KEY.to_string(),
                    PASSWORD_KEY.to_string(),
                    DATABASE_KEY.to_string(),
                ],
            }
        );
    }

    #[test]
    fn blank_values_count_as_missing() {
        let mut pairs = complete();
        pairs[0] = (HOST_KEY, "   ");
        let err = DbConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert_eq!(
            err,
            LibraryError::Configuration {
                missing: vec![HOST_KEY.to_string()],
            }
        );
    }

    #[test]
    fn honours_explicit_port() {
        let mut pairs = complete();
        pairs.push((PORT_KEY, "3307"));
        let config = DbConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.port, 3307);
    }

    #[test]
    fn rejects_non_numeric_port() {
        let mut pairs = complete();
        pairs.push((PORT_KEY, "mysql"));
        let err = DbConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, LibraryError::InvalidConfig(_)));
    }

    #[test]
    fn debug_output_hides_password() {
        let config = DbConfig::from_lookup(lookup_from(&complete())).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }
}

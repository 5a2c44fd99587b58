use std::future::Future;

use sqlx::mysql::MySqlConnection;
use sqlx::{ConnectOptions, Connection as _};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info, warn};

use crate::config::DbConfig;
use crate::error::{LibraryError, Result};

/// Hands out one short-lived connection per operation. The driver is async,
/// so the provider also owns the single-threaded runtime every call is
/// blocked on; the rest of the application stays synchronous.
pub struct ConnectionProvider {
    config: DbConfig,
    runtime: Runtime,
}

impl ConnectionProvider {
    pub fn new(config: DbConfig) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| {
                LibraryError::Connection(format!("failed to start database runtime: {err}"))
            })?;
        Ok(Self { config, runtime })
    }

    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Drive a database future to completion on the provider's runtime.
    pub fn run<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Open a connection to the configured database. Both outcomes are logged
    /// so connection trouble shows up in the log file as well as in the UI.
    pub async fn acquire(&self) -> Result<MySqlConnection> {
        match self.config.database_options().connect().await {
            Ok(conn) => {
                info!(
                    host = %self.config.host,
                    database = %self.config.database,
                    "connected to library database"
                );
                Ok(conn)
            }
            Err(err) => {
                warn!(
                    host = %self.config.host,
                    database = %self.config.database,
                    error = %err,
                    "failed to connect to library database"
                );
                Err(LibraryError::Connection(err.to_string()))
            }
        }
    }

    /// Close a connection gracefully. Dropping also closes the socket, so a
    /// failed goodbye is only worth a debug line.
    pub(crate) async fn release(conn: MySqlConnection) {
        if let Err(err) = conn.close().await {
            debug!(error = %err, "connection did not close cleanly");
        }
    }
}

/// Make sure the configured database and the `books` table exist. Both
/// statements use `IF NOT EXISTS`, so this runs on every startup.
pub fn ensure_schema(provider: &ConnectionProvider) -> Result<()> {
    let config = provider.config();
    let database = quote_identifier(&config.database);

    provider.run(async {
        let mut conn = config.server_options().connect().await.map_err(|err| {
            warn!(host = %config.host, error = %err, "failed to reach server for schema setup");
            LibraryError::Connection(err.to_string())
        })?;

        let create_database = format!("CREATE DATABASE IF NOT EXISTS {database}");
        let create_table = format!(
            "CREATE TABLE IF NOT EXISTS {database}.books (
                id INT AUTO_INCREMENT PRIMARY KEY,
                title VARCHAR(255) NOT NULL,
                author VARCHAR(255) NOT NULL,
                year INT NOT NULL,
                genre VARCHAR(100),
                read_status BOOLEAN DEFAULT FALSE
            )"
        );

        let result = async {
            sqlx::raw_sql(&create_database).execute(&mut conn).await?;
            sqlx::raw_sql(&create_table).execute(&mut conn).await?;
            Ok::<_, sqlx::Error>(())
        }
        .await
        .map_err(LibraryError::from_statement);

        ConnectionProvider::release(conn).await;

        match &result {
            Ok(()) => info!(database = %config.database, "library schema ready"),
            Err(err) => warn!(database = %config.database, error = %err, "schema setup failed"),
        }
        result
    })
}

/// Quote a MySQL identifier with backticks, doubling any embedded backtick.
pub(crate) fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

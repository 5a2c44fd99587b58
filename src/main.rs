//! Binary entry point: load settings, prepare the schema, and drive the
//! Ratatui event loop until the user exits.
use anyhow::Context;
use tracing::{info, warn};

use personal_library::config::load_dotenv;
use personal_library::{run_app, tracing_setup, App, BookRepository, DbConfig};

/// Missing database settings stop the program here, before the terminal is
/// switched into raw mode, so the message stays readable. A schema failure is
/// only reported; each later operation fails on its own.
fn main() -> anyhow::Result<()> {
    let dotenv_path = load_dotenv()?;
    let log_path = tracing_setup::init()?;
    info!(log = %log_path.display(), "personal library starting");
    if let Some(path) = dotenv_path {
        info!(path = %path.display(), "loaded settings from .env");
    }

    let config = DbConfig::from_env().context("cannot start without database settings")?;
    info!(?config, "database settings loaded");

    let repository = BookRepository::new(config)?;
    let schema = repository.ensure_schema();

    let mut app = App::new(Box::new(repository));
    if let Err(err) = schema {
        warn!(error = %err, "continuing without a verified schema");
        app.report_error("Database initialization failed", &err);
    }

    run_app(&mut app)
}

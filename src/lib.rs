pub mod app;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;

use config::DbConfig;
use error::AppError;
use infra::{init_db, ping};

fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    // Ignore a second init (tests, embedding hosts).
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Launch the backend: load config, prepare the store, then answer requests on stdin.
pub fn run() -> Result<(), AppError> {
    init_logging();

    let cfg = DbConfig::load()?;
    log::info!("Config: {:?}", cfg);

    let pool = init_db(&cfg).map_err(|e| {
        log::error!("DB init failed: {}", e);
        e
    })?;
    ping(&pool)?;
    log::info!("Database connection established");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    commands::serve_lines(&pool, stdin.lock(), stdout.lock()).map_err(|e| {
        log::error!("Request stream failed: {}", e);
        AppError::from(e)
    })?;
    Ok(())
}

//! SQLite connection provider and migrations.

use crate::config::DbConfig;
use crate::error::AppError;
use rusqlite::{Connection, OpenFlags};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

const MIGRATIONS: &[(i32, &str)] = &[(1, include_str!("../../migrations/0001_init.sql"))];

/// Acquisition handle passed to every use case.
///
/// Per-call mode opens a fresh connection for each acquisition and closes it
/// when the guard drops. Shared mode hands out one mutex-guarded connection.
pub struct DbPool(Source);

enum Source {
    PerCall { path: PathBuf, timeout: Duration },
    Shared(Mutex<Connection>),
}

/// Connection guard; released on drop whatever the exit path.
pub enum PooledConn<'a> {
    Owned(Connection),
    Shared(MutexGuard<'a, Connection>),
}

impl Deref for PooledConn<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        match self {
            Self::Owned(c) => c,
            Self::Shared(g) => &**g,
        }
    }
}

impl DbPool {
    /// Per-call pool for an existing database. Does not touch the file.
    pub fn from_config(cfg: &DbConfig) -> Result<Self, AppError> {
        if !cfg.is_local_host() {
            return Err(AppError::Connection(format!(
                "host {} is not reachable by the embedded store",
                cfg.host
            )));
        }
        if cfg.user.is_some() || cfg.password.is_some() {
            log::warn!("Embedded store has no authentication; user/password ignored");
        }
        Ok(Self::per_call(cfg.database_path(), cfg.busy_timeout()))
    }

    pub fn per_call(path: impl Into<PathBuf>, timeout: Duration) -> Self {
        DbPool(Source::PerCall {
            path: path.into(),
            timeout,
        })
    }

    /// Wrap an already configured connection.
    pub fn shared(conn: Connection) -> Self {
        DbPool(Source::Shared(Mutex::new(conn)))
    }
}

fn configure(conn: &Connection, timeout: Duration) -> Result<(), rusqlite::Error> {
    conn.busy_timeout(timeout)?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    Ok(())
}

fn open_existing(path: &Path, timeout: Duration) -> Result<Connection, AppError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(path, flags).map_err(AppError::connection)?;
    configure(&conn, timeout).map_err(AppError::connection)?;
    Ok(conn)
}

/// Initialize DB from config: create the file if needed, run migrations, return a per-call pool.
pub fn init_db(cfg: &DbConfig) -> Result<DbPool, AppError> {
    let pool = DbPool::from_config(cfg)?;
    let db_path = cfg.database_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AppError::Connection(e.to_string()))?;
    }
    let mut conn = Connection::open(&db_path).map_err(AppError::connection)?;
    configure(&conn, cfg.busy_timeout()).map_err(AppError::connection)?;
    run_migrations(&mut conn)?;
    log::info!("DB ready at {:?}", db_path);
    Ok(pool)
}

/// In-memory shared pool with the schema applied.
pub fn init_test_db() -> DbPool {
    let mut conn = Connection::open_in_memory().expect("open in-memory db");
    configure(&conn, Duration::from_millis(0)).expect("configure in-memory db");
    run_migrations(&mut conn).expect("run migrations");
    DbPool::shared(conn)
}

fn run_migrations(conn: &mut Connection) -> Result<(), AppError> {
    let tx = conn.transaction()?;

    tx.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (version INTEGER PRIMARY KEY, applied_at TEXT NOT NULL DEFAULT (datetime('now')))",
        [],
    )?;

    let applied: Vec<i32> = tx
        .prepare("SELECT version FROM schema_migrations ORDER BY version")?
        .query_map([], |r| r.get(0))?
        .collect::<Result<Vec<_>, _>>()?;

    for (version, sql) in MIGRATIONS {
        if applied.contains(version) {
            continue;
        }
        log::debug!("Applying migration {}", version);
        tx.execute_batch(sql)?;
        tx.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, datetime('now'))",
            [version],
        )?;
    }

    tx.commit()?;
    Ok(())
}

/// Get a connection from the pool (for use in use cases).
pub fn get_connection(pool: &DbPool) -> Result<PooledConn<'_>, AppError> {
    match &pool.0 {
        Source::PerCall { path, timeout } => open_existing(path, *timeout).map(PooledConn::Owned),
        Source::Shared(m) => Ok(PooledConn::Shared(
            m.lock().unwrap_or_else(PoisonError::into_inner),
        )),
    }
}

/// Round-trip a trivial query to prove the store is reachable.
pub fn ping(pool: &DbPool) -> Result<(), AppError> {
    let conn = get_connection(pool)?;
    conn.query_row("SELECT 1", [], |r| r.get::<_, i64>(0))?;
    Ok(())
}

//! Infrastructure: SQLite connection provider, migrations, row projection.

pub mod db;
pub mod row;

pub(crate) use db::get_connection;
pub use db::{init_db, ping, DbPool, PooledConn};

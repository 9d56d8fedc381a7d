use anyhow::Result;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod cache;
pub mod goals;
pub mod journal;
pub mod schema;
pub mod todos;

/// Row-level SQL for one entity kind. Every statement is parameterised.
pub trait Table: Sized {
    fn insert(&self, conn: &Connection) -> rusqlite::Result<()>;
    fn find(conn: &Connection, id: &str) -> rusqlite::Result<Option<Self>>;
    fn page(conn: &Connection, skip: u32, limit: u32) -> rusqlite::Result<Vec<Self>>;
    fn save(&self, conn: &Connection) -> rusqlite::Result<usize>;
    fn remove(conn: &Connection, id: &str) -> rusqlite::Result<usize>;
}

/// Location of the SQLite file. Cheap to clone; every operation opens its own connection.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn connect(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(conn)
    }
}

pub fn init_database(db_path: &Path) -> Result<Database> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(db_path)?;

    // Enable WAL mode
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;

    schema::create_tables(&conn)?;

    Ok(Database::new(db_path))
}

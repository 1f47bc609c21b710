use rusqlite::{params, Connection, OptionalExtension};

use crate::error::StorageError;
use crate::storage::StorageBackend;

/// Backend SQLite: una tabla `kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)`.
pub struct SqliteStorage {
    conn: Connection,
}

impl std::fmt::Debug for SqliteStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SqliteStorage(..)")
    }
}

impl SqliteStorage {
    /// Abre una base en archivo, o en memoria si `path` es `None`.
    pub fn open(path: Option<&str>) -> Result<Self, StorageError> {
        let conn = match path {
            Some(p) => {
                if let Some(dir) = std::path::Path::new(p).parent() {
                    if !dir.as_os_str().is_empty() && !dir.exists() {
                        std::fs::create_dir_all(dir)?;
                    }
                }
                Connection::open(p)?
            }
            None => Connection::open_in_memory()?,
        };
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(SqliteStorage { conn })
    }
}

impl StorageBackend for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let v = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(v)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn
            .execute("REPLACE INTO kv (key, value) VALUES (?1, ?2)", params![key, value])?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_set_get_remove() {
        let mut db = SqliteStorage::open(None).unwrap();
        assert_eq!(db.get_item("k").unwrap(), None);
        db.set_item("k", "uno").unwrap();
        db.set_item("k", "dos").unwrap();
        assert_eq!(db.get_item("k").unwrap(), Some("dos".to_string()));
        db.remove_item("k").unwrap();
        assert_eq!(db.get_item("k").unwrap(), None);
    }
}

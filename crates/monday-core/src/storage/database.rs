//! SQLite-backed streak storage.
//!
//! One row per user in the `streaks` table:
//! - `user_id`: primary key
//! - `last_check_date`: `YYYY-MM-DD`, stored as written
//! - `streak`: consecutive-day count

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};

use super::StreakStore;
use crate::error::StoreError;
use crate::streak::StreakRecord;

/// SQLite database for streak records.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

fn migrate(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS streaks (
            user_id         TEXT PRIMARY KEY,
            last_check_date TEXT,
            streak          INTEGER NOT NULL DEFAULT 0
        );",
    )
}

impl StreakStore for SqliteStore {
    fn get(&self, user_id: &str) -> Result<Option<StreakRecord>, StoreError> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                "SELECT last_check_date, streak FROM streaks WHERE user_id = ?1",
                params![user_id],
                |row| Ok((row.get::<_, Option<String>>(0), row.get::<_, i64>(1))),
            )
            .optional()?;

        let Some((last_check_date, streak)) = row else {
            return Ok(None);
        };

        let malformed = |message: String| StoreError::Malformed {
            user_id: user_id.to_string(),
            message,
        };
        let last_check_date = last_check_date.map_err(|e| malformed(e.to_string()))?;
        let streak = streak.map_err(|e| malformed(e.to_string()))?;
        let streak = u32::try_from(streak)
            .map_err(|_| malformed(format!("streak {streak} out of range")))?;

        Ok(Some(StreakRecord {
            user_id: user_id.to_string(),
            last_check_date,
            streak,
        }))
    }

    fn put(&self, record: &StreakRecord) -> Result<(), StoreError> {
        self.conn()?.execute(
            "INSERT OR REPLACE INTO streaks (user_id, last_check_date, streak)
             VALUES (?1, ?2, ?3)",
            params![record.user_id, record.last_check_date, record.streak],
        )?;
        Ok(())
    }

    fn put_if_unchanged(
        &self,
        record: &StreakRecord,
        expected: Option<&str>,
    ) -> Result<bool, StoreError> {
        let conn = self.conn()?;
        let changed = match expected {
            Some(previous) => conn.execute(
                "UPDATE streaks SET last_check_date = ?2, streak = ?3
                 WHERE user_id = ?1 AND last_check_date = ?4",
                params![record.user_id, record.last_check_date, record.streak, previous],
            )?,
            None => conn.execute(
                "INSERT INTO streaks (user_id, last_check_date, streak)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(user_id) DO UPDATE
                 SET last_check_date = excluded.last_check_date, streak = excluded.streak
                 WHERE streaks.last_check_date IS NULL",
                params![record.user_id, record.last_check_date, record.streak],
            )?,
        };
        Ok(changed == 1)
    }

    fn delete(&self, user_id: &str) -> Result<bool, StoreError> {
        let removed = self
            .conn()?
            .execute("DELETE FROM streaks WHERE user_id = ?1", params![user_id])?;
        Ok(removed > 0)
    }
}

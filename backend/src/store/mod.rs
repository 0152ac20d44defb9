//! # Student Store
//!
//! SQLite persistence for student records. A single connection is shared by all
//! workers behind a mutex, so every operation below runs to completion before the
//! next one starts; concurrent writes to the same record resolve as last writer wins.
//!
//! The `students` table uses `AUTOINCREMENT`, which keeps SQLite from handing out
//! the id of a deleted row again.

use common::model::student::{Student, StudentFields, StudentPatch};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;

const BUSY_TIMEOUT_MS: u64 = 5_000;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS students (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        address TEXT NOT NULL,
        gender TEXT NOT NULL,
        rollnumber INTEGER NOT NULL
    );";

const SELECT_COLUMNS: &str = "SELECT id, name, address, gender, rollnumber FROM students";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("student {0} not found")]
    NotFound(i64),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Storage(err.to_string())
    }
}

/// Handle to the student table. Cloning is cheap and shares the connection.
#[derive(Clone)]
pub struct StudentStore {
    connection: Arc<Mutex<Connection>>,
}

impl StudentStore {
    /// Opens (or creates) the database at `path`. `":memory:"` opens a private
    /// in-memory database.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        if path == ":memory:" {
            return Self::open_in_memory();
        }
        Self::initialize(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::initialize(Connection::open_in_memory()?)
    }

    fn initialize(conn: Connection) -> Result<Self, StoreError> {
        conn.busy_timeout(Duration::from_millis(BUSY_TIMEOUT_MS))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(StudentStore {
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.connection
            .lock()
            .map_err(|_| StoreError::Storage("connection lock poisoned".to_string()))
    }

    /// Inserts a new record and returns it with its assigned id.
    pub fn create(&self, fields: StudentFields) -> Result<Student, StoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO students (name, address, gender, rollnumber) VALUES (?1, ?2, ?3, ?4)",
            params![fields.name, fields.address, fields.gender, fields.rollnumber],
        )?;
        Ok(Student {
            id: conn.last_insert_rowid(),
            fields,
        })
    }

    pub fn get(&self, id: i64) -> Result<Student, StoreError> {
        let conn = self.lock()?;
        select_by_id(&conn, id)?.ok_or(StoreError::NotFound(id))
    }

    /// Returns every record in ascending id order.
    pub fn list(&self) -> Result<Vec<Student>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{} ORDER BY id", SELECT_COLUMNS))?;
        let students = stmt
            .query_map([], map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(students)
    }

    /// Overwrites the fields present in `patch` and returns the stored record.
    pub fn update(&self, id: i64, patch: &StudentPatch) -> Result<Student, StoreError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let changed = tx.execute(
            "UPDATE students SET
                name = COALESCE(?1, name),
                address = COALESCE(?2, address),
                gender = COALESCE(?3, gender),
                rollnumber = COALESCE(?4, rollnumber)
             WHERE id = ?5",
            params![patch.name, patch.address, patch.gender, patch.rollnumber, id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        let student = select_by_id(&tx, id)?.ok_or(StoreError::NotFound(id))?;
        tx.commit()?;
        Ok(student)
    }

    pub fn delete(&self, id: i64) -> Result<(), StoreError> {
        let conn = self.lock()?;
        let removed = conn.execute("DELETE FROM students WHERE id = ?1", params![id])?;
        if removed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn select_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<Student>> {
    conn.query_row(
        &format!("{} WHERE id = ?1", SELECT_COLUMNS),
        params![id],
        map_row,
    )
    .optional()
}

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        fields: StudentFields {
            name: row.get(1)?,
            address: row.get(2)?,
            gender: row.get(3)?,
            rollnumber: row.get(4)?,
        },
    })
}

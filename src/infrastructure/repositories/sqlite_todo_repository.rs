//! SQLite-backed todo persistence.
//! Stores one row per item in the `todo_items` table; enums are kept as their numeric index.
//! `save_all` rewrites the table inside a single transaction so a save is all-or-nothing.

use chrono::{NaiveDate, NaiveTime};
use rusqlite::{Connection, Row, params};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::domain::entities::TodoItem;
use crate::domain::repositories::{PersistenceError, TODO_STORAGE_KEY, TodoPersistence};
use crate::domain::value_objects::{Priority, RecurrenceFrequency};

const DATE_FORMAT: &str = "%Y-%m-%d";
// `%.f` writes nothing for whole seconds and parses rows without a fraction
const TIME_FORMAT: &str = "%H:%M:%S%.f";

impl From<rusqlite::Error> for PersistenceError {
    fn from(e: rusqlite::Error) -> Self {
        PersistenceError::Storage(e.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct SqliteTodoRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTodoRepository {
    /// Create or open DB at `db_path` and ensure the table exists.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self, PersistenceError> {
        let conn = Connection::open(db_path.as_ref())
            .map_err(|e| PersistenceError::Storage(format!("Failed to open DB: {}", e)))?;
        Self::with_connection(conn)
    }

    pub fn in_memory() -> Result<Self, PersistenceError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, PersistenceError> {
        conn.execute_batch(&format!(
            "
            CREATE TABLE IF NOT EXISTS {TODO_STORAGE_KEY} (
                position             INTEGER PRIMARY KEY,
                id                   TEXT NOT NULL UNIQUE,
                title                TEXT NOT NULL,
                is_completed         INTEGER NOT NULL DEFAULT 0,
                priority             INTEGER NOT NULL DEFAULT 1,
                due_date             TEXT,
                due_time             TEXT,
                is_recurring         INTEGER NOT NULL DEFAULT 0,
                recurrence_frequency INTEGER NOT NULL DEFAULT 1
            );
            "
        ))
        .map_err(|e| PersistenceError::Storage(format!("Failed to initialize todo table: {}", e)))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, PersistenceError> {
        self.conn
            .lock()
            .map_err(|_| PersistenceError::Storage("connection lock poisoned".to_string()))
    }

    // NOTE: text columns are parsed here rather than through rusqlite's chrono feature
    fn row_to_item(row: &Row) -> Result<TodoItem, PersistenceError> {
        let id: String = row.get("id")?;
        let id = Uuid::parse_str(&id)
            .map_err(|e| PersistenceError::Serialization(format!("Bad id {}: {}", id, e)))?;

        let due_date: Option<String> = row.get("due_date")?;
        let due_date = due_date
            .map(|s| NaiveDate::parse_from_str(&s, DATE_FORMAT))
            .transpose()
            .map_err(|e| PersistenceError::Serialization(format!("Bad due date: {}", e)))?;

        let due_time: Option<String> = row.get("due_time")?;
        let due_time = due_time
            .map(|s| NaiveTime::parse_from_str(&s, TIME_FORMAT))
            .transpose()
            .map_err(|e| PersistenceError::Serialization(format!("Bad due time: {}", e)))?;

        Ok(TodoItem {
            id,
            title: row.get("title")?,
            is_completed: row.get::<_, i64>("is_completed")? != 0,
            priority: Priority::from_index(row.get("priority")?),
            due_date,
            due_time,
            is_recurring: row.get::<_, i64>("is_recurring")? != 0,
            recurrence_frequency: RecurrenceFrequency::from_index(row.get("recurrence_frequency")?),
        })
    }
}

impl TodoPersistence for SqliteTodoRepository {
    fn save_all(&self, items: &[TodoItem]) -> Result<(), PersistenceError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        tx.execute(&format!("DELETE FROM {TODO_STORAGE_KEY}"), [])?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {TODO_STORAGE_KEY}
                    (position, id, title, is_completed, priority, due_date, due_time, is_recurring, recurrence_frequency)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
            ))?;

            for (position, item) in items.iter().enumerate() {
                stmt.execute(params![
                    position as i64,
                    item.id.to_string(),
                    item.title,
                    item.is_completed as i64,
                    item.priority.index(),
                    item.due_date.map(|d| d.format(DATE_FORMAT).to_string()),
                    item.due_time.map(|t| t.format(TIME_FORMAT).to_string()),
                    item.is_recurring as i64,
                    item.recurrence_frequency.index(),
                ])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<TodoItem>, PersistenceError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT id, title, is_completed, priority, due_date, due_time, is_recurring, recurrence_frequency
             FROM {TODO_STORAGE_KEY} ORDER BY position"
        ))?;

        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(Self::row_to_item(row)?);
        }
        Ok(items)
    }
}

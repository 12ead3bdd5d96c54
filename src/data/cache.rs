//! SQLite cache holding the last successfully fetched exercise snapshot.
//!
//! Schema:
//! - `exercises` table: name (primary key), description, image, body_part,
//!   difficulty, needs_equipment, fetched_at (RFC 3339 text)
//!
//! The whole table is replaced in one transaction after every successful
//! fetch; rowid order therefore preserves the order of the remote payload.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use super::models::Exercise;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS exercises (
    name            TEXT PRIMARY KEY,
    description     TEXT NOT NULL,
    image           TEXT NOT NULL,
    body_part       TEXT NOT NULL,
    difficulty      TEXT NOT NULL,
    needs_equipment INTEGER NOT NULL,
    fetched_at      TEXT NOT NULL
);
";

/// Parse a stored timestamp back into a DateTime<Utc>
fn parse_timestamp(timestamp: Option<String>) -> Option<DateTime<Utc>> {
    timestamp.and_then(|t| {
        DateTime::parse_from_rfc3339(&t)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    })
}

/// Local cache of the exercise catalog
pub struct Cache {
    conn: Connection,
}

impl Cache {
    /// Open (or create) the cache database at the given path
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create cache directory: {parent:?}"))?;
        }

        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open cache database: {db_path:?}"))?;
        conn.execute_batch(SCHEMA)
            .context("Failed to initialize cache schema")?;

        Ok(Cache { conn })
    }

    /// Path of the cache database inside the given data directory
    pub fn db_path(data_dir: &Path) -> PathBuf {
        data_dir.join("exercises.db")
    }

    /// Replace the entire cached snapshot with the given exercises.
    ///
    /// Runs as a single transaction: records missing from `exercises`
    /// disappear from the cache (full replace, no merge).
    pub fn replace_all(&mut self, exercises: &[Exercise]) -> Result<()> {
        let fetched_at = Utc::now().to_rfc3339();

        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM exercises", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO exercises
                 (name, description, image, body_part, difficulty, needs_equipment, fetched_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for exercise in exercises {
                stmt.execute(params![
                    exercise.name,
                    exercise.description,
                    exercise.image,
                    exercise.body_part,
                    exercise.difficulty,
                    exercise.needs_equipment,
                    fetched_at,
                ])?;
            }
        }
        tx.commit().context("Failed to commit cache snapshot")?;

        Ok(())
    }

    /// Read the cached snapshot in the order it was fetched.
    /// Returns an empty list if nothing has been cached yet.
    pub fn list(&self) -> Result<Vec<Exercise>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, description, image, body_part, difficulty, needs_equipment
             FROM exercises ORDER BY rowid",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(Exercise {
                name: row.get(0)?,
                description: row.get(1)?,
                image: row.get(2)?,
                body_part: row.get(3)?,
                difficulty: row.get(4)?,
                needs_equipment: row.get(5)?,
            })
        })?;

        let mut exercises = Vec::new();
        for row in rows {
            exercises.push(row?);
        }
        Ok(exercises)
    }

    /// Timestamp of the cached snapshot, if any
    pub fn last_fetched_at(&self) -> Result<Option<DateTime<Utc>>> {
        let fetched_at: Option<String> = self
            .conn
            .query_row("SELECT MAX(fetched_at) FROM exercises", [], |row| row.get(0))
            .unwrap_or(None);

        Ok(parse_timestamp(fetched_at))
    }
}

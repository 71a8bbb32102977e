//! Storage layer for gatelab.
//!
//! This module provides `SQLite`-based persistent storage for circuit states
//! and user preferences, including deduplication and pruning.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::circuits::CircuitKind;
use crate::error::{Error, Result};
use crate::inputs::InputSet;
use crate::state::{CircuitState, UserPreferences};
use crate::store::{repeats_latest, StateStore};

const STATE_COLUMNS: &str = "id, circuit_type, inputs, timestamp, mode";

/// Storage engine for circuit states.
///
/// Provides persistent storage using `SQLite` with support for:
/// - Upserts by state id, skipping saves that repeat the latest state
/// - Latest-state lookup per circuit
/// - A single preferences record
/// - Pruning by count and by age
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Storage {
    /// Open or create a storage database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        migrations::initialize_schema(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn upsert(&self, state: &CircuitState) -> Result<()> {
        let inputs = serde_json::to_string(&state.inputs)?;
        self.conn.execute(
            r"
            INSERT INTO circuit_states (id, circuit_type, inputs, fingerprint, timestamp, mode)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(id) DO UPDATE SET
                circuit_type = excluded.circuit_type,
                inputs = excluded.inputs,
                fingerprint = excluded.fingerprint,
                timestamp = excluded.timestamp,
                mode = excluded.mode,
                updated_at = datetime('now')
            ",
            params![
                state.id,
                state.circuit_type.id(),
                inputs,
                state.fingerprint(),
                state.timestamp,
                state.mode,
            ],
        )?;
        debug!(id = %state.id, "Saved circuit state");
        Ok(())
    }

    /// Run a state query, dropping rows whose circuit type is unknown.
    fn query_states(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<CircuitState>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, Self::row_to_state)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows.into_iter().flatten().collect())
    }

    /// Most recent states first, optionally for one circuit.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn recent(&self, kind: Option<CircuitKind>, limit: usize) -> Result<Vec<CircuitState>> {
        let limit_i64 = i64::try_from(limit).unwrap_or(i64::MAX);
        match kind {
            Some(kind) => self.query_states(
                &format!(
                    "SELECT {STATE_COLUMNS} FROM circuit_states WHERE circuit_type = ?1
                     ORDER BY timestamp DESC, rowid ASC LIMIT ?2"
                ),
                params![kind.id(), limit_i64],
            ),
            None => self.query_states(
                &format!(
                    "SELECT {STATE_COLUMNS} FROM circuit_states
                     ORDER BY timestamp DESC, rowid ASC LIMIT ?1"
                ),
                [limit_i64],
            ),
        }
    }

    /// Count stored circuit states.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM circuit_states", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Delete a state by id.
    ///
    /// Returns `true` if a state was deleted, `false` if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM circuit_states WHERE id = ?1", [id])?;
        Ok(affected > 0)
    }

    /// Prune states older than the given duration.
    ///
    /// Returns the number of states deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn prune_older_than(&self, max_age: Duration) -> Result<usize> {
        let cutoff = (Utc::now() - max_age).timestamp_millis();
        let affected = self
            .conn
            .execute("DELETE FROM circuit_states WHERE timestamp < ?1", [cutoff])?;

        if affected > 0 {
            info!("Pruned {} old circuit states", affected);
        }
        Ok(affected)
    }

    /// Prune states to keep only the most recent N entries.
    ///
    /// Returns the number of states deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn prune_keep_recent(&self, keep_count: usize) -> Result<usize> {
        let keep_i64 = i64::try_from(keep_count).unwrap_or(i64::MAX);
        let affected = self.conn.execute(
            r"
            DELETE FROM circuit_states WHERE rowid NOT IN (
                SELECT rowid FROM circuit_states
                ORDER BY timestamp DESC, rowid ASC LIMIT ?1
            )
            ",
            [keep_i64],
        )?;

        if affected > 0 {
            info!(
                "Pruned {} circuit states to keep {} recent",
                affected, keep_count
            );
        }
        Ok(affected)
    }

    /// Apply both retention limits. A `max_states` of 0 or a `max_age` of
    /// `None` disables that limit.
    ///
    /// Returns the total number of states deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn apply_retention(&self, max_states: usize, max_age: Option<Duration>) -> Result<usize> {
        let mut removed = 0;
        if let Some(max_age) = max_age {
            removed += self.prune_older_than(max_age)?;
        }
        if max_states > 0 {
            removed += self.prune_keep_recent(max_states)?;
        }
        Ok(removed)
    }

    /// Get database statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StorageStats> {
        let total_states = self.count()?;

        let circuits: i64 = self.conn.query_row(
            "SELECT COUNT(DISTINCT circuit_type) FROM circuit_states",
            [],
            |row| row.get(0),
        )?;

        let (oldest, newest): (Option<i64>, Option<i64>) = self.conn.query_row(
            "SELECT MIN(timestamp), MAX(timestamp) FROM circuit_states",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        let has_preferences = self
            .conn
            .query_row("SELECT 1 FROM preferences WHERE id = 1", [], |_| Ok(()))
            .optional()?
            .is_some();

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            total_states,
            circuits,
            oldest_state: oldest.and_then(DateTime::from_timestamp_millis),
            newest_state: newest.and_then(DateTime::from_timestamp_millis),
            has_preferences,
            db_size_bytes,
        })
    }

    /// Convert a database row to a circuit state.
    ///
    /// Rows naming a circuit this build doesn't know are logged and skipped.
    fn row_to_state(row: &rusqlite::Row) -> rusqlite::Result<Option<CircuitState>> {
        let id: String = row.get(0)?;
        let circuit_type: String = row.get(1)?;
        let inputs_json: String = row.get(2)?;
        let timestamp: i64 = row.get(3)?;
        let mode: Option<String> = row.get(4)?;

        let Some(kind) = CircuitKind::from_id(&circuit_type) else {
            warn!("Skipping state {} with unknown circuit type: {}", id, circuit_type);
            return Ok(None);
        };

        let inputs: InputSet = serde_json::from_str(&inputs_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(Some(CircuitState {
            id,
            circuit_type: kind,
            inputs,
            timestamp,
            mode,
        }))
    }
}

impl StateStore for Storage {
    fn save_state(&mut self, state: &CircuitState) -> Result<bool> {
        state.validate()?;
        let latest = self.latest_state(state.circuit_type)?;
        if repeats_latest(latest.as_ref(), state) {
            debug!(id = %state.id, "Skipping unchanged circuit state");
            return Ok(false);
        }
        self.upsert(state)?;
        Ok(true)
    }

    fn get_state(&self, id: &str) -> Result<Option<CircuitState>> {
        let result = self
            .conn
            .query_row(
                &format!("SELECT {STATE_COLUMNS} FROM circuit_states WHERE id = ?1"),
                [id],
                Self::row_to_state,
            )
            .optional()?;
        Ok(result.flatten())
    }

    fn all_states(&self) -> Result<Vec<CircuitState>> {
        self.query_states(
            &format!("SELECT {STATE_COLUMNS} FROM circuit_states ORDER BY rowid ASC"),
            [],
        )
    }

    fn latest_state(&self, kind: CircuitKind) -> Result<Option<CircuitState>> {
        Ok(self.recent(Some(kind), 1)?.into_iter().next())
    }

    fn save_preferences(&mut self, prefs: &UserPreferences) -> Result<()> {
        let data = serde_json::to_string(prefs)?;
        self.conn.execute(
            r"
            INSERT INTO preferences (id, data) VALUES (1, ?1)
            ON CONFLICT(id) DO UPDATE SET data = excluded.data, updated_at = datetime('now')
            ",
            [data],
        )?;
        debug!("Saved user preferences");
        Ok(())
    }

    fn preferences(&self) -> Result<Option<UserPreferences>> {
        let data: Option<String> = self
            .conn
            .query_row("SELECT data FROM preferences WHERE id = 1", [], |row| {
                row.get(0)
            })
            .optional()?;
        data.map(|d| serde_json::from_str(&d).map_err(Error::from))
            .transpose()
    }
}

/// Statistics about the storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    /// Total number of circuit states stored.
    pub total_states: i64,
    /// Number of distinct circuits with saved state.
    pub circuits: i64,
    /// Timestamp of the oldest state.
    pub oldest_state: Option<DateTime<Utc>>,
    /// Timestamp of the newest state.
    pub newest_state: Option<DateTime<Utc>>,
    /// Whether a preferences record exists.
    pub has_preferences: bool,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}

//! `SQLite` schema definitions for gatelab.
//!
//! These statements create the version 1 layout. Later columns are added by
//! [`super::migrations`].

/// SQL statement to create the circuit states table.
///
/// `rowid` preserves insertion order; upserts keep the original row.
pub const CREATE_STATES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS circuit_states (
    id TEXT PRIMARY KEY NOT NULL,
    circuit_type TEXT NOT NULL,
    inputs TEXT NOT NULL,
    fingerprint TEXT NOT NULL,
    timestamp INTEGER NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// SQL statement to create an index for latest-state lookups.
pub const CREATE_TYPE_TIMESTAMP_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_states_type_timestamp
    ON circuit_states(circuit_type, timestamp DESC)
";

/// SQL statement to create an index on timestamp for pruning.
pub const CREATE_TIMESTAMP_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_states_timestamp ON circuit_states(timestamp DESC)
";

/// SQL statement to create the single-row preferences table.
pub const CREATE_PREFERENCES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS preferences (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    data TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_STATES_TABLE,
    CREATE_TYPE_TIMESTAMP_INDEX,
    CREATE_TIMESTAMP_INDEX,
    CREATE_PREFERENCES_TABLE,
    CREATE_METADATA_TABLE,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_statements_not_empty() {
        assert!(!SCHEMA_STATEMENTS.is_empty());
        for stmt in SCHEMA_STATEMENTS {
            assert!(!stmt.trim().is_empty());
        }
    }

    #[test]
    fn test_states_table_columns() {
        assert!(CREATE_STATES_TABLE.contains("id TEXT PRIMARY KEY"));
        assert!(CREATE_STATES_TABLE.contains("circuit_type TEXT NOT NULL"));
        assert!(CREATE_STATES_TABLE.contains("inputs TEXT NOT NULL"));
        assert!(CREATE_STATES_TABLE.contains("timestamp INTEGER NOT NULL"));
        // Added by migration 2.
        assert!(!CREATE_STATES_TABLE.contains("mode"));
    }

    #[test]
    fn test_preferences_table_is_single_row() {
        assert!(CREATE_PREFERENCES_TABLE.contains("CHECK (id = 1)"));
    }
}

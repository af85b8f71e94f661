//! SQL schema for the mapping store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
///
/// Both unique indexes are partial over active rows, so a soft-deleted
/// mapping never blocks re-creating its `sys_id` or name/version pair.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS api_mappings (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    sys_id      TEXT NOT NULL,   -- field shape is validated by the service
    api_id      TEXT NOT NULL,
    api_name    TEXT NOT NULL,
    api_version TEXT NOT NULL,
    created_at  TEXT NOT NULL,   -- ISO 8601 UTC; store-assigned
    updated_at  TEXT NOT NULL,   -- ISO 8601 UTC; refreshed on every update
    deleted_at  TEXT             -- NULL while active
);

CREATE UNIQUE INDEX IF NOT EXISTS uk_sys_id
    ON api_mappings(sys_id) WHERE deleted_at IS NULL;
CREATE UNIQUE INDEX IF NOT EXISTS uk_api_name_version
    ON api_mappings(api_name, api_version) WHERE deleted_at IS NULL;
CREATE INDEX IF NOT EXISTS idx_api_id     ON api_mappings(api_id);
CREATE INDEX IF NOT EXISTS idx_deleted_at ON api_mappings(deleted_at);

PRAGMA user_version = 1;
";

pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS kv (
    key         TEXT PRIMARY KEY NOT NULL,
    value       TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1, applied by `SqliteStore::migrate`.
/// Each entry is (from_version, sql). Empty while the `kv` table is at version 1;
/// a future layout change lands here and bumps `CURRENT_VERSION`.
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];

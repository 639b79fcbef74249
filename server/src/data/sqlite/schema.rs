//! SQLite schema definitions

/// Current schema version
pub const SCHEMA_VERSION: i32 = 2;

/// Complete schema SQL for a fresh database (already at [`SCHEMA_VERSION`])
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Infrastructure: Schema version tracking
-- =============================================================================
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at INTEGER NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at INTEGER NOT NULL,
    checksum TEXT NOT NULL,
    execution_time_ms INTEGER,
    success INTEGER NOT NULL DEFAULT 1
);

-- =============================================================================
-- Markets (registro is the business key)
-- =============================================================================
CREATE TABLE IF NOT EXISTS markets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    long TEXT NOT NULL DEFAULT '',
    lat TEXT NOT NULL DEFAULT '',
    setcens TEXT NOT NULL DEFAULT '',
    areap TEXT NOT NULL DEFAULT '',
    coddist INTEGER NOT NULL DEFAULT 0,
    distrito TEXT NOT NULL,
    codsubpref INTEGER NOT NULL DEFAULT 0,
    subprefe TEXT NOT NULL DEFAULT '',
    regiao5 TEXT NOT NULL,
    regiao8 TEXT NOT NULL DEFAULT '',
    nome_feira TEXT NOT NULL,
    registro TEXT NOT NULL UNIQUE CHECK(length(registro) >= 1 AND length(registro) <= 20),
    logradouro TEXT NOT NULL,
    numero TEXT NOT NULL DEFAULT '',
    bairro TEXT NOT NULL,
    referencia TEXT NOT NULL DEFAULT '',
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_markets_distrito ON markets(distrito);
CREATE INDEX IF NOT EXISTS idx_markets_regiao5 ON markets(regiao5);
CREATE INDEX IF NOT EXISTS idx_markets_bairro ON markets(bairro);
"#;

/// v2: lookup indexes for the most common filter columns.
///
/// `SCHEMA` already creates them, so on a fresh database this is a no-op that
/// only records the version. It adds the indexes to databases created at v1.
pub const MIGRATION_V2: &str = r#"
CREATE INDEX IF NOT EXISTS idx_markets_distrito ON markets(distrito);
CREATE INDEX IF NOT EXISTS idx_markets_regiao5 ON markets(regiao5);
CREATE INDEX IF NOT EXISTS idx_markets_bairro ON markets(bairro)
"#;

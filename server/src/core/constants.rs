// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display and platform directories)
pub const APP_NAME: &str = "Feiras";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "feiras";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".feiras";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "feiras.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "FEIRAS_CONFIG";

// =============================================================================
// Environment Variables - Debug
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "FEIRAS_DEBUG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "FEIRAS_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "FEIRAS_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "FEIRAS_LOG";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5390;

// =============================================================================
// Environment Variables - Storage
// =============================================================================

/// Environment variable to override data directory
pub const ENV_DATA_DIR: &str = "FEIRAS_DATA_DIR";

/// Environment variable for the SQLite pool size
pub const ENV_DB_MAX_CONNECTIONS: &str = "FEIRAS_DB_MAX_CONNECTIONS";

// =============================================================================
// SQLite Database
// =============================================================================

/// SQLite database filename
pub const SQLITE_DB_FILENAME: &str = "feiras.db";

/// SQLite connection pool max connections
pub const SQLITE_MAX_CONNECTIONS: u32 = 5;

/// SQLite busy timeout in seconds
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 30;

/// SQLite cache size (negative = KB, so -64000 = 64MB)
pub const SQLITE_CACHE_SIZE: &str = "-64000";

/// SQLite WAL auto-checkpoint threshold (pages, ~4MB at 1000)
pub const SQLITE_WAL_AUTOCHECKPOINT: &str = "1000";

/// WAL checkpoint interval in seconds (5 minutes)
pub const SQLITE_CHECKPOINT_INTERVAL_SECS: u64 = 300;

// =============================================================================
// HTTP
// =============================================================================

/// Default request body limit (1 MB)
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Base path of the market resource
pub const MARKETS_BASE_PATH: &str = "/api/v1/markets";

// =============================================================================
// Shutdown
// =============================================================================

/// Max time to wait for background tasks on shutdown
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Import
// =============================================================================

/// Progress is logged every this many CSV rows
pub const IMPORT_PROGRESS_INTERVAL: u64 = 100;

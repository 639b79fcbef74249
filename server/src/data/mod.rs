//! Data storage layer
//!
//! - `sqlite` - Embedded database holding market records
//! - `types` - Row types returned by repositories
//! - `traits` - Repository trait the domain layer depends on
//! - `error` - Unified error type

pub mod error;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use error::DataError;
pub use sqlite::SqliteService;
pub use traits::MarketRepository;
pub use types::MarketRow;

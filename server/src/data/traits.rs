//! Repository traits for the storage backend

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::types::MarketRow;
use crate::domain::markets::{Market, MarketChanges};
use crate::domain::query::FilterObject;

/// Repository trait for market records, keyed by register code
#[async_trait]
pub trait MarketRepository: Send + Sync {
    /// Insert a market unless one with the same register code exists.
    /// Returns the created row, or None if the register code was taken.
    async fn insert(&self, market: &Market) -> Result<Option<MarketRow>, DataError>;

    async fn find_by_register_code(&self, registro: &str) -> Result<Option<MarketRow>, DataError>;

    /// Markets matching every filter criterion (exact match), ordered by id
    async fn find_by_filter(&self, filter: &FilterObject) -> Result<Vec<MarketRow>, DataError>;

    /// Partial update. Returns None if the register code is unknown.
    async fn update(
        &self,
        registro: &str,
        changes: &MarketChanges,
    ) -> Result<Option<MarketRow>, DataError>;

    /// Returns true if a market was deleted
    async fn delete(&self, registro: &str) -> Result<bool, DataError>;

    async fn count(&self) -> Result<i64, DataError>;
}

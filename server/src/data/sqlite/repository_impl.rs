//! MarketRepository implementation for SQLite

use std::sync::Arc;

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::traits::MarketRepository;
use crate::data::types::MarketRow;
use crate::domain::markets::{Market, MarketChanges};
use crate::domain::query::FilterObject;

use super::SqliteService;
use super::repositories::market;

#[async_trait]
impl MarketRepository for Arc<SqliteService> {
    async fn insert(&self, market: &Market) -> Result<Option<MarketRow>, DataError> {
        market::insert_market(self.pool(), market)
            .await
            .map_err(Into::into)
    }

    async fn find_by_register_code(&self, registro: &str) -> Result<Option<MarketRow>, DataError> {
        market::get_market(self.pool(), registro)
            .await
            .map_err(Into::into)
    }

    async fn find_by_filter(&self, filter: &FilterObject) -> Result<Vec<MarketRow>, DataError> {
        market::find_markets(self.pool(), filter)
            .await
            .map_err(Into::into)
    }

    async fn update(
        &self,
        registro: &str,
        changes: &MarketChanges,
    ) -> Result<Option<MarketRow>, DataError> {
        market::update_market(self.pool(), registro, changes)
            .await
            .map_err(Into::into)
    }

    async fn delete(&self, registro: &str) -> Result<bool, DataError> {
        market::delete_market(self.pool(), registro)
            .await
            .map_err(Into::into)
    }

    async fn count(&self) -> Result<i64, DataError> {
        market::count_markets(self.pool())
            .await
            .map_err(Into::into)
    }
}

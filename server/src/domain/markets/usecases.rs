//! Market use-case interfaces

use async_trait::async_trait;
use thiserror::Error;

use super::model::{CreateOutcome, Market, MarketChanges};
use crate::data::DataError;
use crate::domain::query::FilterObject;

#[derive(Error, Debug)]
pub enum MarketError {
    #[error("market with register code '{0}' not found")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(#[from] DataError),
}

#[async_trait]
pub trait CreateMarketUseCase: Send + Sync {
    /// Store a market unless its register code is taken, in which case the
    /// stored record is returned unchanged.
    async fn execute(&self, market: Market) -> Result<CreateOutcome, MarketError>;
}

#[async_trait]
pub trait GetMarketByQueryUseCase: Send + Sync {
    /// Markets matching every set criterion, ordered by id
    async fn execute(&self, filter: &FilterObject) -> Result<Vec<Market>, MarketError>;
}

#[async_trait]
pub trait UpdateMarketUseCase: Send + Sync {
    async fn execute(&self, registro: &str, changes: MarketChanges) -> Result<Market, MarketError>;
}

#[async_trait]
pub trait DeleteMarketUseCase: Send + Sync {
    async fn execute(&self, registro: &str) -> Result<(), MarketError>;
}

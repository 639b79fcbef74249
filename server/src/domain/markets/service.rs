//! Repository-backed market use cases

use std::sync::Arc;

use async_trait::async_trait;

use super::model::{CreateOutcome, Market, MarketChanges};
use super::usecases::{
    CreateMarketUseCase, DeleteMarketUseCase, GetMarketByQueryUseCase, MarketError,
    UpdateMarketUseCase,
};
use crate::data::MarketRepository;
use crate::domain::query::FilterObject;

/// Implements every market use case over a [`MarketRepository`]
#[derive(Clone)]
pub struct MarketService {
    repository: Arc<dyn MarketRepository>,
}

impl MarketService {
    pub fn new(repository: Arc<dyn MarketRepository>) -> Self {
        Self { repository }
    }

    async fn stored(&self, registro: &str) -> Result<Market, MarketError> {
        self.repository
            .find_by_register_code(registro)
            .await?
            .map(Market::from)
            .ok_or_else(|| MarketError::NotFound(registro.to_string()))
    }
}

#[async_trait]
impl CreateMarketUseCase for MarketService {
    async fn execute(&self, market: Market) -> Result<CreateOutcome, MarketError> {
        if let Some(row) = self.repository.insert(&market).await? {
            let created = Market::from(row);
            tracing::info!(registro = %created.registro, id = created.id, "Market created");
            return Ok(CreateOutcome::Created(created));
        }

        let stored = self.stored(&market.registro).await?;
        tracing::debug!(registro = %stored.registro, "Market already exists");
        Ok(CreateOutcome::AlreadyExists(stored))
    }
}

#[async_trait]
impl GetMarketByQueryUseCase for MarketService {
    async fn execute(&self, filter: &FilterObject) -> Result<Vec<Market>, MarketError> {
        let rows = self.repository.find_by_filter(filter).await?;
        tracing::debug!(criteria = filter.len(), results = rows.len(), "Market query");
        Ok(rows.into_iter().map(Market::from).collect())
    }
}

#[async_trait]
impl UpdateMarketUseCase for MarketService {
    async fn execute(&self, registro: &str, changes: MarketChanges) -> Result<Market, MarketError> {
        if changes.is_empty() {
            return self.stored(registro).await;
        }

        let row = self
            .repository
            .update(registro, &changes)
            .await?
            .ok_or_else(|| MarketError::NotFound(registro.to_string()))?;

        tracing::info!(%registro, "Market updated");
        Ok(row.into())
    }
}

#[async_trait]
impl DeleteMarketUseCase for MarketService {
    async fn execute(&self, registro: &str) -> Result<(), MarketError> {
        if !self.repository.delete(registro).await? {
            return Err(MarketError::NotFound(registro.to_string()));
        }
        tracing::info!(%registro, "Market deleted");
        Ok(())
    }
}

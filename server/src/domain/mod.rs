//! Domain logic for the street market registry
//!
//! - `query` - Binding of query-string parameters into typed filters
//! - `markets` - Market model, use cases and CSV import

pub mod markets;
pub mod query;

pub use markets::{
    CreateMarketUseCase, DeleteMarketUseCase, GetMarketByQueryUseCase, MarketService,
    UpdateMarketUseCase,
};

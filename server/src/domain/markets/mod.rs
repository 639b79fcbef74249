//! Market resource
//!
//! - `model` - Market value objects
//! - `usecases` - One trait per operation, the seam handlers depend on
//! - `service` - Repository-backed implementation of every use case
//! - `filters` - Query parameters accepted when searching markets
//! - `import` - Bulk load from the public CSV dataset

mod filters;
mod import;
mod model;
mod service;
mod usecases;

pub use filters::market_filter_spec;
pub use import::{ImportError, ImportSummary, import_csv, import_file};
pub use model::{CreateOutcome, Market, MarketChanges};
pub use service::MarketService;
pub use usecases::{
    CreateMarketUseCase, DeleteMarketUseCase, GetMarketByQueryUseCase, MarketError,
    UpdateMarketUseCase,
};

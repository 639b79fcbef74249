//! Row types shared by the data layer and its callers

mod market;

pub use market::{MARKET_COLUMNS, MarketRow};

//! SQLite repositories
//!
//! Row types are imported from `crate::data::types`.

pub mod market;

pub use market::{
    count_markets, delete_market, find_markets, get_market, insert_market, update_market,
};

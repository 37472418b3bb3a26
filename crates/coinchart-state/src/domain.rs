// File: crates/coinchart-state/src/domain.rs
// Summary: Coin domain models.

use chrono::{DateTime, Utc};

#[derive(Clone, Debug, PartialEq)]
pub struct Coin {
    pub id: String,
    pub rank: u32,
    pub name: String,
    pub symbol: String,
    pub market_cap_usd: f64,
    pub price_usd: f64,
    pub change_percent_24hr: f64,
}

/// One sample of a coin's price history.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoinPrice {
    pub price_usd: f64,
    pub date_time: DateTime<Utc>,
}

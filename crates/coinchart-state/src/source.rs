// File: crates/coinchart-state/src/source.rs
// Summary: Data source seam for the coin list and price history.

use chrono::{DateTime, Utc};

use crate::cancel::CancellationToken;
use crate::domain::{Coin, CoinPrice};
use crate::error::FetchError;

/// Blocking data source. Implementations should check `cancel` before and
/// after any slow step and return `FetchError::Cancelled` when it is set.
pub trait CoinDataSource {
    fn get_coins(&self, cancel: &CancellationToken) -> Result<Vec<Coin>, FetchError>;

    fn get_coin_history(
        &self,
        coin_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Result<Vec<CoinPrice>, FetchError>;
}

// File: crates/coinchart-state/src/models.rs
// Summary: Presentation models and the price-history -> chart data mapper.

use chrono::{DateTime, TimeZone, Timelike, Utc};
use coinchart_core::label::format_grouped;
use coinchart_core::DataPoint;

use crate::domain::{Coin, CoinPrice};

/// Raw value with its display string (two fraction digits, grouped).
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayableNumber {
    pub value: f64,
    pub formatted: String,
}

impl From<f64> for DisplayableNumber {
    fn from(value: f64) -> Self {
        Self { value, formatted: format_grouped(value, 2, 2) }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CoinUi {
    pub id: String,
    pub rank: u32,
    pub name: String,
    pub symbol: String,
    pub market_cap_usd: DisplayableNumber,
    pub price_usd: DisplayableNumber,
    pub change_percent_24hr: DisplayableNumber,
    pub price_history: Vec<DataPoint>,
}

impl From<Coin> for CoinUi {
    fn from(c: Coin) -> Self {
        Self {
            id: c.id,
            rank: c.rank,
            name: c.name,
            symbol: c.symbol,
            market_cap_usd: c.market_cap_usd.into(),
            price_usd: c.price_usd.into(),
            change_percent_24hr: c.change_percent_24hr.into(),
            price_history: Vec::new(),
        }
    }
}

/// Sort by time and map each sample to a chart point in `tz`: x is the
/// hour of day, y the price, label like `"3PM\n10/14"`.
pub fn history_to_data_points<Tz: TimeZone>(history: &[CoinPrice], tz: &Tz) -> Vec<DataPoint>
where
    Tz::Offset: std::fmt::Display,
{
    let mut sorted: Vec<&CoinPrice> = history.iter().collect();
    sorted.sort_by_key(|p| p.date_time);
    sorted
        .into_iter()
        .map(|p| {
            let local: DateTime<Tz> = p.date_time.with_timezone(tz);
            DataPoint::new(local.hour() as f64, p.price_usd, local.format("%-I%p\n%-m/%-d").to_string())
        })
        .collect()
}

/// Five-day window ending at `now`, as requested when a coin is opened.
pub fn history_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    (now - chrono::Duration::days(5), now)
}

// File: crates/demo/src/csv_source.rs
// Summary: CoinDataSource backed by a local price-history CSV (one coin per file).

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use coinchart_state::{CancellationToken, Coin, CoinDataSource, CoinPrice, FetchError};
use tracing::{info, warn};

pub struct CsvCoinSource {
    coin: Coin,
    history: Vec<CoinPrice>,
}

impl CsvCoinSource {
    pub fn open(path: &Path) -> Result<Self> {
        let history = load_price_csv(path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
        if history.is_empty() {
            anyhow::bail!("no prices loaded from {}; check headers/delimiter.", path.display());
        }
        let id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| s.split('_').next())
            .filter(|s| !s.is_empty())
            .unwrap_or("coin")
            .to_lowercase();
        let last = history.iter().max_by_key(|p| p.date_time).map(|p| p.price_usd).unwrap_or_default();
        let first = history.iter().min_by_key(|p| p.date_time).map(|p| p.price_usd).unwrap_or_default();
        let change = if first != 0.0 { (last - first) / first * 100.0 } else { 0.0 };
        let coin = Coin {
            symbol: id.chars().take(3).collect::<String>().to_uppercase(),
            name: id.clone(),
            id,
            rank: 1,
            market_cap_usd: 0.0,
            price_usd: last,
            change_percent_24hr: change,
        };
        Ok(Self { coin, history })
    }

    /// Timestamp of the newest sample; used as "now" so the history window covers the file.
    pub fn latest(&self) -> DateTime<Utc> {
        self.history.iter().map(|p| p.date_time).max().unwrap_or_else(Utc::now)
    }
}

impl CoinDataSource for CsvCoinSource {
    fn get_coins(&self, cancel: &CancellationToken) -> Result<Vec<Coin>, FetchError> {
        cancel.check()?;
        Ok(vec![self.coin.clone()])
    }

    fn get_coin_history(
        &self,
        coin_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Result<Vec<CoinPrice>, FetchError> {
        cancel.check()?;
        if coin_id != self.coin.id {
            return Ok(Vec::new());
        }
        Ok(self
            .history
            .iter()
            .filter(|p| p.date_time >= start && p.date_time <= end)
            .copied()
            .collect())
    }
}

/// Load a `time,price` CSV. Header names are matched loosely.
fn load_price_csv(path: &Path) -> Result<Vec<CoinPrice>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.trim().to_lowercase()).collect::<Vec<_>>();
    info!(?headers, "csv headers");

    let idx = |names: &[&str]| headers.iter().position(|h| names.contains(&h.as_str()));
    let i_time = idx(&["time", "timestamp", "open_time", "date", "datetime"])
        .context("no time column (time/timestamp/date)")?;
    let i_price = idx(&["price", "priceusd", "price_usd", "close", "c"]).context("no price column (price/close)")?;

    let mut out = Vec::new();
    let mut skipped = 0usize;
    for rec in rdr.records() {
        let rec = rec?;
        let time = rec.get(i_time).and_then(parse_time);
        let price = rec.get(i_price).and_then(|s| s.trim().parse::<f64>().ok()).filter(|p| p.is_finite());
        match (time, price) {
            (Some(date_time), Some(price_usd)) => out.push(CoinPrice { price_usd, date_time }),
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!(skipped, "skipped unparseable rows");
    }
    Ok(out)
}

/// Epoch milliseconds, epoch seconds or RFC 3339.
fn parse_time(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<i64>() {
        if n > 10_i64.pow(12) {
            return DateTime::from_timestamp_millis(n);
        }
        return DateTime::from_timestamp(n, 0);
    }
    DateTime::parse_from_rfc3339(s).ok().map(|d| d.with_timezone(&Utc))
}

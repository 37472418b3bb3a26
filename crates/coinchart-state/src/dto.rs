// File: crates/coinchart-state/src/dto.rs
// Summary: JSON payloads of the assets REST API and their mapping to domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::domain::{Coin, CoinPrice};
use crate::error::NetworkError;

#[derive(Debug, Deserialize)]
pub struct CoinResponseDto {
    pub data: Vec<CoinDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinDto {
    pub id: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub rank: f64,
    pub name: String,
    pub symbol: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub market_cap_usd: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub price_usd: f64,
    #[serde(rename = "changePercent24Hr", deserialize_with = "lenient_f64")]
    pub change_percent_24hr: f64,
}

#[derive(Debug, Deserialize)]
pub struct CoinHistoryDto {
    pub data: Vec<CoinPriceDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinPriceDto {
    #[serde(deserialize_with = "lenient_f64")]
    pub price_usd: f64,
    /// Epoch milliseconds.
    pub time: i64,
}

/// The API ships numbers either as JSON numbers or as decimal strings.
fn lenient_f64<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Num {
        F(f64),
        S(String),
    }
    match Num::deserialize(de)? {
        Num::F(v) => Ok(v),
        Num::S(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

impl CoinDto {
    pub fn into_coin(self) -> Coin {
        Coin {
            id: self.id,
            rank: self.rank.max(0.0) as u32,
            name: self.name,
            symbol: self.symbol,
            market_cap_usd: self.market_cap_usd,
            price_usd: self.price_usd,
            change_percent_24hr: self.change_percent_24hr,
        }
    }
}

impl CoinPriceDto {
    pub fn into_coin_price(self) -> Result<CoinPrice, NetworkError> {
        let date_time = DateTime::<Utc>::from_timestamp_millis(self.time).ok_or(NetworkError::Serialization)?;
        Ok(CoinPrice { price_usd: self.price_usd, date_time })
    }
}

pub fn parse_coins(json: &str) -> Result<Vec<Coin>, NetworkError> {
    let res: CoinResponseDto = serde_json::from_str(json).map_err(|_| NetworkError::Serialization)?;
    Ok(res.data.into_iter().map(CoinDto::into_coin).collect())
}

pub fn parse_history(json: &str) -> Result<Vec<CoinPrice>, NetworkError> {
    let res: CoinHistoryDto = serde_json::from_str(json).map_err(|_| NetworkError::Serialization)?;
    res.data.into_iter().map(CoinPriceDto::into_coin_price).collect()
}

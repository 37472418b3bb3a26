// File: crates/coinchart-state/src/remote.rs
// Summary: CoinDataSource over the assets REST API, generic over the transport that fetches payloads.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::cancel::CancellationToken;
use crate::domain::{Coin, CoinPrice};
use crate::dto::{parse_coins, parse_history};
use crate::error::{FetchError, NetworkError};
use crate::source::CoinDataSource;

/// History sampling interval requested from the API.
pub const HISTORY_INTERVAL: &str = "h6";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn ok(body: impl Into<String>) -> Self {
        Self { status: 200, body: body.into() }
    }
}

/// One GET against the API. `path` is relative to the API root, e.g. `/assets`.
/// Failures that never produced a response (offline, timeout) come back as `Err`.
pub trait Transport {
    fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Response, NetworkError>;
}

pub struct RemoteCoinDataSource<T> {
    transport: T,
}

impl<T: Transport> RemoteCoinDataSource<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn fetch(&self, path: &str, params: &[(&str, String)], cancel: &CancellationToken) -> Result<String, FetchError> {
        cancel.check()?;
        let res = self.transport.get(path, params).inspect_err(|e| warn!(path, error = ?e, "request failed"))?;
        cancel.check()?;
        if let Some(err) = NetworkError::from_status(res.status) {
            warn!(path, status = res.status, error = ?err, "request rejected");
            return Err(err.into());
        }
        debug!(path, status = res.status, bytes = res.body.len(), "response received");
        Ok(res.body)
    }
}

impl<T: Transport> CoinDataSource for RemoteCoinDataSource<T> {
    fn get_coins(&self, cancel: &CancellationToken) -> Result<Vec<Coin>, FetchError> {
        let body = self.fetch("/assets", &[], cancel)?;
        Ok(parse_coins(&body)?)
    }

    fn get_coin_history(
        &self,
        coin_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Result<Vec<CoinPrice>, FetchError> {
        let params = [
            ("interval", HISTORY_INTERVAL.to_string()),
            ("start", start.timestamp_millis().to_string()),
            ("end", end.timestamp_millis().to_string()),
        ];
        let body = self.fetch(&format!("/assets/{coin_id}/history"), &params, cancel)?;
        Ok(parse_history(&body)?)
    }
}
